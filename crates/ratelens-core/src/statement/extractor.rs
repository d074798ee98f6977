//! Statement totals extractor combining the per-fact rule cascades.

use std::time::Instant;

use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::statement::{ExtractionResult, ExtractionScores, ExtractionStages, StatementLine};

use super::normalize::normalize_text;
use super::rules::{FactExtractor, FeesExtractor, LineIndex, Selection, TransactionsExtractor, VolumeExtractor};
use super::{Result, TotalsExtractor};

/// Extracts volume, fees and transaction count from statement text.
pub struct StatementExtractor {
    volume: VolumeExtractor,
    fees: FeesExtractor,
    transactions: TransactionsExtractor,
}

impl StatementExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create an extractor from configuration.
    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            volume: VolumeExtractor::new(config),
            fees: FeesExtractor::new(config),
            transactions: TransactionsExtractor::new(config),
        }
    }

    fn run(&self, extractor: &dyn FactExtractor, index: &LineIndex<'_>) -> Option<Selection> {
        let selection = extractor.extract(index);
        match &selection {
            Some(s) => debug!(
                "{} = {} via {:?} (score {}, page {})",
                extractor.fact(),
                s.candidate.value,
                s.stage,
                s.candidate.score,
                s.candidate.source.page
            ),
            None => warn!("no {} candidate found", extractor.fact()),
        }
        selection
    }
}

impl Default for StatementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TotalsExtractor for StatementExtractor {
    fn extract_lines(&self, lines: &[StatementLine]) -> Result<ExtractionResult> {
        let index = LineIndex::new(lines);

        let volume = self.run(&self.volume, &index);
        let fees = self.run(&self.fees, &index);
        let transactions = self.run(&self.transactions, &index);

        let (volume, fees, transactions) = match (volume, fees, transactions) {
            (Some(v), Some(f), Some(t)) => (v, f, t),
            (v, f, t) => {
                let missing = [
                    (self.volume.fact(), v.is_none()),
                    (self.fees.fact(), f.is_none()),
                    (self.transactions.fact(), t.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(fact, _)| fact.as_str())
                .collect();
                return Err(ExtractionError::TotalsNotFound { missing });
            }
        };

        let count = transactions
            .candidate
            .value
            .floor()
            .to_u64()
            .filter(|n| *n > 0)
            .ok_or_else(|| ExtractionError::TotalsNotFound {
                missing: vec![self.transactions.fact().as_str()],
            })?;

        Ok(ExtractionResult {
            volume: volume.candidate.value,
            transactions: count,
            fees: fees.candidate.value,
            stages: ExtractionStages {
                volume: volume.stage,
                fees: fees.stage,
                transactions: transactions.stage,
            },
            scores: ExtractionScores {
                volume: volume.candidate.score,
                fees: fees.candidate.score,
                transactions: transactions.candidate.score,
            },
            sources: [volume.candidate.source, fees.candidate.source, transactions.candidate.source],
        })
    }

    fn extract(&self, text: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        info!("Extracting statement totals from {} characters of text", text.len());

        let lines = normalize_text(text);
        debug!(
            "Normalized into {} lines over {} pages",
            lines.len(),
            lines.last().map(|l| l.page).unwrap_or(0)
        );

        let result = self.extract_lines(&lines)?;

        debug!(
            "Extracted volume {} / fees {} / {} transactions in {}ms",
            result.volume,
            result.fees,
            result.transactions,
            start.elapsed().as_millis()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statement::ExtractionStage;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_extract_full_statement() {
        let text = "ACME MERCHANT SERVICES\n\
                    Statement Period 01/01/24 - 01/31/24\n\
                    \n\
                    Amounts Submitted $563,237.04\n\
                    Fees Charged ($12,871.92)\n\
                    \u{000C}\
                    SUMMARY BY CARD TYPE\n\
                    Card Type   Items   Amount\n\
                    Visa        700     $400,000.00\n\
                    Total       1,083   $563,237.04\n";

        let result = StatementExtractor::new().extract(text).unwrap();

        assert_eq!(result.volume, dec("563237.04"));
        assert_eq!(result.fees, dec("12871.92"));
        assert_eq!(result.transactions, 1083);
        assert_eq!(result.volume_source(), &StatementLine::new(1, "Amounts Submitted $563,237.04"));
        assert_eq!(result.fees_source(), &StatementLine::new(1, "Fees Charged ($12,871.92)"));
        assert_eq!(result.transactions_source(), &StatementLine::new(2, "Total 1,083 $563,237.04"));
        assert_eq!(result.stages.transactions, ExtractionStage::CardSummaryTable);
    }

    #[test]
    fn test_keyword_layout() {
        let text = "Monthly Summary\n\
                    Total Net Sales Volume USD 84,210.00\n\
                    Total Transactions 1,311\n\
                    Total Processing Fees -2,104.87\n";

        let result = StatementExtractor::new().extract(text).unwrap();

        assert_eq!(result.volume, dec("84210.00"));
        assert_eq!(result.transactions, 1311);
        assert_eq!(result.fees, dec("2104.87"));
        assert_eq!(result.stages.volume, ExtractionStage::KeywordSearch);
        assert_eq!(result.stages.fees, ExtractionStage::KeywordSearch);
    }

    #[test]
    fn test_missing_totals_fail_whole_extraction() {
        let err = StatementExtractor::new()
            .extract("Amounts Submitted $5,000.00\nThank you for your business")
            .unwrap_err();
        assert_eq!(
            err,
            ExtractionError::TotalsNotFound {
                missing: vec!["fees", "transactions"]
            }
        );
    }

    #[test]
    fn test_text_without_keywords_fails() {
        let result = StatementExtractor::new().extract("Hello\nWorld 123\n\u{000C}Page 2");
        assert!(matches!(result, Err(ExtractionError::TotalsNotFound { .. })));
    }

    #[test]
    fn test_empty_text_fails() {
        assert!(StatementExtractor::new().extract("").is_err());
    }
}
