//! Total transaction count extraction.
//!
//! Only whole numbers that are not part of a currency amount are counted.

use rust_decimal::Decimal;
use tracing::trace;

use crate::models::config::ExtractionConfig;
use crate::models::statement::{Candidate, ExtractionStage, StatementFact};

use super::patterns::{
    CARD_SUMMARY_HEADER, CARD_SUMMARY_TOTAL, STATEMENT_TRAILER, TRANSACTION_FALLBACK_WORDS,
    TRANSACTION_KEYWORDS,
};
use super::scoring::{neighborhood_bonus, score_transactions, DIRECT_PATTERN_SCORE};
use super::select::{best_by_score_then_value, largest_value};
use super::{non_money_int_tokens, FactExtractor, LineIndex, Selection};

/// Transaction count extractor.
pub struct TransactionsExtractor {
    radius: usize,
    summary_window: usize,
}

impl TransactionsExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            radius: config.neighborhood_radius,
            summary_window: config.card_summary_window,
        }
    }

    /// `Total<count>$<amount>` row of a "Summary by card type" table.
    fn card_summary_total(&self, index: &LineIndex<'_>) -> Option<Candidate> {
        let last = index.len().saturating_sub(1);
        for header in (0..index.len()).filter(|&i| CARD_SUMMARY_HEADER.is_match(&index.line(i).text)) {
            for j in (header + 1)..=(header + self.summary_window).min(last) {
                let compact: String = index.line(j).text.split_whitespace().collect();
                let count = CARD_SUMMARY_TOTAL
                    .captures_iter(&compact)
                    .filter(|caps| caps.get(0).is_some_and(|m| !is_subtotal(&compact[..m.start()])))
                    .find_map(|caps| parse_count(&caps[1]));
                if let Some(count) = count {
                    return Some(Candidate::new(Decimal::from(count), DIRECT_PATTERN_SCORE, index.line(j)));
                }
            }
        }
        None
    }

    /// `TOTAL $<amount> <count>` trailer, matched over the joined text.
    fn statement_trailer(&self, index: &LineIndex<'_>) -> Option<Candidate> {
        let collapsed = index
            .lines()
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let count = STATEMENT_TRAILER
            .captures_iter(&collapsed)
            .filter_map(|caps| caps.get(1))
            // "2,345.00" is an amount, not a count
            .filter(|m| !collapsed[m.end()..].starts_with('.'))
            .find_map(|m| parse_count(m.as_str()))?;

        let source = index.lines().iter().find(|l| l.text.contains("TOTAL"))?;
        Some(Candidate::new(Decimal::from(count), DIRECT_PATTERN_SCORE, source))
    }

    fn keyword_candidates(&self, index: &LineIndex<'_>) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for (k, j) in index.keyword_neighborhoods(TRANSACTION_KEYWORDS, self.radius) {
            let score = score_transactions(index.lower(k)) + neighborhood_bonus(index.lower(j));
            for token in non_money_int_tokens(&index.line(j).text) {
                if token.value == 0 {
                    continue;
                }
                candidates.push(Candidate::new(Decimal::from(token.value), score, index.line(j)));
            }
        }
        candidates
    }

    fn fallback_candidates(&self, index: &LineIndex<'_>) -> Vec<Candidate> {
        index
            .lines_containing(TRANSACTION_FALLBACK_WORDS)
            .into_iter()
            .flat_map(|i| {
                let score = score_transactions(index.lower(i));
                non_money_int_tokens(&index.line(i).text)
                    .into_iter()
                    .filter(|t| t.value > 0)
                    .map(move |t| Candidate::new(Decimal::from(t.value), score, index.line(i)))
            })
            .collect()
    }
}

impl Default for TransactionsExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl FactExtractor for TransactionsExtractor {
    fn fact(&self) -> StatementFact {
        StatementFact::Transactions
    }

    fn extract(&self, index: &LineIndex<'_>) -> Option<Selection> {
        if let Some(candidate) = self.card_summary_total(index) {
            return Some(Selection::new(candidate, ExtractionStage::CardSummaryTable));
        }

        if let Some(candidate) = self.statement_trailer(index) {
            return Some(Selection::new(candidate, ExtractionStage::StatementTrailer));
        }

        let candidates = self.keyword_candidates(index);
        trace!("{} transaction keyword candidates", candidates.len());
        if let Some(best) = best_by_score_then_value(&candidates) {
            return Some(Selection::new(best.clone(), ExtractionStage::KeywordSearch));
        }

        let candidates = self.fallback_candidates(index);
        trace!("{} transaction fallback candidates", candidates.len());
        largest_value(&candidates).map(|best| Selection::new(best.clone(), ExtractionStage::Fallback))
    }
}

/// `SubTotal` rows carry per-network figures.
fn is_subtotal(prefix: &str) -> bool {
    prefix.to_lowercase().ends_with("sub")
}

fn parse_count(digits: &str) -> Option<u64> {
    digits
        .replace(',', "")
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
}
