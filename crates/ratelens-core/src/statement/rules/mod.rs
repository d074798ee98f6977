//! Rule-based extractors for processing statement totals.

pub mod fees;
pub mod patterns;
pub mod scoring;
pub mod select;
pub mod tokens;
pub mod transactions;
pub mod volume;

pub use fees::FeesExtractor;
pub use tokens::{has_negative_amount, int_tokens, money_tokens, non_money_int_tokens, IntToken, MoneyToken};
pub use transactions::TransactionsExtractor;
pub use volume::VolumeExtractor;

use regex::Regex;

use crate::models::statement::{Candidate, ExtractionStage, StatementFact, StatementLine};

use scoring::DIRECT_PATTERN_SCORE;

/// Trait for single-fact extractors.
pub trait FactExtractor {
    /// The fact this extractor locates.
    fn fact(&self) -> StatementFact;

    /// Run the search cascade; the first stage with candidates wins.
    fn extract(&self, index: &LineIndex<'_>) -> Option<Selection>;
}

/// The winning candidate of a cascade and the stage that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub candidate: Candidate,
    pub stage: ExtractionStage,
}

impl Selection {
    pub fn new(candidate: Candidate, stage: ExtractionStage) -> Self {
        Self { candidate, stage }
    }
}

/// Normalized statement lines with their lowercase forms.
pub struct LineIndex<'a> {
    lines: &'a [StatementLine],
    lower: Vec<String>,
}

impl<'a> LineIndex<'a> {
    pub fn new(lines: &'a [StatementLine]) -> Self {
        Self {
            lines,
            lower: lines.iter().map(StatementLine::lower).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &'a [StatementLine] {
        self.lines
    }

    pub fn line(&self, i: usize) -> &'a StatementLine {
        &self.lines[i]
    }

    pub fn lower(&self, i: usize) -> &str {
        &self.lower[i]
    }

    /// Indices of lines whose lowercase text contains any of `words`.
    pub fn lines_containing(&self, words: &[&str]) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| patterns::contains_any(&self.lower[i], words))
            .collect()
    }

    /// `(keyword_line, neighbor_line)` pairs for every keyword hit and every
    /// line within `radius` of it, in reading order.
    pub fn keyword_neighborhoods(&self, keywords: &[&str], radius: usize) -> Vec<(usize, usize)> {
        let last = self.len().saturating_sub(1);
        self.lines_containing(keywords)
            .into_iter()
            .flat_map(|k| (k.saturating_sub(radius)..=(k + radius).min(last)).map(move |j| (k, j)))
            .collect()
    }

    /// First money token on a line matching `label`, looking up to
    /// `lookahead` lines further when the label line has no amount.
    /// With `skip_zero`, zero amounts are passed over.
    pub fn direct_label_amount(&self, label: &Regex, lookahead: usize, skip_zero: bool) -> Option<Candidate> {
        for i in (0..self.len()).filter(|&i| label.is_match(&self.lines[i].text)) {
            let end = (i + lookahead).min(self.len().saturating_sub(1));
            for j in i..=end {
                let found = money_tokens(&self.lines[j].text)
                    .into_iter()
                    .find(|t| !(skip_zero && t.value.is_zero()));
                if let Some(token) = found {
                    return Some(
                        Candidate::new(token.value, DIRECT_PATTERN_SCORE, &self.lines[j])
                            .with_negative(token.negative),
                    );
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn lines(texts: &[&str]) -> Vec<StatementLine> {
        texts.iter().map(|t| StatementLine::new(1, *t)).collect()
    }

    #[test]
    fn test_keyword_neighborhoods_clamp_to_bounds() {
        let lines = lines(&["Total Sales", "a", "b", "c"]);
        let index = LineIndex::new(&lines);
        assert_eq!(
            index.keyword_neighborhoods(&["total sales"], 2),
            vec![(0, 0), (0, 1), (0, 2)]
        );
    }

    #[test]
    fn test_direct_label_amount_looks_ahead() {
        let lines = lines(&["Amounts Submitted", "Visa", "$1,200.00"]);
        let index = LineIndex::new(&lines);
        let candidate = index
            .direct_label_amount(&patterns::AMOUNTS_SUBMITTED, 4, true)
            .unwrap();
        assert_eq!(candidate.value, Decimal::from_str("1200.00").unwrap());
        assert_eq!(candidate.source.text, "$1,200.00");
    }

    #[test]
    fn test_direct_label_amount_respects_window() {
        let lines = lines(&["Fees Charged", "a", "b", "c", "d", "$9.99"]);
        let index = LineIndex::new(&lines);
        assert!(index.direct_label_amount(&patterns::FEES_CHARGED, 4, false).is_none());
    }

    #[test]
    fn test_direct_label_amount_zero_handling() {
        let lines = lines(&["Amounts Submitted $0.00", "Net Deposit $5,000.00"]);
        let index = LineIndex::new(&lines);

        let kept = index.direct_label_amount(&patterns::AMOUNTS_SUBMITTED, 4, false).unwrap();
        assert_eq!(kept.value, Decimal::ZERO);

        let skipped = index.direct_label_amount(&patterns::AMOUNTS_SUBMITTED, 4, true).unwrap();
        assert_eq!(skipped.value, Decimal::from_str("5000.00").unwrap());
    }
}
