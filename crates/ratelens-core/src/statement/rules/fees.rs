//! Total fees extraction.

use tracing::trace;

use crate::models::config::ExtractionConfig;
use crate::models::statement::{Candidate, ExtractionStage, StatementFact};

use super::patterns::{FEES_CHARGED, FEE_FALLBACK_WORDS, FEE_KEYWORDS};
use super::scoring::{neighborhood_bonus, score_fees};
use super::select::{best_fee, largest_value};
use super::{has_negative_amount, money_tokens, FactExtractor, LineIndex, Selection};

/// Fees extractor.
pub struct FeesExtractor {
    radius: usize,
    lookahead: usize,
}

impl FeesExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            radius: config.neighborhood_radius,
            lookahead: config.direct_lookahead,
        }
    }

    fn keyword_candidates(&self, index: &LineIndex<'_>) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for (k, j) in index.keyword_neighborhoods(FEE_KEYWORDS, self.radius) {
            let score = score_fees(index.lower(k), has_negative_amount(&index.line(k).text))
                + neighborhood_bonus(index.lower(j));
            for token in money_tokens(&index.line(j).text) {
                candidates.push(Candidate::new(token.value, score, index.line(j)).with_negative(token.negative));
            }
        }
        candidates
    }

    fn fallback_candidates(&self, index: &LineIndex<'_>) -> Vec<Candidate> {
        index
            .lines_containing(FEE_FALLBACK_WORDS)
            .into_iter()
            .flat_map(|i| {
                let score = score_fees(index.lower(i), has_negative_amount(&index.line(i).text));
                money_tokens(&index.line(i).text)
                    .into_iter()
                    .map(move |t| Candidate::new(t.value, score, index.line(i)).with_negative(t.negative))
            })
            .collect()
    }
}

impl Default for FeesExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl FactExtractor for FeesExtractor {
    fn fact(&self) -> StatementFact {
        StatementFact::Fees
    }

    fn extract(&self, index: &LineIndex<'_>) -> Option<Selection> {
        if let Some(candidate) = index.direct_label_amount(&FEES_CHARGED, self.lookahead, false) {
            return Some(Selection::new(candidate, ExtractionStage::DirectPattern));
        }

        let candidates = self.keyword_candidates(index);
        trace!("{} fee keyword candidates", candidates.len());
        if let Some(best) = best_fee(&candidates) {
            return Some(Selection::new(best.clone(), ExtractionStage::KeywordSearch));
        }

        let candidates = self.fallback_candidates(index);
        trace!("{} fee fallback candidates", candidates.len());
        largest_value(&candidates).map(|best| Selection::new(best.clone(), ExtractionStage::Fallback))
    }
}
