//! Total card volume extraction.

use tracing::trace;

use crate::models::config::ExtractionConfig;
use crate::models::statement::{Candidate, ExtractionStage, StatementFact};

use super::patterns::{AMOUNTS_SUBMITTED, VOLUME_FALLBACK_WORDS, VOLUME_KEYWORDS};
use super::scoring::{neighborhood_bonus, score_volume};
use super::select::{best_by_score_then_value, largest_value};
use super::{money_tokens, FactExtractor, LineIndex, Selection};

/// Volume extractor.
pub struct VolumeExtractor {
    radius: usize,
    lookahead: usize,
}

impl VolumeExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            radius: config.neighborhood_radius,
            lookahead: config.direct_lookahead,
        }
    }

    fn keyword_candidates(&self, index: &LineIndex<'_>) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for (k, j) in index.keyword_neighborhoods(VOLUME_KEYWORDS, self.radius) {
            let score = score_volume(index.lower(k)) + neighborhood_bonus(index.lower(j));
            for token in money_tokens(&index.line(j).text) {
                if token.value.is_zero() {
                    continue;
                }
                candidates.push(Candidate::new(token.value, score, index.line(j)).with_negative(token.negative));
            }
        }
        candidates
    }

    fn fallback_candidates(&self, index: &LineIndex<'_>) -> Vec<Candidate> {
        index
            .lines_containing(VOLUME_FALLBACK_WORDS)
            .into_iter()
            .flat_map(|i| {
                let score = score_volume(index.lower(i));
                money_tokens(&index.line(i).text)
                    .into_iter()
                    .filter(|t| !t.value.is_zero())
                    .map(move |t| Candidate::new(t.value, score, index.line(i)).with_negative(t.negative))
            })
            .collect()
    }
}

impl Default for VolumeExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl FactExtractor for VolumeExtractor {
    fn fact(&self) -> StatementFact {
        StatementFact::Volume
    }

    fn extract(&self, index: &LineIndex<'_>) -> Option<Selection> {
        if let Some(candidate) = index.direct_label_amount(&AMOUNTS_SUBMITTED, self.lookahead, true) {
            return Some(Selection::new(candidate, ExtractionStage::DirectPattern));
        }

        let candidates = self.keyword_candidates(index);
        trace!("{} volume keyword candidates", candidates.len());
        if let Some(best) = best_by_score_then_value(&candidates) {
            return Some(Selection::new(best.clone(), ExtractionStage::KeywordSearch));
        }

        let candidates = self.fallback_candidates(index);
        trace!("{} volume fallback candidates", candidates.len());
        largest_value(&candidates).map(|best| Selection::new(best.clone(), ExtractionStage::Fallback))
    }
}
