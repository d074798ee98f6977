//! Candidate selection policies.
//!
//! Volume and fees break score ties differently. Volume figures are usually
//! the largest number on their line, so equal scores go to the larger value.
//! Fees are usually printed negative; a negative amount beats any positive
//! one and equal scores keep the first candidate found. Keep the two
//! policies separate.

use std::cmp::Ordering;

use crate::models::statement::Candidate;

/// Higher score first, then larger value.
fn score_then_value(a: &Candidate, b: &Candidate) -> Ordering {
    b.score.cmp(&a.score).then_with(|| b.value.cmp(&a.value))
}

/// Highest score; ties go to the larger value.
///
/// Used for volume and transaction counts.
pub fn best_by_score_then_value(candidates: &[Candidate]) -> Option<&Candidate> {
    // min_by keeps the first of equal elements
    candidates.iter().min_by(|a, b| score_then_value(a, b))
}

/// Highest score; ties keep reading order.
pub fn best_by_score_first_found(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().min_by(|a, b| b.score.cmp(&a.score))
}

/// Fee selection: negative amounts only, if there are any.
pub fn best_fee(candidates: &[Candidate]) -> Option<&Candidate> {
    let negatives: Vec<&Candidate> = candidates.iter().filter(|c| c.negative).collect();
    if negatives.is_empty() {
        return best_by_score_first_found(candidates);
    }
    negatives.into_iter().min_by(|a, b| score_then_value(a, b))
}

/// Largest value; ties keep reading order.
pub fn largest_value(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().min_by(|a, b| b.value.cmp(&a.value))
}
