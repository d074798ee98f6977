//! Keyword scoring for candidate lines.
//!
//! Each scorer receives the lowercase text of the line that carried the
//! keyword hit and returns an additive score.

/// Score for candidates taken from a direct label ("Amounts Submitted",
/// "Fees Charged") or from a fixed table layout.
pub const DIRECT_PATTERN_SCORE: i32 = 10;

/// Score a volume keyword line.
pub fn score_volume(text: &str) -> i32 {
    let mut score = 0;
    if text.contains("total") {
        score += 2;
    }
    if text.contains("net") {
        score += 2;
    }
    if ["sales", "submitted", "volume"].iter().any(|w| text.contains(w)) {
        score += 2;
    }
    if text.contains("gross") {
        score += 1;
    }
    score
}

/// Score a fee keyword line. Fees are commonly printed as negative amounts.
pub fn score_fees(text: &str, has_negative: bool) -> i32 {
    let mut score = 0;
    if text.contains("total") {
        score += 2;
    }
    if text.contains("fee") || text.contains("charge") {
        score += 3;
    }
    if ["processing", "discount", "interchange"].iter().any(|w| text.contains(w)) {
        score += 1;
    }
    if has_negative {
        score += 2;
    }
    score
}

/// Score a transaction count keyword line.
pub fn score_transactions(text: &str) -> i32 {
    let mut score = 0;
    if text.contains("total") {
        score += 2;
    }
    if text.contains("transaction") || text.contains("txn") {
        score += 3;
    }
    if text.contains("count") || text.contains('#') {
        score += 1;
    }
    score
}

/// Bonus when the line holding the number is itself a total line.
pub fn neighborhood_bonus(token_line: &str) -> i32 {
    if token_line.contains("total") { 1 } else { 0 }
}
