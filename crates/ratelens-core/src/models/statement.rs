//! Statement text and extraction result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One non-empty, whitespace-normalized line of statement text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Page number (1-indexed, pages are separated by form feeds).
    pub page: u32,

    /// Normalized line text.
    pub text: String,
}

impl StatementLine {
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }

    /// Lowercase copy of the line text, used for keyword matching.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// The three statement totals the extractor looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementFact {
    Volume,
    Fees,
    Transactions,
}

impl StatementFact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Fees => "fees",
            Self::Transactions => "transactions",
        }
    }
}

impl std::fmt::Display for StatementFact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which step of a fact's search cascade produced the winning candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStage {
    /// A labelled line such as "Amounts Submitted" or "Fees Charged".
    DirectPattern,
    /// The `Total` row of a "Summary by card type" table.
    CardSummaryTable,
    /// The `TOTAL $amount count` trailer at the end of a statement.
    StatementTrailer,
    /// Scored keyword neighborhood search.
    KeywordSearch,
    /// Largest figure on any loosely labelled line.
    Fallback,
}

/// A proposed value for one fact, with its score and source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Absolute value of the token.
    pub value: Decimal,
    /// Keyword score; higher is more trustworthy.
    pub score: i32,
    /// Whether the token was written as a negative amount.
    pub negative: bool,
    /// Line the token was read from.
    pub source: StatementLine,
}

impl Candidate {
    pub fn new(value: Decimal, score: i32, source: &StatementLine) -> Self {
        Self {
            value,
            score,
            negative: false,
            source: source.clone(),
        }
    }

    pub fn with_negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }
}

/// Cascade stages that produced each extracted fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStages {
    pub volume: ExtractionStage,
    pub fees: ExtractionStage,
    pub transactions: ExtractionStage,
}

/// Scores of the winning candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionScores {
    pub volume: i32,
    pub fees: i32,
    pub transactions: i32,
}

/// Totals extracted from a processing statement.
///
/// Only ever built when all three facts were found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Total card volume.
    pub volume: Decimal,

    /// Total transaction count.
    pub transactions: u64,

    /// Total fees charged.
    pub fees: Decimal,

    /// Source lines in order: volume, fees, transactions.
    pub sources: [StatementLine; 3],

    /// Cascade stage behind each value.
    pub stages: ExtractionStages,

    /// Score of each winning candidate.
    pub scores: ExtractionScores,
}

impl ExtractionResult {
    pub fn volume_source(&self) -> &StatementLine {
        &self.sources[0]
    }

    pub fn fees_source(&self) -> &StatementLine {
        &self.sources[1]
    }

    pub fn transactions_source(&self) -> &StatementLine {
        &self.sources[2]
    }
}
