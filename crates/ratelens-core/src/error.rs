//! Error types for the ratelens-core library.

use thiserror::Error;

/// Main error type for the ratelens library.
#[derive(Error, Debug)]
pub enum RateLensError {
    /// Statement totals extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Calculator input validation error.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to statement totals extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// At least one of volume, fees or transactions had no candidate.
    ///
    /// `missing` names the facts that could not be located; no partial
    /// values are carried.
    #[error("could not reliably extract totals (missing: {})", missing.join(", "))]
    TotalsNotFound { missing: Vec<&'static str> },
}

/// Errors raised before any rate computation takes place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required figure was zero or negative.
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    /// An optional fee figure was negative.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// A figure too large for decimal arithmetic.
    #[error("{field} is out of range")]
    OutOfRange { field: &'static str },
}

/// Result type for the ratelens library.
pub type Result<T> = std::result::Result<T, RateLensError>;
