//! Processing statement totals extraction.

mod extractor;
pub mod normalize;
pub mod rules;

pub use extractor::StatementExtractor;
pub use normalize::normalize_text;

use crate::error::ExtractionError;
use crate::models::statement::{ExtractionResult, StatementLine};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for statement totals extractors.
pub trait TotalsExtractor {
    /// Extract totals from raw statement text (form feeds separate pages).
    fn extract(&self, text: &str) -> Result<ExtractionResult>;

    /// Extract totals from already normalized lines.
    fn extract_lines(&self, lines: &[StatementLine]) -> Result<ExtractionResult>;
}
