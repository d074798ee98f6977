//! Core library for merchant statement analysis.
//!
//! This crate provides:
//! - Statement text normalization
//! - Totals extraction (sales volume, processing fees, transaction count)
//! - Basic and interchange-plus savings estimates
//! - Category and MCC rate tables

pub mod analysis;
pub mod calc;
pub mod error;
pub mod models;
pub mod rates;
pub mod statement;

pub use analysis::{analyze_statement, StatementAnalysis};
pub use calc::RateCalculator;
pub use error::{ExtractionError, RateLensError, Result, ValidationError};
pub use models::calc::{AdvancedCalcInput, AdvancedCalcResult, Basis, CalcInput, CalcResult, PerCardBreakdown};
pub use models::config::RateLensConfig;
pub use models::statement::{ExtractionResult, StatementLine};
pub use rates::{CategoryRateTable, MccRateTable, RateLookup};
pub use statement::{normalize_text, StatementExtractor, TotalsExtractor};
