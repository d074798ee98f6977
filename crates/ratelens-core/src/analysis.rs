//! One-shot statement analysis: extract totals, then estimate savings.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calc::RateCalculator;
use crate::error::Result;
use crate::models::calc::{CalcInput, CalcResult};
use crate::models::config::RateLensConfig;
use crate::models::statement::ExtractionResult;
use crate::rates::RateLookup;
use crate::statement::{StatementExtractor, TotalsExtractor};

/// Extracted totals together with the basic savings estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementAnalysis {
    pub extraction: ExtractionResult,
    pub calculation: CalcResult,
}

/// Extract totals from statement text and run the basic calculation on them.
pub fn analyze_statement(
    text: &str,
    mcc_category: Option<&str>,
    rates: &dyn RateLookup,
    config: &RateLensConfig,
) -> Result<StatementAnalysis> {
    let extraction = StatementExtractor::with_config(&config.extraction).extract(text)?;

    let mut input = CalcInput::new(extraction.volume, extraction.transactions, extraction.fees);
    input.mcc_category = mcc_category.map(str::to_string);

    let calculation = RateCalculator::new()
        .with_config(config.calculator.clone())
        .calculate_basic(&input, rates)?;

    info!(
        "Statement analysis: current {}% vs proposed {}%",
        calculation.current_eff_rate.round_dp(2),
        calculation.proposed_eff_rate.round_dp(2)
    );

    Ok(StatementAnalysis {
        extraction,
        calculation,
    })
}
