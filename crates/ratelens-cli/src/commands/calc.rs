//! Calc commands - savings estimates from known totals.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use rust_decimal::Decimal;
use tracing::{debug, info};

use ratelens_core::models::calc::Horizons;
use ratelens_core::{
    AdvancedCalcInput, AdvancedCalcResult, Basis, CalcInput, CalcResult, PerCardBreakdown, RateCalculator,
};

use super::{emit, load_config};
use crate::rates::resolve_category_rates;

/// Arguments for the basic calc command.
#[derive(Args)]
pub struct CalcArgs {
    /// Total sales volume in dollars
    #[arg(long)]
    volume: Decimal,

    /// Number of transactions
    #[arg(long)]
    transactions: u64,

    /// Total processing fees in dollars
    #[arg(long)]
    fees: Decimal,

    /// Merchant category used for the category rate lookup
    #[arg(long)]
    mcc_category: Option<String>,

    /// Category rates CSV (category,rate_percent)
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Print a text summary instead of JSON
    #[arg(long)]
    text: bool,
}

/// Arguments for the advanced calc command.
#[derive(Args)]
pub struct AdvancedArgs {
    /// Period the totals cover (monthly or annual)
    #[arg(long, default_value = "monthly")]
    basis: Basis,

    /// Total sales volume in dollars
    #[arg(long)]
    volume: Decimal,

    /// Number of transactions
    #[arg(long)]
    transactions: u64,

    /// Total processing fees in dollars
    #[arg(long)]
    fees: Decimal,

    /// MCC code or category name for base interchange rates
    #[arg(long)]
    mcc: Option<String>,

    /// Fixed fees charged each month under the proposed pricing
    #[arg(long, default_value = "0")]
    monthly_fixed_fees: Decimal,

    /// Per-transaction fee under the proposed pricing
    #[arg(long, default_value = "0")]
    per_txn_fee: Decimal,

    /// JSON file with per-card volumes ({"visa": {"volume": ...}, ...})
    #[arg(long)]
    per_card: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a text summary instead of JSON
    #[arg(long)]
    text: bool,
}

pub async fn run(args: CalcArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let rates = resolve_category_rates(args.rates.as_deref(), &config)?;

    let mut input = CalcInput::new(args.volume, args.transactions, args.fees);
    input.mcc_category = args.mcc_category;

    let result = RateCalculator::new()
        .with_config(config.calculator)
        .calculate_basic(&input, &rates)?;

    info!("Proposed rate {}%", result.proposed_eff_rate.round_dp(2));

    let output = if args.text {
        format_calc_text(&result)
    } else {
        serde_json::to_string_pretty(&result)?
    };

    emit(&output, None)
}

pub async fn run_advanced(args: AdvancedArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let mut input = AdvancedCalcInput::new(args.basis, args.volume, args.transactions, args.fees)
        .with_monthly_fixed_fees(args.monthly_fixed_fees)
        .with_per_txn_fee(args.per_txn_fee);
    if let Some(mcc) = args.mcc {
        input = input.with_mcc(mcc);
    }
    if let Some(path) = &args.per_card {
        let per_card: PerCardBreakdown = serde_json::from_str(&fs::read_to_string(path)?)?;
        debug!("Loaded per-card breakdown from {}", path.display());
        input = input.with_per_card(per_card);
    }

    let result = RateCalculator::new()
        .with_config(config.calculator)
        .calculate_advanced(&input)?;

    let output = if args.text {
        format_advanced_text(&result)
    } else {
        serde_json::to_string_pretty(&result)?
    };

    emit(&output, args.output.as_deref())
}

pub fn format_calc_text(result: &CalcResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Average ticket:     ${}\n", result.avg_ticket.round_dp(2)));
    output.push_str(&format!("Current rate:       {}%\n", result.current_eff_rate.round_dp(2)));
    output.push_str(&format!("Proposed rate:      {}%\n", result.proposed_eff_rate.round_dp(2)));
    output.push_str(&format!("Rate delta:         {}%\n", result.rate_delta.round_dp(2)));
    output.push_str(&format!("Estimated savings:  ${}\n", result.savings_dollars.round_dp(2)));

    output
}

fn format_advanced_text(result: &AdvancedCalcResult) -> String {
    let mut output = format_calc_text(&result.summary);
    let assumptions = &result.assumptions;

    output.push('\n');
    output.push_str("Savings:\n");
    output.push_str(&format_horizons(&result.horizons));
    output.push_str("Fee recovery:\n");
    output.push_str(&format_horizons(&result.fee_recovery));

    output.push('\n');
    output.push_str("Assumptions:\n");
    output.push_str(&format!("  MCC:                {}\n", assumptions.mcc));
    let weighted_percent = assumptions
        .weighted_base_rate
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|p| format!("{}%", p.round_dp(4)))
        .unwrap_or_else(|| "out of range".to_string());
    output.push_str(&format!("  Weighted base rate: {}\n", weighted_percent));
    output.push_str(&format!(
        "  Card mix:           visa {} / mc {} / discover {} / amex {}{}\n",
        assumptions.card_mix.visa.round_dp(4),
        assumptions.card_mix.mc.round_dp(4),
        assumptions.card_mix.discover.round_dp(4),
        assumptions.card_mix.amex.round_dp(4),
        if assumptions.used_per_card_mix { "" } else { " (default)" }
    ));
    output.push_str(&format!("  Months in period:   {}\n", assumptions.months_in_period));

    output
}

fn format_horizons(horizons: &Horizons) -> String {
    format!(
        "  Monthly: ${}\n  Annual:  ${}\n  3 years: ${}\n  5 years: ${}\n",
        horizons.monthly.round_dp(2),
        horizons.annual.round_dp(2),
        horizons.three_year.round_dp(2),
        horizons.five_year.round_dp(2)
    )
}
