//! Analyze command - extract totals and estimate savings in one step.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use ratelens_core::{analyze_statement, StatementAnalysis};

use super::calc::format_calc_text;
use super::{emit, load_config};
use crate::input::load_statement;
use crate::rates::resolve_category_rates;

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input file (.txt or .pdf)
    #[arg(required = true)]
    input: PathBuf,

    /// Merchant category used for the category rate lookup
    #[arg(long)]
    mcc_category: Option<String>,

    /// Category rates CSV (category,rate_percent)
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a text summary instead of JSON
    #[arg(long)]
    text: bool,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let rates = resolve_category_rates(args.rates.as_deref(), &config)?;

    info!("Analyzing {}", args.input.display());

    let text = load_statement(&args.input)?;
    let analysis = analyze_statement(&text, args.mcc_category.as_deref(), &rates, &config)?;

    let output = if args.text {
        format_analysis_text(&analysis)
    } else {
        serde_json::to_string_pretty(&analysis)?
    };

    emit(&output, args.output.as_deref())
}

fn format_analysis_text(analysis: &StatementAnalysis) -> String {
    let extraction = &analysis.extraction;
    let mut output = String::new();

    output.push_str(&format!("Volume:       ${}\n", extraction.volume));
    output.push_str(&format!("Fees:         ${}\n", extraction.fees));
    output.push_str(&format!("Transactions: {}\n", extraction.transactions));
    output.push('\n');
    output.push_str(&format_calc_text(&analysis.calculation));

    output
}
