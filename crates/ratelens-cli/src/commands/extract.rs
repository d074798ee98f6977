//! Extract command - pull processing totals from a single statement.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use ratelens_core::{ExtractionResult, StatementExtractor, TotalsExtractor};

use super::{emit, load_config};
use crate::input::load_statement;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (.txt or .pdf)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which search stage and score produced each total
    #[arg(long)]
    show_sources: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Extracting totals from {}", args.input.display());

    let text = load_statement(&args.input)?;
    let extractor = StatementExtractor::with_config(&config.extraction);
    let result = extractor.extract(&text)?;

    let output = format_extraction(&result, args.format)?;
    emit(&output, args.output.as_deref())?;

    if args.show_sources {
        eprintln!();
        for (label, stage, score, source) in [
            ("Volume", result.stages.volume, result.scores.volume, result.volume_source()),
            ("Fees", result.stages.fees, result.scores.fees, result.fees_source()),
            ("Transactions", result.stages.transactions, result.scores.transactions, result.transactions_source()),
        ] {
            eprintln!(
                "{} {}: {:?} (score {}) page {}: {}",
                style("ℹ").blue(),
                label,
                stage,
                score,
                source.page,
                source.text
            );
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_extraction(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["volume", "fees", "transactions", "volume_source", "fees_source", "transactions_source"])?;
    wtr.write_record([
        &result.volume.to_string(),
        &result.fees.to_string(),
        &result.transactions.to_string(),
        &result.volume_source().text,
        &result.fees_source().text,
        &result.transactions_source().text,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str("Statement totals:\n");
    output.push_str(&format!("  Volume:       ${}\n", result.volume));
    output.push_str(&format!("  Fees:         ${}\n", result.fees));
    output.push_str(&format!("  Transactions: {}\n", result.transactions));

    output
}
