//! CLI application for merchant statement rate analysis.

mod commands;
mod input;
mod rates;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{analyze, batch, calc, config, extract};

/// Merchant statement analysis - extract processing totals and estimate savings
#[derive(Parser)]
#[command(name = "ratelens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract volume, fees and transaction count from a statement
    Extract(extract::ExtractArgs),

    /// Estimate savings from statement totals
    Calc(calc::CalcArgs),

    /// Estimate interchange-plus savings with card mix and fixed fees
    CalcAdvanced(calc::AdvancedArgs),

    /// Extract totals from a statement and estimate savings
    Analyze(analyze::AnalyzeArgs),

    /// Extract totals from multiple statements
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Calc(args) => calc::run(args, config_path).await,
        Commands::CalcAdvanced(args) => calc::run_advanced(args, config_path).await,
        Commands::Analyze(args) => analyze::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
