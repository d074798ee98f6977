//! Subcommand implementations.

pub mod analyze;
pub mod batch;
pub mod calc;
pub mod config;
pub mod extract;

use std::path::Path;

use ratelens_core::RateLensConfig;

/// Load the config from `--config`, else the default location, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RateLensConfig> {
    if let Some(path) = config_path {
        return Ok(RateLensConfig::from_file(Path::new(path))?);
    }

    config::load_or_default(&config::default_config_path())
}

/// Write command output to a file, or stdout when no path is given.
pub fn emit(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)?;
            println!(
                "{} Output written to {}",
                console::style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", output),
    }
    Ok(())
}
