//! Category rate table loading.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use ratelens_core::{CategoryRateTable, RateLensConfig};

#[derive(Debug, Deserialize)]
struct RateRow {
    category: String,
    rate_percent: String,
}

/// Load a `category,rate_percent` CSV. Rows that fail to parse are skipped.
pub fn load_category_rates(path: &Path) -> anyhow::Result<CategoryRateTable> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut table = CategoryRateTable::new();

    for (i, row) in reader.deserialize::<RateRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping rate row {} in {}: {}", i + 1, path.display(), e);
                continue;
            }
        };

        let rate = row.rate_percent.trim_end_matches('%').trim();
        match Decimal::from_str(rate) {
            Ok(rate) if !row.category.trim().is_empty() => table.insert(&row.category, rate),
            _ => warn!("Skipping rate row {} in {}: invalid entry", i + 1, path.display()),
        }
    }

    debug!("Loaded {} category rates from {}", table.len(), path.display());
    Ok(table)
}

/// Rate table from `--rates`, else the configured CSV, else empty.
pub fn resolve_category_rates(
    override_path: Option<&Path>,
    config: &RateLensConfig,
) -> anyhow::Result<CategoryRateTable> {
    match override_path.or(config.rates.category_rates_csv.as_deref()) {
        Some(path) => load_category_rates(path),
        None => Ok(CategoryRateTable::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratelens_core::RateLookup;
    use std::fs;

    #[test]
    fn test_load_category_rates_skips_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.csv");
        fs::write(
            &path,
            "category,rate_percent\nRestaurants,1.95\nGrocery, 1.75% \nBroken,abc\n,2.00\n",
        )
        .unwrap();

        let table = load_category_rates(&path).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("restaurants"), Some(Decimal::new(195, 2)));
        assert_eq!(table.lookup("GROCERY"), Some(Decimal::new(175, 2)));
        assert_eq!(table.lookup("broken"), None);
    }

    #[test]
    fn test_resolve_without_any_source_is_empty() {
        let table = resolve_category_rates(None, &RateLensConfig::default()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_rates_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        assert!(resolve_category_rates(Some(&missing), &RateLensConfig::default()).is_err());
    }
}
