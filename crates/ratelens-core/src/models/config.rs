//! Configuration structures for extraction and rate calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RateLensError, Result};

use super::calc::NetworkRates;

/// Main configuration for ratelens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLensConfig {
    /// Statement extraction configuration.
    pub extraction: ExtractionConfig,

    /// Rate calculator configuration.
    pub calculator: CalculatorConfig,

    /// Category rate table configuration.
    pub rates: RatesConfig,
}

/// Statement extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines examined on each side of a keyword hit.
    pub neighborhood_radius: usize,

    /// Lines after a direct label searched for its amount.
    pub direct_lookahead: usize,

    /// Lines after "Summary by card type" searched for the Total row.
    pub card_summary_window: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            neighborhood_radius: 2,
            direct_lookahead: 4,
            card_summary_window: 80,
        }
    }
}

/// A proposed rate applied from an average ticket size upwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketTier {
    /// Inclusive lower bound on the average ticket, in dollars.
    pub min_avg_ticket: Decimal,

    /// Proposed rate in percent.
    pub rate_percent: Decimal,
}

/// Rate calculator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Ticket-size tiers, checked from the highest bound down.
    pub ticket_tiers: Vec<TicketTier>,

    /// Proposed rate in percent when no tier applies.
    pub fallback_rate_percent: Decimal,

    /// Card mix used when the per-card breakdown is missing or inconsistent.
    pub default_card_mix: NetworkRates,

    /// Minimum absolute tolerance, in dollars, for per-card volumes.
    pub mix_tolerance_floor: Decimal,

    /// Tolerance for per-card volumes as a share of total volume.
    pub mix_tolerance_ratio: Decimal,

    /// Share of current fees a fee recovery program returns.
    pub fee_recovery_ratio: Decimal,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            ticket_tiers: vec![
                TicketTier {
                    min_avg_ticket: Decimal::from(500),
                    rate_percent: Decimal::new(220, 2),
                },
                TicketTier {
                    min_avg_ticket: Decimal::from(250),
                    rate_percent: Decimal::new(250, 2),
                },
            ],
            fallback_rate_percent: Decimal::new(240, 2),
            default_card_mix: NetworkRates::new(
                Decimal::new(60, 2),
                Decimal::new(30, 2),
                Decimal::new(5, 2),
                Decimal::new(5, 2),
            ),
            mix_tolerance_floor: Decimal::from(50),
            mix_tolerance_ratio: Decimal::new(1, 2),
            fee_recovery_ratio: Decimal::new(90, 2),
        }
    }
}

/// Category rate table configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    /// CSV file with `category,rate_percent` rows.
    pub category_rates_csv: Option<PathBuf>,
}

impl RateLensConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| RateLensError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| RateLensError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
