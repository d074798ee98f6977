//! Effective rate and savings calculation.
//!
//! Dollar figures are converted to whole cents before any division so that
//! rates are derived from the same rounded amounts the statement shows.

mod advanced;
mod basic;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ValidationError;
use crate::models::calc::CalcResult;
use crate::models::config::CalculatorConfig;
use crate::rates::MccRateTable;

/// Result type for calculator operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Savings calculator over a rate configuration and an interchange table.
#[derive(Debug, Clone, Default)]
pub struct RateCalculator {
    config: CalculatorConfig,
    mcc_rates: MccRateTable,
}

impl RateCalculator {
    /// Calculator with default tiers and the built-in interchange table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: CalculatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_mcc_rates(mut self, mcc_rates: MccRateTable) -> Self {
        self.mcc_rates = mcc_rates;
        self
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }
}

/// Round a dollar amount to whole cents, halves away from zero.
pub(crate) fn to_cents(dollars: Decimal, field: &'static str) -> Result<Decimal> {
    Ok(mul(dollars, Decimal::ONE_HUNDRED, field)?.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

pub(crate) fn mul(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal> {
    a.checked_mul(b).ok_or(ValidationError::OutOfRange { field })
}

pub(crate) fn div(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal> {
    a.checked_div(b).ok_or(ValidationError::OutOfRange { field })
}

pub(crate) fn add(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal> {
    a.checked_add(b).ok_or(ValidationError::OutOfRange { field })
}

pub(crate) fn sub(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal> {
    a.checked_sub(b).ok_or(ValidationError::OutOfRange { field })
}

pub(crate) fn require_positive(value: Decimal, field: &'static str) -> Result<()> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

pub(crate) fn require_non_negative(value: Decimal, field: &'static str) -> Result<()> {
    if value < Decimal::ZERO {
        Err(ValidationError::Negative { field })
    } else {
        Ok(())
    }
}

/// Totals converted to cents, validated for rate math.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CentTotals {
    pub volume_cents: Decimal,
    pub fees_cents: Decimal,
    pub transactions: u64,
}

impl CentTotals {
    pub fn new(volume: Decimal, transactions: u64, fees: Decimal) -> Result<Self> {
        require_positive(volume, "volume")?;
        require_positive(fees, "fees")?;
        if transactions == 0 {
            return Err(ValidationError::NotPositive { field: "transactions" });
        }

        let volume_cents = to_cents(volume, "volume")?;
        let fees_cents = to_cents(fees, "fees")?;
        // Sub-cent inputs round away to nothing
        require_positive(volume_cents, "volume")?;
        require_positive(fees_cents, "fees")?;

        Ok(Self {
            volume_cents,
            fees_cents,
            transactions,
        })
    }

    pub fn volume_dollars(&self) -> Decimal {
        self.volume_cents / Decimal::ONE_HUNDRED
    }

    pub fn fees_dollars(&self) -> Decimal {
        self.fees_cents / Decimal::ONE_HUNDRED
    }

    /// Volume per transaction, floored to the cent. Never exceeds the volume.
    pub fn avg_ticket(&self) -> Decimal {
        (self.volume_cents / Decimal::from(self.transactions)).floor() / Decimal::ONE_HUNDRED
    }

    /// Current fees over volume, as a fraction.
    pub fn current_rate(&self) -> Result<Decimal> {
        div(self.fees_cents, self.volume_cents, "fees")
    }

    /// Derive the summary figures for a proposed rate (fraction, not percent).
    pub fn summarize(&self, proposed_rate: Decimal) -> Result<CalcResult> {
        let current_rate = self.current_rate()?;
        let current_eff_rate = mul(current_rate, Decimal::ONE_HUNDRED, "current_eff_rate")?;
        let proposed_eff_rate = mul(proposed_rate, Decimal::ONE_HUNDRED, "proposed_eff_rate")?;
        let savings_dollars = mul(
            sub(current_rate, proposed_rate, "savings_dollars")?,
            self.volume_dollars(),
            "savings_dollars",
        )?;

        Ok(CalcResult {
            avg_ticket: self.avg_ticket(),
            current_eff_rate,
            proposed_eff_rate,
            savings_dollars,
            rate_delta: sub(proposed_eff_rate, current_eff_rate, "rate_delta")?,
        })
    }
}
