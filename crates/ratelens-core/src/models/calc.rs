//! Calculator input and output models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input for the basic savings calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcInput {
    /// Total processed volume in dollars.
    pub volume: Decimal,

    /// Number of transactions.
    pub transactions: u64,

    /// Total fees charged in dollars.
    pub fees: Decimal,

    /// Category name used against the category rate table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcc_category: Option<String>,
}

impl CalcInput {
    pub fn new(volume: Decimal, transactions: u64, fees: Decimal) -> Self {
        Self {
            volume,
            transactions,
            fees,
            mcc_category: None,
        }
    }

    pub fn with_mcc_category(mut self, category: impl Into<String>) -> Self {
        self.mcc_category = Some(category.into());
        self
    }
}

/// Result of a basic savings calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResult {
    /// Average dollars per transaction, floored to the cent.
    pub avg_ticket: Decimal,

    /// Current effective rate, in percent.
    pub current_eff_rate: Decimal,

    /// Proposed effective rate, in percent.
    pub proposed_eff_rate: Decimal,

    /// Savings over the statement period. Negative when the proposal costs more.
    pub savings_dollars: Decimal,

    /// Proposed minus current effective rate, in percentage points.
    pub rate_delta: Decimal,
}

/// Period covered by the totals of an advanced calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    #[default]
    Monthly,
    Annual,
}

impl Basis {
    /// Number of months the totals span.
    pub fn months_in_period(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Annual => 12,
        }
    }
}

impl std::str::FromStr for Basis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "annual" | "yearly" | "year" => Ok(Self::Annual),
            other => Err(format!("unknown basis: {}", other)),
        }
    }
}

/// Card networks priced by the interchange tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Discover,
    Amex,
}

impl CardNetwork {
    pub const ALL: [CardNetwork; 4] = [Self::Visa, Self::Mastercard, Self::Discover, Self::Amex];
}

/// A decimal value per card network (rates or mix shares).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkRates {
    pub visa: Decimal,
    pub mc: Decimal,
    pub discover: Decimal,
    pub amex: Decimal,
}

impl NetworkRates {
    pub fn new(visa: Decimal, mc: Decimal, discover: Decimal, amex: Decimal) -> Self {
        Self {
            visa,
            mc,
            discover,
            amex,
        }
    }

    pub fn get(&self, network: CardNetwork) -> Decimal {
        match network {
            CardNetwork::Visa => self.visa,
            CardNetwork::Mastercard => self.mc,
            CardNetwork::Discover => self.discover,
            CardNetwork::Amex => self.amex,
        }
    }

    /// Sum over all networks, `None` on overflow.
    pub fn total(&self) -> Option<Decimal> {
        CardNetwork::ALL
            .iter()
            .try_fold(Decimal::ZERO, |acc, n| acc.checked_add(self.get(*n)))
    }

    /// Sum of `self[n] * weights[n]` over all networks, `None` on overflow.
    pub fn weighted_by(&self, weights: &NetworkRates) -> Option<Decimal> {
        CardNetwork::ALL.iter().try_fold(Decimal::ZERO, |acc, n| {
            acc.checked_add(self.get(*n).checked_mul(weights.get(*n))?)
        })
    }
}

/// Volume and transaction count for one card network.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardTotals {
    pub volume: Decimal,
    pub transactions: u64,
}

/// Per-network breakdown. Networks absent from the input are zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerCardBreakdown {
    pub visa: CardTotals,
    pub mc: CardTotals,
    pub discover: CardTotals,
    pub amex: CardTotals,
}

impl PerCardBreakdown {
    pub fn get(&self, network: CardNetwork) -> CardTotals {
        match network {
            CardNetwork::Visa => self.visa,
            CardNetwork::Mastercard => self.mc,
            CardNetwork::Discover => self.discover,
            CardNetwork::Amex => self.amex,
        }
    }

    pub fn volumes(&self) -> NetworkRates {
        NetworkRates::new(
            self.visa.volume,
            self.mc.volume,
            self.discover.volume,
            self.amex.volume,
        )
    }

    pub fn total_volume(&self) -> Option<Decimal> {
        self.volumes().total()
    }
}

/// Input for the advanced calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedCalcInput {
    #[serde(default)]
    pub basis: Basis,

    pub total_volume: Decimal,

    pub total_transactions: u64,

    pub total_fees: Decimal,

    /// MCC code or canonical category name for the interchange table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcc: Option<String>,

    #[serde(default)]
    pub monthly_fixed_fees: Decimal,

    #[serde(default)]
    pub per_txn_fee: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_card: Option<PerCardBreakdown>,
}

impl AdvancedCalcInput {
    pub fn new(basis: Basis, total_volume: Decimal, total_transactions: u64, total_fees: Decimal) -> Self {
        Self {
            basis,
            total_volume,
            total_transactions,
            total_fees,
            mcc: None,
            monthly_fixed_fees: Decimal::ZERO,
            per_txn_fee: Decimal::ZERO,
            per_card: None,
        }
    }

    pub fn with_mcc(mut self, mcc: impl Into<String>) -> Self {
        self.mcc = Some(mcc.into());
        self
    }

    pub fn with_monthly_fixed_fees(mut self, fees: Decimal) -> Self {
        self.monthly_fixed_fees = fees;
        self
    }

    pub fn with_per_txn_fee(mut self, fee: Decimal) -> Self {
        self.per_txn_fee = fee;
        self
    }

    pub fn with_per_card(mut self, per_card: PerCardBreakdown) -> Self {
        self.per_card = Some(per_card);
        self
    }
}

/// A dollar figure projected over the standard windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Horizons {
    pub monthly: Decimal,
    pub annual: Decimal,
    pub three_year: Decimal,
    pub five_year: Decimal,
}

impl Horizons {
    /// Project a monthly figure across all horizons, `None` on overflow.
    pub fn from_monthly(monthly: Decimal) -> Option<Self> {
        let annual = monthly.checked_mul(Decimal::from(12))?;
        Some(Self {
            monthly,
            annual,
            three_year: annual.checked_mul(Decimal::from(3))?,
            five_year: annual.checked_mul(Decimal::from(5))?,
        })
    }
}

/// Inputs the advanced calculation actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Interchange table key the mcc resolved to.
    pub mcc: String,
    pub base_rates: NetworkRates,
    pub card_mix: NetworkRates,
    pub used_per_card_mix: bool,
    pub basis: Basis,
    pub months_in_period: u32,
    pub weighted_base_rate: Decimal,
    pub per_txn_fee: Decimal,
    pub monthly_fixed_fees: Decimal,
}

/// Result of the advanced calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedCalcResult {
    #[serde(flatten)]
    pub summary: CalcResult,
    pub horizons: Horizons,
    pub fee_recovery: Horizons,
    pub assumptions: Assumptions,
}
