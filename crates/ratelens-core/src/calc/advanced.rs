//! Interchange-plus estimate with card mix, fixed fees and projections.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::calc::{
    AdvancedCalcInput, AdvancedCalcResult, Assumptions, CardNetwork, Horizons, NetworkRates, PerCardBreakdown,
};

use crate::error::ValidationError;

use super::{add, div, mul, require_non_negative, CentTotals, RateCalculator, Result};

impl RateCalculator {
    /// Estimate savings of interchange-plus pricing over the given period.
    ///
    /// Savings and fee recovery are normalized to a monthly figure and then
    /// projected to one, three and five years.
    pub fn calculate_advanced(&self, input: &AdvancedCalcInput) -> Result<AdvancedCalcResult> {
        let totals = CentTotals::new(input.total_volume, input.total_transactions, input.total_fees)?;
        require_non_negative(input.monthly_fixed_fees, "monthly_fixed_fees")?;
        require_non_negative(input.per_txn_fee, "per_txn_fee")?;
        if let Some(per_card) = &input.per_card {
            for network in CardNetwork::ALL {
                require_non_negative(per_card.get(network).volume, "per_card volume")?;
            }
        }

        let months = Decimal::from(input.basis.months_in_period());
        let (mcc, base_rates) = self.mcc_rates.resolve(input.mcc.as_deref());

        let (card_mix, used_per_card_mix) = match &input.per_card {
            Some(per_card) => match self.per_card_mix(per_card, totals.volume_dollars()) {
                Some(mix) => (mix, true),
                None => (self.config.default_card_mix, false),
            },
            None => (self.config.default_card_mix, false),
        };

        let weighted_base_rate = base_rates
            .weighted_by(&card_mix)
            .ok_or(ValidationError::OutOfRange { field: "card_mix" })?;
        let fixed_costs = add(
            mul(input.per_txn_fee, Decimal::from(totals.transactions), "per_txn_fee")?,
            mul(input.monthly_fixed_fees, months, "monthly_fixed_fees")?,
            "fixed_costs",
        )?;
        let proposed_rate = add(
            weighted_base_rate,
            div(fixed_costs, totals.volume_dollars(), "fixed_costs")?,
            "proposed_rate",
        )?;

        debug!(
            "Advanced calc: mcc={} weighted_base={} proposed={} per_card_mix={}",
            mcc, weighted_base_rate, proposed_rate, used_per_card_mix
        );

        let summary = totals.summarize(proposed_rate)?;
        let horizons = Horizons::from_monthly(summary.savings_dollars / months)
            .ok_or(ValidationError::OutOfRange { field: "savings_dollars" })?;
        let monthly_recovery = mul(totals.fees_dollars() / months, self.config.fee_recovery_ratio, "fee_recovery")?;
        let fee_recovery =
            Horizons::from_monthly(monthly_recovery).ok_or(ValidationError::OutOfRange { field: "fee_recovery" })?;

        Ok(AdvancedCalcResult {
            summary,
            horizons,
            fee_recovery,
            assumptions: Assumptions {
                mcc,
                base_rates,
                card_mix,
                used_per_card_mix,
                basis: input.basis,
                months_in_period: input.basis.months_in_period(),
                weighted_base_rate,
                per_txn_fee: input.per_txn_fee,
                monthly_fixed_fees: input.monthly_fixed_fees,
            },
        })
    }

    /// Normalized per-card shares, if the per-card volumes add up to the
    /// total within `max(floor, ratio * total)`.
    fn per_card_mix(&self, per_card: &PerCardBreakdown, total_volume: Decimal) -> Option<NetworkRates> {
        let sum = per_card.total_volume()?;
        if sum <= Decimal::ZERO {
            return None;
        }

        let tolerance = self
            .config
            .mix_tolerance_floor
            .max(total_volume.checked_mul(self.config.mix_tolerance_ratio)?);
        if sum.checked_sub(total_volume)?.abs() > tolerance {
            debug!("Per-card volume {} outside tolerance {} of {}", sum, tolerance, total_volume);
            return None;
        }

        let volumes = per_card.volumes();
        Some(NetworkRates::new(
            volumes.visa / sum,
            volumes.mc / sum,
            volumes.discover / sum,
            volumes.amex / sum,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calc::{Basis, CardTotals};
    use crate::rates::MccRateTable;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn card(volume: i64) -> CardTotals {
        CardTotals {
            volume: Decimal::from(volume),
            transactions: 0,
        }
    }

    fn flat_table() -> MccRateTable {
        let rates = NetworkRates::new(dec("0.02"), dec("0.02"), dec("0.02"), dec("0.03"));
        MccRateTable::new(rates, Vec::<(String, NetworkRates)>::new())
    }

    #[test]
    fn test_default_mix_monthly() {
        let input = AdvancedCalcInput::new(Basis::Monthly, Decimal::from(100_000), 1_000, Decimal::from(3_000));
        let result = RateCalculator::new()
            .with_mcc_rates(flat_table())
            .calculate_advanced(&input)
            .unwrap();

        // 0.02 * 0.95 + 0.03 * 0.05
        assert_eq!(result.assumptions.weighted_base_rate, dec("0.0205"));
        assert!(!result.assumptions.used_per_card_mix);
        assert_eq!(result.assumptions.mcc, "default");
        assert_eq!(result.summary.proposed_eff_rate, dec("2.05"));
        assert_eq!(result.summary.savings_dollars, dec("950"));
        assert_eq!(result.horizons.monthly, dec("950"));
        assert_eq!(result.horizons.annual, dec("11400"));
        assert_eq!(result.horizons.three_year, dec("34200"));
        assert_eq!(result.horizons.five_year, dec("57000"));
        assert_eq!(result.fee_recovery.monthly, dec("2700"));
        assert_eq!(result.fee_recovery.annual, dec("32400"));
    }

    #[test]
    fn test_annual_basis_normalizes_to_monthly() {
        let input = AdvancedCalcInput::new(Basis::Annual, Decimal::from(1_200_000), 12_000, Decimal::from(36_000))
            .with_monthly_fixed_fees(Decimal::from(10))
            .with_per_txn_fee(dec("0.10"));
        let result = RateCalculator::new()
            .with_mcc_rates(flat_table())
            .calculate_advanced(&input)
            .unwrap();

        // 0.0205 + (0.10 * 12000 + 10 * 12) / 1,200,000 = 0.0216
        assert_eq!(result.summary.proposed_eff_rate, dec("2.16"));
        // (0.03 - 0.0216) * 1,200,000 = 10,080 a year
        assert_eq!(result.summary.savings_dollars, dec("10080"));
        assert_eq!(result.horizons.monthly, dec("840"));
        assert_eq!(result.horizons.annual, dec("10080"));
        assert_eq!(result.fee_recovery.monthly, dec("2700"));
        assert_eq!(result.assumptions.months_in_period, 12);
    }

    #[test]
    fn test_per_card_mix_within_tolerance() {
        let per_card = PerCardBreakdown {
            visa: card(50_000),
            mc: card(30_000),
            discover: card(0),
            amex: card(19_500),
        };
        let input = AdvancedCalcInput::new(Basis::Monthly, Decimal::from(100_000), 1_000, Decimal::from(3_000))
            .with_per_card(per_card);
        let result = RateCalculator::new()
            .with_mcc_rates(flat_table())
            .calculate_advanced(&input)
            .unwrap();

        assert!(result.assumptions.used_per_card_mix);
        assert_eq!(result.assumptions.card_mix.amex, dec("19500") / dec("99500"));
        assert_eq!(result.assumptions.card_mix.discover, Decimal::ZERO);
    }

    #[test]
    fn test_per_card_mix_outside_tolerance_uses_default() {
        let per_card = PerCardBreakdown {
            visa: card(10_000),
            amex: card(5_000),
            ..Default::default()
        };
        let input = AdvancedCalcInput::new(Basis::Monthly, Decimal::from(100_000), 1_000, Decimal::from(3_000))
            .with_per_card(per_card);
        let result = RateCalculator::new().calculate_advanced(&input).unwrap();

        assert!(!result.assumptions.used_per_card_mix);
        assert_eq!(result.assumptions.card_mix, RateCalculator::new().config().default_card_mix);
    }

    #[test]
    fn test_small_volume_uses_tolerance_floor() {
        // 1% of 1,000 is 10; the $50 floor still accepts a $40 gap
        let per_card = PerCardBreakdown {
            visa: card(960),
            ..Default::default()
        };
        let input = AdvancedCalcInput::new(Basis::Monthly, Decimal::from(1_000), 10, Decimal::from(30))
            .with_per_card(per_card);
        let result = RateCalculator::new().calculate_advanced(&input).unwrap();

        assert!(result.assumptions.used_per_card_mix);
        assert_eq!(result.assumptions.card_mix.visa, Decimal::ONE);
    }

    #[test]
    fn test_builtin_table_resolves_mcc() {
        let input = AdvancedCalcInput::new(Basis::Monthly, Decimal::from(50_000), 500, Decimal::from(1_500))
            .with_mcc("5812");
        let result = RateCalculator::new().calculate_advanced(&input).unwrap();

        assert_eq!(result.assumptions.mcc, "5812");
        assert_eq!(result.assumptions.base_rates, MccRateTable::builtin().resolve(Some("5812")).1);
    }

    #[test]
    fn test_huge_fixed_fees_are_out_of_range() {
        let input = AdvancedCalcInput::new(Basis::Annual, Decimal::from(1_000), 10, Decimal::from(30))
            .with_monthly_fixed_fees(Decimal::MAX);
        let err = RateCalculator::new().calculate_advanced(&input).unwrap_err();
        assert_eq!(err, ValidationError::OutOfRange { field: "monthly_fixed_fees" });
    }

    #[test]
    fn test_rejects_negative_fixed_fees() {
        let input = AdvancedCalcInput::new(Basis::Monthly, Decimal::from(1_000), 10, Decimal::from(30))
            .with_monthly_fixed_fees(Decimal::from(-1));
        let err = RateCalculator::new().calculate_advanced(&input).unwrap_err();
        assert_eq!(err, ValidationError::Negative { field: "monthly_fixed_fees" });
    }
}
