//! Basic savings estimate from statement totals.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::calc::{CalcInput, CalcResult};
use crate::rates::RateLookup;

use super::{CentTotals, RateCalculator, Result};

impl RateCalculator {
    /// Estimate savings against a single proposed rate.
    ///
    /// The proposed rate comes from the category table when `mcc_category`
    /// names a known category, otherwise from the average ticket tiers.
    pub fn calculate_basic(&self, input: &CalcInput, rates: &dyn RateLookup) -> Result<CalcResult> {
        let totals = CentTotals::new(input.volume, input.transactions, input.fees)?;
        let avg_ticket = totals.avg_ticket();

        let category_rate = input
            .mcc_category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .and_then(|c| rates.lookup(c));

        let proposed_percent = match category_rate {
            Some(percent) => {
                debug!("Using category rate {}% for {:?}", percent, input.mcc_category);
                percent
            }
            None => self.tier_rate_percent(avg_ticket),
        };

        totals.summarize(proposed_percent / Decimal::ONE_HUNDRED)
    }

    /// Proposed rate (percent) for an average ticket; lower bounds inclusive.
    pub fn tier_rate_percent(&self, avg_ticket: Decimal) -> Decimal {
        let mut tiers: Vec<_> = self.config.ticket_tiers.iter().collect();
        tiers.sort_by(|a, b| b.min_avg_ticket.cmp(&a.min_avg_ticket));

        tiers
            .into_iter()
            .find(|t| avg_ticket >= t.min_avg_ticket)
            .map(|t| t.rate_percent)
            .unwrap_or(self.config.fallback_rate_percent)
    }
}
