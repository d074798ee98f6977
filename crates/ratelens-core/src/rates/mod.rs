//! Rate reference tables consumed by the calculator.

pub mod mcc;

pub use mcc::MccRateTable;

use std::collections::HashMap;

use rust_decimal::Decimal;

/// Synchronous category name → proposed rate (percent) lookup.
///
/// Implementations are shared read-only across calls.
pub trait RateLookup: Send + Sync {
    fn lookup(&self, category: &str) -> Option<Decimal>;
}

impl<F> RateLookup for F
where
    F: Fn(&str) -> Option<Decimal> + Send + Sync,
{
    fn lookup(&self, category: &str) -> Option<Decimal> {
        self(category)
    }
}

/// In-memory category rate table with case-insensitive exact name matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryRateTable {
    rates: HashMap<String, Decimal>,
}

impl CategoryRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, percent)` pairs. Later duplicates win.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (name, rate) in entries {
            table.insert(name.as_ref(), rate);
        }
        table
    }

    pub fn insert(&mut self, name: &str, rate_percent: Decimal) {
        self.rates.insert(normalize_key(name), rate_percent);
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> Vec<(&str, Decimal)> {
        let mut entries: Vec<(&str, Decimal)> = self.rates.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl RateLookup for CategoryRateTable {
    fn lookup(&self, category: &str) -> Option<Decimal> {
        self.rates.get(&normalize_key(category)).copied()
    }
}

pub(crate) fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive_exact_match() {
        let table = CategoryRateTable::from_entries([("Restaurants", Decimal::new(195, 2))]);

        assert_eq!(table.lookup("restaurants"), Some(Decimal::new(195, 2)));
        assert_eq!(table.lookup("  RESTAURANTS "), Some(Decimal::new(195, 2)));
        assert_eq!(table.lookup("restaurant"), None);
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |name: &str| (name == "grocery").then(|| Decimal::from(2));
        assert_eq!(RateLookup::lookup(&lookup, "grocery"), Some(Decimal::from(2)));
        assert_eq!(RateLookup::lookup(&lookup, "fuel"), None);
    }
}
