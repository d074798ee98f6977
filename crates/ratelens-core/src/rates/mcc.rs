//! Base interchange rates by merchant category.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::calc::NetworkRates;

use super::normalize_key;

/// Key every lookup falls back to.
pub const DEFAULT_KEY: &str = "default";

/// Built-in categories: (MCC code, canonical name).
const CATEGORIES: &[(&str, &str)] = &[
    ("5812", "restaurants"),
    ("5814", "fast_food"),
    ("5411", "grocery"),
    ("5499", "convenience"),
    ("5541", "fuel"),
    ("5999", "retail"),
    ("7011", "lodging"),
    ("7538", "auto_repair"),
    ("8011", "medical"),
    ("8999", "professional_services"),
];

/// Read-only MCC → per-network base interchange rates.
#[derive(Debug, Clone, PartialEq)]
pub struct MccRateTable {
    rates: HashMap<String, NetworkRates>,
}

impl MccRateTable {
    /// Table with an entry per key, plus whatever `default` is given.
    pub fn new(default: NetworkRates, entries: impl IntoIterator<Item = (String, NetworkRates)>) -> Self {
        let mut rates: HashMap<String, NetworkRates> = entries
            .into_iter()
            .map(|(k, v)| (normalize_key(&k), v))
            .collect();
        rates.insert(DEFAULT_KEY.to_string(), default);
        Self { rates }
    }

    /// The bundled table.
    ///
    /// Every category currently carries the same base rates, Amex priced
    /// 0.10% above the other networks.
    pub fn builtin() -> Self {
        let base = NetworkRates::new(
            Decimal::new(180, 4),
            Decimal::new(180, 4),
            Decimal::new(180, 4),
            Decimal::new(190, 4),
        );

        let entries = CATEGORIES.iter().flat_map(|(code, name)| {
            [(code.to_string(), base), (name.to_string(), base)]
        });

        Self::new(base, entries)
    }

    /// Resolve a key to `(resolved_key, rates)`, falling back to `default`.
    pub fn resolve(&self, key: Option<&str>) -> (String, NetworkRates) {
        if let Some(key) = key.map(normalize_key).filter(|k| !k.is_empty()) {
            if let Some(rates) = self.rates.get(&key) {
                return (key, *rates);
            }
        }
        (DEFAULT_KEY.to_string(), self.default_rates())
    }

    pub fn default_rates(&self) -> NetworkRates {
        self.rates.get(DEFAULT_KEY).copied().unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rates.contains_key(&normalize_key(key))
    }
}

impl Default for MccRateTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_code_and_name() {
        let table = MccRateTable::builtin();

        let (key, rates) = table.resolve(Some("5812"));
        assert_eq!(key, "5812");
        assert_eq!(rates.amex - rates.visa, Decimal::new(10, 4));

        let (key, _) = table.resolve(Some("Restaurants"));
        assert_eq!(key, "restaurants");
    }

    #[test]
    fn test_unknown_or_missing_key_uses_default() {
        let table = MccRateTable::builtin();

        assert_eq!(table.resolve(Some("0000")).0, DEFAULT_KEY);
        assert_eq!(table.resolve(None).0, DEFAULT_KEY);
        assert_eq!(table.resolve(Some("   ")).0, DEFAULT_KEY);
    }

    #[test]
    fn test_custom_table() {
        let rates = NetworkRates::new(Decimal::ONE, Decimal::ONE, Decimal::ONE, Decimal::ONE);
        let table = MccRateTable::new(NetworkRates::default(), [("Vet".to_string(), rates)]);

        assert!(table.contains("vet"));
        assert_eq!(table.resolve(Some("VET")).1, rates);
    }
}
