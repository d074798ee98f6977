//! Common regex patterns for processing statement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Text normalization
    pub static ref CURRENCY_CODE_PREFIX: Regex = Regex::new(
        r"(?i)\bUSD\s*([$(\-]?\d)"
    ).unwrap();

    // Amounts: "(1,234.56)", "$1,234.56", "-45.00", "1500"
    pub static ref MONEY_TOKEN: Regex = Regex::new(
        r"\(\s*\$?\s*(?P<pnum>\d{1,3}(?:,\d{3})+|\d+)(?:\.(?P<pfrac>\d{2}))?\s*\)|(?P<sign>-)?(?:\$\s?)?(?P<num>\d{1,3}(?:,\d{3})+|\d+)(?:\.(?P<frac>\d{2}))?"
    ).unwrap();

    // Amounts that are unmistakably currency: "$" prefix, cents, or parentheses
    pub static ref MONEY_STYLED: Regex = Regex::new(
        r"\(\s*\$?\s*(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{2})?\s*\)|-?\$\s?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{2})?|-?(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}"
    ).unwrap();

    pub static ref INT_TOKEN: Regex = Regex::new(
        r"\d{1,3}(?:,\d{3})+|\d+"
    ).unwrap();

    // Direct labels
    pub static ref AMOUNTS_SUBMITTED: Regex = Regex::new(
        r"(?i)amounts?\s+submitted"
    ).unwrap();

    pub static ref FEES_CHARGED: Regex = Regex::new(
        r"(?i)fees\s+charged"
    ).unwrap();

    // Transaction count layouts
    pub static ref CARD_SUMMARY_HEADER: Regex = Regex::new(
        r"(?i)summary\s+by\s+card\s+type"
    ).unwrap();

    pub static ref CARD_SUMMARY_TOTAL: Regex = Regex::new(
        r"Total(\d{1,3}(?:,\d{3})+|\d+)\$?"
    ).unwrap();

    pub static ref STATEMENT_TRAILER: Regex = Regex::new(
        r"TOTAL\s*\$\s?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{2})?\s+(\d{1,3}(?:,\d{3})+|\d+)\b"
    ).unwrap();
}

/// Keyword phrases that label a total volume figure.
pub const VOLUME_KEYWORDS: &[&str] = &[
    "net sales volume",
    "sales volume",
    "total volume",
    "amounts submitted",
    "amount submitted",
    "total sales",
    "gross sales",
    "net sales",
    "deposit amount",
    "total deposits",
    "total submitted",
    "settlement total",
    "total amount processed",
    "amount processed",
    "processed volume",
];

/// Words that loosely mark a volume line.
pub const VOLUME_FALLBACK_WORDS: &[&str] = &["volume", "sales", "submitted"];

/// Keyword phrases that label total fees.
pub const FEE_KEYWORDS: &[&str] = &[
    "fees charged",
    "total fees",
    "total fee",
    "processing fees",
    "discount fees",
    "discount fee",
    "interchange fees",
    "assessment fees",
    "service charges",
    "total charges",
    "less discount",
];

/// Words that loosely mark a fee line.
pub const FEE_FALLBACK_WORDS: &[&str] = &["fees", "charges", "discount"];

/// Keyword phrases that label a transaction count.
pub const TRANSACTION_KEYWORDS: &[&str] = &[
    "number of transactions",
    "total transactions",
    "transaction count",
    "txn count",
    "# of transactions",
    "number of items",
    "total items",
    "transactions",
];

/// Words that loosely mark a transaction count line.
pub const TRANSACTION_FALLBACK_WORDS: &[&str] = &["transaction", "txn", "count"];

/// Whether `text` (already lowercase) contains any of `words`.
pub fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_prefix_pattern() {
        assert!(CURRENCY_CODE_PREFIX.is_match("Total USD 1,234.00"));
        assert!(CURRENCY_CODE_PREFIX.is_match("USD$45"));
        assert!(!CURRENCY_CODE_PREFIX.is_match("USD totals"));
    }

    #[test]
    fn test_card_summary_total_pattern() {
        let caps = CARD_SUMMARY_TOTAL.captures("Total1,083$563,237.04").unwrap();
        assert_eq!(&caps[1], "1,083");
        assert!(!CARD_SUMMARY_TOTAL.is_match("VisaSubtotal700$4,000.00"));
    }

    #[test]
    fn test_statement_trailer_pattern() {
        let caps = STATEMENT_TRAILER
            .captures("Card Type TOTAL $98,765.43 2,345 Page 4")
            .unwrap();
        assert_eq!(&caps[1], "2,345");
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("net sales volume", VOLUME_FALLBACK_WORDS));
        assert!(!contains_any("monthly minimum", FEE_FALLBACK_WORDS));
    }
}
