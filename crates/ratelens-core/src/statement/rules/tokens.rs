//! Numeric token extraction from a single statement line.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{INT_TOKEN, MONEY_STYLED, MONEY_TOKEN};

/// A currency amount found on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyToken {
    /// Absolute value of the amount.
    pub value: Decimal,
    /// Written in parentheses or with a leading minus.
    pub negative: bool,
    /// Byte span of the match within the line.
    pub span: (usize, usize),
}

/// A whole number found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntToken {
    pub value: u64,
    pub span: (usize, usize),
}

/// Extract all money tokens from a line, in order of appearance.
pub fn money_tokens(line: &str) -> Vec<MoneyToken> {
    let mut tokens = Vec::new();

    for caps in MONEY_TOKEN.captures_iter(line) {
        let Some(full) = caps.get(0) else { continue };

        let (digits, frac, negative) = if let Some(num) = caps.name("pnum") {
            (num.as_str(), caps.name("pfrac"), true)
        } else if let Some(num) = caps.name("num") {
            // A hyphen glued to a preceding word or digit is a separator
            // ("01-15-2024", "Visa-123"), not a sign.
            let signed = caps.name("sign").is_some()
                && !line[..full.start()]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_alphanumeric());
            (num.as_str(), caps.name("frac"), signed)
        } else {
            continue;
        };

        if let Some(value) = parse_amount(digits, frac.map(|m| m.as_str())) {
            tokens.push(MoneyToken {
                value,
                negative,
                span: (full.start(), full.end()),
            });
        }
    }

    tokens
}

/// Extract every digit run (optionally comma-grouped) from a line.
pub fn int_tokens(line: &str) -> Vec<IntToken> {
    INT_TOKEN
        .find_iter(line)
        .filter_map(|m| {
            parse_int(m.as_str()).map(|value| IntToken {
                value,
                span: (m.start(), m.end()),
            })
        })
        .collect()
}

/// Extract whole numbers that are not part of a currency amount.
///
/// Drops any digit run overlapping a `$`-prefixed, cents-bearing or
/// parenthesized amount, and any run touching a `.` (the `75` of `4.75`).
pub fn non_money_int_tokens(line: &str) -> Vec<IntToken> {
    let money_spans: Vec<(usize, usize)> = MONEY_STYLED
        .find_iter(line)
        .map(|m| (m.start(), m.end()))
        .collect();

    let bytes = line.as_bytes();

    int_tokens(line)
        .into_iter()
        .filter(|tok| {
            let (start, end) = tok.span;
            !money_spans.iter().any(|&(ms, me)| start < me && ms < end)
        })
        .filter(|tok| {
            let (start, end) = tok.span;
            let dot_before = start > 0 && bytes[start - 1] == b'.';
            let dot_after = end < bytes.len() && bytes[end] == b'.';
            !dot_before && !dot_after
        })
        .collect()
}

/// Whether the line carries a parenthesized or minus-signed amount.
pub fn has_negative_amount(line: &str) -> bool {
    money_tokens(line).iter().any(|t| t.negative)
}

/// Parse an integer part with optional comma grouping and a cents part.
pub fn parse_amount(digits: &str, frac: Option<&str>) -> Option<Decimal> {
    let integer: String = digits.chars().filter(|c| *c != ',').collect();
    let amount = match frac {
        Some(cents) => format!("{}.{}", integer, cents),
        None => integer,
    };
    Decimal::from_str(&amount).ok()
}

fn parse_int(digits: &str) -> Option<u64> {
    digits
        .chars()
        .filter(|c| *c != ',')
        .collect::<String>()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parenthesized_amount_is_negative() {
        let tokens = money_tokens("(1,234.56)");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, dec("1234.56"));
        assert!(tokens[0].negative);
    }

    #[test]
    fn test_plain_and_grouped_amounts() {
        let values: Vec<Decimal> = money_tokens("Sales $1,500.00 Refunds 1500 Net $12.50")
            .into_iter()
            .map(|t| t.value)
            .collect();
        assert_eq!(values, vec![dec("1500.00"), dec("1500"), dec("12.50")]);
    }

    #[test]
    fn test_leading_minus_is_negative() {
        let tokens = money_tokens("Fees -$45.10");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, dec("45.10"));
        assert!(tokens[0].negative);
    }

    #[test]
    fn test_hyphenated_dates_are_not_negative() {
        let tokens = money_tokens("Period 01-15-2024");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| !t.negative));
    }

    #[test]
    fn test_int_tokens() {
        let values: Vec<u64> = int_tokens("Count 1,083 of 12").iter().map(|t| t.value).collect();
        assert_eq!(values, vec![1083, 12]);
    }

    #[test]
    fn test_non_money_ints_skip_currency_and_decimals() {
        let values: Vec<u64> = non_money_int_tokens("Total Transactions 1,083 $563,237.04 rate 4.75")
            .iter()
            .map(|t| t.value)
            .collect();
        assert_eq!(values, vec![1083]);
    }

    #[test]
    fn test_non_money_ints_skip_parenthesized() {
        assert!(non_money_int_tokens("(250)").is_empty());
    }

    #[test]
    fn test_has_negative_amount() {
        assert!(has_negative_amount("Total Fees (1,234.56)"));
        assert!(!has_negative_amount("Total Fees 1,234.56"));
    }
}
