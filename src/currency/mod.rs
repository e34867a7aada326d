//! Display formatting for monetary amounts.
//!
//! Amounts render as currency strings with exactly two decimal places and
//! thousands grouping, e.g. `$1,028.50`. This is a presentation convention
//! layered on top of the store, which never formats anything itself.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The display symbol for this code; codes without a dedicated symbol
    /// fall back to the code itself followed by a space.
    pub fn symbol(&self) -> String {
        match self.0.as_str() {
            "USD" => "$".into(),
            "EUR" => "\u{20ac}".into(),
            "GBP" => "\u{a3}".into(),
            "JPY" => "\u{a5}".into(),
            other => format!("{} ", other),
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Formats `amount` in the given currency with two decimal places and
/// grouping separators. Negative amounts carry a leading minus sign.
pub fn format_amount(amount: f64, currency: &CurrencyCode) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    let grouped = group_thousands(whole);
    let sign = if negative { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, currency.symbol(), grouped, fraction)
}

/// Formats in the default currency (US dollars).
pub fn format_usd(amount: f64) -> String {
    format_amount(amount, &CurrencyCode::default())
}

/// Parses a user-typed amount, accepting an optional leading currency symbol
/// and grouping commas.
pub fn parse_amount(input: &str) -> Result<f64, AmountParseError> {
    let trimmed = input
        .trim()
        .trim_start_matches(&['$', '\u{20ac}', '\u{a3}', '\u{a5}'][..])
        .replace(',', "");
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AmountParseError(input.trim().to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a valid amount")]
pub struct AmountParseError(pub String);

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_grouping_and_two_decimals() {
        assert_eq!(format_usd(1028.5), "$1,028.50");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
    }

    #[test]
    fn negative_amounts_carry_a_sign() {
        assert_eq!(format_usd(-42.0), "-$42.00");
    }

    #[test]
    fn other_codes_use_their_symbol() {
        assert_eq!(format_amount(5.0, &CurrencyCode::new("eur")), "\u{20ac}5.00");
        assert_eq!(format_amount(5.0, &CurrencyCode::new("CHF")), "CHF 5.00");
    }

    #[test]
    fn parses_symbols_and_grouping() {
        assert_eq!(parse_amount("$1,028.50").unwrap(), 1028.50);
        assert_eq!(parse_amount("  42 ").unwrap(), 42.0);
        assert!(parse_amount("twelve").is_err());
    }
}
