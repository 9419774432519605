//! Parsing of user-typed amounts and discounts.

use invoice_core::DiscountConfig;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Error returned when a discount string cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid discount '{input}': expected an amount like '250' or a percentage like '10%'")]
pub struct ParseDiscountError {
    input: String,
    #[source]
    source: ParseDecimalError,
}

/// Normalizes input for decimal parsing: trims whitespace and removes the
/// thousands separators of both western (`1,234,567`) and Indian
/// (`12,34,567`) grouping, plus a leading rupee sign.
fn normalize_decimal_input(s: &str) -> String {
    s.trim().trim_start_matches('₹').trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Empty or whitespace-only input is treated as 0.
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_data::parse::parse_decimal;
///
/// assert_eq!(parse_decimal("12,34,567.50").unwrap(), dec!(1234567.50));
/// assert_eq!(parse_decimal("  ").unwrap(), dec!(0));
/// ```
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a discount entry.
///
/// A trailing `%` makes a percentage discount, anything else is a fixed
/// amount. Empty input means no discount.
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::DiscountConfig;
/// use invoice_data::parse::parse_discount;
///
/// assert_eq!(parse_discount("10%").unwrap(), DiscountConfig::percentage(dec!(10)));
/// assert_eq!(parse_discount("1,500").unwrap(), DiscountConfig::fixed(dec!(1500)));
/// ```
pub fn parse_discount(s: &str) -> Result<DiscountConfig, ParseDiscountError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(DiscountConfig::none());
    }

    let wrap = |source| ParseDiscountError {
        input: s.to_string(),
        source,
    };

    match trimmed.strip_suffix('%') {
        Some(percent) => parse_decimal(percent)
            .map(DiscountConfig::percentage)
            .map_err(wrap),
        None => parse_decimal(trimmed)
            .map(DiscountConfig::fixed)
            .map_err(wrap),
    }
}
