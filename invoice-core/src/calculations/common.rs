//! Shared arithmetic helpers for invoice calculations.

use rust_decimal::{Decimal, RoundingStrategy};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero. Every derived money
/// amount on an invoice passes through this function.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    round_dp_half_up(value, 2)
}

/// Rounds to `dp` decimal places, midpoint away from zero.
pub fn round_dp_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `percent`% of `base`, unrounded, or `None` on overflow.
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(250.00), dec!(18)), Some(dec!(45.00)));
/// ```
pub fn percent_of(
    base: Decimal,
    percent: Decimal,
) -> Option<Decimal> {
    base.checked_mul(percent)?.checked_div(ONE_HUNDRED)
}
