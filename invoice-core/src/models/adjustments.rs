use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax rate applied when no other rate is configured (18% GST).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// Invoice-level discount.
///
/// `value` is a percentage in `[0, 100]` for [`DiscountKind::Percentage`] and
/// an absolute currency amount for [`DiscountKind::Fixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountConfig {
    pub kind: DiscountKind,
    pub value: Decimal,
}

impl DiscountConfig {
    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    pub fn fixed(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Fixed,
            value,
        }
    }

    pub fn none() -> Self {
        Self::percentage(Decimal::ZERO)
    }
}

impl Default for DiscountConfig {
    fn default() -> Self {
        Self::none()
    }
}

/// Tax applied to the post-discount amount. `rate` is a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub rate: Decimal,
}

impl TaxConfig {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_RATE)
    }
}
