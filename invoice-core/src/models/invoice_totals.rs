use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived totals for one invoice. Every amount is rounded to two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,

    /// Subtotal minus discount; the base the tax is charged on.
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,

    /// English rendering of `total` in Indian numbering.
    pub amount_in_words: String,
}
