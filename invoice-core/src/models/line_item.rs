use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single billable line on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display text only; never inspected by the calculator.
    pub description: String,
    pub quantity: Decimal,
    /// Unit price.
    pub rate: Decimal,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
        }
    }

    /// Line amount (`quantity * rate`), unrounded.
    ///
    /// Returns `None` if the product does not fit in a `Decimal`.
    pub fn amount(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.rate)
    }
}
