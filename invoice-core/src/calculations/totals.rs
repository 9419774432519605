//! Invoice totals calculation.
//!
//! The totals block of an invoice is derived in five steps, each rounded to
//! two decimal places before the next step uses it:
//!
//! | Step | Quantity         | Formula |
//! |------|------------------|---------|
//! | 1    | Subtotal         | Σ quantity × rate |
//! | 2    | Discount amount  | subtotal × value / 100 (percentage) or value (fixed); 0 when value is 0 |
//! | 3    | Taxable amount   | Step 1 − Step 2 |
//! | 4    | Tax amount       | Step 3 × tax rate / 100 |
//! | 5    | Total            | Step 3 + Step 4 |
//!
//! Rounding is chained: a total computed here can differ by ±0.01 from one
//! rounded only at the end. Totals of issued invoices must reproduce exactly.
//!
//! A fixed discount larger than the subtotal is not clamped. The taxable
//! amount, tax and total go negative and a warning is logged.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use invoice_core::calculations::compute_totals;
//! use invoice_core::{DiscountConfig, LineItem, TaxConfig};
//!
//! let items = vec![
//!     LineItem::new("Design work", dec!(10), dec!(1500.00)),
//!     LineItem::new("Hosting", dec!(1), dec!(2500.00)),
//! ];
//!
//! let totals = compute_totals(
//!     &items,
//!     DiscountConfig::percentage(dec!(10)),
//!     TaxConfig::new(dec!(18)),
//! ).unwrap();
//!
//! assert_eq!(totals.subtotal, dec!(17500.00));
//! assert_eq!(totals.discount_amount, dec!(1750.00));
//! assert_eq!(totals.tax_amount, dec!(2835.00));
//! assert_eq!(totals.total, dec!(18585.00));
//! assert_eq!(totals.amount_in_words, "Eighteen Thousand Five Hundred Eighty Five Rupees Only");
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{percent_of, round_half_up};
use crate::calculations::words::{WordsError, to_words};
use crate::models::{DiscountConfig, DiscountKind, InvoiceTotals, LineItem, TaxConfig};

/// Errors that can occur during invoice totals calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// A line item has a negative quantity or rate.
    #[error("line item {index} must have non-negative quantity and rate, got {quantity} x {rate}")]
    InvalidQuantityOrRate {
        index: usize,
        quantity: Decimal,
        rate: Decimal,
    },

    /// The discount is negative, or a percentage above 100.
    #[error("discount must be non-negative and percentages at most 100, got {0}")]
    InvalidDiscount(Decimal),

    /// The tax rate is outside [0, 100].
    #[error("tax rate must be between 0 and 100, got {0}")]
    InvalidTaxRate(Decimal),

    /// An intermediate amount does not fit in a `Decimal`.
    #[error("invoice {0} is too large to calculate")]
    AmountOverflow(&'static str),

    /// The total could not be written in words.
    #[error(transparent)]
    Words(#[from] WordsError),
}

impl DiscountConfig {
    /// Validates the discount value for its kind.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidDiscount`] if the value is negative,
    /// or if a percentage discount exceeds 100.
    pub fn validate(&self) -> Result<(), CalculationError> {
        let too_large = self.kind == DiscountKind::Percentage && self.value > Decimal::ONE_HUNDRED;
        if self.value < Decimal::ZERO || too_large {
            return Err(CalculationError::InvalidDiscount(self.value));
        }
        Ok(())
    }
}

impl TaxConfig {
    /// Validates that the tax rate is a percentage in `[0, 100]`.
    pub fn validate(&self) -> Result<(), CalculationError> {
        if self.rate < Decimal::ZERO || self.rate > Decimal::ONE_HUNDRED {
            return Err(CalculationError::InvalidTaxRate(self.rate));
        }
        Ok(())
    }
}

/// Calculator for the totals block of an invoice.
///
/// Holds the invoice-level discount and tax settings; line items are passed
/// to [`InvoiceCalculator::calculate`] so the same calculator can be reused
/// while the items are edited.
#[derive(Debug, Clone, Default)]
pub struct InvoiceCalculator {
    discount: DiscountConfig,
    tax: TaxConfig,
}

impl InvoiceCalculator {
    pub fn new(
        discount: DiscountConfig,
        tax: TaxConfig,
    ) -> Self {
        Self { discount, tax }
    }

    /// Calculates all totals for `items`.
    ///
    /// Validation runs before any arithmetic: line items in order, then the
    /// discount, then the tax rate. The first violation is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if any input is invalid,
    /// [`CalculationError::AmountOverflow`] if a step exceeds the range of
    /// `Decimal`, or [`CalculationError::Words`] if the total is too large to
    /// be written in words.
    pub fn calculate(
        &self,
        items: &[LineItem],
    ) -> Result<InvoiceTotals, CalculationError> {
        validate_items(items)?;
        self.discount.validate()?;
        self.tax.validate()?;

        // Step 1
        let subtotal = self.subtotal(items)?;

        // Step 2
        let discount_amount = self.discount_amount(subtotal)?;

        // Step 3
        let taxable_amount = self.taxable_amount(subtotal, discount_amount)?;

        // Step 4
        let tax_amount = self.tax_amount(taxable_amount)?;

        // Step 5
        let total = self.total(taxable_amount, tax_amount)?;

        let amount_in_words = to_words(total)?;

        debug!(
            items = items.len(),
            subtotal = %subtotal,
            discount_amount = %discount_amount,
            tax_amount = %tax_amount,
            total = %total,
            "invoice totals calculated"
        );

        Ok(InvoiceTotals {
            subtotal,
            discount_amount,
            taxable_amount,
            tax_amount,
            total,
            amount_in_words,
        })
    }

    fn subtotal(
        &self,
        items: &[LineItem],
    ) -> Result<Decimal, CalculationError> {
        let sum = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| {
                item.amount().and_then(|amount| acc.checked_add(amount))
            })
            .ok_or(CalculationError::AmountOverflow("subtotal"))?;
        Ok(round_half_up(sum))
    }

    /// A zero discount value short-circuits for both kinds.
    fn discount_amount(
        &self,
        subtotal: Decimal,
    ) -> Result<Decimal, CalculationError> {
        if self.discount.value <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        match self.discount.kind {
            DiscountKind::Percentage => percent_of(subtotal, self.discount.value)
                .map(round_half_up)
                .ok_or(CalculationError::AmountOverflow("discount")),
            DiscountKind::Fixed => Ok(round_half_up(self.discount.value)),
        }
    }

    fn taxable_amount(
        &self,
        subtotal: Decimal,
        discount_amount: Decimal,
    ) -> Result<Decimal, CalculationError> {
        let taxable = subtotal
            .checked_sub(discount_amount)
            .map(round_half_up)
            .ok_or(CalculationError::AmountOverflow("taxable amount"))?;
        if taxable < Decimal::ZERO {
            warn!(
                subtotal = %subtotal,
                discount_amount = %discount_amount,
                taxable = %taxable,
                "Discount exceeds subtotal; taxable amount is negative"
            );
        }
        Ok(taxable)
    }

    fn tax_amount(
        &self,
        taxable_amount: Decimal,
    ) -> Result<Decimal, CalculationError> {
        percent_of(taxable_amount, self.tax.rate)
            .map(round_half_up)
            .ok_or(CalculationError::AmountOverflow("tax"))
    }

    fn total(
        &self,
        taxable_amount: Decimal,
        tax_amount: Decimal,
    ) -> Result<Decimal, CalculationError> {
        taxable_amount
            .checked_add(tax_amount)
            .map(round_half_up)
            .ok_or(CalculationError::AmountOverflow("total"))
    }
}

/// Computes invoice totals for `items` with the given discount and tax.
///
/// Shorthand for `InvoiceCalculator::new(discount, tax).calculate(items)`.
pub fn compute_totals(
    items: &[LineItem],
    discount: DiscountConfig,
    tax: TaxConfig,
) -> Result<InvoiceTotals, CalculationError> {
    InvoiceCalculator::new(discount, tax).calculate(items)
}

fn validate_items(items: &[LineItem]) -> Result<(), CalculationError> {
    for (index, item) in items.iter().enumerate() {
        if item.quantity < Decimal::ZERO || item.rate < Decimal::ZERO {
            return Err(CalculationError::InvalidQuantityOrRate {
                index,
                quantity: item.quantity,
                rate: item.rate,
            });
        }
    }
    Ok(())
}
