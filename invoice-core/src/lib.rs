pub mod calculations;
pub mod ledger;
pub mod models;

#[cfg(test)]
mod test_support;

pub use calculations::{CalculationError, InvoiceCalculator, WordsError, compute_totals, to_words};
pub use models::*;
