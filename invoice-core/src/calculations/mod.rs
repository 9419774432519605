//! Invoice calculations: totals arithmetic and amount-in-words rendering.

pub mod common;
pub mod totals;
pub mod words;

pub use totals::{CalculationError, InvoiceCalculator, compute_totals};
pub use words::{MAX_RUPEES, WordsError, to_words};
