//! Invoice status transitions.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::models::{InvoiceRecord, InvoiceStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invoice {invoice} cannot move from {from} to {to}")]
    InvalidTransition {
        invoice: String,
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    #[error("adding invoice {invoice} overflows the ledger total")]
    AmountOverflow { invoice: String },
}

impl InvoiceRecord {
    /// Records payment of an issued invoice.
    ///
    /// Only pending and overdue invoices can be paid; a draft has not been
    /// sent to the client and a paid invoice stays paid.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidTransition`] for draft or paid invoices.
    pub fn mark_paid(&mut self) -> Result<(), LedgerError> {
        if !self.status.is_outstanding() {
            return Err(LedgerError::InvalidTransition {
                invoice: self.invoice_number.clone(),
                from: self.status,
                to: InvoiceStatus::Paid,
            });
        }
        self.status = InvoiceStatus::Paid;
        Ok(())
    }

    /// A pending invoice whose due date is strictly before `today`.
    pub fn is_past_due(
        &self,
        today: NaiveDate,
    ) -> bool {
        self.status == InvoiceStatus::Pending && self.due_date < today
    }
}

/// Moves every past-due pending invoice to overdue.
///
/// Returns the number of records that changed.
pub fn refresh_overdue(
    records: &mut [InvoiceRecord],
    today: NaiveDate,
) -> usize {
    let mut changed = 0;
    for record in records.iter_mut().filter(|r| r.is_past_due(today)) {
        debug!(
            invoice = %record.invoice_number,
            due_date = %record.due_date,
            "invoice is past due"
        );
        record.status = InvoiceStatus::Overdue;
        changed += 1;
    }
    changed
}
