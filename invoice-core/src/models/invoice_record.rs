use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [Self::Draft, Self::Pending, Self::Paid, Self::Overdue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    /// Parses a status code, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    /// Whether money is still owed on an invoice in this status.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Pending | Self::Overdue)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One row of the invoice ledger (the invoices list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
}
