//! Filtering and pagination for the invoice list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{InvoiceRecord, InvoiceStatus};

/// Page size of the invoices list.
pub const DEFAULT_PER_PAGE: usize = 8;

/// Criteria for narrowing the invoice list. Unset criteria match everything;
/// set criteria must all match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,

    /// Case-insensitive substring of the client name, invoice number or
    /// client email.
    pub search: Option<String>,

    /// Inclusive lower bound on the due date.
    pub due_from: Option<NaiveDate>,

    /// Inclusive upper bound on the due date.
    pub due_to: Option<NaiveDate>,
}

impl InvoiceFilter {
    pub fn matches(
        &self,
        record: &InvoiceRecord,
    ) -> bool {
        if self.status.is_some_and(|status| status != record.status) {
            return false;
        }

        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let found = [
                &record.client_name,
                &record.invoice_number,
                &record.client_email,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
            if !found {
                return false;
            }
        }

        if self.due_from.is_some_and(|from| record.due_date < from) {
            return false;
        }
        if self.due_to.is_some_and(|to| record.due_date > to) {
            return false;
        }

        true
    }

    /// Returns the matching records in their original order.
    pub fn apply<'a>(
        &self,
        records: &'a [InvoiceRecord],
    ) -> Vec<&'a InvoiceRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// 1-based; always within `1..=total_pages` (or 1 for an empty list).
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 1-based position of the first item on this page, or 0 when empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// 1-based position of the last item on this page, or 0 when empty.
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }
}

/// Slices `items` into the requested 1-based page.
///
/// Out-of-range pages are clamped to the nearest valid page and a
/// `per_page` of zero is treated as one.
pub fn paginate<T: Clone>(
    items: &[T],
    page: usize,
    per_page: usize,
) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let slice = items.get(start..end).unwrap_or_default();

    Page {
        items: slice.to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}
