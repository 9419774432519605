//! Dashboard statistics over the invoice ledger.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_dp_half_up;
use crate::ledger::status::LedgerError;
use crate::models::{InvoiceRecord, InvoiceStatus};

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_invoices: usize,

    /// Distinct client names, compared case-insensitively.
    pub total_clients: usize,

    /// Sum of paid invoice amounts.
    pub total_revenue: Decimal,

    /// Sum of pending and overdue invoice amounts.
    pub outstanding: Decimal,
    pub overdue_amount: Decimal,

    pub draft_count: usize,
    pub pending_count: usize,
    pub paid_count: usize,
    pub overdue_count: usize,
}

impl DashboardStats {
    /// # Errors
    ///
    /// Returns [`LedgerError::AmountOverflow`] if a sum leaves the range of
    /// `Decimal`.
    pub fn from_records(records: &[InvoiceRecord]) -> Result<Self, LedgerError> {
        let mut stats = Self {
            total_invoices: records.len(),
            total_clients: distinct_clients(records),
            ..Self::default()
        };

        for record in records {
            match record.status {
                InvoiceStatus::Draft => stats.draft_count += 1,
                InvoiceStatus::Pending => {
                    stats.pending_count += 1;
                    add_amount(&mut stats.outstanding, record)?;
                }
                InvoiceStatus::Paid => {
                    stats.paid_count += 1;
                    add_amount(&mut stats.total_revenue, record)?;
                }
                InvoiceStatus::Overdue => {
                    stats.overdue_count += 1;
                    add_amount(&mut stats.outstanding, record)?;
                    add_amount(&mut stats.overdue_amount, record)?;
                }
            }
        }

        Ok(stats)
    }

    pub fn count_for(
        &self,
        status: InvoiceStatus,
    ) -> usize {
        match status {
            InvoiceStatus::Draft => self.draft_count,
            InvoiceStatus::Pending => self.pending_count,
            InvoiceStatus::Paid => self.paid_count,
            InvoiceStatus::Overdue => self.overdue_count,
        }
    }
}

/// Per-client totals for the "recent clients" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub name: String,
    pub email: String,
    pub total_invoices: usize,

    /// Sum of all invoice amounts billed to the client, regardless of status.
    pub total_amount: Decimal,
}

/// Paid revenue for the month containing `today` against the month before,
/// keyed on issue date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub current: Decimal,
    pub previous: Decimal,

    /// `None` when there was no revenue in the previous month.
    pub change: Option<Decimal>,
}

impl MonthlyRevenue {
    pub fn for_month(
        records: &[InvoiceRecord],
        today: NaiveDate,
    ) -> Result<Self, LedgerError> {
        let current = paid_in_month(records, today)?;
        let previous = match today.checked_sub_months(Months::new(1)) {
            Some(day) => paid_in_month(records, day)?,
            None => Decimal::ZERO,
        };

        Ok(Self {
            current,
            previous,
            change: percent_change(previous, current),
        })
    }
}

/// Sum of paid amounts issued in the calendar month of `day`.
fn paid_in_month(
    records: &[InvoiceRecord],
    day: NaiveDate,
) -> Result<Decimal, LedgerError> {
    let mut total = Decimal::ZERO;
    for record in records.iter().filter(|r| {
        r.status == InvoiceStatus::Paid
            && r.issue_date.year() == day.year()
            && r.issue_date.month() == day.month()
    }) {
        add_amount(&mut total, record)?;
    }
    Ok(total)
}

/// Percentage change from `previous` to `current`, rounded to one place.
///
/// Returns `None` when `previous` is zero or the change does not fit in a
/// `Decimal`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::ledger::percent_change;
///
/// assert_eq!(percent_change(dec!(8000), dec!(9000)), Some(dec!(12.5)));
/// assert_eq!(percent_change(dec!(0), dec!(9000)), None);
/// ```
pub fn percent_change(
    previous: Decimal,
    current: Decimal,
) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    let change = current
        .checked_sub(previous)?
        .checked_div(previous.abs())?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    Some(round_dp_half_up(change, 1))
}

/// Clients ranked by total billed amount, highest first; ties by name.
///
/// # Errors
///
/// Returns [`LedgerError::AmountOverflow`] if a client's total leaves the
/// range of `Decimal`.
pub fn top_clients(
    records: &[InvoiceRecord],
    limit: usize,
) -> Result<Vec<ClientSummary>, LedgerError> {
    let mut by_client: HashMap<String, ClientSummary> = HashMap::new();

    for record in records {
        let summary = by_client
            .entry(record.client_name.to_lowercase())
            .or_insert_with(|| ClientSummary {
                name: record.client_name.clone(),
                email: record.client_email.clone(),
                total_invoices: 0,
                total_amount: Decimal::ZERO,
            });
        summary.total_invoices += 1;
        add_amount(&mut summary.total_amount, record)?;
    }

    let mut summaries: Vec<ClientSummary> = by_client.into_values().collect();
    summaries.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.name.cmp(&b.name))
    });
    summaries.truncate(limit);
    Ok(summaries)
}

fn add_amount(
    total: &mut Decimal,
    record: &InvoiceRecord,
) -> Result<(), LedgerError> {
    *total = total
        .checked_add(record.amount)
        .ok_or_else(|| LedgerError::AmountOverflow {
            invoice: record.invoice_number.clone(),
        })?;
    Ok(())
}

fn distinct_clients(records: &[InvoiceRecord]) -> usize {
    let mut names: Vec<String> = records
        .iter()
        .map(|r| r.client_name.to_lowercase())
        .collect();
    names.sort_unstable();
    names.dedup();
    names.len()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(
        number: &str,
        client: &str,
        amount: Decimal,
        status: InvoiceStatus,
    ) -> InvoiceRecord {
        issued(number, client, amount, status, date("2024-07-15"))
    }

    fn issued(
        number: &str,
        client: &str,
        amount: Decimal,
        status: InvoiceStatus,
        date: NaiveDate,
    ) -> InvoiceRecord {
        InvoiceRecord {
            invoice_number: number.to_string(),
            client_name: client.to_string(),
            client_email: format!("{}@example.com", client.to_lowercase().replace(' ', "")),
            amount,
            currency: "INR".to_string(),
            status,
            issue_date: date,
            due_date: date,
        }
    }

    fn ledger() -> Vec<InvoiceRecord> {
        vec![
            record("INV-1", "Acme Corp", dec!(5000), InvoiceStatus::Paid),
            record("INV-2", "TechStart Inc", dec!(3500), InvoiceStatus::Pending),
            record("INV-3", "Global Services", dec!(7500), InvoiceStatus::Overdue),
            record("INV-4", "Innovate LLC", dec!(4200), InvoiceStatus::Draft),
            record("INV-5", "acme corp", dec!(6800), InvoiceStatus::Paid),
        ]
    }

    // =========================================================================
    // DashboardStats tests
    // =========================================================================

    #[test]
    fn from_records_aggregates_by_status() {
        let stats = DashboardStats::from_records(&ledger()).unwrap();

        assert_eq!(
            stats,
            DashboardStats {
                total_invoices: 5,
                total_clients: 4,
                total_revenue: dec!(11800),
                outstanding: dec!(11000),
                overdue_amount: dec!(7500),
                draft_count: 1,
                pending_count: 1,
                paid_count: 2,
                overdue_count: 1,
            }
        );
    }

    #[test]
    fn from_records_handles_empty_ledger() {
        let stats = DashboardStats::from_records(&[]).unwrap();

        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn from_records_reports_overflowing_outstanding_total() {
        let records = vec![
            record("INV-1", "Acme Corp", Decimal::MAX, InvoiceStatus::Pending),
            record("INV-2", "TechStart Inc", dec!(1), InvoiceStatus::Overdue),
        ];

        let result = DashboardStats::from_records(&records);

        assert_eq!(
            result,
            Err(LedgerError::AmountOverflow {
                invoice: "INV-2".to_string()
            })
        );
    }

    #[test]
    fn count_for_matches_status_counts() {
        let stats = DashboardStats::from_records(&ledger()).unwrap();

        let total: usize = InvoiceStatus::ALL.iter().map(|s| stats.count_for(*s)).sum();

        assert_eq!(total, stats.total_invoices);
    }

    // =========================================================================
    // percent_change tests
    // =========================================================================

    #[test]
    fn percent_change_reports_increase() {
        assert_eq!(percent_change(dec!(200), dec!(250)), Some(dec!(25.0)));
    }

    #[test]
    fn percent_change_reports_decrease() {
        assert_eq!(percent_change(dec!(200), dec!(150)), Some(dec!(-25.0)));
    }

    #[test]
    fn percent_change_rounds_to_one_place() {
        assert_eq!(percent_change(dec!(3), dec!(4)), Some(dec!(33.3)));
    }

    #[test]
    fn percent_change_is_none_from_zero() {
        assert_eq!(percent_change(dec!(0), dec!(10)), None);
    }

    #[test]
    fn percent_change_is_none_when_difference_overflows() {
        assert_eq!(percent_change(dec!(-1), Decimal::MAX), None);
    }

    // =========================================================================
    // MonthlyRevenue tests
    // =========================================================================

    #[test]
    fn monthly_revenue_compares_paid_amounts_by_issue_month() {
        let records = vec![
            issued("INV-1", "Acme Corp", dec!(4000), InvoiceStatus::Paid, date("2024-07-03")),
            issued("INV-2", "Acme Corp", dec!(900), InvoiceStatus::Pending, date("2024-07-09")),
            issued("INV-3", "Beta", dec!(5000), InvoiceStatus::Paid, date("2024-08-01")),
            issued("INV-4", "Beta", dec!(700), InvoiceStatus::Paid, date("2023-08-20")),
        ];

        let revenue = MonthlyRevenue::for_month(&records, date("2024-08-25")).unwrap();

        assert_eq!(
            revenue,
            MonthlyRevenue {
                current: dec!(5000),
                previous: dec!(4000),
                change: Some(dec!(25.0)),
            }
        );
    }

    #[test]
    fn monthly_revenue_crosses_year_boundary() {
        let records = vec![
            issued("INV-1", "Acme Corp", dec!(1000), InvoiceStatus::Paid, date("2023-12-30")),
            issued("INV-2", "Acme Corp", dec!(500), InvoiceStatus::Paid, date("2024-01-02")),
        ];

        let revenue = MonthlyRevenue::for_month(&records, date("2024-01-15")).unwrap();

        assert_eq!(revenue.previous, dec!(1000));
        assert_eq!(revenue.change, Some(dec!(-50.0)));
    }

    #[test]
    fn monthly_revenue_has_no_change_without_previous_revenue() {
        let records = vec![issued(
            "INV-1",
            "Acme Corp",
            dec!(1000),
            InvoiceStatus::Paid,
            date("2024-08-02"),
        )];

        let revenue = MonthlyRevenue::for_month(&records, date("2024-08-25")).unwrap();

        assert_eq!(revenue.change, None);
    }

    // =========================================================================
    // top_clients tests
    // =========================================================================

    #[test]
    fn top_clients_merges_names_case_insensitively() {
        let clients = top_clients(&ledger(), 10).unwrap();

        assert_eq!(clients[0].name, "Acme Corp");
        assert_eq!(clients[0].total_invoices, 2);
        assert_eq!(clients[0].total_amount, dec!(11800));
    }

    #[test]
    fn top_clients_orders_by_amount_then_name_and_truncates() {
        let records = vec![
            record("INV-1", "Beta", dec!(100), InvoiceStatus::Paid),
            record("INV-2", "Alpha", dec!(100), InvoiceStatus::Pending),
            record("INV-3", "Gamma", dec!(900), InvoiceStatus::Draft),
        ];

        let clients = top_clients(&records, 2).unwrap();

        let names: Vec<_> = clients.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Gamma", "Alpha"]);
    }

    #[test]
    fn top_clients_reports_overflowing_client_total() {
        let records = vec![
            record("INV-1", "Acme Corp", Decimal::MAX, InvoiceStatus::Paid),
            record("INV-2", "ACME CORP", Decimal::MAX, InvoiceStatus::Paid),
        ];

        let result = top_clients(&records, 5);

        assert_eq!(
            result,
            Err(LedgerError::AmountOverflow {
                invoice: "INV-2".to_string()
            })
        );
    }
}
