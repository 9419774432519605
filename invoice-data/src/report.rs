//! Plain-text rendering of totals and ledger pages for the terminal.

use std::fmt;

use invoice_core::calculations::common::round_half_up;
use invoice_core::ledger::{ClientSummary, DashboardStats, MonthlyRevenue, Page};
use invoice_core::{InvoiceRecord, InvoiceStatus, InvoiceTotals, LineItem};
use rust_decimal::Decimal;

/// Formats a money amount with exactly two decimal places.
pub fn money(amount: Decimal) -> String {
    let mut fixed = round_half_up(amount);
    fixed.rescale(2);
    fixed.to_string()
}

/// Line items followed by the totals block.
pub struct TotalsReport<'a> {
    pub items: &'a [LineItem],
    pub totals: &'a InvoiceTotals,
    pub currency: &'a str,
}

impl fmt::Display for TotalsReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:<32} {:>10} {:>14} {:>16}",
            "DESCRIPTION", "QUANTITY", "RATE", "AMOUNT"
        )?;
        for item in self.items {
            writeln!(
                f,
                "{:<32} {:>10} {:>14} {:>16}",
                item.description,
                item.quantity,
                money(item.rate),
                item.amount().map(money).unwrap_or_else(|| "-".to_string())
            )?;
        }
        writeln!(f)?;

        let t = self.totals;
        let rows = [
            ("Subtotal", t.subtotal),
            ("Discount", t.discount_amount),
            ("Taxable amount", t.taxable_amount),
            ("Tax", t.tax_amount),
            ("Total", t.total),
        ];
        for (label, amount) in rows {
            writeln!(f, "{:<16} {} {:>16}", label, self.currency, money(amount))?;
        }
        writeln!(f)?;
        write!(f, "Amount in words: {}", t.amount_in_words)
    }
}

/// One page of the ledger plus the dashboard figures for the whole ledger.
pub struct LedgerReport<'a> {
    pub page: &'a Page<&'a InvoiceRecord>,
    pub stats: &'a DashboardStats,
    pub revenue: &'a MonthlyRevenue,
    pub clients: &'a [ClientSummary],
}

impl fmt::Display for LedgerReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = self.stats;
        writeln!(f, "Invoices:     {}", s.total_invoices)?;
        writeln!(f, "Clients:      {}", s.total_clients)?;
        writeln!(f, "Revenue:      {}", money(s.total_revenue))?;
        writeln!(f, "Outstanding:  {}", money(s.outstanding))?;
        writeln!(f, "Overdue:      {}", money(s.overdue_amount))?;
        let counts: Vec<String> = InvoiceStatus::ALL
            .iter()
            .map(|status| format!("{status}={}", s.count_for(*status)))
            .collect();
        writeln!(f, "By status:    {}", counts.join(" "))?;
        match self.revenue.change {
            Some(change) => writeln!(
                f,
                "This month:   {} ({:+}% from last month)",
                money(self.revenue.current),
                change
            )?,
            None => writeln!(
                f,
                "This month:   {} (no revenue last month)",
                money(self.revenue.current)
            )?,
        }
        writeln!(f)?;

        if !self.clients.is_empty() {
            writeln!(f, "Top clients:")?;
            for client in self.clients {
                writeln!(
                    f,
                    "  {:<24} {:>3} {:>14}",
                    client.name,
                    client.total_invoices,
                    money(client.total_amount)
                )?;
            }
            writeln!(f)?;
        }

        for record in &self.page.items {
            writeln!(
                f,
                "{:<14} {:<24} {:>14} {:<4} {:<8} {} {}",
                record.invoice_number,
                record.client_name,
                money(record.amount),
                record.currency,
                record.status,
                record.issue_date,
                record.due_date
            )?;
        }

        write!(
            f,
            "Showing {} to {} of {} results (page {} of {})",
            self.page.first_index(),
            self.page.last_index(),
            self.page.total_items,
            self.page.page,
            self.page.total_pages.max(1)
        )
    }
}
