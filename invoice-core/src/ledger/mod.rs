//! The invoice ledger: status transitions, list filtering and dashboard figures.

pub mod dashboard;
pub mod filter;
pub mod status;

pub use dashboard::{ClientSummary, DashboardStats, MonthlyRevenue, percent_change, top_clients};
pub use filter::{DEFAULT_PER_PAGE, InvoiceFilter, Page, paginate};
pub use status::{LedgerError, refresh_overdue};
