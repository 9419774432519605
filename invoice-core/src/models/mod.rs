mod adjustments;
mod invoice_record;
mod invoice_totals;
mod line_item;

pub use adjustments::{DEFAULT_TAX_RATE, DiscountConfig, DiscountKind, TaxConfig};
pub use invoice_record::{InvoiceRecord, InvoiceStatus};
pub use invoice_totals::InvoiceTotals;
pub use line_item::LineItem;
