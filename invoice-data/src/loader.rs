//! CSV loaders for invoice line items and the invoice ledger.
//!
//! ## Line items
//!
//! | Column        | Type    | Notes |
//! |---------------|---------|-------|
//! | `description` | string  | May be empty |
//! | `quantity`    | decimal | |
//! | `rate`        | decimal | Unit price |
//!
//! ```csv
//! description,quantity,rate
//! Website redesign,1,45000.00
//! Hosting (months),12,1250.50
//! ```
//!
//! ## Ledger
//!
//! | Column           | Type    | Notes |
//! |------------------|---------|-------|
//! | `invoice_number` | string  | e.g. `INV-2024-001` |
//! | `client_name`    | string  | |
//! | `client_email`   | string  | |
//! | `amount`         | decimal | |
//! | `currency`       | string  | ISO code, e.g. `INR` |
//! | `status`         | string  | One of `draft`, `pending`, `paid`, `overdue` (any case) |
//! | `issue_date`     | date    | `YYYY-MM-DD` |
//! | `due_date`       | date    | `YYYY-MM-DD` |

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use invoice_core::{InvoiceRecord, InvoiceStatus, LineItem};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading CSV data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    /// `row` is 1-based and excludes the header.
    #[error("row {row}: unknown invoice status '{status}'")]
    UnknownStatus { row: usize, status: String },
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::CsvParse(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct LineItemRow {
    #[serde(default)]
    description: String,
    quantity: Decimal,
    rate: Decimal,
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    invoice_number: String,
    client_name: String,
    client_email: String,
    amount: Decimal,
    currency: String,
    status: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
}

/// Loader for invoice line items.
pub struct LineItemLoader;

impl LineItemLoader {
    /// Parse line items from a CSV reader. Headers are matched by name.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<LineItem>, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut items = Vec::new();

        for result in csv_reader.deserialize() {
            let row: LineItemRow = result?;
            items.push(LineItem::new(row.description, row.quantity, row.rate));
        }

        debug!(count = items.len(), "parsed line items");
        Ok(items)
    }
}

/// Loader for invoice ledger rows.
pub struct LedgerLoader;

impl LedgerLoader {
    /// Parse ledger records from a CSV reader.
    ///
    /// Fails on the first row whose status is not recognised.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<InvoiceRecord>, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row: LedgerRow = result?;
            let status =
                InvoiceStatus::parse(&row.status).ok_or_else(|| LoadError::UnknownStatus {
                    row: index + 1,
                    status: row.status.clone(),
                })?;

            records.push(InvoiceRecord {
                invoice_number: row.invoice_number,
                client_name: row.client_name,
                client_email: row.client_email,
                amount: row.amount,
                currency: row.currency,
                status,
                issue_date: row.issue_date,
                due_date: row.due_date,
            });
        }

        debug!(count = records.len(), "parsed ledger records");
        Ok(records)
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Opens `path` and parses it with [`LineItemLoader::parse`].
pub fn load_line_items_from_file(path: &Path) -> Result<Vec<LineItem>, LoadError> {
    LineItemLoader::parse(open(path)?)
}

/// Opens `path` and parses it with [`LedgerLoader::parse`].
pub fn load_ledger_from_file(path: &Path) -> Result<Vec<InvoiceRecord>, LoadError> {
    LedgerLoader::parse(open(path)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const ITEMS_CSV: &str = r#"description,quantity,rate
Website redesign,1,45000.00
Hosting (months),12,1250.50
"#;

    const LEDGER_CSV: &str = r#"invoice_number,client_name,client_email,amount,currency,status,issue_date,due_date
INV-2024-001,Acme Corp,contact@acmecorp.com,5000,INR,paid,2024-07-15,2024-08-15
INV-2024-002,TechStart Inc,billing@techstart.com,3500.50,INR,Pending,2024-07-20,2024-08-20
"#;

    // =========================================================================
    // LineItemLoader tests
    // =========================================================================

    #[test]
    fn parse_line_items() {
        let items = LineItemLoader::parse(ITEMS_CSV.as_bytes()).unwrap();

        assert_eq!(
            items,
            vec![
                LineItem::new("Website redesign", dec!(1), dec!(45000.00)),
                LineItem::new("Hosting (months)", dec!(12), dec!(1250.50)),
            ]
        );
    }

    #[test]
    fn parse_line_items_accepts_reordered_columns_and_padding() {
        let csv = "rate, quantity, description\n 10.00 , 3 , Pens \n";

        let items = LineItemLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(items, vec![LineItem::new("Pens", dec!(3), dec!(10.00))]);
    }

    #[test]
    fn parse_line_items_empty_file_yields_no_items() {
        let items = LineItemLoader::parse("description,quantity,rate\n".as_bytes()).unwrap();

        assert!(items.is_empty());
    }

    #[test]
    fn parse_line_items_rejects_non_numeric_quantity() {
        let csv = "description,quantity,rate\nPens,three,10\n";

        let result = LineItemLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(LoadError::CsvParse(_))));
    }

    // =========================================================================
    // LedgerLoader tests
    // =========================================================================

    #[test]
    fn parse_ledger() {
        let records = LedgerLoader::parse(LEDGER_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, InvoiceStatus::Paid);
        assert_eq!(records[1].status, InvoiceStatus::Pending);
        assert_eq!(records[1].amount, dec!(3500.50));
        assert_eq!(
            records[1].due_date,
            NaiveDate::from_ymd_opt(2024, 8, 20).unwrap()
        );
    }

    #[test]
    fn parse_ledger_rejects_unknown_status() {
        let csv = "invoice_number,client_name,client_email,amount,currency,status,issue_date,due_date\n\
                   INV-9,X,x@example.com,1,INR,void,2024-01-01,2024-02-01\n";

        let result = LedgerLoader::parse(csv.as_bytes());

        match result {
            Err(LoadError::UnknownStatus { row, status }) => {
                assert_eq!(row, 1);
                assert_eq!(status, "void");
            }
            other => panic!("expected UnknownStatus, got {other:?}"),
        }
    }

    #[test]
    fn load_from_missing_file_reports_path() {
        let result = load_ledger_from_file(Path::new("does/not/exist.csv"));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
