use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use invoice_core::ledger::{
    DashboardStats, InvoiceFilter, MonthlyRevenue, paginate, refresh_overdue, top_clients,
};
use invoice_core::{InvoiceCalculator, InvoiceRecord, InvoiceStatus, TaxConfig, to_words};
use invoice_data::logging::{DEFAULT_FILTER, init_logging};
use invoice_data::parse::{parse_decimal, parse_discount};
use invoice_data::report::{LedgerReport, TotalsReport};
use invoice_data::{Settings, load_ledger_from_file, load_line_items_from_file};
use tracing::{debug, info};

/// Clients listed in the ledger summary.
const TOP_CLIENTS: usize = 5;

/// Invoice totals, amount-in-words and ledger summaries.
#[derive(Debug, Parser)]
#[command(name = "invoice-calc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML settings file with currency, default tax rate and discount
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also append log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the totals block for a CSV of line items
    Totals {
        /// CSV file with description,quantity,rate columns
        #[arg(short, long)]
        items: PathBuf,

        /// Discount as an amount ("250") or a percentage ("10%")
        #[arg(short, long)]
        discount: Option<String>,

        /// Tax rate in percent (defaults to the settings value, 18)
        #[arg(short, long)]
        tax_rate: Option<String>,
    },

    /// Write an amount in words
    Words {
        /// Amount, e.g. "12,34,567.89"
        amount: String,
    },

    /// Filter, page and summarise an invoice ledger CSV
    Ledger {
        /// CSV file with the invoice ledger
        #[arg(short, long)]
        file: PathBuf,

        /// Only invoices with this status (draft, pending, paid, overdue)
        #[arg(long, value_parser = parse_status)]
        status: Option<InvoiceStatus>,

        /// Case-insensitive match on client name, email or invoice number
        #[arg(long)]
        search: Option<String>,

        /// Earliest due date (YYYY-MM-DD), inclusive
        #[arg(long)]
        due_from: Option<NaiveDate>,

        /// Latest due date (YYYY-MM-DD), inclusive
        #[arg(long)]
        due_to: Option<NaiveDate>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Date used to mark past-due pending invoices as overdue (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

fn parse_status(s: &str) -> Result<InvoiceStatus, String> {
    InvoiceStatus::parse(s).ok_or_else(|| format!("unknown status '{s}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(DEFAULT_FILTER, cli.log_file.as_deref())?;

    let settings = Settings::load_or_default(cli.config.as_deref())?;
    debug!(currency = %settings.currency, "settings ready");

    match cli.command {
        Command::Totals {
            items,
            discount,
            tax_rate,
        } => {
            let line_items = load_line_items_from_file(&items)
                .with_context(|| format!("Failed to load line items: {}", items.display()))?;

            let discount = match discount {
                Some(text) => parse_discount(&text)?,
                None => settings.default_discount,
            };
            let tax = match tax_rate {
                Some(text) => TaxConfig::new(parse_decimal(&text)?),
                None => settings.tax(),
            };

            let totals = InvoiceCalculator::new(discount, tax)
                .calculate(&line_items)
                .context("Failed to calculate invoice totals")?;

            println!(
                "{}",
                TotalsReport {
                    items: &line_items,
                    totals: &totals,
                    currency: &settings.currency,
                }
            );
        }

        Command::Words { amount } => {
            let amount = parse_decimal(&amount)?;
            println!("{}", to_words(amount)?);
        }

        Command::Ledger {
            file,
            status,
            search,
            due_from,
            due_to,
            page,
            today,
        } => {
            let mut records: Vec<InvoiceRecord> = load_ledger_from_file(&file)
                .with_context(|| format!("Failed to load ledger: {}", file.display()))?;

            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let changed = refresh_overdue(&mut records, today);
            if changed > 0 {
                info!(changed, %today, "marked past-due invoices as overdue");
            }

            let filter = InvoiceFilter {
                status,
                search,
                due_from,
                due_to,
            };
            let matching = filter.apply(&records);
            let page = paginate(&matching, page, settings.items_per_page);
            let stats = DashboardStats::from_records(&records)
                .context("Failed to summarise ledger")?;
            let revenue = MonthlyRevenue::for_month(&records, today)
                .context("Failed to summarise monthly revenue")?;
            let clients =
                top_clients(&records, TOP_CLIENTS).context("Failed to rank clients")?;

            println!(
                "{}",
                LedgerReport {
                    page: &page,
                    stats: &stats,
                    revenue: &revenue,
                    clients: &clients,
                }
            );
        }
    }

    Ok(())
}
