pub mod loader;
pub mod logging;
pub mod parse;
pub mod report;
pub mod settings;

pub use loader::{LedgerLoader, LineItemLoader, LoadError, load_ledger_from_file, load_line_items_from_file};
pub use settings::{Settings, SettingsError};
