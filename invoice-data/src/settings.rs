//! Invoice defaults loaded from a TOML file.
//!
//! Every key is optional; missing keys fall back to [`Settings::default`].
//!
//! ```toml
//! currency = "INR"
//! default_tax_rate = "18"
//! items_per_page = 8
//!
//! [default_discount]
//! kind = "percentage"
//! value = "5"
//! ```

use std::fs;
use std::path::Path;

use invoice_core::ledger::DEFAULT_PER_PAGE;
use invoice_core::{DEFAULT_TAX_RATE, DiscountConfig, TaxConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file '{path}': {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// ISO currency code shown next to amounts.
    pub currency: String,

    /// Tax percentage used when none is given on the command line.
    pub default_tax_rate: Decimal,

    pub default_discount: DiscountConfig,

    pub items_per_page: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            default_tax_rate: DEFAULT_TAX_RATE,
            default_discount: DiscountConfig::none(),
            items_per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads settings from `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_toml_str(&text).map_err(|source| SettingsError::Toml {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Reads settings from `path` when given, otherwise returns defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn tax(&self) -> TaxConfig {
        TaxConfig::new(self.default_tax_rate)
    }
}
