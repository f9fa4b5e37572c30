//! # Terminal Configuration
//!
//! Stores terminal configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOCKMATE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock is needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use stockmate_core::types::TaxRate;
use stockmate_core::{DEFAULT_GST_RATE_BPS, LOW_STOCK_THRESHOLD};

/// Terminal configuration.
///
/// ## Fields
/// Most fields have sensible defaults for development.
/// Production deployments should configure these properly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosConfig {
    /// Store name (displayed on invoices)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// GST rate in basis points, e.g., 1800 = 18%.
    /// Applied only when the billing screen's tax toggle is on.
    pub tax_rate_bps: u32,

    /// Stock level below which a product counts as low stock
    pub low_stock_threshold: i64,

    /// Directory for the key-value store files
    pub data_dir: PathBuf,
}

impl Default for PosConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "StockMate Pro"
    /// - Currency: INR (₹), 2 decimals
    /// - GST: 18%
    /// - Low-stock threshold: 5
    /// - Data: ./stockmate_data
    fn default() -> Self {
        PosConfig {
            store_name: "StockMate Pro".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            tax_rate_bps: DEFAULT_GST_RATE_BPS,
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            data_dir: PathBuf::from("./stockmate_data"),
        }
    }
}

impl PosConfig {
    /// Creates a new PosConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOCKMATE_STORE_NAME`: Override store name
    /// - `STOCKMATE_TAX_RATE`: Override GST rate as a percentage (e.g., "18")
    /// - `STOCKMATE_LOW_STOCK_THRESHOLD`: Override the low-stock cutoff
    /// - `STOCKMATE_DATA_DIR`: Override the data directory
    pub fn from_env() -> Self {
        let mut config = PosConfig::default();

        if let Ok(store_name) = std::env::var("STOCKMATE_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(tax_rate_str) = std::env::var("STOCKMATE_TAX_RATE") {
            if let Ok(rate) = tax_rate_str.parse::<f64>() {
                config.tax_rate_bps = (rate * 100.0) as u32;
            }
        }

        if let Ok(threshold_str) = std::env::var("STOCKMATE_LOW_STOCK_THRESHOLD") {
            if let Ok(threshold) = threshold_str.parse::<i64>() {
                config.low_stock_threshold = threshold;
            }
        }

        if let Ok(data_dir) = std::env::var("STOCKMATE_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        config
    }

    /// Returns the configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Formats a paise amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = PosConfig::default();
    /// assert_eq!(config.format_currency(15099), "₹150.99");
    /// ```
    pub fn format_currency(&self, paise: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = paise / divisor;
        let frac = (paise % divisor).abs();

        format!(
            "{}{}{}",
            if paise < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
