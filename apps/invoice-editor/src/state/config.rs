//! # Configuration State
//!
//! Editor configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SUITE_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no mutex needed.

use billing_core::{Money, TaxRate, Unit};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tenant used when none is configured (single-tenant development).
const DEFAULT_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Tenant (organization) the documents belong to.
    pub tenant_id: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Tax rate given to newly added lines.
    pub default_tax_rate: TaxRate,

    /// Unit given to newly added lines.
    pub default_unit: Unit,
}

impl Default for EditorConfig {
    /// Development defaults: USD, 20% default tax, unit "unit".
    fn default() -> Self {
        EditorConfig {
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            default_tax_rate: TaxRate::from_bps(2000),
            default_unit: Unit::Unit,
        }
    }
}

impl EditorConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SUITE_TENANT_ID`: Override tenant ID
    /// - `SUITE_CURRENCY_CODE`: e.g. "EUR"
    /// - `SUITE_CURRENCY_SYMBOL`: e.g. "€"
    /// - `SUITE_DEFAULT_TAX_RATE`: percentage, e.g. "5.5"
    /// - `SUITE_DEFAULT_UNIT`: e.g. "hour"
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Values that fail to parse are
    /// skipped with a warning and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EditorConfig::default();

        if let Some(tenant_id) = lookup("SUITE_TENANT_ID") {
            config.tenant_id = tenant_id;
        }

        if let Some(code) = lookup("SUITE_CURRENCY_CODE") {
            config.currency_code = code;
        }

        if let Some(symbol) = lookup("SUITE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(rate) = lookup("SUITE_DEFAULT_TAX_RATE") {
            match rate.parse::<TaxRate>() {
                Ok(rate) => config.default_tax_rate = rate,
                Err(e) => warn!(value = %rate, error = %e, "Ignoring SUITE_DEFAULT_TAX_RATE"),
            }
        }

        if let Some(unit) = lookup("SUITE_DEFAULT_UNIT") {
            match unit.parse::<Unit>() {
                Ok(unit) => config.default_unit = unit,
                Err(e) => warn!(value = %unit, error = %e, "Ignoring SUITE_DEFAULT_UNIT"),
            }
        }

        config
    }

    /// Formats an amount with the configured symbol and decimals.
    ///
    /// ## Example
    /// ```rust
    /// use billing_core::Money;
    /// use invoice_editor::state::EditorConfig;
    ///
    /// let config = EditorConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let minor = amount.cents().unsigned_abs();
        let decimals = u32::from(self.currency_decimals);
        if decimals == 0 {
            return format!("{sign}{}{minor}", self.currency_symbol);
        }

        let scale = 10_u64.pow(decimals);
        format!(
            "{sign}{}{}.{:0width$}",
            self.currency_symbol,
            minor / scale,
            minor % scale,
            width = decimals as usize
        )
    }
}
