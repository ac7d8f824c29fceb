//! Runtime configuration
//!
//! The reference currency is an explicit value handed to the conversion engine
//! and the price formatter. Nothing in the crate reads it from shared state.

use crate::{
    constants::{DEFAULT_REFERENCE_CURRENCY, REFERENCE_CURRENCY_ENV},
    error::ConfigError,
};
use std::env;

/// Configuration shared by the engine and the formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    reference_currency: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            reference_currency: DEFAULT_REFERENCE_CURRENCY.to_string(),
        }
    }
}

impl CheckerConfig {
    /// Creates a configuration for the given currency code
    ///
    /// The code is trimmed and upper-cased. It must be 2 to 10 ASCII
    /// alphanumeric characters.
    pub fn new(reference_currency: &str) -> Result<Self, ConfigError> {
        let code = reference_currency.trim().to_ascii_uppercase();
        let valid = (2..=10).contains(&code.len())
            && code.chars().all(|c| c.is_ascii_alphanumeric());

        if !valid {
            return Err(ConfigError::InvalidCurrency(reference_currency.to_string()));
        }

        Ok(Self {
            reference_currency: code,
        })
    }

    /// Reads the configuration from `CRYPTO_CHECKER_CURRENCY`
    ///
    /// Falls back to the default currency when the variable is unset or invalid.
    pub fn from_env() -> Self {
        match env::var(REFERENCE_CURRENCY_ENV) {
            Ok(value) => Self::new(&value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring reference currency from environment");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Reference currency code, e.g. "USD"
    pub fn reference_currency(&self) -> &str {
        &self.reference_currency
    }
}
