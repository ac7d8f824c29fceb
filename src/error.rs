//! Error types for the crypto checker core

use thiserror::Error;

/// Errors a market data source can report while producing a snapshot
#[derive(Debug, Error, Clone)]
pub enum SourceError {
    /// Source could not be reached
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// Source answered with data that could not be turned into coins
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Timeout waiting for the source
    #[error("Source timeout")]
    Timeout,
}

/// Errors produced while parsing a user-entered amount
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    /// Nothing was entered
    #[error("Amount is empty")]
    Empty,

    /// Input is not a number
    #[error("Not a number: {0}")]
    NotANumber(String),

    /// Amount is below zero
    #[error("Amount must not be negative: {0}")]
    Negative(f64),

    /// Amount is infinite or NaN
    #[error("Amount must be finite")]
    NotFinite,
}

/// Errors in the runtime configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Reference currency code is not usable
    #[error("Invalid reference currency: {0:?}")]
    InvalidCurrency(String),
}

/// Errors from registry operations addressed by name
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    /// No coin with this name is listed
    #[error("Coin not found: {0}")]
    CoinNotFound(String),

    /// Holding quantity is negative or not finite
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),
}

impl SourceError {
    /// Creates an Unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Creates an InvalidData error
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

impl RegistryError {
    /// Creates a CoinNotFound error
    pub fn coin_not_found(name: &str) -> Self {
        Self::CoinNotFound(name.to_string())
    }
}
