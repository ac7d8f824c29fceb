//! Conversion between tracked assets
//!
//! All prices are quoted in the reference currency. Converting `amount` units
//! of a source asset into a target asset is `(source_price / target_price) * amount`,
//! except when the target is the fiat reference itself (`price == 0`), where the
//! result is the source value in the reference currency: `source_price * amount`.
//!
//! The ratio is taken first and then scaled by the amount. For prices within a
//! few orders of magnitude of each other the ratio is well conditioned, and the
//! amount only scales it once.

use crate::{
    config::CheckerConfig,
    constants::FIAT_PRICE_SENTINEL,
    error::InputError,
    format,
    types::{Coin, PriceBasis},
};
use std::fmt;

/// Converts `amount` from a source price basis to a target price basis
///
/// A target price of exactly zero is the fiat reference: the source value is
/// expressed in the reference currency instead of dividing by zero. A zero
/// *source* price goes through the general formula and yields `0`; other
/// degenerate inputs are not special-cased.
pub fn convert(amount: f64, source_price: f64, target_price: f64) -> f64 {
    if target_price == FIAT_PRICE_SENTINEL {
        return source_price * amount;
    }
    (source_price / target_price) * amount
}

/// Parses a user-entered amount
///
/// Surrounding whitespace is ignored. Empty, non-numeric, non-finite and
/// negative input is rejected.
pub fn parse_amount(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let amount: f64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;

    if !amount.is_finite() {
        return Err(InputError::NotFinite);
    }
    if amount < 0.0 {
        return Err(InputError::Negative(amount));
    }

    Ok(amount)
}

/// Result of converting an amount between two coins
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionQuote {
    /// Amount of the source asset
    pub amount: f64,
    /// Source asset symbol
    pub from_symbol: String,
    /// Target asset symbol
    pub to_symbol: String,
    /// Amount of the target asset
    pub result: f64,
}

impl fmt::Display for ConversionQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} = {} {}",
            format::trim_price(self.amount),
            self.from_symbol,
            format::trim_price(self.result),
            self.to_symbol
        )
    }
}

/// Conversion engine bound to a reference currency
#[derive(Debug, Clone, Default)]
pub struct ConversionEngine {
    config: CheckerConfig,
}

impl ConversionEngine {
    /// Creates an engine for the given configuration
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Reference currency the engine's prices are quoted in
    pub fn reference_currency(&self) -> &str {
        self.config.reference_currency()
    }

    /// See [`convert`]
    pub fn convert(&self, amount: f64, source_price: f64, target_price: f64) -> f64 {
        convert(amount, source_price, target_price)
    }

    /// Converts between two coins, resolving the fiat entry on either side
    ///
    /// Unlike the raw [`convert`], a fiat source is handled as well: an amount
    /// of the reference currency buys `amount / price` units of the target.
    /// Round trips through the fiat entry therefore recover the amount.
    pub fn convert_coins(&self, amount: f64, source: &Coin, target: &Coin) -> f64 {
        match (source.price_basis(), target.price_basis()) {
            (PriceBasis::Quoted(source_price), PriceBasis::Quoted(target_price)) => {
                convert(amount, source_price, target_price)
            }
            (PriceBasis::Quoted(source_price), PriceBasis::Fiat) => source_price * amount,
            (PriceBasis::Fiat, PriceBasis::Quoted(target_price)) => amount / target_price,
            (PriceBasis::Fiat, PriceBasis::Fiat) => amount,
        }
    }

    /// Converts between two coins and keeps the symbols for display
    pub fn quote(&self, amount: f64, source: &Coin, target: &Coin) -> ConversionQuote {
        let result = self.convert_coins(amount, source, target);

        tracing::debug!(
            amount,
            from = %source.symbol,
            to = %target.symbol,
            result,
            currency = self.reference_currency(),
            "Converted amount"
        );

        ConversionQuote {
            amount,
            from_symbol: source.symbol.clone(),
            to_symbol: target.symbol.clone(),
            result,
        }
    }
}
