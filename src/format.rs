//! Price display formatting
//!
//! Prices are shown with a precision that depends on their magnitude so that
//! sub-cent assets stay distinguishable from zero:
//!
//! - `|value| >= 1`: exactly two decimals, `1000.5555 -> "1000.56"`
//! - `0 < |value| < 1`: four significant digits, `0.0001234 -> "0.0001234"`
//! - `0`: `"0.00"`
//!
//! Rounding is half-up (midpoint away from zero) on the shortest decimal
//! representation of the float, done with `rust_decimal` so that binary
//! representation error never flips a visible digit.

use crate::{
    config::CheckerConfig,
    constants::{
        MAX_PRICE_DECIMALS, PRICE_PRECISION_THRESHOLD, SMALL_PRICE_SIGNIFICANT_DIGITS,
        STANDARD_PRICE_DECIMALS,
    },
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Renders a price with range-dependent precision
///
/// The result always contains a decimal point and never uses scientific
/// notation. Non-finite input is rendered as zero.
pub fn trim_price(value: f64) -> String {
    if value == 0.0 {
        return zero_price();
    }
    if !value.is_finite() {
        tracing::debug!(value, "Rendering non-finite price as zero");
        return zero_price();
    }

    let decimals = price_decimals(value);
    match round_half_up(value, decimals) {
        Some(rounded) => rounded.to_string(),
        // Outside the decimal range, plain float formatting is still positional
        None => format!("{:.*}", decimals as usize, value),
    }
}

/// Groups the digits of an integer counter by thousands: `2000000 -> "2,000,000"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

fn zero_price() -> String {
    format!("{:.*}", STANDARD_PRICE_DECIMALS as usize, 0.0)
}

/// Number of decimals shown for a finite, non-zero price
fn price_decimals(value: f64) -> u32 {
    let magnitude = value.abs();
    if magnitude >= PRICE_PRECISION_THRESHOLD {
        return STANDARD_PRICE_DECIMALS;
    }

    // zeros between the decimal point and the first significant digit
    let leading_zeros = ((-magnitude.log10()).ceil() as i64 - 1).max(0) as u32;

    (leading_zeros + SMALL_PRICE_SIGNIFICANT_DIGITS)
        .clamp(STANDARD_PRICE_DECIMALS, MAX_PRICE_DECIMALS)
}

/// Rounds half-up to `decimals` places and pins the scale so trailing zeros print
fn round_half_up(value: f64, decimals: u32) -> Option<Decimal> {
    let mut rounded = Decimal::from_f64(value)?
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);

    // near the top of the range the mantissa has no room left for the decimals
    if rounded.scale() != decimals {
        return None;
    }
    Some(rounded)
}

/// Formats prices and market figures in the configured reference currency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFormatter {
    currency: String,
}

impl Default for PriceFormatter {
    fn default() -> Self {
        Self::new(&CheckerConfig::default())
    }
}

impl PriceFormatter {
    /// Creates a formatter for the configured reference currency
    pub fn new(config: &CheckerConfig) -> Self {
        Self {
            currency: config.reference_currency().to_string(),
        }
    }

    /// Reference currency code appended to formatted values
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// See [`trim_price`]
    pub fn trim_price(&self, value: f64) -> String {
        trim_price(value)
    }

    /// Price followed by the currency code: `"50000.00 USD"`
    pub fn format_price(&self, value: f64) -> String {
        format!("{} {}", trim_price(value), self.currency)
    }

    /// Integer market figure followed by the currency code: `"1,000,000 USD"`
    pub fn format_amount(&self, value: u64) -> String {
        format!("{} {}", group_thousands(value), self.currency)
    }

    /// Signed percent change with two decimals: `"+0.50%"`, `"-1.20%"`
    pub fn format_percent(&self, value: f64) -> String {
        format!("{:+.2}%", value)
    }
}
