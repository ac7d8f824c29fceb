//! Constants for the crypto checker core
//!
//! Sentinels, display thresholds and defaults are centralized here. The only
//! runtime setting is the reference currency, see [`crate::config`].

/// Price value marking the fiat reference currency entry
pub const FIAT_PRICE_SENTINEL: f64 = 0.0;

/// Serialized `max_supply` value meaning the asset has no supply cap
pub const UNCAPPED_SUPPLY_SENTINEL: i64 = -1;

/// Reference currency used when nothing else is configured
pub const DEFAULT_REFERENCE_CURRENCY: &str = "USD";

/// Environment variable holding the reference currency code
pub const REFERENCE_CURRENCY_ENV: &str = "CRYPTO_CHECKER_CURRENCY";

/// Prices at or above this magnitude are shown with two decimals
pub const PRICE_PRECISION_THRESHOLD: f64 = 1.0;

/// Decimals used for prices at or above the threshold
pub const STANDARD_PRICE_DECIMALS: u32 = 2;

/// Significant digits kept for prices below the threshold
pub const SMALL_PRICE_SIGNIFICANT_DIGITS: u32 = 4;

/// Upper bound on decimals for very small prices
pub const MAX_PRICE_DECIMALS: u32 = 18;

/// Name under which the in-memory registry reports its health
pub const REGISTRY_COMPONENT_NAME: &str = "coin_registry";

/// Seconds after which registry data is reported as degraded
pub const STALE_THRESHOLD_SECS: i64 = 300;
