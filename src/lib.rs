//! # Crypto Checker core
//!
//! Coin data model, conversion arithmetic and price formatting for a
//! cryptocurrency price checker with a portfolio.
//!
//! The crate does not talk to the network. A [`MarketDataSource`] supplied by
//! the application produces [`MarketSnapshot`]s; [`MarketTracker::refresh_now`]
//! swaps each one into a [`SharedRegistry`] that UI code reads from.
//!
//! ## Usage
//!
//! ```
//! use crypto_checker::{CheckerConfig, Coin, CoinRegistry, ConversionEngine, PriceFormatter};
//!
//! let config = CheckerConfig::default();
//! let engine = ConversionEngine::new(config.clone());
//! let formatter = PriceFormatter::new(&config);
//!
//! let registry = CoinRegistry::with_coins(vec![
//!     Coin::new("Bitcoin", "BTC", 1, 50000.0),
//!     Coin::new("Ethereum", "ETH", 2, 3000.0),
//! ]);
//!
//! let btc = registry.find_by_name("Bitcoin").unwrap();
//! let eth = registry.find_by_name("Ethereum").unwrap();
//!
//! let eth_amount = engine.convert(1.0, btc.price, eth.price);
//! assert_eq!(formatter.trim_price(eth_amount), "16.67");
//!
//! // a target price of zero is the fiat reference currency
//! assert_eq!(engine.convert(0.5, btc.price, 0.0), 25000.0);
//! ```
//!
//! ## Sentinels
//!
//! - `price == 0` marks the reference currency entry, see [`Coin::fiat`] and
//!   [`PriceBasis`].
//! - `max_supply == -1` on the wire means uncapped, see [`MaxSupply`].

pub mod config;
pub mod constants;
pub mod convert;
pub mod error;
pub mod format;
pub mod provider;
pub mod registry;
pub mod store;
pub mod tracker;
pub mod types;

// Re-export commonly used types
pub use config::CheckerConfig;
pub use convert::{convert, parse_amount, ConversionEngine, ConversionQuote};
pub use error::{ConfigError, InputError, RegistryError, SourceError};
pub use format::{group_thousands, trim_price, PriceFormatter};
pub use provider::MarketDataSource;
pub use registry::CoinRegistry;
pub use store::SharedRegistry;
pub use tracker::MarketTracker;
pub use types::{
    Coin, ComponentHealth, GlobalSnapshot, HealthStatus, Holding, MarketSnapshot, MaxSupply,
    PriceBasis,
};
