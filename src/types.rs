//! Types for the coin registry: market snapshots, holdings and health reports

use crate::{
    constants::{FIAT_PRICE_SENTINEL, UNCAPPED_SUPPLY_SENTINEL},
    format::{self, PriceFormatter},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum supply of an asset
///
/// Serialized as a plain integer where `-1` (or `null`) means uncapped, so the
/// sentinel stays at the data boundary and never reaches arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "i64")]
pub enum MaxSupply {
    /// No supply cap
    #[default]
    Uncapped,
    /// Hard cap on the number of units
    Capped(u64),
}

impl MaxSupply {
    /// Returns the cap, or `None` for uncapped assets
    pub fn value(&self) -> Option<u64> {
        match self {
            MaxSupply::Uncapped => None,
            MaxSupply::Capped(cap) => Some(*cap),
        }
    }

    /// True if the asset has a supply cap
    pub fn is_capped(&self) -> bool {
        matches!(self, MaxSupply::Capped(_))
    }
}

impl From<Option<i64>> for MaxSupply {
    fn from(raw: Option<i64>) -> Self {
        match raw {
            Some(cap) if cap >= 0 => MaxSupply::Capped(cap as u64),
            _ => MaxSupply::Uncapped,
        }
    }
}

impl From<i64> for MaxSupply {
    fn from(raw: i64) -> Self {
        Self::from(Some(raw))
    }
}

impl From<MaxSupply> for i64 {
    fn from(supply: MaxSupply) -> Self {
        match supply {
            MaxSupply::Uncapped => UNCAPPED_SUPPLY_SENTINEL,
            MaxSupply::Capped(cap) => i64::try_from(cap).unwrap_or(i64::MAX),
        }
    }
}

/// How a coin's price takes part in a conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceBasis {
    /// The reference currency itself (`price == 0`)
    Fiat,
    /// Market price quoted in the reference currency
    Quoted(f64),
}

/// Market snapshot of one tracked asset
///
/// A fresh value is built on every refresh. Cloning yields an independent
/// value, which is how coins enter the portfolio.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Coin {
    /// Human-readable name, unique within a registry
    pub name: String,

    /// Ticker symbol
    pub symbol: String,

    /// Market-cap rank (0 for the fiat entry)
    pub rank: u32,

    /// Price in the reference currency, `0` marks the fiat entry
    pub price: f64,

    /// Price quoted in Bitcoin
    pub price_btc: f64,

    /// Traded volume over 24 hours in the reference currency
    #[serde(rename = "24h_volume", alias = "volume_24h", default)]
    pub volume_24h: u64,

    /// Market capitalization in the reference currency
    #[serde(default)]
    pub market_cap: u64,

    /// Units in circulation
    #[serde(default)]
    pub available_supply: u64,

    /// Units in existence
    #[serde(default)]
    pub total_supply: u64,

    /// Hard cap, `-1` on the wire when uncapped
    #[serde(default)]
    pub max_supply: MaxSupply,

    /// Price change over the last hour, in percent
    #[serde(default)]
    pub percent_change_1h: f64,

    /// Price change over the last 24 hours, in percent
    #[serde(default)]
    pub percent_change_24h: f64,

    /// Price change over the last 7 days, in percent
    #[serde(default)]
    pub percent_change_7d: f64,
}

impl Coin {
    /// Creates a coin with the identifying fields and price set, all
    /// market figures zeroed
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, rank: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            rank,
            price,
            ..Default::default()
        }
    }

    /// Creates the entry standing for the reference currency
    pub fn fiat(currency: &str) -> Self {
        Self::new(currency, currency, 0, FIAT_PRICE_SENTINEL)
    }

    /// True if this entry is the reference currency
    pub fn is_fiat(&self) -> bool {
        self.price == FIAT_PRICE_SENTINEL
    }

    /// Lifts the fiat sentinel into an explicit [`PriceBasis`]
    pub fn price_basis(&self) -> PriceBasis {
        if self.is_fiat() {
            PriceBasis::Fiat
        } else {
            PriceBasis::Quoted(self.price)
        }
    }

    /// Renders a price for display, see [`format::trim_price`]
    pub fn trim_price(&self, value: f64) -> String {
        format::trim_price(value)
    }

    /// Multi-line description of the coin for direct display
    pub fn get_info(&self, formatter: &PriceFormatter) -> String {
        let supply = |units: u64| format!("{} {}", format::group_thousands(units), self.symbol);
        let max_supply = match self.max_supply {
            MaxSupply::Capped(cap) => supply(cap),
            MaxSupply::Uncapped => "Uncapped".to_string(),
        };

        [
            format!("Name: {}", self.name),
            format!("Symbol: {}", self.symbol),
            format!("Rank: {}", self.rank),
            format!("Price: {}", formatter.format_price(self.price)),
            format!("Price (BTC): {}", self.trim_price(self.price_btc)),
            format!("Market Cap: {}", formatter.format_amount(self.market_cap)),
            format!("Volume (24h): {}", formatter.format_amount(self.volume_24h)),
            format!("Available Supply: {}", supply(self.available_supply)),
            format!("Total Supply: {}", supply(self.total_supply)),
            format!("Max Supply: {}", max_supply),
            format!("Change (1h): {}", formatter.format_percent(self.percent_change_1h)),
            format!("Change (24h): {}", formatter.format_percent(self.percent_change_24h)),
            format!("Change (7d): {}", formatter.format_percent(self.percent_change_7d)),
        ]
        .join("\n")
    }
}

/// Market-wide aggregates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalSnapshot {
    /// Total market capitalization in the reference currency
    pub total_market_cap: u64,

    /// Share of the total market cap held by Bitcoin, 0 to 100
    #[serde(alias = "bitcoin_percentage_of_market_cap")]
    pub bitcoin_dominance_percent: f64,

    /// Total traded volume over 24 hours in the reference currency
    #[serde(default)]
    pub total_volume_24h: u64,

    /// Number of tracked currencies
    #[serde(default)]
    pub active_currencies: u32,

    /// Number of tracked markets
    #[serde(default)]
    pub active_markets: u32,
}

impl GlobalSnapshot {
    /// Labeled multi-line summary for display
    pub fn summary(&self, formatter: &PriceFormatter) -> String {
        [
            format!("Total Market Cap: {}", formatter.format_amount(self.total_market_cap)),
            format!("Total Volume (24h): {}", formatter.format_amount(self.total_volume_24h)),
            format!("Bitcoin Dominance: {:.2}%", self.bitcoin_dominance_percent),
            format!("Active Currencies: {}", self.active_currencies),
            format!("Active Markets: {}", self.active_markets),
        ]
        .join("\n")
    }
}

/// A user-owned quantity of a coin
///
/// The coin is an owned clone taken when the holding was created, so market
/// refreshes and portfolio edits never touch each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Snapshot of the coin at the time it was added
    pub coin: Coin,

    /// Units held
    pub quantity: f64,
}

impl Holding {
    /// Creates a holding from a clone of `coin`
    pub fn new(coin: &Coin, quantity: f64) -> Self {
        Self {
            coin: coin.clone(),
            quantity,
        }
    }

    /// Value of the holding at the given price
    pub fn value_at(&self, price: f64) -> f64 {
        price * self.quantity
    }
}

/// Everything a refresh delivers in one piece
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Coins in display order
    pub coins: Vec<Coin>,

    /// Market-wide aggregates, if the source provides them
    #[serde(default)]
    pub global: Option<GlobalSnapshot>,
}

/// Overall component health
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Fresh data is available
    Healthy,
    /// Data is available but stale
    Degraded,
    /// No data has been loaded
    Unhealthy,
}

/// Component health information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component name
    pub name: String,
    /// Component status
    pub status: HealthStatus,
    /// Optional status message
    pub message: Option<String>,
    /// Component-specific details
    pub details: std::collections::HashMap<String, serde_json::Value>,
    /// Last checked timestamp
    pub last_checked: DateTime<Utc>,
}
