//! Ordered coin list, global market data and the user's portfolio

use crate::types::{Coin, GlobalSnapshot, Holding, MarketSnapshot};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Registry of tracked coins plus the portfolio built from them
///
/// The coin sequence is held as one shared slice and is only ever replaced
/// as a whole. Holdings own clones of the coins they were created from, so a
/// refresh never changes them.
#[derive(Debug, Clone)]
pub struct CoinRegistry {
    coins: Arc<[Coin]>,
    global: Option<GlobalSnapshot>,
    portfolio: Vec<Holding>,
    portfolio_names: Vec<String>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl Default for CoinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            coins: Arc::from(Vec::new()),
            global: None,
            portfolio: Vec::new(),
            portfolio_names: Vec::new(),
            refreshed_at: None,
        }
    }

    /// Creates a registry listing `coins` in the given order
    pub fn with_coins(coins: Vec<Coin>) -> Self {
        let mut registry = Self::new();
        registry.replace_all(coins);
        registry
    }

    /// Coins in display order
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// Shared handle to the current coin sequence
    pub fn snapshot(&self) -> Arc<[Coin]> {
        Arc::clone(&self.coins)
    }

    /// Coin at a display position
    pub fn get(&self, index: usize) -> Option<&Coin> {
        self.coins.get(index)
    }

    /// Number of listed coins
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    /// True if no coins are listed
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// First coin whose name matches exactly (case-sensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&Coin> {
        self.coins.iter().find(|coin| coin.name == name)
    }

    /// First coin whose symbol matches exactly (case-sensitive)
    pub fn find_by_symbol(&self, symbol: &str) -> Option<&Coin> {
        self.coins.iter().find(|coin| coin.symbol == symbol)
    }

    /// Swaps in a new coin sequence in one assignment
    ///
    /// Portfolio holdings are left untouched.
    pub fn replace_all(&mut self, coins: Vec<Coin>) {
        self.coins = Arc::from(coins);
        self.refreshed_at = Some(Utc::now());
    }

    /// Sets the market-wide aggregates
    pub fn set_global(&mut self, global: Option<GlobalSnapshot>) {
        self.global = global;
    }

    /// Applies a full refresh: coins and global data
    ///
    /// A snapshot without global data keeps the previous aggregates.
    pub fn apply(&mut self, snapshot: MarketSnapshot) {
        self.replace_all(snapshot.coins);
        if snapshot.global.is_some() {
            self.global = snapshot.global;
        }
    }

    /// Market-wide aggregates, `None` until the first refresh that carries them
    pub fn global(&self) -> Option<&GlobalSnapshot> {
        self.global.as_ref()
    }

    /// Time of the last coin replacement
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Adds a holding of a clone of `coin`
    ///
    /// The coin name is recorded once in the portfolio names; every call adds
    /// a separate holding.
    pub fn add_to_portfolio(&mut self, coin: &Coin, quantity: f64) {
        self.portfolio.push(Holding::new(coin, quantity));
        if !self.portfolio_names.iter().any(|name| *name == coin.name) {
            self.portfolio_names.push(coin.name.clone());
        }
    }

    /// Removes every holding of the named coin and returns them
    pub fn remove_from_portfolio(&mut self, name: &str) -> Vec<Holding> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.portfolio)
            .into_iter()
            .partition(|holding| holding.coin.name == name);

        self.portfolio = kept;
        self.portfolio_names.retain(|held| held != name);
        removed
    }

    /// Holdings in the order they were added
    pub fn portfolio(&self) -> &[Holding] {
        &self.portfolio
    }

    /// Mutable access to a holding, for quantity edits
    pub fn holding_mut(&mut self, index: usize) -> Option<&mut Holding> {
        self.portfolio.get_mut(index)
    }

    /// Names of the coins present in the portfolio, in first-added order
    pub fn portfolio_names(&self) -> &[String] {
        &self.portfolio_names
    }

    /// Number of holdings
    pub fn holding_count(&self) -> usize {
        self.portfolio.len()
    }

    /// Total portfolio value in the reference currency
    ///
    /// Each holding is valued at the live price of the listed coin with the
    /// same name, falling back to the price captured when it was added.
    pub fn portfolio_value(&self) -> f64 {
        self.portfolio
            .iter()
            .map(|holding| {
                let price = self
                    .find_by_name(&holding.coin.name)
                    .map_or(holding.coin.price, |live| live.price);
                holding.value_at(price)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{bitcoin, ethereum, litecoin, test_coins};

    #[test]
    fn test_find_by_name() {
        let registry = CoinRegistry::with_coins(test_coins());

        let eth = registry.find_by_name("Ethereum").unwrap();
        assert_eq!(eth.name, "Ethereum");
        assert_eq!(eth.price, 3000.0);

        assert!(registry.find_by_name("ethereum").is_none());
        assert!(registry.find_by_name("Dogecoin").is_none());
    }

    #[test]
    fn test_find_by_name_returns_first_duplicate() {
        let mut second = bitcoin();
        second.price = 1.0;
        let registry = CoinRegistry::with_coins(vec![ethereum(), bitcoin(), second]);

        assert_eq!(registry.find_by_name("Bitcoin").unwrap().price, 50000.0);
    }

    #[test]
    fn test_index_access_keeps_insertion_order() {
        let registry = CoinRegistry::with_coins(vec![litecoin(), bitcoin()]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).unwrap().symbol, "LTC");
        assert_eq!(registry.get(1).unwrap().symbol, "BTC");
        assert!(registry.get(2).is_none());
        assert_eq!(registry.find_by_symbol("BTC").unwrap().rank, 1);
    }

    #[test]
    fn test_repeated_access_is_consistent() {
        let registry = CoinRegistry::with_coins(test_coins());
        assert_eq!(registry.get(0), registry.get(0));

        let price = |name: &str| registry.find_by_name(name).unwrap().price;
        assert!(price("Bitcoin") > price("Ethereum"));
        assert!(price("Ethereum") > price("Litecoin"));
    }

    #[test]
    fn test_add_to_portfolio_stores_clone() {
        let mut registry = CoinRegistry::with_coins(test_coins());
        let btc = registry.find_by_name("Bitcoin").unwrap().clone();

        registry.add_to_portfolio(&btc, 0.5);
        registry.add_to_portfolio(&btc, 0.25);

        assert_eq!(registry.holding_count(), 2);
        assert_eq!(registry.portfolio_names(), ["Bitcoin".to_string()]);

        registry.holding_mut(0).unwrap().coin.price = 1.0;
        registry.holding_mut(0).unwrap().quantity = 2.0;
        assert_eq!(registry.find_by_name("Bitcoin").unwrap().price, 50000.0);
    }

    #[test]
    fn test_replace_all_leaves_portfolio_untouched() {
        let mut registry = CoinRegistry::with_coins(test_coins());
        registry.add_to_portfolio(&ethereum(), 10.0);

        let mut eth = ethereum();
        eth.price = 4000.0;
        registry.replace_all(vec![eth]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.portfolio()[0].coin.price, 3000.0);
        assert!(registry.refreshed_at().is_some());
    }

    #[test]
    fn test_replace_all_does_not_touch_old_snapshot() {
        let mut registry = CoinRegistry::with_coins(test_coins());
        let before = registry.snapshot();

        registry.replace_all(vec![litecoin()]);

        assert_eq!(before.len(), 3);
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn test_portfolio_value_prefers_live_price() {
        let mut registry = CoinRegistry::with_coins(test_coins());
        registry.add_to_portfolio(&bitcoin(), 0.5);
        registry.add_to_portfolio(&ethereum(), 10.0);
        assert_eq!(registry.portfolio_value(), 25000.0 + 30000.0);

        let mut eth = ethereum();
        eth.price = 4000.0;
        registry.replace_all(vec![eth]);

        // bitcoin is delisted and falls back to its captured price
        assert_eq!(registry.portfolio_value(), 25000.0 + 40000.0);
    }

    #[test]
    fn test_remove_from_portfolio() {
        let mut registry = CoinRegistry::with_coins(test_coins());
        registry.add_to_portfolio(&bitcoin(), 0.5);
        registry.add_to_portfolio(&litecoin(), 3.0);
        registry.add_to_portfolio(&bitcoin(), 1.0);

        let removed = registry.remove_from_portfolio("Bitcoin");

        assert_eq!(removed.len(), 2);
        assert_eq!(registry.holding_count(), 1);
        assert_eq!(registry.portfolio_names(), ["Litecoin".to_string()]);
        assert!(registry.remove_from_portfolio("Bitcoin").is_empty());
    }

    #[test]
    fn test_apply_keeps_global_when_absent() {
        let mut registry = CoinRegistry::new();
        assert!(registry.global().is_none());

        registry.apply(MarketSnapshot {
            coins: test_coins(),
            global: Some(GlobalSnapshot {
                total_market_cap: 2_000_000_000_000,
                bitcoin_dominance_percent: 43.5,
                ..Default::default()
            }),
        });
        registry.apply(MarketSnapshot {
            coins: vec![bitcoin()],
            global: None,
        });

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.global().unwrap().total_market_cap, 2_000_000_000_000);

        registry.set_global(None);
        assert!(registry.global().is_none());
    }
}
