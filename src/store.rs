//! Shared, concurrently readable coin registry
//!
//! Refreshes build the new coin sequence off to the side and swap it in under
//! a single write lock, so a reader sees either the whole old sequence or the
//! whole new one.

use crate::{
    error::RegistryError,
    registry::CoinRegistry,
    types::{Coin, GlobalSnapshot, Holding, MarketSnapshot},
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe handle to a [`CoinRegistry`]
///
/// Cloning the handle shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<CoinRegistry>>,
}

impl SharedRegistry {
    /// Creates an empty shared registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing registry
    pub fn from_registry(registry: CoinRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Replaces the coin sequence (and global data, if present) in one write
    pub async fn apply(&self, snapshot: MarketSnapshot) {
        let count = snapshot.coins.len();
        let mut registry = self.inner.write().await;
        registry.apply(snapshot);
        tracing::debug!(count, "Replaced coin registry contents");
    }

    /// Replaces the coin sequence in one write
    pub async fn replace_all(&self, coins: Vec<Coin>) {
        self.apply(MarketSnapshot { coins, global: None }).await;
    }

    /// Current coin sequence; stays valid and unchanged across later refreshes
    pub async fn snapshot(&self) -> Arc<[Coin]> {
        self.inner.read().await.snapshot()
    }

    /// Clone of the first coin with this exact name
    pub async fn find_by_name(&self, name: &str) -> Option<Coin> {
        self.inner.read().await.find_by_name(name).cloned()
    }

    /// Clone of the market-wide aggregates
    pub async fn global(&self) -> Option<GlobalSnapshot> {
        self.inner.read().await.global().cloned()
    }

    /// Adds a holding of the named coin
    pub async fn add_to_portfolio(&self, name: &str, quantity: f64) -> Result<(), RegistryError> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(RegistryError::InvalidQuantity(quantity));
        }

        let mut registry = self.inner.write().await;
        let coin = registry
            .find_by_name(name)
            .cloned()
            .ok_or_else(|| RegistryError::coin_not_found(name))?;

        registry.add_to_portfolio(&coin, quantity);
        tracing::info!(coin = name, quantity, "Added holding to portfolio");
        Ok(())
    }

    /// Clones of all holdings
    pub async fn portfolio(&self) -> Vec<Holding> {
        self.inner.read().await.portfolio().to_vec()
    }

    /// Total portfolio value at live prices
    pub async fn portfolio_value(&self) -> f64 {
        self.inner.read().await.portfolio_value()
    }

    /// Runs `f` with read access to the registry
    pub async fn read<R>(&self, f: impl FnOnce(&CoinRegistry) -> R) -> R {
        let registry = self.inner.read().await;
        f(&registry)
    }
}
