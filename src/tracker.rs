//! Market tracker: pulls snapshots from a source into the shared registry
//!
//! One call to [`MarketTracker::refresh_now`] is one fetch and one atomic swap.
//! How often to call it, and whether to retry, is left to the caller.

use crate::{
    config::CheckerConfig,
    constants::{REGISTRY_COMPONENT_NAME, STALE_THRESHOLD_SECS},
    convert::ConversionEngine,
    error::SourceError,
    format::PriceFormatter,
    provider::MarketDataSource,
    store::SharedRegistry,
    types::{ComponentHealth, HealthStatus},
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Ties a market data source to a shared registry
///
/// # Example
/// ```no_run
/// use crypto_checker::{CheckerConfig, MarketDataSource, MarketTracker};
/// use std::sync::Arc;
///
/// # async fn example(source: Arc<dyn MarketDataSource>) -> Result<(), Box<dyn std::error::Error>> {
/// let tracker = MarketTracker::new(source, CheckerConfig::from_env());
/// tracker.refresh_now().await?;
///
/// let registry = tracker.registry();
/// if let (Some(btc), Some(eth)) = (
///     registry.find_by_name("Bitcoin").await,
///     registry.find_by_name("Ethereum").await,
/// ) {
///     println!("{}", tracker.engine().quote(1.0, &btc, &eth));
/// }
/// # Ok(())
/// # }
/// ```
pub struct MarketTracker {
    source: Arc<dyn MarketDataSource>,
    registry: SharedRegistry,
    engine: ConversionEngine,
    formatter: PriceFormatter,
}

impl MarketTracker {
    /// Creates a tracker with an empty registry
    pub fn new(source: Arc<dyn MarketDataSource>, config: CheckerConfig) -> Self {
        Self::with_registry(source, SharedRegistry::new(), config)
    }

    /// Creates a tracker over an existing shared registry
    pub fn with_registry(
        source: Arc<dyn MarketDataSource>,
        registry: SharedRegistry,
        config: CheckerConfig,
    ) -> Self {
        let formatter = PriceFormatter::new(&config);
        let engine = ConversionEngine::new(config);

        Self {
            source,
            registry,
            engine,
            formatter,
        }
    }

    /// Shared registry handle, cheap to clone into readers
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Conversion engine for the configured reference currency
    pub fn engine(&self) -> &ConversionEngine {
        &self.engine
    }

    /// Formatter for the configured reference currency
    pub fn formatter(&self) -> &PriceFormatter {
        &self.formatter
    }

    /// Returns the name of the current source
    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    /// Fetches one snapshot and swaps it into the registry
    ///
    /// On error the registry keeps its previous contents.
    pub async fn refresh_now(&self) -> Result<(), SourceError> {
        let start = Instant::now();

        match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                tracing::debug!(
                    count = snapshot.coins.len(),
                    has_global = snapshot.global.is_some(),
                    source = self.source_name(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Fetched market snapshot"
                );
                self.registry.apply(snapshot).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    source = self.source_name(),
                    error = %e,
                    "Failed to fetch market snapshot"
                );
                Err(e)
            }
        }
    }

    /// Perform a health check on the tracked registry
    ///
    /// # Returns
    /// ComponentHealth indicating whether data is loaded and fresh
    pub async fn health_check(&self) -> ComponentHealth {
        let (coin_count, holdings, has_global, refreshed_at) = self
            .registry
            .read(|registry| {
                (
                    registry.len(),
                    registry.holding_count(),
                    registry.global().is_some(),
                    registry.refreshed_at(),
                )
            })
            .await;

        let now = Utc::now();
        let age_secs = refreshed_at.map(|at| now.signed_duration_since(at).num_seconds().max(0));

        let mut details = HashMap::new();
        details.insert("coin_count".to_string(), serde_json::json!(coin_count));
        details.insert("holdings".to_string(), serde_json::json!(holdings));
        details.insert("has_global_data".to_string(), serde_json::json!(has_global));
        details.insert("source_name".to_string(), serde_json::json!(self.source_name()));
        details.insert(
            "reference_currency".to_string(),
            serde_json::json!(self.engine.reference_currency()),
        );
        details.insert("seconds_since_refresh".to_string(), serde_json::json!(age_secs));

        let status = if coin_count == 0 {
            HealthStatus::Unhealthy
        } else {
            match age_secs {
                Some(age) if age <= STALE_THRESHOLD_SECS => HealthStatus::Healthy,
                _ => HealthStatus::Degraded,
            }
        };

        let message = match status {
            HealthStatus::Healthy => format!("Coin registry holds {} fresh coins", coin_count),
            HealthStatus::Degraded => format!(
                "Coin registry data is older than {} seconds",
                STALE_THRESHOLD_SECS
            ),
            HealthStatus::Unhealthy => "Coin registry has no market data".to_string(),
        };

        ComponentHealth {
            name: REGISTRY_COMPONENT_NAME.to_string(),
            status,
            message: Some(message),
            details,
            last_checked: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        provider::mock::MockSource,
        types::{fixtures::test_coins, Coin, GlobalSnapshot, MarketSnapshot},
    };

    fn tracker_with(source: &Arc<MockSource>) -> MarketTracker {
        MarketTracker::new(source.clone(), CheckerConfig::default())
    }

    fn full_snapshot() -> MarketSnapshot {
        MarketSnapshot {
            coins: test_coins(),
            global: Some(GlobalSnapshot {
                total_market_cap: 2_000_000_000_000,
                bitcoin_dominance_percent: 43.5,
                ..Default::default()
            }),
        }
    }

    #[tokio::test]
    async fn test_refresh_populates_registry() {
        let source = Arc::new(MockSource::new());
        source.set_snapshot(full_snapshot());
        let tracker = tracker_with(&source);

        tracker.refresh_now().await.unwrap();

        let registry = tracker.registry();
        assert_eq!(registry.snapshot().await.len(), 3);
        assert_eq!(registry.find_by_name("Bitcoin").await.unwrap().price, 50000.0);
        let global = registry.global().await.unwrap();
        assert!(global.summary(tracker.formatter()).contains("Total Market Cap"));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_data() {
        let source = Arc::new(MockSource::new());
        source.set_snapshot(full_snapshot());
        let tracker = tracker_with(&source);
        tracker.refresh_now().await.unwrap();

        source.set_error(SourceError::Timeout);
        let result = tracker.refresh_now().await;

        assert!(matches!(result, Err(SourceError::Timeout)));
        assert_eq!(tracker.registry().snapshot().await.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_data_leaves_registry_empty() {
        let source = Arc::new(MockSource::new());
        source.set_error(SourceError::invalid_data("missing price field"));
        let tracker = tracker_with(&source);

        let result = tracker.refresh_now().await;

        assert!(
            matches!(result, Err(SourceError::InvalidData(ref msg)) if msg == "missing price field")
        );
        assert!(tracker.registry().snapshot().await.is_empty());
        assert_eq!(tracker.health_check().await.status, HealthStatus::Unhealthy);
    }

    #[tokio::test]
    async fn test_select_and_convert_workflow() {
        let source = Arc::new(MockSource::new());
        source.set_snapshot(full_snapshot());
        let tracker = tracker_with(&source);
        tracker.refresh_now().await.unwrap();

        let registry = tracker.registry();
        let eth = registry.find_by_name("Ethereum").await.unwrap();
        let btc = registry.find_by_name("Bitcoin").await.unwrap();
        let usd = Coin::fiat(tracker.formatter().currency());

        let to_fiat = tracker.engine().convert_coins(10.0, &eth, &usd);
        assert!((to_fiat - 30000.0).abs() < 1e-2);

        let quote = tracker.engine().quote(1.0, &btc, &eth);
        assert!((quote.result - 16.666667).abs() < 1e-2);
        assert_eq!(quote.to_string(), "1.00 BTC = 16.67 ETH");
        assert!(btc.get_info(tracker.formatter()).contains("Price: 50000.00 USD"));
    }

    #[tokio::test]
    async fn test_portfolio_survives_refresh() {
        let source = Arc::new(MockSource::new());
        source.set_snapshot(full_snapshot());
        let tracker = tracker_with(&source);
        tracker.refresh_now().await.unwrap();
        tracker.registry().add_to_portfolio("Ethereum", 2.0).await.unwrap();

        let mut refreshed = full_snapshot();
        refreshed.coins[1].price = 4000.0;
        source.set_snapshot(refreshed);
        tracker.refresh_now().await.unwrap();

        let holdings = tracker.registry().portfolio().await;
        assert_eq!(holdings[0].coin.price, 3000.0);
        assert_eq!(tracker.registry().portfolio_value().await, 8000.0);
    }

    #[tokio::test]
    async fn test_health_check() {
        let source = Arc::new(MockSource::new());
        let tracker = tracker_with(&source);

        let health = tracker.health_check().await;
        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert_eq!(health.details["coin_count"], serde_json::json!(0));

        source.set_snapshot(full_snapshot());
        tracker.refresh_now().await.unwrap();

        let health = tracker.health_check().await;
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.name, "coin_registry");
        assert_eq!(health.details["coin_count"], serde_json::json!(3));
        assert_eq!(health.details["reference_currency"], serde_json::json!("USD"));
    }
}
