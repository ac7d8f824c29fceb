//! Source abstraction for the refresh collaborator

use crate::{error::SourceError, types::MarketSnapshot};
use async_trait::async_trait;

/// Trait for market data sources
///
/// Implementations fetch and parse the full coin list (and, when available,
/// the global aggregates) from wherever the market data lives. Scheduling and
/// retries are the caller's business.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches a complete snapshot of the market
    ///
    /// # Returns
    /// Coins in display order plus optional global data, or an error if the
    /// fetch fails
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot, SourceError>;

    /// Returns the name of this source
    fn source_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock source for testing
    pub struct MockSource {
        response: Arc<Mutex<Result<MarketSnapshot, SourceError>>>,
        call_count: Arc<Mutex<usize>>,
    }

    impl Default for MockSource {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockSource {
        pub fn new() -> Self {
            Self {
                response: Arc::new(Mutex::new(Err(SourceError::unavailable("no data set")))),
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        pub fn set_snapshot(&self, snapshot: MarketSnapshot) {
            *self.response.lock().unwrap() = Ok(snapshot);
        }

        pub fn set_error(&self, error: SourceError) {
            *self.response.lock().unwrap() = Err(error);
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl MarketDataSource for MockSource {
        async fn fetch_snapshot(&self) -> Result<MarketSnapshot, SourceError> {
            *self.call_count.lock().unwrap() += 1;
            self.response.lock().unwrap().clone()
        }

        fn source_name(&self) -> &'static str {
            "mock"
        }
    }
}
