//! In-memory caching using moka
//!
//! Memoizes computed quotes per normalized rental request. The engine is
//! pure, so a cached quote is always identical to a fresh one; the cache only
//! saves work for repeated renders of the same storefront link.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::pricing::models::{Quote, RentalRequest};
use crate::pricing::services::{PricingError, QuoteEngine};

const QUOTE_CACHE_CAPACITY: u64 = 10_000;

/// Application cache holding computed quotes
#[derive(Clone)]
pub struct AppCache {
    /// Quotes (request -> Quote)
    pub quotes: Cache<RentalRequest, Arc<Quote>>,
}

impl AppCache {
    /// Create a new cache instance with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            quotes: Cache::builder()
                .max_capacity(QUOTE_CACHE_CAPACITY)
                .time_to_live(ttl)
                .time_to_idle(ttl / 2)
                .build(),
        }
    }

    /// Quote from cache, computing and storing it on a miss.
    ///
    /// Rejected requests are never cached.
    pub async fn get_or_quote(
        &self,
        engine: &QuoteEngine,
        request: &RentalRequest,
    ) -> Result<Arc<Quote>, PricingError> {
        if let Some(cached) = self.quotes.get(request).await {
            tracing::debug!("Cache HIT for quote, car {}", request.car_id);
            return Ok(cached);
        }
        tracing::debug!("Cache MISS for quote, car {}", request.car_id);
        let quote = Arc::new(engine.quote(request)?);
        self.quotes.insert(request.clone(), quote.clone()).await;
        Ok(quote)
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            quotes_size: self.quotes.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.quotes.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(5 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub quotes_size: u64,
}
