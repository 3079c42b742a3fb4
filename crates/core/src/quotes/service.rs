//! Unified quote service: provider access behind a freshness cache.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use roboadvisor_market_data::{Candle, MarketDataProvider, Quote};

use super::cache::QuoteCache;
use super::constants::{HISTORY_CACHE_TTL, QUOTE_CACHE_TTL};
use crate::errors::Result;

#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Fetch the current quote for a symbol, serving a cached value while it
    /// is within its freshness window.
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;

    /// Fetch the daily history series for a symbol, cached likewise.
    async fn get_history(&self, symbol: &str) -> Result<Vec<Candle>>;
}

pub struct QuoteService {
    provider: Arc<dyn MarketDataProvider>,
    quote_cache: QuoteCache<Quote>,
    history_cache: QuoteCache<Vec<Candle>>,
}

impl QuoteService {
    /// Creates a quote service with the default freshness windows.
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_caches(
            provider,
            QuoteCache::new(QUOTE_CACHE_TTL),
            QuoteCache::new(HISTORY_CACHE_TTL),
        )
    }

    /// Creates a quote service with caller-provided caches. Tests inject
    /// short TTLs here.
    pub fn with_caches(
        provider: Arc<dyn MarketDataProvider>,
        quote_cache: QuoteCache<Quote>,
        history_cache: QuoteCache<Vec<Candle>>,
    ) -> Self {
        Self {
            provider,
            quote_cache,
            history_cache,
        }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        if let Some(quote) = self.quote_cache.get(symbol) {
            debug!("Quote cache hit for {}", quote.symbol);
            return Ok(quote);
        }

        let quote = self.provider.get_quote(symbol).await?;
        self.quote_cache.insert(symbol, quote.clone());
        Ok(quote)
    }

    async fn get_history(&self, symbol: &str) -> Result<Vec<Candle>> {
        if let Some(history) = self.history_cache.get(symbol) {
            debug!("History cache hit for {}", symbol);
            return Ok(history);
        }

        let history = self.provider.get_daily_history(symbol).await?;
        self.history_cache.insert(symbol, history.clone());
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roboadvisor_market_data::MarketDataError;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MarketDataProvider for CountingProvider {
        fn id(&self) -> &'static str {
            "COUNTING"
        }

        async fn get_quote(&self, symbol: &str) -> std::result::Result<Quote, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Quote::new(symbol.to_uppercase(), dec!(100), Utc::now()))
        }

        async fn get_daily_history(
            &self,
            _symbol: &str,
        ) -> std::result::Result<Vec<Candle>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_quote_served_from_cache_within_ttl() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let service = QuoteService::with_caches(
            provider.clone(),
            QuoteCache::new(Duration::from_secs(60)),
            QuoteCache::new(Duration::from_secs(60)),
        );

        service.get_quote("SPY").await.unwrap();
        service.get_quote("spy").await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_quote_refetched_after_ttl_expiry() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let service = QuoteService::with_caches(
            provider.clone(),
            QuoteCache::new(Duration::from_millis(1)),
            QuoteCache::new(Duration::from_millis(1)),
        );

        service.get_quote("SPY").await.unwrap();
        std::thread::sleep(Duration::from_millis(5));
        service.get_quote("SPY").await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
