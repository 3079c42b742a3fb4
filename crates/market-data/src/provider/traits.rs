//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Candle, Quote};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use roboadvisor_market_data::{MarketDataProvider, MarketDataError, Quote, Candle};
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     // ... implement quote methods
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "ALPHA_VANTAGE".
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the latest real-time quote for a symbol.
    ///
    /// # Returns
    ///
    /// The latest quote on success, or a `MarketDataError` on failure.
    /// Implementations must report network/provider failures as
    /// [`MarketDataError::QuoteUnavailable`] so callers can abort the
    /// current unit of work without inspecting provider internals.
    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Fetch daily historical candles for a symbol.
    ///
    /// # Returns
    ///
    /// Candles ordered by date ascending, or a `MarketDataError` on failure.
    async fn get_daily_history(&self, symbol: &str) -> Result<Vec<Candle>, MarketDataError>;
}
