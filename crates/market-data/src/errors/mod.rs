//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider could not deliver a quote for the symbol.
    /// Covers network failures and provider-side outages; callers treat
    /// this as "no fresh price right now" and abort the current unit of work.
    #[error("Quote unavailable for {symbol}: {message}")]
    QuoteUnavailable {
        /// The symbol the quote was requested for
        symbol: String,
        /// Description of the underlying failure
        message: String,
    },

    /// The requested symbol was not found by the provider.
    /// This is a terminal error - retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429 or API note).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a payload that could not be parsed.
    #[error("Failed to parse provider response: {0}")]
    Deserialization(String),
}

impl MarketDataError {
    /// Wraps any provider failure into the `QuoteUnavailable` shape callers
    /// key their abort logic on.
    pub fn quote_unavailable(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QuoteUnavailable {
            symbol: symbol.into(),
            message: message.into(),
        }
    }
}
