//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Concrete provider implementations (Alpha Vantage)
//!
//! Providers are stateless HTTP clients. Caching lives above them, in the
//! consuming quote service, so a provider call always hits the upstream API.

mod traits;

pub mod alpha_vantage;

// Re-exports
pub use traits::MarketDataProvider;
