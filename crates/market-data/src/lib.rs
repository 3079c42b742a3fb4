//! RoboAdvisor Market Data Crate
//!
//! This crate provides provider-agnostic market data fetching capabilities
//! for the RoboAdvisor application.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Real-time quotes (price, change, change percent)
//! - Daily historical candles
//! - Multiple providers behind the [`MarketDataProvider`] trait
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   Domain Layer   |  (quote service, valuation job)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (Alpha Vantage, ...)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  Quote / Candle  |  (market data)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Real-time quote with price and day-change data
//! - [`Candle`] - Daily OHLCV bar for historical views
//! - [`MarketDataError`] - Error taxonomy shared by all providers

pub mod errors;
pub mod models;
pub mod provider;

// Re-export all public types from models
pub use models::{Candle, Quote};

// Re-export provider types
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::MarketDataProvider;

// Re-export error types
pub use errors::MarketDataError;
