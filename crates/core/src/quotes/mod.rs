//! Quote access module.
//!
//! Wraps the `roboadvisor-market-data` provider behind a service trait and a
//! short-lived read cache so the rest of the domain never talks to a
//! provider directly.
//!
//! The cache is an explicit, injectable component with a bounded per-entry
//! time-to-live; there is no process-wide mutable singleton.

mod cache;
pub mod constants;
mod service;

pub use cache::QuoteCache;
pub use constants::*;
pub use service::{QuoteService, QuoteServiceTrait};

// Re-export the market data types consumers work with
pub use roboadvisor_market_data::{Candle, MarketDataError, Quote};
