//! Market data domain models.

mod candle;
mod quote;

pub use candle::Candle;
pub use quote::Quote;
