//! Quote caching constants.

use std::time::Duration;

/// Freshness window for real-time quotes.
pub const QUOTE_CACHE_TTL: Duration = Duration::from_secs(2 * 60);

/// Freshness window for daily history series.
pub const HISTORY_CACHE_TTL: Duration = Duration::from_secs(10 * 60);
