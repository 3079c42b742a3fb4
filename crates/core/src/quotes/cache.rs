//! Time-bounded read cache for provider responses.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Concurrent cache with a fixed time-to-live per entry.
///
/// Keys are uppercased ticker symbols. Expired entries are replaced on the
/// next insert for the same key; there is no background eviction, which is
/// fine for the handful of symbols a deployment tracks.
pub struct QuoteCache<T: Clone> {
    entries: DashMap<String, (Instant, T)>,
    ttl: Duration,
}

impl<T: Clone> QuoteCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value for `symbol` if it is still within its TTL.
    pub fn get(&self, symbol: &str) -> Option<T> {
        let key = symbol.to_uppercase();
        let entry = self.entries.get(&key)?;
        let (stored_at, value) = entry.value();
        if stored_at.elapsed() < self.ttl {
            Some(value.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, symbol: &str, value: T) {
        self.entries
            .insert(symbol.to_uppercase(), (Instant::now(), value));
    }

    /// Drops every entry. Used by tests and provider reconfiguration.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_is_served() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        cache.insert("spy", 42u32);
        // Lookups are case-insensitive on the symbol
        assert_eq!(cache.get("SPY"), Some(42));
        assert_eq!(cache.get("spy"), Some(42));
    }

    #[test]
    fn test_expired_entry_is_not_served() {
        let cache = QuoteCache::new(Duration::from_millis(1));
        cache.insert("SPY", 42u32);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("SPY"), None);
    }

    #[test]
    fn test_clear() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        cache.insert("SPY", 1u32);
        cache.clear();
        assert_eq!(cache.get("SPY"), None);
    }
}
