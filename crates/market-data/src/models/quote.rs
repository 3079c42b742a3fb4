use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Real-time market quote.
///
/// Ephemeral by design: quotes are served from a short-lived cache and are
/// never persisted on their own. The embedded portfolio assets keep their
/// own last-known price.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol, uppercase
    pub symbol: String,

    /// Current unit price
    pub price: Decimal,

    /// Absolute day change
    pub change: Decimal,

    /// Day change in percent (already multiplied by 100)
    pub change_percent: Decimal,

    /// When the quote was fetched
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Create a quote with zero change fields.
    pub fn new(symbol: impl Into<String>, price: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change: Decimal::ZERO,
            change_percent: Decimal::ZERO,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new() {
        let quote = Quote::new("AAPL", dec!(150.25), Utc::now());
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, dec!(150.25));
        assert_eq!(quote.change, Decimal::ZERO);
        assert_eq!(quote.change_percent, Decimal::ZERO);
    }
}
