//! Alpha Vantage market data provider implementation.
//!
//! This module provides market data from the Alpha Vantage API:
//! - Real-time quotes via the GLOBAL_QUOTE endpoint
//! - Daily history via the TIME_SERIES_DAILY endpoint
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{Candle, Quote};
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Alpha Vantage market data provider.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// GLOBAL_QUOTE response envelope
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

/// TIME_SERIES_DAILY response envelope
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

impl GlobalQuote {
    /// Convert the raw string payload into a [`Quote`].
    ///
    /// Missing numeric fields default to zero; the change percent field
    /// carries a literal `%` suffix that must be stripped.
    fn to_quote(&self, requested_symbol: &str) -> Result<Quote, MarketDataError> {
        let symbol = self
            .symbol
            .clone()
            .unwrap_or_else(|| requested_symbol.to_uppercase());

        let price = parse_decimal_or_zero(self.price.as_deref())?;
        let change = parse_decimal_or_zero(self.change.as_deref())?;
        let change_percent =
            parse_decimal_or_zero(self.change_percent.as_deref().map(|s| s.trim_end_matches('%')))?;

        Ok(Quote {
            symbol,
            price,
            change,
            change_percent,
            timestamp: Utc::now(),
        })
    }
}

fn parse_decimal_or_zero(raw: Option<&str>) -> Result<Decimal, MarketDataError> {
    match raw {
        None => Ok(Decimal::ZERO),
        Some(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Some(s) => Decimal::from_str(s.trim())
            .map_err(|e| MarketDataError::Deserialization(format!("invalid number '{}': {}", s, e))),
    }
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a request to the Alpha Vantage API and return the raw body.
    async fn fetch(&self, symbol: &str, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.api_key));

        let url = reqwest::Url::parse_with_params(BASE_URL, &all_params).map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })?;

        debug!("Alpha Vantage request for {}: {}", symbol, url.path());

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::quote_unavailable(symbol, e.to_string())
            }
        })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(MarketDataError::quote_unavailable(
                symbol,
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::quote_unavailable(symbol, e.to_string()))
    }

    /// Map the API's soft-error envelope (HTTP 200 with an error body) to a
    /// `MarketDataError`, or return `Ok(())` when the payload is usable.
    fn check_envelope(
        symbol: &str,
        error_message: &Option<String>,
        note: &Option<String>,
        information: &Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(msg) = error_message {
            // "Invalid API call" is how Alpha Vantage reports unknown symbols
            if msg.contains("Invalid API call") {
                return Err(MarketDataError::SymbolNotFound(symbol.to_uppercase()));
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }
        if note.is_some() {
            // A "Note" body means the free-tier call budget is exhausted
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if let Some(info) = information {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: info.clone(),
            });
        }
        Ok(())
    }

    fn parse_global_quote(symbol: &str, body: &str) -> Result<Quote, MarketDataError> {
        let parsed: GlobalQuoteResponse = serde_json::from_str(body)
            .map_err(|e| MarketDataError::Deserialization(e.to_string()))?;

        Self::check_envelope(
            symbol,
            &parsed.error_message,
            &parsed.note,
            &parsed.information,
        )?;

        match parsed.global_quote {
            Some(gq) => gq.to_quote(symbol),
            // An empty "Global Quote" object is returned for unknown symbols
            None => Err(MarketDataError::SymbolNotFound(symbol.to_uppercase())),
        }
    }

    fn parse_daily_history(symbol: &str, body: &str) -> Result<Vec<Candle>, MarketDataError> {
        let parsed: TimeSeriesResponse = serde_json::from_str(body)
            .map_err(|e| MarketDataError::Deserialization(e.to_string()))?;

        Self::check_envelope(
            symbol,
            &parsed.error_message,
            &parsed.note,
            &parsed.information,
        )?;

        let series = parsed
            .time_series
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_uppercase()))?;

        let mut candles = Vec::with_capacity(series.len());
        for (date_str, bar) in series {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                MarketDataError::Deserialization(format!("invalid date '{}': {}", date_str, e))
            })?;
            candles.push(Candle {
                date,
                open: parse_decimal_or_zero(Some(&bar.open))?,
                high: parse_decimal_or_zero(Some(&bar.high))?,
                low: parse_decimal_or_zero(Some(&bar.low))?,
                close: parse_decimal_or_zero(Some(&bar.close))?,
                volume: bar.volume.trim().parse::<u64>().unwrap_or(0),
            });
        }

        candles.sort_by_key(|c| c.date);
        Ok(candles)
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let body = self
            .fetch(symbol, &[("function", "GLOBAL_QUOTE"), ("symbol", symbol)])
            .await?;
        Self::parse_global_quote(symbol, &body)
    }

    async fn get_daily_history(&self, symbol: &str) -> Result<Vec<Candle>, MarketDataError> {
        let body = self
            .fetch(
                symbol,
                &[
                    ("function", "TIME_SERIES_DAILY"),
                    ("symbol", symbol),
                    ("outputsize", "compact"),
                ],
            )
            .await?;
        Self::parse_daily_history(symbol, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const GLOBAL_QUOTE_BODY: &str = r#"{
        "Global Quote": {
            "01. symbol": "SPY",
            "02. open": "445.20",
            "03. high": "449.80",
            "04. low": "444.95",
            "05. price": "448.73",
            "06. volume": "58392011",
            "07. latest trading day": "2024-03-08",
            "08. previous close": "445.42",
            "09. change": "3.31",
            "10. change percent": "0.7431%"
        }
    }"#;

    #[test]
    fn test_parse_global_quote() {
        let quote = AlphaVantageProvider::parse_global_quote("SPY", GLOBAL_QUOTE_BODY).unwrap();
        assert_eq!(quote.symbol, "SPY");
        assert_eq!(quote.price, dec!(448.73));
        assert_eq!(quote.change, dec!(3.31));
        assert_eq!(quote.change_percent, dec!(0.7431));
    }

    #[test]
    fn test_parse_global_quote_unknown_symbol() {
        let body = r#"{"Global Quote": null}"#;
        let err = AlphaVantageProvider::parse_global_quote("NOPE", body).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(s) if s == "NOPE"));
    }

    #[test]
    fn test_parse_global_quote_rate_limit_note() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;
        let err = AlphaVantageProvider::parse_global_quote("SPY", body).unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[test]
    fn test_parse_daily_history_sorted_ascending() {
        let body = r#"{
            "Time Series (Daily)": {
                "2024-03-08": {
                    "1. open": "445.20",
                    "2. high": "449.80",
                    "3. low": "444.95",
                    "4. close": "448.73",
                    "5. volume": "58392011"
                },
                "2024-03-07": {
                    "1. open": "441.00",
                    "2. high": "446.10",
                    "3. low": "440.50",
                    "4. close": "445.42",
                    "5. volume": "61234500"
                }
            }
        }"#;
        let candles = AlphaVantageProvider::parse_daily_history("SPY", body).unwrap();
        assert_eq!(candles.len(), 2);
        assert!(candles[0].date < candles[1].date);
        assert_eq!(candles[1].close, dec!(448.73));
        assert_eq!(candles[0].volume, 61_234_500);
    }

    #[test]
    fn test_parse_missing_fields_default_to_zero() {
        let body = r#"{"Global Quote": {"01. symbol": "SPY"}}"#;
        let quote = AlphaVantageProvider::parse_global_quote("SPY", body).unwrap();
        assert_eq!(quote.price, Decimal::ZERO);
        assert_eq!(quote.change_percent, Decimal::ZERO);
    }
}
