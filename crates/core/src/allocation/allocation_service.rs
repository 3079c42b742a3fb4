//! Service implementing the rule-based allocation policy.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::allocation_model::{AllocationError, AllocationRequest};
use crate::errors::Result;
use crate::portfolios::Asset;
use crate::quotes::QuoteServiceTrait;
use crate::users::RiskTolerance;

/// Trait for the allocation policy.
#[async_trait]
pub trait AllocationServiceTrait: Send + Sync {
    /// Turns a risk/goal profile and a capital amount into a priced asset
    /// list. A quote failure for any symbol aborts the whole allocation; no
    /// partial list is ever returned.
    async fn recommend_allocation(&self, request: AllocationRequest) -> Result<Vec<Asset>>;
}

pub struct AllocationService {
    quote_service: Arc<dyn QuoteServiceTrait>,
}

impl AllocationService {
    pub fn new(quote_service: Arc<dyn QuoteServiceTrait>) -> Self {
        Self { quote_service }
    }
}

/// Selects the symbol set for a profile. First match wins: goal keywords
/// take priority over the pure risk branch.
fn select_symbols(risk_tolerance: RiskTolerance, goals: &str) -> &'static [&'static str] {
    let goals = goals.to_lowercase();
    if goals.contains("retire") {
        if risk_tolerance == RiskTolerance::High {
            &["QQQ", "BND", "SPY"]
        } else {
            &["BND", "SPY"]
        }
    } else if goals.contains("house") {
        &["SPY", "BND"]
    } else {
        match risk_tolerance {
            RiskTolerance::Low => &["BND", "SPY"],
            RiskTolerance::High => &["QQQ", "ARKK"],
            RiskTolerance::Moderate => &["SPY", "QQQ"],
        }
    }
}

#[async_trait]
impl AllocationServiceTrait for AllocationService {
    async fn recommend_allocation(&self, request: AllocationRequest) -> Result<Vec<Asset>> {
        if request.investment_amount <= Decimal::ZERO {
            return Err(AllocationError::InvalidAmount(request.investment_amount).into());
        }

        let symbols = select_symbols(request.risk_tolerance, &request.goals);
        debug!(
            "Allocating {} across {:?} (risk {:?})",
            request.investment_amount, symbols, request.risk_tolerance
        );

        // Equal weight across the selected set; flooring slack per slice is
        // left unspent.
        let slice = request.investment_amount / Decimal::from(symbols.len());

        let mut assets = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let quote = self.quote_service.get_quote(symbol).await?;
            let shares = if quote.price > Decimal::ZERO {
                (slice / quote.price).floor().to_i64().unwrap_or(0)
            } else {
                0
            };
            assets.push(Asset::new(symbol, shares, quote.price));
        }

        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use chrono::Utc;
    use roboadvisor_market_data::{Candle, MarketDataError, Quote};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    struct FixedQuotes {
        prices: HashMap<&'static str, Decimal>,
    }

    impl FixedQuotes {
        fn new(prices: &[(&'static str, Decimal)]) -> Arc<Self> {
            Arc::new(Self {
                prices: prices.iter().copied().collect(),
            })
        }
    }

    #[async_trait]
    impl QuoteServiceTrait for FixedQuotes {
        async fn get_quote(&self, symbol: &str) -> Result<Quote> {
            let price = self
                .prices
                .get(symbol)
                .copied()
                .ok_or_else(|| MarketDataError::quote_unavailable(symbol, "no price configured"))?;
            Ok(Quote::new(symbol, price, Utc::now()))
        }

        async fn get_history(&self, _symbol: &str) -> Result<Vec<Candle>> {
            Ok(Vec::new())
        }
    }

    fn service(prices: &[(&'static str, Decimal)]) -> AllocationService {
        AllocationService::new(FixedQuotes::new(prices))
    }

    #[test]
    fn test_symbol_selection_rules() {
        assert_eq!(
            select_symbols(RiskTolerance::High, "Planning to retire early"),
            &["QQQ", "BND", "SPY"]
        );
        assert_eq!(
            select_symbols(RiskTolerance::Low, "RETIRE by 2030"),
            &["BND", "SPY"]
        );
        assert_eq!(
            select_symbols(RiskTolerance::High, "Save for a house"),
            &["SPY", "BND"]
        );
        assert_eq!(select_symbols(RiskTolerance::Low, ""), &["BND", "SPY"]);
        assert_eq!(select_symbols(RiskTolerance::High, ""), &["QQQ", "ARKK"]);
        assert_eq!(select_symbols(RiskTolerance::Moderate, ""), &["SPY", "QQQ"]);
    }

    #[tokio::test]
    async fn test_low_risk_even_split_with_floored_shares() {
        let service = service(&[("BND", dec!(100)), ("SPY", dec!(400))]);
        let assets = service
            .recommend_allocation(AllocationRequest {
                risk_tolerance: RiskTolerance::Low,
                goals: String::new(),
                investment_amount: dec!(1000),
            })
            .await
            .unwrap();

        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0], Asset::new("BND", 5, dec!(100)));
        assert_eq!(assets[1], Asset::new("SPY", 1, dec!(400)));
    }

    #[tokio::test]
    async fn test_retirement_goal_splits_into_thirds() {
        let service = service(&[("QQQ", dec!(100)), ("BND", dec!(100)), ("SPY", dec!(100))]);
        let assets = service
            .recommend_allocation(AllocationRequest {
                risk_tolerance: RiskTolerance::High,
                goals: "Planning to retire early".to_string(),
                investment_amount: dec!(900),
            })
            .await
            .unwrap();

        let symbols: Vec<&str> = assets.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["QQQ", "BND", "SPY"]);
        // 900 / 3 = 300 per slice, 3 shares at 100 each
        assert!(assets.iter().all(|a| a.shares == 3));
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let service = service(&[("SPY", dec!(400)), ("QQQ", dec!(350))]);
        let err = service
            .recommend_allocation(AllocationRequest {
                risk_tolerance: RiskTolerance::Moderate,
                goals: String::new(),
                investment_amount: Decimal::ZERO,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Allocation(AllocationError::InvalidAmount(_))
        ));
    }

    #[tokio::test]
    async fn test_quote_failure_aborts_whole_allocation() {
        // SPY resolves but QQQ has no price, so nothing may be returned
        let service = service(&[("SPY", dec!(400))]);
        let err = service
            .recommend_allocation(AllocationRequest {
                risk_tolerance: RiskTolerance::Moderate,
                goals: String::new(),
                investment_amount: dec!(1000),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MarketData(_)));
    }

    #[tokio::test]
    async fn test_zero_price_yields_zero_shares() {
        let service = service(&[("BND", Decimal::ZERO), ("SPY", dec!(400))]);
        let assets = service
            .recommend_allocation(AllocationRequest {
                risk_tolerance: RiskTolerance::Low,
                goals: String::new(),
                investment_amount: dec!(1000),
            })
            .await
            .unwrap();
        assert_eq!(assets[0].shares, 0);
        assert!(assets.iter().all(|a| a.shares >= 0));
    }
}
