//! Tests for the valuation and notification job.
//!
//! These cover the contract points of the cycle:
//!
//! 1. The derived value always equals the sum of shares x updated price.
//! 2. Alerts fire only at the 5% threshold, with the 2-decimal message shape.
//! 3. Portfolio-level alerts require a prior non-zero value.
//! 4. A failed portfolio is skipped atomically and does not stop the cycle.
//! 5. Re-running against unchanged quotes is a no-op alert-wise.

#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error, Result};
    use crate::notifications::{Notification, NotificationServiceTrait};
    use crate::portfolios::{AllocationType, Asset, Portfolio, PortfolioRepositoryTrait};
    use crate::quotes::QuoteServiceTrait;
    use crate::users::RiskTolerance;
    use crate::valuation::{ValuationService, ValuationServiceTrait};
    use async_trait::async_trait;
    use chrono::Utc;
    use roboadvisor_market_data::{Candle, MarketDataError, Quote};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    // =========================================================================
    // Mock portfolio store
    // =========================================================================

    #[derive(Clone, Default)]
    struct MockPortfolioStore {
        portfolios: Arc<Mutex<Vec<Portfolio>>>,
        fail_save_for: Arc<Mutex<HashSet<String>>>,
    }

    impl MockPortfolioStore {
        fn with_portfolios(portfolios: Vec<Portfolio>) -> Self {
            Self {
                portfolios: Arc::new(Mutex::new(portfolios)),
                fail_save_for: Arc::new(Mutex::new(HashSet::new())),
            }
        }

        fn fail_save_for(&self, portfolio_id: &str) {
            self.fail_save_for
                .lock()
                .unwrap()
                .insert(portfolio_id.to_string());
        }

        fn get(&self, portfolio_id: &str) -> Portfolio {
            self.portfolios
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == portfolio_id)
                .cloned()
                .unwrap()
        }
    }

    #[async_trait]
    impl PortfolioRepositoryTrait for MockPortfolioStore {
        fn load_all(&self) -> Result<Vec<Portfolio>> {
            Ok(self.portfolios.lock().unwrap().clone())
        }

        fn list_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>> {
            Ok(self
                .portfolios
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.user_id == user_id)
                .cloned()
                .collect())
        }

        fn get_by_id(&self, portfolio_id: &str) -> Result<Portfolio> {
            self.portfolios
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == portfolio_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(portfolio_id.to_string()))
                })
        }

        async fn insert(&self, portfolio: Portfolio) -> Result<Portfolio> {
            self.portfolios.lock().unwrap().push(portfolio.clone());
            Ok(portfolio)
        }

        async fn update(&self, portfolio: Portfolio) -> Result<Portfolio> {
            let mut portfolios = self.portfolios.lock().unwrap();
            let slot = portfolios
                .iter_mut()
                .find(|p| p.id == portfolio.id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(portfolio.id.clone()))
                })?;
            *slot = portfolio.clone();
            Ok(portfolio)
        }

        async fn save_valuation(
            &self,
            portfolio_id: &str,
            assets: &[Asset],
            value: Decimal,
        ) -> Result<()> {
            if self.fail_save_for.lock().unwrap().contains(portfolio_id) {
                return Err(Error::Database(DatabaseError::QueryFailed(
                    "Intentional save failure".to_string(),
                )));
            }
            let mut portfolios = self.portfolios.lock().unwrap();
            let slot = portfolios
                .iter_mut()
                .find(|p| p.id == portfolio_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(portfolio_id.to_string()))
                })?;
            slot.assets = assets.to_vec();
            slot.value = value;
            Ok(())
        }

        async fn delete(&self, portfolio_id: &str) -> Result<usize> {
            let mut portfolios = self.portfolios.lock().unwrap();
            let before = portfolios.len();
            portfolios.retain(|p| p.id != portfolio_id);
            Ok(before - portfolios.len())
        }

        fn count(&self) -> Result<i64> {
            Ok(self.portfolios.lock().unwrap().len() as i64)
        }
    }

    // =========================================================================
    // Mock quote service
    // =========================================================================

    #[derive(Clone, Default)]
    struct ScriptedQuotes {
        prices: Arc<Mutex<HashMap<String, Decimal>>>,
        failing: Arc<Mutex<HashSet<String>>>,
    }

    impl ScriptedQuotes {
        fn set_price(&self, symbol: &str, price: Decimal) {
            self.prices
                .lock()
                .unwrap()
                .insert(symbol.to_string(), price);
        }

        fn fail_symbol(&self, symbol: &str) {
            self.failing.lock().unwrap().insert(symbol.to_string());
        }
    }

    #[async_trait]
    impl QuoteServiceTrait for ScriptedQuotes {
        async fn get_quote(&self, symbol: &str) -> Result<Quote> {
            if self.failing.lock().unwrap().contains(symbol) {
                return Err(
                    MarketDataError::quote_unavailable(symbol, "scripted failure").into(),
                );
            }
            let price = self
                .prices
                .lock()
                .unwrap()
                .get(symbol)
                .copied()
                .ok_or_else(|| MarketDataError::quote_unavailable(symbol, "no price"))?;
            Ok(Quote::new(symbol, price, Utc::now()))
        }

        async fn get_history(&self, _symbol: &str) -> Result<Vec<Candle>> {
            Ok(Vec::new())
        }
    }

    // =========================================================================
    // Recording notification inbox
    // =========================================================================

    #[derive(Clone, Default)]
    struct RecordingInbox {
        messages: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl RecordingInbox {
        fn messages(&self) -> Vec<(String, String)> {
            self.messages.lock().unwrap().clone()
        }

        fn clear(&self) {
            self.messages.lock().unwrap().clear();
        }
    }

    #[async_trait]
    impl NotificationServiceTrait for RecordingInbox {
        async fn notify(&self, user_id: &str, message: &str) -> Result<Notification> {
            self.messages
                .lock()
                .unwrap()
                .push((user_id.to_string(), message.to_string()));
            Ok(Notification {
                id: format!("n-{}", self.messages.lock().unwrap().len()),
                user_id: user_id.to_string(),
                message: message.to_string(),
                read: false,
                created_at: Utc::now(),
            })
        }

        fn get_unread_notifications(&self, _user_id: &str) -> Result<Vec<Notification>> {
            Ok(Vec::new())
        }

        async fn mark_as_read(
            &self,
            _user_id: &str,
            _notification_id: &str,
        ) -> Result<Notification> {
            unimplemented!("not needed by these tests")
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn portfolio(id: &str, user_id: &str, name: &str, assets: Vec<Asset>) -> Portfolio {
        let now = Utc::now();
        let value = Portfolio::value_of(&assets);
        Portfolio {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            risk_tolerance: RiskTolerance::Moderate,
            allocation_type: AllocationType::Automated,
            investment_amount: value,
            value,
            assets,
            created_at: now,
            updated_at: now,
        }
    }

    fn build_service(
        store: &MockPortfolioStore,
        quotes: &ScriptedQuotes,
        inbox: &RecordingInbox,
    ) -> ValuationService {
        ValuationService::new(
            Arc::new(store.clone()),
            Arc::new(quotes.clone()),
            Arc::new(inbox.clone()),
        )
    }

    // =========================================================================
    // Tests
    // =========================================================================

    #[tokio::test]
    async fn test_value_equals_sum_of_updated_prices() {
        let store = MockPortfolioStore::with_portfolios(vec![portfolio(
            "p1",
            "u1",
            "Growth",
            vec![Asset::new("SPY", 2, dec!(400)), Asset::new("BND", 10, dec!(100))],
        )]);
        let quotes = ScriptedQuotes::default();
        quotes.set_price("SPY", dec!(410));
        quotes.set_price("BND", dec!(101));
        let inbox = RecordingInbox::default();

        let summary = build_service(&store, &quotes, &inbox)
            .revalue_all_portfolios()
            .await
            .unwrap();

        assert_eq!(summary.portfolios_processed, 1);
        let updated = store.get("p1");
        assert_eq!(updated.assets[0].price, dec!(410));
        assert_eq!(updated.assets[1].price, dec!(101));
        assert_eq!(updated.value, dec!(2) * dec!(410) + dec!(10) * dec!(101));
        assert_eq!(updated.value, updated.total_asset_value());
    }

    #[tokio::test]
    async fn test_small_moves_emit_no_notifications() {
        let store = MockPortfolioStore::with_portfolios(vec![portfolio(
            "p1",
            "u1",
            "Steady",
            vec![Asset::new("BND", 10, dec!(100))],
        )]);
        let quotes = ScriptedQuotes::default();
        // 4.9% move stays under the threshold
        quotes.set_price("BND", dec!(104.9));
        let inbox = RecordingInbox::default();

        let summary = build_service(&store, &quotes, &inbox)
            .revalue_all_portfolios()
            .await
            .unwrap();

        assert_eq!(summary.notifications_emitted, 0);
        assert!(inbox.messages().is_empty());
    }

    #[tokio::test]
    async fn test_asset_alert_message_contains_symbol_name_and_rounded_pct() {
        let store = MockPortfolioStore::with_portfolios(vec![portfolio(
            "p1",
            "u1",
            "Growth",
            vec![Asset::new("SPY", 1, dec!(400)), Asset::new("BND", 1, dec!(100))],
        )]);
        let quotes = ScriptedQuotes::default();
        quotes.set_price("SPY", dec!(400)); // unchanged
        quotes.set_price("BND", dec!(93)); // -7%
        let inbox = RecordingInbox::default();

        build_service(&store, &quotes, &inbox)
            .revalue_all_portfolios()
            .await
            .unwrap();

        let messages = inbox.messages();
        // One asset alert for BND; overall move is 7/500 = 1.4%, below threshold
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, "u1");
        assert_eq!(
            messages[0].1,
            "Asset BND in portfolio \"Growth\" changed by -7.00%."
        );
    }

    #[tokio::test]
    async fn test_portfolio_alert_only_when_old_value_positive() {
        let with_value = portfolio("p1", "u1", "Growth", vec![Asset::new("SPY", 1, dec!(400))]);
        // Fresh portfolio: zero value, asset not yet priced
        let mut fresh = portfolio("p2", "u2", "Fresh", vec![Asset::new("SPY", 1, Decimal::ZERO)]);
        fresh.value = Decimal::ZERO;
        fresh.investment_amount = Decimal::ZERO;

        let store = MockPortfolioStore::with_portfolios(vec![with_value, fresh]);
        let quotes = ScriptedQuotes::default();
        quotes.set_price("SPY", dec!(440)); // +10%
        let inbox = RecordingInbox::default();

        build_service(&store, &quotes, &inbox)
            .revalue_all_portfolios()
            .await
            .unwrap();

        let messages: Vec<String> = inbox.messages().into_iter().map(|(_, m)| m).collect();
        assert!(messages.contains(&"Asset SPY in portfolio \"Growth\" changed by 10.00%.".to_string()));
        assert!(messages.contains(&"Portfolio \"Growth\" changed by 10.00%.".to_string()));
        // The fresh portfolio had no prior price and no prior value: no alerts,
        // but it still gets priced.
        assert!(!messages.iter().any(|m| m.contains("Fresh")));
        assert_eq!(store.get("p2").value, dec!(440));
    }

    #[tokio::test]
    async fn test_idempotent_under_unchanged_quotes() {
        let store = MockPortfolioStore::with_portfolios(vec![portfolio(
            "p1",
            "u1",
            "Growth",
            vec![Asset::new("SPY", 2, dec!(400))],
        )]);
        let quotes = ScriptedQuotes::default();
        quotes.set_price("SPY", dec!(440));
        let inbox = RecordingInbox::default();
        let service = build_service(&store, &quotes, &inbox);

        service.revalue_all_portfolios().await.unwrap();
        let value_after_first = store.get("p1").value;
        assert!(!inbox.messages().is_empty());

        inbox.clear();
        let summary = service.revalue_all_portfolios().await.unwrap();

        assert_eq!(store.get("p1").value, value_after_first);
        assert_eq!(summary.notifications_emitted, 0);
        assert!(inbox.messages().is_empty());
    }

    #[tokio::test]
    async fn test_quote_failure_skips_portfolio_atomically_and_cycle_continues() {
        let store = MockPortfolioStore::with_portfolios(vec![
            portfolio("p1", "u1", "First", vec![Asset::new("SPY", 1, dec!(400))]),
            portfolio(
                "p2",
                "u1",
                "Broken",
                vec![
                    Asset::new("SPY", 1, dec!(400)),
                    Asset::new("BADQ", 1, dec!(50)),
                    Asset::new("BND", 1, dec!(100)),
                ],
            ),
            portfolio("p3", "u2", "Third", vec![Asset::new("BND", 1, dec!(100))]),
        ]);
        let quotes = ScriptedQuotes::default();
        quotes.set_price("SPY", dec!(404));
        quotes.set_price("BND", dec!(101));
        quotes.fail_symbol("BADQ");
        let inbox = RecordingInbox::default();

        let summary = build_service(&store, &quotes, &inbox)
            .revalue_all_portfolios()
            .await
            .unwrap();

        assert_eq!(summary.portfolios_processed, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, "p2");

        // The failing portfolio is untouched, even though its first asset's
        // quote succeeded before the failure.
        let broken = store.get("p2");
        assert_eq!(broken.assets[0].price, dec!(400));
        assert_eq!(broken.value, dec!(550));

        // Portfolios before and after it were still updated.
        assert_eq!(store.get("p1").value, dec!(404));
        assert_eq!(store.get("p3").value, dec!(101));
    }

    #[tokio::test]
    async fn test_persistence_failure_is_isolated() {
        let store = MockPortfolioStore::with_portfolios(vec![
            portfolio("p1", "u1", "First", vec![Asset::new("SPY", 1, dec!(400))]),
            portfolio("p2", "u1", "Second", vec![Asset::new("SPY", 1, dec!(400))]),
        ]);
        store.fail_save_for("p1");
        let quotes = ScriptedQuotes::default();
        quotes.set_price("SPY", dec!(440));
        let inbox = RecordingInbox::default();

        let summary = build_service(&store, &quotes, &inbox)
            .revalue_all_portfolios()
            .await
            .unwrap();

        assert_eq!(summary.portfolios_processed, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, "p1");
        assert_eq!(store.get("p2").value, dec!(440));
        // No alerts for the failed portfolio: alerts follow the commit
        assert!(inbox.messages().iter().all(|(_, m)| !m.contains("First")));
    }
}
