//! Service implementing the periodic revaluation and alerting pass.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::valuation_model::ValuationCycleSummary;
use crate::constants::CHANGE_ALERT_THRESHOLD_PCT;
use crate::errors::Result;
use crate::notifications::NotificationServiceTrait;
use crate::portfolios::{Asset, Portfolio, PortfolioRepositoryTrait};
use crate::quotes::QuoteServiceTrait;

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Runs one valuation cycle over every stored portfolio.
    ///
    /// Each portfolio is an independent unit of work: a quote or persistence
    /// failure aborts that portfolio only and the cycle moves on to the
    /// next. There is no retry within a cycle; a failed portfolio is picked
    /// up again on the next scheduled run.
    async fn revalue_all_portfolios(&self) -> Result<ValuationCycleSummary>;
}

#[derive(Clone)]
pub struct ValuationService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
    notification_service: Arc<dyn NotificationServiceTrait>,
}

/// Staged outcome of revaluing a single portfolio, computed entirely
/// in memory before anything is written.
struct StagedRevaluation {
    assets: Vec<Asset>,
    new_value: Decimal,
    asset_alerts: Vec<String>,
}

impl ValuationService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
        notification_service: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            portfolio_repository,
            quote_service,
            notification_service,
        }
    }

    /// Fetches fresh prices for every asset and stages the full update.
    /// Nothing is persisted here, so a quote failure on the second of three
    /// assets leaves the stored portfolio untouched.
    async fn stage_revaluation(&self, portfolio: &Portfolio) -> Result<StagedRevaluation> {
        let mut assets = portfolio.assets.clone();
        let mut asset_alerts = Vec::new();
        let mut new_value = Decimal::ZERO;

        for asset in assets.iter_mut() {
            let quote = self.quote_service.get_quote(&asset.symbol).await?;
            let old_price = asset.price;

            // A zero stored price means no prior observation; there is
            // nothing to compare against (and nothing to divide by).
            if old_price > Decimal::ZERO {
                let pct_change = (quote.price - old_price) / old_price * dec!(100);
                if pct_change.abs() >= CHANGE_ALERT_THRESHOLD_PCT {
                    asset_alerts.push(format!(
                        "Asset {} in portfolio \"{}\" changed by {:.2}%.",
                        asset.symbol, portfolio.name, pct_change
                    ));
                }
            }

            asset.price = quote.price;
            new_value += asset.market_value();
        }

        Ok(StagedRevaluation {
            assets,
            new_value,
            asset_alerts,
        })
    }

    /// Revalues one portfolio: stage, commit in a single write, then emit
    /// the alerts for the committed state.
    ///
    /// Returns the number of notifications emitted.
    async fn revalue_portfolio(&self, portfolio: &Portfolio) -> Result<usize> {
        let old_value = portfolio.value;
        let staged = self.stage_revaluation(portfolio).await?;

        self.portfolio_repository
            .save_valuation(&portfolio.id, &staged.assets, staged.new_value)
            .await?;

        debug!(
            "Portfolio {} revalued: {} -> {}",
            portfolio.id, old_value, staged.new_value
        );

        let mut messages = staged.asset_alerts;

        // Portfolio-level alert: only meaningful when there was a prior
        // value; a zero old value would otherwise divide by zero.
        let divisor = if old_value == Decimal::ZERO {
            Decimal::ONE
        } else {
            old_value
        };
        let overall_change = (staged.new_value - old_value) / divisor * dec!(100);
        if old_value > Decimal::ZERO && overall_change.abs() >= CHANGE_ALERT_THRESHOLD_PCT {
            messages.push(format!(
                "Portfolio \"{}\" changed by {:.2}%.",
                portfolio.name, overall_change
            ));
        }

        let mut emitted = 0;
        for message in messages {
            // The inbox is a fire-and-forget side channel; a failed append
            // must not mark the revaluation itself as failed.
            match self.notification_service.notify(&portfolio.user_id, &message).await {
                Ok(_) => emitted += 1,
                Err(e) => warn!(
                    "Failed to append notification for portfolio {}: {}",
                    portfolio.id, e
                ),
            }
        }

        Ok(emitted)
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn revalue_all_portfolios(&self) -> Result<ValuationCycleSummary> {
        let portfolios = self.portfolio_repository.load_all()?;
        debug!("Starting valuation cycle over {} portfolios", portfolios.len());

        let mut summary = ValuationCycleSummary::default();

        for portfolio in &portfolios {
            match self.revalue_portfolio(portfolio).await {
                Ok(emitted) => {
                    summary.portfolios_processed += 1;
                    summary.notifications_emitted += emitted;
                }
                Err(e) => {
                    warn!("Revaluation of portfolio {} failed: {}", portfolio.id, e);
                    summary.failures.push((portfolio.id.clone(), e.to_string()));
                }
            }
        }

        info!(
            "Valuation cycle finished: {} processed, {} notifications, {} failed",
            summary.portfolios_processed,
            summary.notifications_emitted,
            summary.failures.len()
        );
        Ok(summary)
    }
}
