//! Service for portfolio CRUD with ownership enforcement.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::portfolio_model::{
    AllocationType, Asset, AssetInput, NewPortfolio, Portfolio, PortfolioUpdate,
};
use super::portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use crate::allocation::{AllocationRequest, AllocationServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::notifications::NotificationServiceTrait;
use crate::quotes::QuoteServiceTrait;
use crate::users::UserRepositoryTrait;

pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
    allocation_service: Arc<dyn AllocationServiceTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
    notification_service: Arc<dyn NotificationServiceTrait>,
}

impl PortfolioService {
    pub fn new(
        repository: Arc<dyn PortfolioRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
        allocation_service: Arc<dyn AllocationServiceTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
        notification_service: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            repository,
            user_repository,
            allocation_service,
            quote_service,
            notification_service,
        }
    }

    /// Re-prices caller-supplied asset entries with live quotes. The
    /// caller's price, if any, is discarded.
    async fn price_manual_assets(&self, inputs: &[AssetInput]) -> Result<Vec<Asset>> {
        let mut assets = Vec::with_capacity(inputs.len());
        for input in inputs {
            if input.shares < 0 {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Negative share count for {}",
                    input.symbol
                ))));
            }
            let quote = self.quote_service.get_quote(&input.symbol).await?;
            assets.push(Asset::new(&input.symbol, input.shares, quote.price));
        }
        Ok(assets)
    }

    fn assert_owner(portfolio: &Portfolio, user_id: &str) -> Result<()> {
        if portfolio.user_id != user_id {
            return Err(Error::Forbidden(format!(
                "Portfolio {} does not belong to user {}",
                portfolio.id, user_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn create_portfolio(&self, user_id: &str, input: NewPortfolio) -> Result<Portfolio> {
        if input.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }

        let risk_tolerance = input.risk_tolerance.unwrap_or_default();
        let allocation_type = input.allocation_type.unwrap_or_default();

        let (assets, investment_amount) = match allocation_type {
            AllocationType::Automated => {
                let amount = input.investment_amount.ok_or_else(|| {
                    Error::Validation(ValidationError::MissingField(
                        "investmentAmount".to_string(),
                    ))
                })?;
                // Goals text lives on the owner's profile and steers symbol
                // selection alongside the risk tolerance.
                let goals = self.user_repository.get_by_id(user_id)?.goals;
                let assets = self
                    .allocation_service
                    .recommend_allocation(AllocationRequest {
                        risk_tolerance,
                        goals,
                        investment_amount: amount,
                    })
                    .await?;
                (assets, amount)
            }
            AllocationType::Manual => {
                let inputs = input.assets.unwrap_or_default();
                let assets = self.price_manual_assets(&inputs).await?;
                (assets, input.investment_amount.unwrap_or(Decimal::ZERO))
            }
        };

        let now = Utc::now();
        let portfolio = Portfolio {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: input.name.trim().to_string(),
            risk_tolerance,
            allocation_type,
            investment_amount,
            value: Portfolio::value_of(&assets),
            assets,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.insert(portfolio).await?;
        debug!(
            "Created {} portfolio '{}' for user {}",
            created.allocation_type.as_str(),
            created.name,
            user_id
        );

        // Confirmation is a fire-and-forget courtesy; a failed append must
        // not fail the creation.
        if let Err(e) = self
            .notification_service
            .notify(
                user_id,
                &format!(
                    "Portfolio \"{}\" created with {} assets.",
                    created.name,
                    created.assets.len()
                ),
            )
            .await
        {
            warn!("Failed to record creation notification: {}", e);
        }

        Ok(created)
    }

    fn get_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<Portfolio> {
        let portfolio = self.repository.get_by_id(portfolio_id)?;
        Self::assert_owner(&portfolio, user_id)?;
        Ok(portfolio)
    }

    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        self.repository.list_by_user(user_id)
    }

    async fn update_portfolio(
        &self,
        user_id: &str,
        portfolio_id: &str,
        update: PortfolioUpdate,
    ) -> Result<Portfolio> {
        let mut portfolio = self.repository.get_by_id(portfolio_id)?;
        Self::assert_owner(&portfolio, user_id)?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::MissingField(
                    "name".to_string(),
                )));
            }
            portfolio.name = name.trim().to_string();
        }
        if let Some(risk_tolerance) = update.risk_tolerance {
            portfolio.risk_tolerance = risk_tolerance;
        }
        if let Some(inputs) = update.assets {
            portfolio.assets = self.price_manual_assets(&inputs).await?;
        }

        // The derived total follows the assets unless the caller pins it.
        portfolio.value = match update.value {
            Some(value) => value,
            None => portfolio.total_asset_value(),
        };
        portfolio.updated_at = Utc::now();

        self.repository.update(portfolio).await
    }

    async fn delete_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<usize> {
        let portfolio = self.repository.get_by_id(portfolio_id)?;
        Self::assert_owner(&portfolio, user_id)?;
        self.repository.delete(portfolio_id).await
    }
}
