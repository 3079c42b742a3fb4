//! Service producing plain-text portfolio reports.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::portfolios::PortfolioRepositoryTrait;
use crate::users::UserRepositoryTrait;

pub trait ReportServiceTrait: Send + Sync {
    /// Renders a plain-text summary of the user's portfolios.
    fn generate_summary(&self, user_id: &str) -> Result<String>;
}

pub struct ReportService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
}

impl ReportService {
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    ) -> Self {
        Self {
            user_repository,
            portfolio_repository,
        }
    }
}

impl ReportServiceTrait for ReportService {
    fn generate_summary(&self, user_id: &str) -> Result<String> {
        let user = self.user_repository.get_by_id(user_id)?;
        let portfolios = self.portfolio_repository.list_by_user(user_id)?;

        let total_value: Decimal = portfolios
            .iter()
            .map(|p| p.total_asset_value())
            .sum();

        Ok(format!(
            "Portfolio Report for {}\nTotal Portfolios: {}\nCombined Value: ${:.2}\nGenerated on: {}\n",
            user.email,
            portfolios.len(),
            total_value,
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        ))
    }
}
