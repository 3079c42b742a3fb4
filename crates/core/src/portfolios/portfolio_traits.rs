use async_trait::async_trait;
use rust_decimal::Decimal;

use super::portfolio_model::{Asset, NewPortfolio, Portfolio, PortfolioUpdate};
use crate::errors::Result;

/// Trait for portfolio repository operations
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    /// Loads every stored portfolio regardless of owner. Used by the
    /// valuation job's full scan.
    fn load_all(&self) -> Result<Vec<Portfolio>>;
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>>;
    fn get_by_id(&self, portfolio_id: &str) -> Result<Portfolio>;
    async fn insert(&self, portfolio: Portfolio) -> Result<Portfolio>;
    async fn update(&self, portfolio: Portfolio) -> Result<Portfolio>;
    /// Persists refreshed asset prices and the recomputed total in a single
    /// write, so a portfolio is never stored with half-updated prices.
    async fn save_valuation(
        &self,
        portfolio_id: &str,
        assets: &[Asset],
        value: Decimal,
    ) -> Result<()>;
    async fn delete(&self, portfolio_id: &str) -> Result<usize>;
    fn count(&self) -> Result<i64>;
}

/// Trait for portfolio service operations
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    async fn create_portfolio(&self, user_id: &str, input: NewPortfolio) -> Result<Portfolio>;
    fn get_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<Portfolio>;
    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>>;
    async fn update_portfolio(
        &self,
        user_id: &str,
        portfolio_id: &str,
        update: PortfolioUpdate,
    ) -> Result<Portfolio>;
    async fn delete_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<usize>;
}
