//! Service computing admin analytics.

use std::sync::Arc;

use super::admin_model::AdminAnalytics;
use crate::errors::Result;
use crate::portfolios::PortfolioRepositoryTrait;
use crate::users::UserRepositoryTrait;

pub trait AdminServiceTrait: Send + Sync {
    fn get_analytics(&self) -> Result<AdminAnalytics>;
}

pub struct AdminService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
}

impl AdminService {
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

impl AdminServiceTrait for AdminService {
    fn get_analytics(&self) -> Result<AdminAnalytics> {
        Ok(AdminAnalytics {
            user_count: self.user_repository.count()?,
            portfolio_count: self.portfolio_repository.count()?,
        })
    }
}
