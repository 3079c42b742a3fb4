//! Service computing per-user dashboard aggregates.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use super::dashboard_model::DashboardData;
use crate::errors::Result;
use crate::notifications::NotificationServiceTrait;
use crate::portfolios::PortfolioRepositoryTrait;
use crate::users::UserRepositoryTrait;

/// Recent-activity entries shown on the dashboard.
const RECENT_ACTIVITY_LIMIT: usize = 5;

pub trait DashboardServiceTrait: Send + Sync {
    fn get_dashboard_data(&self, user_id: &str) -> Result<DashboardData>;
}

pub struct DashboardService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
    notification_service: Arc<dyn NotificationServiceTrait>,
}

impl DashboardService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
        notification_service: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            portfolio_repository,
            user_repository,
            notification_service,
        }
    }
}

/// Whole months between two instants, floored at 1 so a portfolio created
/// this month still yields a defined monthly figure.
fn months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let months = (to.year() as i64 - from.year() as i64) * 12 + to.month() as i64
        - from.month() as i64;
    months.max(1)
}

impl DashboardServiceTrait for DashboardService {
    fn get_dashboard_data(&self, user_id: &str) -> Result<DashboardData> {
        let user = self.user_repository.get_by_id(user_id)?;
        let portfolios = self.portfolio_repository.list_by_user(user_id)?;

        let now = Utc::now();
        let mut total_value = Decimal::ZERO;
        let mut total_invested = Decimal::ZERO;
        let mut weighted_return_sum = Decimal::ZERO;

        for portfolio in &portfolios {
            let live_value = portfolio.total_asset_value();
            total_value += live_value;

            if portfolio.investment_amount > Decimal::ZERO {
                let months = Decimal::from(months_between(portfolio.created_at, now));
                let monthly_return = (live_value - portfolio.investment_amount)
                    / portfolio.investment_amount
                    / months;
                weighted_return_sum += monthly_return * portfolio.investment_amount;
                total_invested += portfolio.investment_amount;
            }
        }

        let monthly_return = if total_invested > Decimal::ZERO {
            weighted_return_sum / total_invested
        } else {
            Decimal::ZERO
        };

        let recent_activities = self
            .notification_service
            .get_unread_notifications(user_id)?
            .into_iter()
            .rev()
            .take(RECENT_ACTIVITY_LIMIT)
            .map(|n| n.message)
            .collect();

        Ok(DashboardData {
            total_value,
            monthly_return,
            risk_level: user.risk_tolerance,
            recent_activities,
        })
    }
}
