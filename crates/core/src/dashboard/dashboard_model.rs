//! Dashboard domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::users::RiskTolerance;

/// Aggregate dashboard figures for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Combined live value of all the user's portfolios.
    pub total_value: Decimal,
    /// Investment-weighted average monthly return across portfolios with a
    /// recorded investment amount (fraction, not percent).
    pub monthly_return: Decimal,
    /// Risk level from the user's profile.
    pub risk_level: RiskTolerance,
    /// Latest unread notification messages, newest first.
    pub recent_activities: Vec<String>,
}
