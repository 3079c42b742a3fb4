//! Admin analytics models.

use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the admin analytics page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminAnalytics {
    pub user_count: i64,
    pub portfolio_count: i64,
}
