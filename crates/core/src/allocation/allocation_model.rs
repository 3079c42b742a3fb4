//! Allocation policy models and errors.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::users::RiskTolerance;

/// Input to the allocation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub risk_tolerance: RiskTolerance,
    /// Free-text financial goals from the owner's profile; steers symbol
    /// selection ahead of the pure risk branch.
    pub goals: String,
    pub investment_amount: Decimal,
}

/// Errors raised by the allocation policy.
#[derive(Error, Debug)]
pub enum AllocationError {
    /// Automated allocation requested with non-positive capital.
    #[error("Invalid investment amount: {0}")]
    InvalidAmount(Decimal),
}
