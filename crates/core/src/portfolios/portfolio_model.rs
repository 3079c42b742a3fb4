//! Portfolio domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::users::RiskTolerance;

/// How a portfolio's asset list was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AllocationType {
    #[default]
    Automated,
    Manual,
}

impl AllocationType {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "manual" => AllocationType::Manual,
            _ => AllocationType::Automated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationType::Automated => "automated",
            AllocationType::Manual => "manual",
        }
    }
}

/// A priced holding embedded in a portfolio.
///
/// Shares are whole units; fractional shares are not modeled. The price is
/// the last unit price observed for the symbol, refreshed by the valuation
/// job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub symbol: String,
    pub shares: i64,
    pub price: Decimal,
}

impl Asset {
    /// Creates an asset, normalizing the symbol to uppercase.
    pub fn new(symbol: impl AsRef<str>, shares: i64, price: Decimal) -> Self {
        Self {
            symbol: symbol.as_ref().trim().to_uppercase(),
            shares,
            price,
        }
    }

    /// Market value of this holding at its stored price.
    pub fn market_value(&self) -> Decimal {
        Decimal::from(self.shares) * self.price
    }
}

/// Domain model representing a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub risk_tolerance: RiskTolerance,
    pub allocation_type: AllocationType,
    /// Capital the owner committed at creation; zero for manual portfolios
    /// created without one. Flooring slack during allocation is NOT folded
    /// back into this figure.
    pub investment_amount: Decimal,
    /// Derived total, kept equal to the sum of asset market values except
    /// when a caller explicitly overrides it.
    pub value: Decimal,
    pub assets: Vec<Asset>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Portfolio {
    /// Recomputes the derived total from the embedded assets.
    pub fn total_asset_value(&self) -> Decimal {
        Self::value_of(&self.assets)
    }

    pub fn value_of(assets: &[Asset]) -> Decimal {
        assets.iter().map(Asset::market_value).sum()
    }
}

/// Caller-supplied asset entry for manual portfolios.
///
/// Any provided price is ignored: every entry is re-priced with a live
/// quote when the portfolio is created or its asset list replaced.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetInput {
    pub symbol: String,
    pub shares: i64,
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// Input model for creating a portfolio.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    pub name: String,
    #[serde(default)]
    pub risk_tolerance: Option<RiskTolerance>,
    #[serde(default)]
    pub allocation_type: Option<AllocationType>,
    /// Required when the allocation type is automated.
    #[serde(default)]
    pub investment_amount: Option<Decimal>,
    /// Used only for manual portfolios.
    #[serde(default)]
    pub assets: Option<Vec<AssetInput>>,
}

/// Partial portfolio update; only provided fields are changed.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    pub name: Option<String>,
    pub risk_tolerance: Option<RiskTolerance>,
    pub assets: Option<Vec<AssetInput>>,
    /// Escape hatch: when set, the stored value is taken verbatim instead of
    /// being recomputed from the asset list.
    pub value: Option<Decimal>,
}
