//! Database models for portfolios.
//!
//! Decimal amounts are stored as TEXT and parsed on load; a corrupt column
//! surfaces as an internal database error rather than a silent zero.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use roboadvisor_core::errors::{DatabaseError, Error};
use roboadvisor_core::portfolios::{AllocationType, Asset, Portfolio};
use roboadvisor_core::users::RiskTolerance;
use roboadvisor_core::Result;

/// Database model for portfolios
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub risk_tolerance: String,
    pub allocation_type: String,
    pub investment_amount: String,
    pub value: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for assets embedded in a portfolio.
/// The `position` column preserves the stored order of the asset list.
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioAssetDB {
    pub id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub shares: i64,
    pub price: String,
    pub position: i32,
}

pub(crate) fn parse_decimal(raw: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| {
        Error::Database(DatabaseError::Internal(format!(
            "Corrupt decimal in column {}: '{}' ({})",
            column, raw, e
        )))
    })
}

impl PortfolioAssetDB {
    pub fn from_domain(portfolio_id: &str, index: usize, asset: &Asset) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            symbol: asset.symbol.clone(),
            shares: asset.shares,
            price: asset.price.to_string(),
            position: index as i32,
        }
    }

    pub fn into_domain(self) -> Result<Asset> {
        let price = parse_decimal(&self.price, "portfolio_assets.price")?;
        Ok(Asset {
            symbol: self.symbol,
            shares: self.shares,
            price,
        })
    }
}

impl PortfolioDB {
    pub fn from_domain(domain: &Portfolio) -> Self {
        Self {
            id: domain.id.clone(),
            user_id: domain.user_id.clone(),
            name: domain.name.clone(),
            risk_tolerance: domain.risk_tolerance.as_str().to_string(),
            allocation_type: domain.allocation_type.as_str().to_string(),
            investment_amount: domain.investment_amount.to_string(),
            value: domain.value.to_string(),
            created_at: domain.created_at.naive_utc(),
            updated_at: domain.updated_at.naive_utc(),
        }
    }

    /// Combines a portfolio row with its ordered asset rows into the domain
    /// model.
    pub fn into_domain(self, asset_rows: Vec<PortfolioAssetDB>) -> Result<Portfolio> {
        let assets = asset_rows
            .into_iter()
            .map(PortfolioAssetDB::into_domain)
            .collect::<Result<Vec<_>>>()?;
        Ok(Portfolio {
            investment_amount: parse_decimal(&self.investment_amount, "portfolios.investment_amount")?,
            value: parse_decimal(&self.value, "portfolios.value")?,
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            risk_tolerance: RiskTolerance::from_label(&self.risk_tolerance),
            allocation_type: AllocationType::from_label(&self.allocation_type),
            assets,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(self.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(self.updated_at, Utc),
        })
    }
}
