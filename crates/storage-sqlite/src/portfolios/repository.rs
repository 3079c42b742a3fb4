use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use roboadvisor_core::portfolios::{Asset, Portfolio, PortfolioRepositoryTrait};
use roboadvisor_core::Result;

use super::model::{PortfolioAssetDB, PortfolioDB};
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::{portfolio_assets, portfolios};

pub struct PortfolioRepository {
    pool: Arc<DbPool>,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        PortfolioRepository { pool }
    }

    /// Loads asset rows for a set of portfolio rows and assembles domain
    /// models, preserving stored asset order.
    fn assemble(&self, rows: Vec<PortfolioDB>, conn: &mut SqliteConnection) -> Result<Vec<Portfolio>> {
        let ids: Vec<String> = rows.iter().map(|p| p.id.clone()).collect();
        let asset_rows = portfolio_assets::table
            .filter(portfolio_assets::portfolio_id.eq_any(&ids))
            .order((portfolio_assets::portfolio_id.asc(), portfolio_assets::position.asc()))
            .load::<PortfolioAssetDB>(conn)
            .into_core()?;

        let mut by_portfolio: HashMap<String, Vec<PortfolioAssetDB>> = HashMap::new();
        for asset_row in asset_rows {
            by_portfolio
                .entry(asset_row.portfolio_id.clone())
                .or_default()
                .push(asset_row);
        }

        rows.into_iter()
            .map(|row| {
                let assets = by_portfolio.remove(&row.id).unwrap_or_default();
                row.into_domain(assets)
            })
            .collect()
    }

    fn replace_assets(
        conn: &mut SqliteConnection,
        portfolio_id: &str,
        assets: &[Asset],
    ) -> std::result::Result<(), DieselError> {
        diesel::delete(
            portfolio_assets::table.filter(portfolio_assets::portfolio_id.eq(portfolio_id)),
        )
        .execute(conn)?;

        let rows: Vec<PortfolioAssetDB> = assets
            .iter()
            .enumerate()
            .map(|(index, asset)| PortfolioAssetDB::from_domain(portfolio_id, index, asset))
            .collect();
        diesel::insert_into(portfolio_assets::table)
            .values(&rows)
            .execute(conn)?;
        Ok(())
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    fn load_all(&self) -> Result<Vec<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = portfolios::table
            .order(portfolios::created_at.asc())
            .load::<PortfolioDB>(&mut conn)
            .into_core()?;
        self.assemble(rows, &mut conn)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = portfolios::table
            .filter(portfolios::user_id.eq(user_id))
            .order(portfolios::created_at.asc())
            .load::<PortfolioDB>(&mut conn)
            .into_core()?;
        self.assemble(rows, &mut conn)
    }

    fn get_by_id(&self, portfolio_id: &str) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;
        let row = portfolios::table
            .find(portfolio_id)
            .first::<PortfolioDB>(&mut conn)
            .into_core()?;
        let asset_rows = portfolio_assets::table
            .filter(portfolio_assets::portfolio_id.eq(portfolio_id))
            .order(portfolio_assets::position.asc())
            .load::<PortfolioAssetDB>(&mut conn)
            .into_core()?;
        row.into_domain(asset_rows)
    }

    async fn insert(&self, portfolio: Portfolio) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;
        let row = PortfolioDB::from_domain(&portfolio);
        conn.transaction::<_, DieselError, _>(|conn| {
            diesel::insert_into(portfolios::table)
                .values(&row)
                .execute(conn)?;
            Self::replace_assets(conn, &portfolio.id, &portfolio.assets)
        })
        .into_core()?;
        Ok(portfolio)
    }

    async fn update(&self, portfolio: Portfolio) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;
        let row = PortfolioDB::from_domain(&portfolio);
        conn.transaction::<_, DieselError, _>(|conn| {
            let updated = diesel::update(portfolios::table.find(&portfolio.id))
                .set(&row)
                .execute(conn)?;
            if updated == 0 {
                return Err(DieselError::NotFound);
            }
            Self::replace_assets(conn, &portfolio.id, &portfolio.assets)
        })
        .into_core()?;
        Ok(portfolio)
    }

    async fn save_valuation(
        &self,
        portfolio_id: &str,
        assets: &[Asset],
        value: Decimal,
    ) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        let now = Utc::now().naive_utc();
        conn.transaction::<_, DieselError, _>(|conn| {
            let updated = diesel::update(portfolios::table.find(portfolio_id))
                .set((
                    portfolios::value.eq(value.to_string()),
                    portfolios::updated_at.eq(now),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(DieselError::NotFound);
            }
            Self::replace_assets(conn, portfolio_id, assets)
        })
        .into_core()
    }

    async fn delete(&self, portfolio_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        diesel::delete(portfolios::table.find(portfolio_id))
            .execute(&mut conn)
            .into_core()
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        portfolios::table
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }
}
