use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use roboadvisor_core::portfolios::{NewPortfolio, Portfolio, PortfolioUpdate};

use crate::api::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_portfolios(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Portfolio>>> {
    let portfolios = state.portfolio_service.list_portfolios(&user.id)?;
    Ok(Json(portfolios))
}

async fn create_portfolio(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NewPortfolio>,
) -> ApiResult<(StatusCode, Json<Portfolio>)> {
    let portfolio = state
        .portfolio_service
        .create_portfolio(&user.id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(portfolio)))
}

async fn get_portfolio(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Portfolio>> {
    let portfolio = state.portfolio_service.get_portfolio(&user.id, &id)?;
    Ok(Json(portfolio))
}

async fn update_portfolio(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(update): Json<PortfolioUpdate>,
) -> ApiResult<Json<Portfolio>> {
    let portfolio = state
        .portfolio_service
        .update_portfolio(&user.id, &id, update)
        .await?;
    Ok(Json(portfolio))
}

async fn delete_portfolio(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<StatusCode> {
    state.portfolio_service.delete_portfolio(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolios", get(list_portfolios).post(create_portfolio))
        .route(
            "/portfolios/{id}",
            get(get_portfolio)
                .put(update_portfolio)
                .delete(delete_portfolio),
        )
}
