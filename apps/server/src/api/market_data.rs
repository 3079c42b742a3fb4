use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use roboadvisor_market_data::{Candle, Quote};

use crate::api::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn get_quote(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
) -> ApiResult<Json<Quote>> {
    let quote = state.quote_service.get_quote(&symbol).await?;
    Ok(Json(quote))
}

async fn get_history(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
) -> ApiResult<Json<Vec<Candle>>> {
    let history = state.quote_service.get_history(&symbol).await?;
    Ok(Json(history))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/market-data/quote/{symbol}", get(get_quote))
        .route("/market-data/history/{symbol}", get(get_history))
}
