use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use crate::api::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

/// Plain-text summary report for the current user's portfolios.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<String> {
    let summary = state.report_service.generate_summary(&user.id)?;
    Ok(summary)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/reports/summary", get(get_summary))
}
