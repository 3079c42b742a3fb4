use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use roboadvisor_core::dashboard::DashboardData;

use crate::api::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<DashboardData>> {
    let data = state.dashboard_service.get_dashboard_data(&user.id)?;
    Ok(Json(data))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}
