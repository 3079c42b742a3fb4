use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use roboadvisor_core::admin::AdminAnalytics;
use roboadvisor_core::users::{NewUser, User, UserRole};
use roboadvisor_core::valuation::ValuationCycleSummary;

use crate::api::AdminUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_service.list_users()?;
    Ok(Json(users))
}

/// Provisions a new account record. Credential setup happens in the external
/// auth collaborator.
async fn create_user(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Json(new_user): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.user_service.create_user(new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn deactivate_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<User>> {
    let user = state.user_service.set_role(&id, UserRole::Inactive).await?;
    Ok(Json(user))
}

async fn promote_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<User>> {
    let user = state.user_service.set_role(&id, UserRole::Admin).await?;
    Ok(Json(user))
}

async fn delete_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<StatusCode> {
    state.user_service.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_analytics(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<AdminAnalytics>> {
    let analytics = state.admin_service.get_analytics()?;
    Ok(Json(analytics))
}

/// Triggers an out-of-schedule valuation cycle.
async fn run_valuation(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<ValuationCycleSummary>> {
    let summary = state.valuation_service.revalue_all_portfolios().await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/users", get(list_users).post(create_user))
        .route("/admin/users/{id}/deactivate", put(deactivate_user))
        .route("/admin/users/{id}/promote", put(promote_user))
        .route("/admin/users/{id}", axum::routing::delete(delete_user))
        .route("/admin/analytics", get(get_analytics))
        .route("/admin/valuation/run", post(run_valuation))
}
