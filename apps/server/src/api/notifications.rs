use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

use roboadvisor_core::notifications::Notification;

use crate::api::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn get_notifications(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state
        .notification_service
        .get_unread_notifications(&user.id)?;
    Ok(Json(notifications))
}

async fn mark_as_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Notification>> {
    let notification = state
        .notification_service
        .mark_as_read(&user.id, &id)
        .await?;
    Ok(Json(notification))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(get_notifications))
        .route("/notifications/{id}/read", put(mark_as_read))
}
