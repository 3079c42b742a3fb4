use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use roboadvisor_core::users::{User, UserProfileUpdate};

use crate::api::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn get_profile(CurrentUser(user): CurrentUser) -> ApiResult<Json<User>> {
    Ok(Json(user))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(update): Json<UserProfileUpdate>,
) -> ApiResult<Json<User>> {
    let updated = state.user_service.update_profile(&user.id, update).await?;
    Ok(Json(updated))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}
