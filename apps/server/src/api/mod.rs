//! HTTP API: routers and request extractors.
//!
//! Authentication/session issuance is an external collaborator: requests
//! identify their user through the `x-user-id` header, which is resolved
//! against the user store. Admin routes additionally require the admin role.

mod admin;
mod dashboard;
mod health;
mod market_data;
mod notifications;
mod portfolios;
mod profile;
mod reports;

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use roboadvisor_core::users::{User, UserRole};
use roboadvisor_core::Error;

use crate::error::ApiError;
use crate::main_lib::AppState;

/// The user identified by the request.
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing x-user-id header".to_string()))?;

        let user = state
            .user_service
            .get_profile(user_id)
            .map_err(|_| ApiError::Unauthorized("Unknown user".to_string()))?;

        if user.role == UserRole::Inactive {
            return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
        }

        Ok(CurrentUser(user))
    }
}

/// A current user that also holds the admin role.
pub struct AdminUser(pub User);

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Admin {
            return Err(ApiError::Core(Error::Forbidden(
                "Admin role required".to_string(),
            )));
        }
        Ok(AdminUser(user))
    }
}

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(portfolios::router())
        .merge(profile::router())
        .merge(notifications::router())
        .merge(market_data::router())
        .merge(dashboard::router())
        .merge(reports::router())
        .merge(admin::router())
        .merge(health::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
