//! API error type mapping core errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use roboadvisor_core::allocation::AllocationError;
use roboadvisor_core::errors::{DatabaseError, Error};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error surface of the HTTP layer.
pub enum ApiError {
    /// A core error bubbled up from a service call.
    Core(Error),
    /// The request carried no resolvable user identity.
    Unauthorized(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Core(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Core(Error::Unexpected(err.to_string()))
    }
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        Error::Database(DatabaseError::UniqueViolation(_)) => StatusCode::BAD_REQUEST,
        Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::Allocation(AllocationError::InvalidAmount(_)) => StatusCode::BAD_REQUEST,
        Error::MarketData(_) => StatusCode::BAD_GATEWAY,
        Error::Forbidden(_) => StatusCode::FORBIDDEN,
        Error::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Core(err) => {
                let status = status_for(&err);
                if status.is_server_error() {
                    tracing::error!("Request failed: {}", err);
                }
                (status, err.to_string())
            }
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
