pub mod api;
pub mod auth;
pub mod room;

pub use api::ApiError;
pub use auth::AuthError;
pub use room::RoomError;

use std::fmt::Display;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roomsync_api::ErrorResponse;
use uuid::Uuid;

fn internal_error(error: impl Display) -> (StatusCode, String, Option<String>) {
    let error_id = Uuid::new_v4();
    tracing::error!(error_id = %error_id, "{}", error);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
        Some(error_id.to_string()),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, error_id) = match self {
            ApiError::AuthError(e) => (e.status_code(), e.to_string(), None),
            ApiError::RoomError(e) if e.is_internal() => internal_error(e),
            ApiError::RoomError(e) => (e.status_code(), e.to_string(), None),
            ApiError::DatabaseError(e) => internal_error(format!("Database error: {e}")),
            ApiError::InternalError(e) => internal_error(format!("Internal error: {e}")),
        };

        let body = Json(ErrorResponse {
            ok: false,
            error,
            error_id,
        });

        (status, body).into_response()
    }
}
