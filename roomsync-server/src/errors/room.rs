use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("Invalid device")]
    InvalidDevice,

    #[error("Invalid room id")]
    InvalidRoomId,

    /// A caller skipped `ensure_exists`; never expected in practice.
    #[error("Room {0} not found")]
    RoomNotFound(i32),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl RoomError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RoomError::InvalidDevice => StatusCode::BAD_REQUEST,
            RoomError::InvalidRoomId => StatusCode::BAD_REQUEST,
            RoomError::RoomNotFound(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RoomError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Errors that point at a server fault rather than at the request.
    pub fn is_internal(&self) -> bool {
        matches!(self, RoomError::RoomNotFound(_) | RoomError::Storage(_))
    }
}
