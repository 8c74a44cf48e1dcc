use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Username already exists")]
    UsernameExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username and password are required")]
    InvalidRequest,

    #[error("Unauthorized")]
    Unauthorized,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UsernameExists => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidRequest => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}
