use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use roomsync_api::restful::{LoginRequest, RegisterRequest, UserResponse};

use crate::errors::{ApiError, AuthError};
use crate::middlewares::{TokenState, auth};
use crate::repositories::UserRepository;
use crate::services::{AuthService, TokenClaims, TokenService};

#[derive(Clone)]
pub struct AuthState {
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub user_repository: Arc<UserRepository>,
}

pub fn auth_router(auth_state: AuthState, token_state: TokenState) -> Router {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route(
            "/api/auth/me",
            get(get_current_user).route_layer(middleware::from_fn_with_state(token_state, auth)),
        )
        .with_state(auth_state)
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration successful, return user token", body = String),
        (status = 400, description = "Username or password missing"),
        (status = 409, description = "Username already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register(
    State(state): State<AuthState>,
    Json(body): Json<RegisterRequest>,
) -> Result<String, ApiError> {
    let username = body.username.trim();

    if username.is_empty() || body.password.is_empty() {
        return Err(AuthError::InvalidRequest.into());
    }

    if state.user_repository.find_by_username(username).await?.is_some() {
        return Err(AuthError::UsernameExists.into());
    }

    let hash_password = state
        .auth_service
        .hash(&body.password)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;

    let mut tx = state.user_repository.get_pool().begin().await?;

    let id = state
        .user_repository
        .create(username, &hash_password, &mut tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::from(AuthError::UsernameExists)
            }
            other => ApiError::from(other),
        })?;

    tx.commit().await?;

    let created_user = state
        .user_repository
        .find_by_id(id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    tracing::info!(user_id = created_user.id, "user registered");

    let token = state
        .token_service
        .generate_token(&created_user)
        .map_err(|e| anyhow!("Failed to generate token: {}", e))?
        .token;

    Ok(token)
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, return user token", body = String),
        (status = 401, description = "Invalid username or password"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login(
    State(state): State<AuthState>,
    Json(body): Json<LoginRequest>,
) -> Result<String, ApiError> {
    let user = state
        .user_repository
        .find_by_username(body.username.trim())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let result = state
        .auth_service
        .verify(&user.password, &body.password)
        .map_err(|e| anyhow!("Failed to verify password: {}", e))?;

    if !result {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state
        .token_service
        .generate_token(&user)
        .map_err(|e| anyhow!("Failed to generate token: {}", e))?
        .token;

    Ok(token)
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User does not exist"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_current_user(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<AuthState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_repository
        .find_by_id(token_data.sub)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
        created_at: user.created_at,
    }))
}
