use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};

use crate::errors::{ApiError, AuthError};
use crate::services::TokenService;

#[derive(Clone)]
pub struct TokenState {
    pub token_service: Arc<TokenService>,
}

/// Auth gate in front of every protected route.
///
/// A missing, malformed or expired bearer token ends the request with `401`;
/// otherwise the decoded [`TokenClaims`](crate::services::TokenClaims) are
/// handed to the handler as an extension.
pub async fn auth(
    State(state): State<TokenState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AuthError::Unauthorized)?;

    let claims = state
        .token_service
        .retrieve_token_claims(bearer.token())
        .map_err(|e| {
            tracing::debug!("rejected bearer token: {}", e);
            AuthError::Unauthorized
        })?
        .claims;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
