use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{Auth, SchemaManager, Settings, Storage};
use crate::docs::docs_router;
use crate::handles::*;
use crate::middlewares::TokenState;
use crate::repositories::{RoomStateRepository, UserRepository};
use crate::services::{AuthService, RoomService, TokenService};

pub async fn create_app(settings: &Arc<Settings>) -> Result<Router, sqlx::Error> {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default()).await?,
    );

    Ok(build_router(storage, settings.auth.clone()))
}

/// Wires every route over an already initialized storage handle.
pub fn build_router(storage: Arc<Storage>, auth: Auth) -> Router {
    let auth_service = Arc::new(AuthService::new());
    let token_service = Arc::new(TokenService::new(auth));
    let user_repository = Arc::new(UserRepository::new(storage.clone()));
    let room_repository = Arc::new(RoomStateRepository::new(storage.clone()));
    let room_service = Arc::new(RoomService::new(room_repository));

    let token_state = TokenState {
        token_service: token_service.clone(),
    };

    let auth = auth_router(
        AuthState {
            auth_service,
            token_service,
            user_repository,
        },
        token_state.clone(),
    );

    let rooms = room_router(RoomRouteState { room_service }, token_state);

    Router::new()
        .merge(auth)
        .merge(rooms)
        .merge(docs_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
