#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, Response, header};
use roomsync_server::app::build_router;
use roomsync_server::configs::{Auth, Storage};
use roomsync_server::handles::{AuthState, RoomRouteState, auth_router, room_router};
use roomsync_server::middlewares::TokenState;
use roomsync_server::models::User;
use roomsync_server::repositories::{RoomStateRepository, UserRepository};
use roomsync_server::services::{AuthService, RoomService, TokenService};
use roomsync_server::tests::{create_test_user, setup_test_db};
use serde_json::Value;
use tower::ServiceExt;

pub struct MockApp {
    pub router: Router,
    pub storage: Arc<Storage>,
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = setup_test_db().await;

        let auth_service = Arc::new(AuthService::new());
        let token_service = Arc::new(TokenService::new(test_auth()));

        Self {
            router: Router::new(),
            storage,
            auth_service,
            token_service,
        }
    }

    fn token_state(&self) -> TokenState {
        TokenState {
            token_service: self.token_service.clone(),
        }
    }

    pub fn with_auth_handle(mut self) -> Self {
        let auth_state = AuthState {
            auth_service: self.auth_service.clone(),
            token_service: self.token_service.clone(),
            user_repository: Arc::new(UserRepository::new(self.storage.clone())),
        };

        let token_state = self.token_state();
        self.router = self.router.merge(auth_router(auth_state, token_state));
        self
    }

    pub fn with_room_handle(mut self) -> Self {
        let repository = Arc::new(RoomStateRepository::new(self.storage.clone()));
        let room_state = RoomRouteState {
            room_service: Arc::new(RoomService::new(repository)),
        };

        let token_state = self.token_state();
        self.router = self.router.merge(room_router(room_state, token_state));
        self
    }

    pub fn with_full_app(mut self) -> Self {
        self.router = build_router(self.storage.clone(), test_auth());
        self
    }

    pub async fn create_test_user(&self) -> User {
        create_test_user(self.storage.clone(), "tester", "password123").await
    }

    pub async fn create_test_token(&self) -> String {
        let user = self.create_test_user().await;
        self.token_service.generate_token(&user).unwrap().token
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        self.dispatch(method, uri, token, body.map(|body| body.to_string()))
            .await
    }

    /// Sends `body` verbatim, for payloads `serde_json::Value` cannot hold.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: &str,
    ) -> Response<Body> {
        self.dispatch(method, uri, token, Some(body.to_string())).await
    }

    async fn dispatch(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> Response<Body> {
        let mut builder = Request::builder().uri(uri).method(method);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn test_auth() -> Auth {
    Auth {
        secret: String::from("test"),
        expiration: 1000,
    }
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
