use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use roomsync_api::restful::{
    DeviceCatalogResponse, ErrorResponse, RoomStateResponse, ToggleDeviceRequest,
    UpdateClimateRequest,
};

use crate::errors::ApiError;
use crate::middlewares::{TokenState, auth};
use crate::services::RoomService;

#[derive(Clone)]
pub struct RoomRouteState {
    pub room_service: Arc<RoomService>,
}

pub fn room_router(room_state: RoomRouteState, token_state: TokenState) -> Router {
    Router::new()
        .route("/room/:room_id", get(get_room))
        .route("/api/room/:room_id/toggle", post(toggle_device))
        .route("/api/room/:room_id/ac", post(update_climate))
        .route("/api/devices", get(get_device_catalog))
        .route_layer(middleware::from_fn_with_state(token_state, auth))
        .with_state(room_state)
}

#[utoipa::path(
    get,
    path = "/room/{room_id}",
    tag = "room",
    params(
        ("room_id" = i32, Path, description = "Room ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current room state", body = RoomStateResponse),
        (status = 400, description = "Invalid room id", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_room(
    State(state): State<RoomRouteState>,
    Path(room_id): Path<i32>,
) -> Result<Json<RoomStateResponse>, ApiError> {
    let room = state.room_service.get_state(room_id).await?;

    Ok(Json(room.into()))
}

#[utoipa::path(
    post,
    path = "/api/room/{room_id}/toggle",
    tag = "room",
    params(
        ("room_id" = i32, Path, description = "Room ID")
    ),
    request_body = ToggleDeviceRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Device toggled", body = RoomStateResponse),
        (status = 400, description = "Invalid device or room id", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn toggle_device(
    State(state): State<RoomRouteState>,
    Path(room_id): Path<i32>,
    Json(body): Json<ToggleDeviceRequest>,
) -> Result<Json<RoomStateResponse>, ApiError> {
    let room = state
        .room_service
        .toggle_device(room_id, &body.device)
        .await?;

    Ok(Json(room.into()))
}

#[utoipa::path(
    post,
    path = "/api/room/{room_id}/ac",
    tag = "room",
    params(
        ("room_id" = i32, Path, description = "Room ID")
    ),
    request_body = UpdateClimateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Climate settings applied, clamped where needed", body = RoomStateResponse),
        (status = 400, description = "Invalid room id", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_climate(
    State(state): State<RoomRouteState>,
    Path(room_id): Path<i32>,
    Json(body): Json<UpdateClimateRequest>,
) -> Result<Json<RoomStateResponse>, ApiError> {
    let room = state
        .room_service
        .update_climate(room_id, body.temperature, body.fan_speed, &body.mode)
        .await?;

    Ok(Json(room.into()))
}

#[utoipa::path(
    get,
    path = "/api/devices",
    tag = "room",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Known devices and modes", body = DeviceCatalogResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_device_catalog() -> Json<DeviceCatalogResponse> {
    Json(DeviceCatalogResponse::default())
}
