use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::mock_app::{MockApp, read_json, read_text};

#[tokio::test]
async fn test_registered_user_can_drive_a_room() {
    let app = MockApp::new().await.with_full_app();

    let response = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "operator", "password": "secret" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = read_text(response).await;

    let response = app
        .send(
            Method::POST,
            "/api/room/12/toggle",
            Some(&token),
            Some(json!({ "device": "l4" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["state"]["l4"], true);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = MockApp::new().await.with_full_app();

    let response = app.send(Method::GET, "/api/openapi.json", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert!(body["paths"]["/api/room/{room_id}/ac"].is_object());
}
