use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handles;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handles::register,
        handles::login,
        handles::get_current_user,
        handles::get_room,
        handles::toggle_device,
        handles::update_climate,
        handles::get_device_catalog,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Accounts and bearer tokens"),
        (name = "room", description = "Room device state"),
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    Router::new().route("/api/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
