//! OpenAPI document and Swagger UI.
//!
//! Mounted only when `ENABLE_SWAGGER` is set. The document is served at
//! `/api-docs/openapi.json` and the UI at `/swagger-ui/`.

use actix_web::web;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use super::{auth, health, items};
use crate::auth::{LoginRequest, LoginResponse};
use crate::models::{NewTask, Task, TaskUpdate};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Name of the bearer scheme referenced by the task routes.
pub const BEARER_SCHEME: &str = "bearer_auth";

#[derive(OpenApi)]
#[openapi(
    info(title = "Todo API", description = "Multi-user to-do list with token-based login"),
    paths(
        health::index,
        health::health,
        auth::login,
        items::list_items,
        items::create_item,
        items::update_item,
        items::delete_item,
    ),
    components(schemas(Task, NewTask, TaskUpdate, LoginRequest, LoginResponse)),
    modifiers(&BearerSecurity),
    tags(
        (name = "auth", description = "Login"),
        (name = "items", description = "Task CRUD, bearer token required"),
        (name = "health", description = "Liveness probes"),
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                BEARER_SCHEME,
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Registers the Swagger UI and the JSON document it reads.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(SwaggerUi::new("/swagger-ui/{_:.*}").url(OPENAPI_PATH, ApiDoc::openapi()));
}
