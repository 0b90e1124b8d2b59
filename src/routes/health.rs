use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

pub const LIVENESS_MESSAGE: &str = "Todo API is running";

/// Liveness message at the root path; reachable without a token.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Liveness message", content_type = "text/plain", body = String))
)]
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_MESSAGE)
}

/// Health check endpoint
///
/// Returns the current status of the API and timestamp.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Status and server time"))
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}
