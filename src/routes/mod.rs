pub mod auth;
pub mod docs;
pub mod health;
pub mod items;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Malformed or mistyped JSON bodies become a uniform 400.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(health::index)
        .service(health::health)
        .service(auth::login)
        .service(
            web::scope("/items")
                .wrap(AuthMiddleware)
                .service(items::list_items)
                .service(items::create_item)
                .service(items::update_item)
                .service(items::delete_item),
        );
}
