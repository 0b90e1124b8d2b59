#![allow(dead_code, unused_macros)]

use lazy_static::lazy_static;
use todolist::auth::{hash_password, JwtSettings};
use todolist::state::AppState;

pub const SECRET: &str = "integration-test-secret";
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "correct horse battery staple";

lazy_static! {
    // bcrypt is slow in debug builds; hash once per test binary.
    static ref PASSWORD_HASH: String = hash_password(PASSWORD).expect("hash test password");
}

pub fn settings() -> JwtSettings {
    JwtSettings {
        secret: Some(SECRET.to_string()),
        issuer: "todolist".to_string(),
        audience: "todolist-client".to_string(),
    }
}

/// In-process state with one known user.
pub async fn seeded_state() -> AppState {
    let state = AppState::in_memory(settings());
    state
        .users
        .create_user(USERNAME, &PASSWORD_HASH)
        .await
        .expect("seed user");
    state
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Builds the service the same way `main` does.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(actix_web::middleware::ErrorHandlers::new().handler(
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    todolist::error::render_internal_error,
                ))
                .wrap(actix_web::middleware::Logger::default())
                .configure(todolist::routes::config),
        )
        .await
    };
}
