use std::io;

use actix_cors::Cors;
use actix_web::{
    http::StatusCode,
    middleware::{ErrorHandlers, Logger},
    web, App, HttpServer,
};
use todolist::{
    config::Config, error::render_internal_error, routes, state::AppState, store::PgStore,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    log::info!("Loaded configuration: {:?}", config);
    if config.jwt.secret.is_none() {
        log::warn!("JWT_SECRET is not set; every login will fail with a server error");
    }

    let state = match config.database_url.as_deref() {
        Some(url) => {
            let store = PgStore::connect(url)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            AppState::new(store, config.jwt.clone())
        }
        None => {
            log::warn!("DATABASE_URL is not set; using the in-process store (data is lost on exit)");
            AppState::in_memory(config.jwt.clone())
        }
    };
    let state = web::Data::new(state);
    let enable_swagger = config.enable_swagger;
    if enable_swagger {
        log::info!("Swagger UI at {}/swagger-ui/", config.server_url());
    }

    log::info!("Starting todolist server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::INTERNAL_SERVER_ERROR, render_internal_error),
            )
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
            .configure(|cfg| {
                if enable_swagger {
                    routes::docs::config(cfg);
                }
            })
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
