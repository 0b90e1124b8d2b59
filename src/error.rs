//!
//! # Error Handling
//!
//! This module defines `AppError`, the single error type returned by handlers,
//! the authorization gate and the storage backends.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so a handler can
//! return `Result<_, AppError>` and have the failure rendered as JSON with the
//! right status code. Client errors carry their message in `{"error": ...}`;
//! server-side failures are logged and rendered as a generic problem body so
//! that no internal detail (SQL text, key material) leaks to the caller.
//!
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` allow `?` to be used
//! directly on those libraries.

use actix_web::{
    dev::ServiceResponse,
    error::ResponseError,
    http::{header, StatusCode},
    middleware::ErrorHandlerResponse,
    HttpResponse,
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Title used for every 500 response body.
pub const PROBLEM_TITLE: &str = "An error occurred";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed, expired or otherwise invalid credentials (HTTP 401).
    Unauthorized(String),
    /// Malformed request, e.g. a body that is not valid JSON (HTTP 400).
    BadRequest(String),
    /// Input that parsed but broke a field rule, e.g. an empty task name (HTTP 400).
    ValidationError(String),
    /// A requested record does not exist (HTTP 404).
    NotFound(String),
    /// A uniqueness rule was violated (HTTP 409).
    Conflict(String),
    /// The server is missing required configuration, such as the signing secret (HTTP 500).
    Configuration(String),
    /// An error originating from database operations (HTTP 500).
    DatabaseError(String),
    /// Any other unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl AppError {
    /// The message shown to the caller, or `None` for server-side failures.
    fn client_message(&self) -> Option<&str> {
        match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => Some(msg),
            AppError::Configuration(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Builds the generic body returned for every server-side failure.
pub fn problem_response(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((header::CONTENT_TYPE, "application/problem+json"))
        .body(
            json!({
                "title": PROBLEM_TITLE,
                "status": status.as_u16(),
            })
            .to_string(),
        )
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Configuration(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self.client_message() {
            Some(msg) => HttpResponse::build(self.status_code()).json(json!({ "error": msg })),
            None => {
                log::error!("{}", self);
                problem_response(self.status_code())
            }
        }
    }
}

/// Top-level handler for any 500 response that reaches the outermost middleware.
///
/// Wired through `actix_web::middleware::ErrorHandlers` so that failures not
/// produced by `AppError` (extractor panics turned into errors, third-party
/// middleware) still come back as the generic problem body.
pub fn render_internal_error<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, res) = res.into_parts();
    let status = res.status();
    if let Some(err) = res.error() {
        log::error!("{} {} failed: {}", req.method(), req.path(), err);
    }
    let res = ServiceResponse::new(req, problem_response(status)).map_into_right_body();
    Ok(ErrorHandlerResponse::Response(res))
}

/// `sqlx::Error::RowNotFound` becomes `NotFound`; a unique-constraint
/// violation becomes `Conflict`; everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("Record already exists".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Any token processing failure is an authentication failure; the reason is
/// only logged.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        log::debug!("token rejected: {}", error);
        AppError::Unauthorized("Invalid token".into())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
