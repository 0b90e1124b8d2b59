use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

lazy_static! {
    // Letters, digits, underscores, hyphens and dots.
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_.-]+$").unwrap();
}

/// A user record as read from the credential store.
///
/// Not `Serialize`; the verifier stays on the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// bcrypt verifier for the user's password.
    pub password_hash: String,
}

/// Input for provisioning a new user out-of-band.
#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    #[validate(
        length(min = 1, max = 50),
        regex(
            path = "USERNAME_REGEX",
            message = "Username may contain letters, digits, '_', '-' and '.'"
        )
    )]
    pub username: String,
    #[validate(length(min = 6, max = 72))]
    pub password: String,
}
