pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{
    generate_token, generate_token_at, verify_token, Claims, IssuedToken, JwtSettings,
};

/// Represents the payload for a login request.
///
/// No field rules are enforced here: an empty username or password is simply
/// a credential pair that cannot match, and gets the same 401 as any other.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(alias = "Username")]
    pub username: String,
    /// The password as typed by the user. Older clients send it as
    /// `password` or `passwordHash`.
    #[serde(alias = "password", alias = "passwordHash", alias = "PasswordHash")]
    pub password_candidate: String,
}

/// Response returned by a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    /// Instant after which the token is rejected.
    pub expiration: DateTime<Utc>,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expiration: issued.expiration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_field_aliases() {
        for field in ["passwordCandidate", "password", "passwordHash", "PasswordHash"] {
            let mut body = json!({ "username": "alice" });
            body[field] = json!("pw");
            let request: LoginRequest = serde_json::from_value(body).unwrap();
            assert_eq!(request.password_candidate, "pw", "field {}", field);
        }
    }
}
