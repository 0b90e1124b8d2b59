use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long an issued token stays valid.
pub const TOKEN_LIFETIME_MINUTES: i64 = 30;

/// Signing and validation parameters for session tokens.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// HMAC secret. `None` means the server was started without one; issuing
    /// and validating then fail with `AppError::Configuration`.
    pub secret: Option<String>,
    pub issuer: String,
    pub audience: String,
}

impl JwtSettings {
    fn secret(&self) -> Result<&[u8], AppError> {
        match self.secret.as_deref() {
            Some(secret) if !secret.is_empty() => Ok(secret.as_bytes()),
            _ => Err(AppError::Configuration("JWT_SECRET is not set".into())),
        }
    }
}

/// Represents the claims encoded within a session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the username it was issued to.
    pub sub: String,
    /// Unique token identifier.
    pub jti: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiration, seconds since epoch.
    pub exp: i64,
}

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expiration: DateTime<Utc>,
}

/// Issues a token for `username`, valid for 30 minutes from now.
pub fn generate_token(username: &str, settings: &JwtSettings) -> Result<IssuedToken, AppError> {
    generate_token_at(username, settings, Utc::now())
}

/// Issues a token as if it were signed at `issued_at`.
pub fn generate_token_at(
    username: &str,
    settings: &JwtSettings,
    issued_at: DateTime<Utc>,
) -> Result<IssuedToken, AppError> {
    let secret = settings.secret()?;
    let iat = issued_at.timestamp();
    let exp = iat + Duration::minutes(TOKEN_LIFETIME_MINUTES).num_seconds();

    let claims = Claims {
        sub: username.to_string(),
        jti: Uuid::new_v4().to_string(),
        iss: settings.issuer.clone(),
        aud: settings.audience.clone(),
        iat,
        exp,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))?;

    let expiration = DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

    Ok(IssuedToken { token, expiration })
}

/// Verifies signature, issuer, audience and expiry, and decodes the claims.
///
/// Every failure is reported as the same `AppError::Unauthorized`, so callers
/// cannot tell an expired token from a tampered one.
pub fn verify_token(token: &str, settings: &JwtSettings) -> Result<Claims, AppError> {
    let secret = settings.secret()?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings(secret: &str) -> JwtSettings {
        JwtSettings {
            secret: Some(secret.to_string()),
            issuer: "todolist".to_string(),
            audience: "todolist-client".to_string(),
        }
    }

    #[test]
    fn test_token_generation_and_verification() {
        let settings = settings("test_secret_for_gen_verify");
        let issued = generate_token("alice", &settings).unwrap();
        let claims = verify_token(&issued.token, &settings).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iss, "todolist");
        assert_eq!(claims.aud, "todolist-client");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert_eq!(claims.exp, issued.expiration.timestamp());
    }

    #[test]
    fn test_each_token_gets_a_fresh_id() {
        let settings = settings("secret");
        let first = verify_token(&generate_token("alice", &settings).unwrap().token, &settings);
        let second = verify_token(&generate_token("alice", &settings).unwrap().token, &settings);

        assert_ne!(first.unwrap().jti, second.unwrap().jti);
    }

    #[test]
    fn test_token_expiration() {
        let settings = settings("test_secret_for_expiration");
        let issued_at = Utc::now() - Duration::minutes(31);
        let expired = generate_token_at("alice", &settings, issued_at).unwrap();

        match verify_token(&expired.token, &settings) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid token"),
            other => panic!("expired token should be rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_token_still_valid_just_before_expiry() {
        let settings = settings("secret");
        let issued_at = Utc::now() - Duration::minutes(29);
        let issued = generate_token_at("alice", &settings, issued_at).unwrap();

        assert!(verify_token(&issued.token, &settings).is_ok());
    }

    #[test]
    fn test_invalid_token_signature() {
        let issued = generate_token("alice", &settings("one_secret")).unwrap();

        match verify_token(&issued.token, &settings("a_completely_different_secret")) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid token"),
            other => panic!("token should fail signature check, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_audience_and_issuer_rejected() {
        let issuer_settings = settings("secret");
        let issued = generate_token("alice", &issuer_settings).unwrap();

        let mut other_audience = issuer_settings.clone();
        other_audience.audience = "someone-else".to_string();
        assert!(matches!(
            verify_token(&issued.token, &other_audience),
            Err(AppError::Unauthorized(_))
        ));

        let mut other_issuer = issuer_settings.clone();
        other_issuer.issuer = "someone-else".to_string();
        assert!(matches!(
            verify_token(&issued.token, &other_issuer),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            verify_token("not.a.jwt", &settings("secret")),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_missing_secret_is_configuration_error() {
        let mut settings = settings("");
        assert!(matches!(
            generate_token("alice", &settings),
            Err(AppError::Configuration(_))
        ));

        settings.secret = None;
        assert!(matches!(
            verify_token("a.b.c", &settings),
            Err(AppError::Configuration(_))
        ));
    }
}
