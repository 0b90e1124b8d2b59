use std::env;
use std::fmt;

use crate::auth::token::JwtSettings;

pub const DEFAULT_JWT_ISSUER: &str = "todolist";
pub const DEFAULT_JWT_AUDIENCE: &str = "todolist-client";

/// Runtime configuration, read from the environment (and `.env` via `dotenv`).
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL URL. `None` runs the server on the in-process store.
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub jwt: JwtSettings,
    /// Serve the OpenAPI document and Swagger UI.
    pub enable_swagger: bool,
}

/// A configuration value that is present but unusable.
#[derive(Debug, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let server_port = match get("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError {
                key: "SERVER_PORT",
                message: format!("expected a port number, got {:?}", raw),
            })?,
            None => 8080,
        };

        let enable_swagger = match get("ENABLE_SWAGGER") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError {
                key: "ENABLE_SWAGGER",
                message: format!("expected true or false, got {:?}", raw),
            })?,
            None => false,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            server_port,
            server_host: get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt: JwtSettings {
                secret: get("JWT_SECRET"),
                issuer: get("JWT_ISSUER").unwrap_or_else(|| DEFAULT_JWT_ISSUER.to_string()),
                audience: get("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_JWT_AUDIENCE.to_string()),
            },
            enable_swagger,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Keeps the database password and signing secret out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("database", &self.database_url.as_ref().map(|_| "<set>"))
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("jwt_issuer", &self.jwt.issuer)
            .field("jwt_audience", &self.jwt.audience)
            .field("jwt_secret", &self.jwt.secret.as_ref().map(|_| "<set>"))
            .field("enable_swagger", &self.enable_swagger)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.jwt.secret, None);
        assert_eq!(config.jwt.issuer, DEFAULT_JWT_ISSUER);
        assert_eq!(config.jwt.audience, DEFAULT_JWT_AUDIENCE);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");
        assert!(!config.enable_swagger);
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://test"),
            ("SERVER_PORT", "3000"),
            ("SERVER_HOST", "0.0.0.0"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_ISSUER", "issuer"),
            ("JWT_AUDIENCE", "audience"),
        ]))
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://test"));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.jwt.secret.as_deref(), Some("s3cret"));
        assert_eq!(config.jwt.issuer, "issuer");
        assert_eq!(config.jwt.audience, "audience");
    }

    #[test]
    fn test_empty_secret_counts_as_missing() {
        let config = Config::from_lookup(lookup(&[("JWT_SECRET", "")])).unwrap();
        assert_eq!(config.jwt.secret, None);
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert_eq!(err.key, "SERVER_PORT");
    }

    #[test]
    fn test_swagger_flag() {
        let test_cases = vec![("true", true), ("1", true), ("On", true), ("false", false), ("0", false)];
        for (raw, expected) in test_cases {
            let config = Config::from_lookup(lookup(&[("ENABLE_SWAGGER", raw)])).unwrap();
            assert_eq!(config.enable_swagger, expected, "ENABLE_SWAGGER={}", raw);
        }

        let err = Config::from_lookup(lookup(&[("ENABLE_SWAGGER", "maybe")])).unwrap_err();
        assert_eq!(err.key, "ENABLE_SWAGGER");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://user:hunter2@db"),
            ("JWT_SECRET", "top-secret"),
        ]))
        .unwrap();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("top-secret"));
    }
}
