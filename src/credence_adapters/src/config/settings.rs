use std::time::Duration;

use ::config::{Config, ConfigError, Environment, File};
use axum::http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

/// Layered service configuration: built-in defaults, then an optional
/// `config/default.toml`, then `CREDENCE__`-prefixed environment variables
/// (e.g. `CREDENCE__AUTH__JWT_SECRET`). Secrets never leave their
/// `Secret<String>` wrappers.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub auth: AuthSettings,
    pub postgres: PostgresSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub token_ttl_seconds: i64,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

/// CORS allow-list. Empty means same-origin only (no CORS layer).
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0
            .iter()
            .any(|allowed| origin.as_bytes() == allowed.as_bytes())
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.address", "0.0.0.0:3000")?
            .set_default("auth.token_ttl_seconds", 86_400)?
            .set_default("postgres.max_connections", 5)?
            .set_default("email_client.base_url", "https://api.postmarkapp.com/")?
            .set_default("email_client.timeout_millis", 10_000)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("CREDENCE").separator("__"))
            .build()?
            .try_deserialize()
    }
}
