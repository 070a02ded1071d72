pub mod auth;
pub mod config;
pub mod email;
pub mod hashing;
pub mod http;
pub mod persistence;

pub use auth::session::{
    SessionClaims, SessionConfig, SessionTokenError, decode_session_token, mint_session_token,
    resolve_principal,
};
pub use config::settings::{AllowedOrigins, Settings};
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use hashing::Argon2CredentialHasher;
pub use http::{AppState, routes};
pub use persistence::{InMemoryAccountStore, PostgresAccountStore};
