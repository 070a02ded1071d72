use chrono::Utc;
use credence_core::{AccountStore, Principal, Role};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Fixed default session horizon: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24;

/// Signing configuration for session tokens, injected wherever tokens are
/// minted or checked. Rotating the secret invalidates every outstanding
/// token; acceptable because tokens are stateless and short-lived.
#[derive(Clone)]
pub struct SessionConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_seconds: i64,
}

impl SessionConfig {
    pub fn new(jwt_secret: Secret<String>, token_ttl_seconds: i64) -> Self {
        Self {
            jwt_secret,
            token_ttl_seconds,
        }
    }

    fn secret_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid session token")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("No account matches this token")]
    PrincipalNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Token payload: the account id, its role tag, and the expiry timestamp.
/// Validity is signature plus expiry; there is no revocation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub role: String,
    pub exp: usize,
}

/// Mint a signed session token for an authenticated account. Callers must
/// only reach this after credential verification has succeeded.
pub fn mint_session_token(
    account_id: Uuid,
    role: &Role,
    config: &SessionConfig,
) -> Result<String, SessionTokenError> {
    let delta = chrono::Duration::try_seconds(config.token_ttl_seconds).ok_or(
        SessionTokenError::UnexpectedError("Failed to create token duration".to_string()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(SessionTokenError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let exp: usize = exp.try_into().map_err(|_| {
        SessionTokenError::UnexpectedError("Failed to cast i64 to usize".to_string())
    })?;

    let claims = SessionClaims {
        sub: account_id,
        role: role.as_str().to_owned(),
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_bytes()),
    )
    .map_err(SessionTokenError::TokenError)
}

/// Verify signature and expiry, returning the embedded claims.
pub fn decode_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, SessionTokenError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(SessionTokenError::TokenError)
}

/// The sole gate for principal-bound operations: verify the presented token
/// and resolve its subject to a sanitized principal. Fails when the account
/// behind the token no longer exists.
pub async fn resolve_principal<S: AccountStore>(
    token: &str,
    accounts: &S,
    config: &SessionConfig,
) -> Result<Principal, SessionTokenError> {
    let claims = decode_session_token(token, config)?;

    let account = accounts
        .find_by_id(claims.sub)
        .await
        .map_err(|e| SessionTokenError::UnexpectedError(e.to_string()))?
        .ok_or(SessionTokenError::PrincipalNotFound)?;

    Ok(Principal::from(&account))
}
