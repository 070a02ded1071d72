use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use credence_core::{AccountStore, CredentialHasher, EmailClient, Principal};
use serde::Serialize;

use super::{bearer_token, error::AuthApiError};
use crate::{
    auth::session::{mint_session_token, resolve_principal},
    http::AppState,
};

#[derive(Serialize)]
pub struct RefreshTokenResponse {
    pub principal: Principal,
    pub token: String,
}

/// Trades a still-valid token for a fresh one with a full TTL. The presented
/// token must pass the same checks as any other authenticated request.
#[tracing::instrument(name = "Refresh token", skip_all)]
pub async fn refresh_token<S, E, H>(
    State(state): State<AppState<S, E, H>>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: AccountStore + Clone + Send + Sync + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
    H: CredentialHasher + Clone + Send + Sync + 'static,
{
    let token = bearer_token(auth)?;
    let principal = resolve_principal(&token, &state.accounts, &state.sessions).await?;

    let token = mint_session_token(principal.id, &principal.role, &state.sessions)?;

    Ok(Json(RefreshTokenResponse { principal, token }))
}
