use axum::{Json, extract::State, response::IntoResponse};
use credence_application::SignInUseCase;
use credence_core::{AccountStore, CredentialHasher, Email, EmailClient, Password, Principal};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::{error::AuthApiError, required_channel};
use crate::{auth::session::mint_session_token, http::AppState};

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub channel: Option<String>,
}

#[derive(Serialize)]
pub struct SignInResponse {
    pub principal: Principal,
    pub token: String,
}

/// The token is minted only after the credential check has passed; there is
/// no code path that signs a token for an unauthenticated request.
#[tracing::instrument(name = "Sign in", skip_all)]
pub async fn sign_in<S, E, H>(
    State(state): State<AppState<S, E, H>>,
    Json(request): Json<SignInRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: AccountStore + Clone + Send + Sync + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
    H: CredentialHasher + Clone + Send + Sync + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;
    let channel = required_channel(request.channel)?;

    let use_case = SignInUseCase::new(&state.accounts, &state.hasher);
    let principal = use_case.execute(email, password, channel).await?;

    let token = mint_session_token(principal.id, &principal.role, &state.sessions)?;

    Ok(Json(SignInResponse { principal, token }))
}
