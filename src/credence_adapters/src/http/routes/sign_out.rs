use axum::{Json, extract::State, response::IntoResponse};
use credence_application::SignOutUseCase;
use credence_core::{AccountStore, CredentialHasher, Email, EmailClient};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::AuthApiError;
use crate::http::AppState;

#[derive(Deserialize)]
pub struct SignOutRequest {
    pub email: Secret<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SignOutResponse {
    #[serde(rename = "loggedOut")]
    pub logged_out: bool,
}

/// Sign-out is keyed by email and carries no credential: it only clears the
/// advisory `logged` flag and reveals nothing beyond whether the email is
/// on file. Tokens stay valid until they expire.
#[tracing::instrument(name = "Sign out", skip_all)]
pub async fn sign_out<S, E, H>(
    State(state): State<AppState<S, E, H>>,
    Json(request): Json<SignOutRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: AccountStore + Clone + Send + Sync + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
    H: CredentialHasher + Clone + Send + Sync + 'static,
{
    let email = Email::try_from(request.email)?;

    SignOutUseCase::new(&state.accounts).execute(email).await?;

    Ok(Json(SignOutResponse { logged_out: true }))
}
