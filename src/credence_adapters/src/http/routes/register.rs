use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use credence_application::{RegisterOutcome, RegisterUseCase};
use credence_core::{AccountStore, CredentialHasher, Email, EmailClient, Password, Role};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::{error::AuthApiError, required_channel};
use crate::http::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub name: String,
    pub password: Secret<String>,
    pub role: Option<String>,
    pub channel: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct RegisterResponse {
    pub created: bool,
    pub message: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S, E, H>(
    State(state): State<AppState<S, E, H>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: AccountStore + Clone + Send + Sync + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
    H: CredentialHasher + Clone + Send + Sync + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;
    let role = match request.role {
        Some(raw) => Role::parse(&raw)?,
        None => Role::default(),
    };
    let channel = required_channel(request.channel)?;

    let use_case = RegisterUseCase::new(&state.accounts, &state.email_client, &state.hasher);
    let outcome = use_case
        .execute(email, request.name, password, role, channel)
        .await?;

    let response = match outcome {
        RegisterOutcome::Created {
            verification_pending: true,
        } => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                created: true,
                message: String::from(
                    "Account created. Check your email for the activation code.",
                ),
            }),
        ),
        RegisterOutcome::Created {
            verification_pending: false,
        } => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                created: true,
                message: String::from("Account created."),
            }),
        ),
        // The credential was attached to the account already on file; no
        // new account exists, so `created` stays false.
        RegisterOutcome::ChannelLinked => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                created: false,
                message: String::from("Sign-in channel linked to your existing account."),
            }),
        ),
        RegisterOutcome::ChannelAlreadyLinked => (
            StatusCode::OK,
            Json(RegisterResponse {
                created: false,
                message: String::from("This channel is already linked to your account."),
            }),
        ),
    };

    Ok(response)
}
