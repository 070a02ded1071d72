use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use credence_application::ActivateAccountUseCase;
use credence_core::{AccountStore, ActivationCode, CredentialHasher, EmailClient};
use serde::{Deserialize, Serialize};

use super::error::AuthApiError;
use crate::http::AppState;

#[derive(Serialize, Deserialize)]
pub struct ActivateResponse {
    pub activated: bool,
}

#[tracing::instrument(name = "Activate account", skip_all)]
pub async fn activate<S, E, H>(
    State(state): State<AppState<S, E, H>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: AccountStore + Clone + Send + Sync + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
    H: CredentialHasher + Clone + Send + Sync + 'static,
{
    let code = ActivationCode::parse(&code)?;

    ActivateAccountUseCase::new(&state.accounts)
        .execute(code)
        .await?;

    Ok(Json(ActivateResponse { activated: true }))
}
