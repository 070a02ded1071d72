use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use credence_application::EditProfileUseCase;
use credence_core::{AccountStore, CredentialHasher, EmailClient, ProfilePatch, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{bearer_token, error::AuthApiError};
use crate::{auth::session::resolve_principal, http::AppState};

/// Only name and role are patchable. Anything else in the body is ignored
/// rather than applied, so credentials and flags cannot be mass-assigned.
#[derive(Deserialize)]
pub struct EditProfileRequest {
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct EditProfileResponse {
    pub updated: bool,
}

#[tracing::instrument(name = "Edit profile", skip_all, fields(account_id = %account_id))]
pub async fn edit_profile<S, E, H>(
    State(state): State<AppState<S, E, H>>,
    Path(account_id): Path<Uuid>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(request): Json<EditProfileRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: AccountStore + Clone + Send + Sync + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
    H: CredentialHasher + Clone + Send + Sync + 'static,
{
    let token = bearer_token(auth)?;
    resolve_principal(&token, &state.accounts, &state.sessions).await?;

    let role = match request.role {
        Some(raw) => Some(Role::parse(&raw)?),
        None => None,
    };
    let patch = ProfilePatch {
        name: request.name,
        role,
    };

    let updated = EditProfileUseCase::new(&state.accounts)
        .execute(account_id, patch)
        .await?;

    Ok(Json(EditProfileResponse { updated }))
}
