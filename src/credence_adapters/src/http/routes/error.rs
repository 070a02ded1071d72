use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use credence_application::{
    ActivateError, EditProfileError, RegisterError, SignInError, SignOutError,
};
use credence_core::{AccountStoreError, DomainError, HasherError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::session::SessionTokenError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The single HTTP error surface. Every failure becomes a structured
/// `{error}` JSON body; internal detail is logged, never leaked.
#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Account not found")]
    AccountNotFound,

    #[error("No account matches this activation code")]
    ActivationCodeNotFound,

    #[error("Email address has not been verified")]
    EmailUnverified,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("No account matches this token")]
    PrincipalNotFound,

    #[error("Unexpected error")]
    UnexpectedError(String),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AuthApiError::InvalidInput(_) | AuthApiError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }

            AuthApiError::AccountNotFound | AuthApiError::ActivationCodeNotFound => {
                StatusCode::NOT_FOUND
            }

            AuthApiError::EmailUnverified
            | AuthApiError::Unauthenticated(_)
            | AuthApiError::PrincipalNotFound => StatusCode::UNAUTHORIZED,

            AuthApiError::DuplicateEmail => StatusCode::CONFLICT,

            AuthApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let AuthApiError::UnexpectedError(detail) = &self {
            tracing::error!(%detail, "request failed unexpectedly");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<DomainError> for AuthApiError {
    fn from(error: DomainError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<AccountStoreError> for AuthApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::DuplicateEmail => AuthApiError::DuplicateEmail,
            AccountStoreError::AccountNotFound => AuthApiError::AccountNotFound,
            AccountStoreError::Unexpected(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<HasherError> for AuthApiError {
    fn from(error: HasherError) -> Self {
        AuthApiError::UnexpectedError(error.to_string())
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::Store(e) => e.into(),
            RegisterError::Hasher(e) => e.into(),
        }
    }
}

impl From<SignInError> for AuthApiError {
    fn from(error: SignInError) -> Self {
        match error {
            SignInError::AccountNotFound => AuthApiError::AccountNotFound,
            SignInError::EmailUnverified => AuthApiError::EmailUnverified,
            SignInError::InvalidCredentials => AuthApiError::InvalidCredentials,
            SignInError::Store(e) => e.into(),
            SignInError::Hasher(e) => e.into(),
        }
    }
}

impl From<SignOutError> for AuthApiError {
    fn from(error: SignOutError) -> Self {
        match error {
            SignOutError::AccountNotFound => AuthApiError::AccountNotFound,
            SignOutError::Store(e) => e.into(),
        }
    }
}

impl From<ActivateError> for AuthApiError {
    fn from(error: ActivateError) -> Self {
        match error {
            ActivateError::CodeNotFound => AuthApiError::ActivationCodeNotFound,
            ActivateError::Store(e) => e.into(),
        }
    }
}

impl From<EditProfileError> for AuthApiError {
    fn from(error: EditProfileError) -> Self {
        match error {
            EditProfileError::Store(e) => e.into(),
        }
    }
}

impl From<SessionTokenError> for AuthApiError {
    fn from(error: SessionTokenError) -> Self {
        match error {
            SessionTokenError::MissingToken | SessionTokenError::TokenError(_) => {
                AuthApiError::Unauthenticated(error.to_string())
            }
            SessionTokenError::PrincipalNotFound => AuthApiError::PrincipalNotFound,
            SessionTokenError::UnexpectedError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}
