pub mod activate;
pub mod edit_profile;
pub mod error;
pub mod refresh_token;
pub mod register;
pub mod sign_in;
pub mod sign_out;

use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

pub use activate::{ActivateResponse, activate};
pub use edit_profile::{EditProfileRequest, EditProfileResponse, edit_profile};
pub use error::{AuthApiError, ErrorResponse};
pub use refresh_token::{RefreshTokenResponse, refresh_token};
pub use register::{RegisterRequest, RegisterResponse, register};
pub use sign_in::{SignInRequest, SignInResponse, sign_in};
pub use sign_out::{SignOutRequest, SignOutResponse, sign_out};

use credence_core::Channel;

use crate::auth::session::SessionTokenError;

/// Pull the bearer token out of an optional `Authorization` header.
pub(crate) fn bearer_token(
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<String, SessionTokenError> {
    auth.map(|TypedHeader(header)| header.token().to_owned())
        .ok_or(SessionTokenError::MissingToken)
}

/// The signup channel is a required input; leaving it out is a validation
/// failure, not an implicit default.
pub(crate) fn required_channel(raw: Option<String>) -> Result<Channel, AuthApiError> {
    let raw = raw.ok_or_else(|| {
        AuthApiError::InvalidInput(String::from("Signup channel is required"))
    })?;
    Ok(Channel::parse(&raw)?)
}
