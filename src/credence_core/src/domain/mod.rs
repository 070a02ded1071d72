pub mod account;
pub mod activation_code;
pub mod channel;
pub mod email;
pub mod password;
pub mod principal;
pub mod role;
pub mod stored_password_hash;

use thiserror::Error;

/// Errors produced when parsing raw input into domain value objects, or when
/// a mutation would break an account invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("{0}")]
    InvalidPassword(&'static str),
    #[error("Signup channel must not be empty")]
    InvalidChannel,
    #[error("Role must not be empty")]
    InvalidRole,
    #[error("Activation code must be alphanumeric")]
    InvalidActivationCode,
    #[error("Channel '{0}' is already linked to this account")]
    ChannelAlreadyLinked(String),
    #[error("Corrupt account record: {0}")]
    CorruptAccount(&'static str),
}
