pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    DomainError,
    account::{Account, ProfilePatch},
    activation_code::ActivationCode,
    channel::{Channel, FORM_CHANNEL},
    email::Email,
    password::Password,
    principal::Principal,
    role::Role,
    stored_password_hash::StoredPasswordHash,
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError},
    services::{CredentialHasher, EmailClient, HasherError},
};
