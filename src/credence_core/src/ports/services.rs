use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, password::Password, stored_password_hash::StoredPasswordHash};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct HasherError(pub String);

/// Port trait for the one-way password hash primitive. Implementations must
/// use a slow, salted, adaptive hash; the core only relies on `verify`
/// being a sound predicate over hashes produced by `hash`.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<StoredPasswordHash, HasherError>;
    async fn verify(
        &self,
        candidate: &Password,
        hash: &StoredPasswordHash,
    ) -> Result<bool, HasherError>;
}
