use secrecy::{ExposeSecret, Secret};

use super::DomainError;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Plaintext password candidate. Only ever held transiently on the way to
/// the hasher; never persisted.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = DomainError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let raw = value.expose_secret();
        if raw.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::InvalidPassword(
                "Password must be at least 6 characters long",
            ));
        }
        if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidPassword(
                "Password must contain only letters and digits",
            ));
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
