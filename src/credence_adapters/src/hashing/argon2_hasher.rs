use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use credence_core::{CredentialHasher, HasherError, Password, StoredPasswordHash};
use secrecy::{ExposeSecret, Secret};

/// Argon2id credential hasher. Hashing and verification are CPU-bound by
/// design, so both run under `spawn_blocking` to keep them off the async
/// executor threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, HasherError> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| HasherError(e.to_string()))?,
    ))
}

#[async_trait::async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<StoredPasswordHash, HasherError> {
        let password = password.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|hash| StoredPasswordHash::new(Secret::from(hash.to_string())))
                    .map_err(|e| HasherError(e.to_string()))
            })
        })
        .await
        .map_err(|e| HasherError(e.to_string()))?
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn verify(
        &self,
        candidate: &Password,
        hash: &StoredPasswordHash,
    ) -> Result<bool, HasherError> {
        let candidate = candidate.clone();
        let hash = hash.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let expected = PasswordHash::new(hash.as_ref().expose_secret())
                    .map_err(|e| HasherError(e.to_string()))?;

                match argon2()?
                    .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
                {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(HasherError(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| HasherError(e.to_string()))?
    }
}
