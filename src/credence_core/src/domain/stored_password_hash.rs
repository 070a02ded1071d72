use secrecy::{ExposeSecret, Secret};

/// Opaque one-way hash of a password, exactly as the hasher produced it.
/// The core never inspects the encoding; it only hands hashes back to the
/// hasher for verification.
#[derive(Debug, Clone)]
pub struct StoredPasswordHash(Secret<String>);

impl StoredPasswordHash {
    pub fn new(hash: Secret<String>) -> Self {
        Self(hash)
    }
}

impl AsRef<Secret<String>> for StoredPasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl From<String> for StoredPasswordHash {
    fn from(hash: String) -> Self {
        Self(Secret::from(hash))
    }
}

impl PartialEq for StoredPasswordHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for StoredPasswordHash {}
