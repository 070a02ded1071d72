use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// The self-service signup pathway. The only channel that requires the
/// account holder to prove control of the email address before logging in.
pub const FORM_CHANNEL: &str = "form";

/// Provenance tag identifying which signup pathway supplied a credential,
/// e.g. "form" or "google". Opaque apart from the verification policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channel(String);

impl Channel {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidChannel);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_form(&self) -> bool {
        self.0 == FORM_CHANNEL
    }

    /// Whether an account created through this channel starts unverified
    /// and must redeem an activation code before it can log in. Provider
    /// channels are trusted to have verified the address already.
    pub fn requires_email_verification(&self) -> bool {
        self.is_form()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
