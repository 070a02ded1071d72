use std::fmt;

use rand::{Rng, distr::Alphanumeric};

use super::DomainError;

const CODE_LENGTH: usize = 30;

/// Random token proving control of the registered email address. Generated
/// at account creation for channels that require verification and redeemed
/// through the activation flow. It is not cleared after redemption; once
/// the account is verified the code no longer gates anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationCode(String);

impl ActivationCode {
    pub fn generate() -> Self {
        let code = rand::rng()
            .sample_iter(Alphanumeric)
            .take(CODE_LENGTH)
            .map(char::from)
            .collect();
        Self(code)
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidActivationCode);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
