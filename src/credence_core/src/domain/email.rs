use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use super::DomainError;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile")
});

/// Validated email address. The account's unique key, case-sensitive as
/// stored and immutable after creation.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl TryFrom<Secret<String>> for Email {
    type Error = DomainError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if EMAIL_REGEX.is_match(value.expose_secret()) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidEmail)
        }
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Email, DomainError> {
        Email::try_from(Secret::from(raw.to_owned()))
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(parse("user@example.com").is_ok());
        assert!(parse("first.last+tag@sub.domain.io").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in ["", "no-at-sign", "user@", "@example.com", "a b@c.com", "user@nodot"] {
            assert_eq!(parse(raw), Err(DomainError::InvalidEmail), "accepted {raw:?}");
        }
    }

    #[test]
    fn equality_compares_the_inner_address() {
        assert_eq!(parse("a@x.com").unwrap(), parse("a@x.com").unwrap());
        assert_ne!(parse("a@x.com").unwrap(), parse("b@x.com").unwrap());
    }
}
