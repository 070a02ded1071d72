use secrecy::ExposeSecret;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use uuid::Uuid;

use super::{account::Account, email::Email, role::Role};

/// Sanitized identity projection handed out after authentication and used
/// for session purposes. Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub role: Role,
}

impl From<&Account> for Principal {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_owned(),
            email: account.email().clone(),
            role: account.role().clone(),
        }
    }
}

// The email is deliberately exposed here: the principal is the response
// payload callers see after signing in.
impl Serialize for Principal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Principal", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("email", self.email.as_ref().expose_secret())?;
        state.serialize_field("role", &self.role)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::Secret;

    use super::*;
    use crate::domain::{channel::Channel, stored_password_hash::StoredPasswordHash};

    #[test]
    fn principal_never_carries_credential_material() {
        let account = Account::open(
            Email::try_from(Secret::from("a@x.com".to_owned())).unwrap(),
            "Ada".to_owned(),
            Role::default(),
            StoredPasswordHash::from("argon2-hash".to_owned()),
            Channel::parse("form").unwrap(),
        );
        let principal = Principal::from(&account);
        let json = serde_json::to_string(&principal).unwrap();

        assert!(json.contains("a@x.com"));
        assert!(!json.contains("argon2-hash"));
        assert_eq!(principal.id, account.id());
    }
}
