use uuid::Uuid;

use super::{
    DomainError, activation_code::ActivationCode, channel::Channel, email::Email, role::Role,
    stored_password_hash::StoredPasswordHash,
};

/// One account per unique email address. An account can accumulate several
/// credentials, one per signup channel: the Nth entry of `channels`
/// corresponds to the Nth entry of `password_hashes`, and the two sequences
/// always have the same, non-zero length.
///
/// Fields are private so the lockstep invariant is maintained by
/// construction: the only way to grow the sequences is [`Account::link_channel`],
/// which appends to both or neither.
#[derive(Debug, Clone)]
pub struct Account {
    id: Uuid,
    email: Email,
    name: String,
    role: Role,
    password_hashes: Vec<StoredPasswordHash>,
    channels: Vec<Channel>,
    verified: bool,
    logged: bool,
    activation_code: Option<ActivationCode>,
}

/// Allow-listed partial update for [`Account::apply_profile_patch`]. Only
/// the display name and the role tag are editable; identity and credential
/// fields cannot be reached through a patch.
#[derive(Debug, Default, Clone)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub role: Option<Role>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none()
    }
}

impl Account {
    /// Create a fresh account from its first credential. Accounts opened
    /// through a channel that requires email verification start unverified
    /// and carry an activation code; all others are verified immediately.
    pub fn open(
        email: Email,
        name: String,
        role: Role,
        password_hash: StoredPasswordHash,
        channel: Channel,
    ) -> Self {
        let verified = !channel.requires_email_verification();
        let activation_code = (!verified).then(ActivationCode::generate);

        Self {
            id: Uuid::new_v4(),
            email,
            name,
            role,
            password_hashes: vec![password_hash],
            channels: vec![channel],
            verified,
            logged: false,
            activation_code,
        }
    }

    /// Rehydrate an account from storage, re-checking the invariants the
    /// constructor guarantees.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        email: Email,
        name: String,
        role: Role,
        password_hashes: Vec<StoredPasswordHash>,
        channels: Vec<Channel>,
        verified: bool,
        logged: bool,
        activation_code: Option<ActivationCode>,
    ) -> Result<Self, DomainError> {
        if password_hashes.is_empty() {
            return Err(DomainError::CorruptAccount("no password hashes"));
        }
        if password_hashes.len() != channels.len() {
            return Err(DomainError::CorruptAccount(
                "password hashes and channels out of lockstep",
            ));
        }
        Ok(Self {
            id,
            email,
            name,
            role,
            password_hashes,
            channels,
            verified,
            logged,
            activation_code,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn password_hashes(&self) -> &[StoredPasswordHash] {
        &self.password_hashes
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn is_logged(&self) -> bool {
        self.logged
    }

    pub fn activation_code(&self) -> Option<&ActivationCode> {
        self.activation_code.as_ref()
    }

    pub fn has_channel(&self, channel: &Channel) -> bool {
        self.channels.contains(channel)
    }

    /// Attach a credential from a channel not yet on file. Appends the hash
    /// and the channel together and marks the account verified: linking a
    /// second channel is treated as implicit proof of ownership, even when
    /// the new channel is the self-service form.
    pub fn link_channel(
        &mut self,
        password_hash: StoredPasswordHash,
        channel: Channel,
    ) -> Result<(), DomainError> {
        if self.has_channel(&channel) {
            return Err(DomainError::ChannelAlreadyLinked(channel.to_string()));
        }
        self.password_hashes.push(password_hash);
        self.channels.push(channel);
        self.verified = true;
        Ok(())
    }

    /// Flip the account to verified. Idempotent; never reverts.
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    pub fn set_logged(&mut self, logged: bool) {
        self.logged = logged;
    }

    pub fn apply_profile_patch(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;
    use secrecy::Secret;

    use super::*;

    fn email(raw: &str) -> Email {
        Email::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    fn hash(raw: &str) -> StoredPasswordHash {
        StoredPasswordHash::from(raw.to_owned())
    }

    fn form_account() -> Account {
        Account::open(
            email("a@x.com"),
            "Ada".to_owned(),
            Role::default(),
            hash("h1"),
            Channel::parse("form").unwrap(),
        )
    }

    #[test]
    fn form_accounts_start_unverified_with_a_code() {
        let account = form_account();
        assert!(!account.is_verified());
        assert!(account.activation_code().is_some());
        assert_eq!(account.password_hashes().len(), 1);
        assert_eq!(account.channels().len(), 1);
    }

    #[test]
    fn provider_accounts_start_verified_without_a_code() {
        let account = Account::open(
            email("b@x.com"),
            "Bea".to_owned(),
            Role::default(),
            hash("h1"),
            Channel::parse("google").unwrap(),
        );
        assert!(account.is_verified());
        assert!(account.activation_code().is_none());
    }

    #[test]
    fn linking_a_new_channel_appends_both_and_verifies() {
        let mut account = form_account();
        account
            .link_channel(hash("h2"), Channel::parse("google").unwrap())
            .unwrap();

        assert_eq!(account.password_hashes().len(), 2);
        assert_eq!(account.channels().len(), 2);
        assert!(account.is_verified());
    }

    #[test]
    fn linking_an_existing_channel_is_rejected_without_mutation() {
        let mut account = form_account();
        let result = account.link_channel(hash("h2"), Channel::parse("form").unwrap());

        assert!(matches!(result, Err(DomainError::ChannelAlreadyLinked(_))));
        assert_eq!(account.password_hashes().len(), 1);
        assert_eq!(account.channels().len(), 1);
        assert!(!account.is_verified());
    }

    #[test]
    fn profile_patch_touches_only_name_and_role() {
        let mut account = form_account();
        let id = account.id();
        account.apply_profile_patch(ProfilePatch {
            name: Some("Grace".to_owned()),
            role: Some(Role::parse("admin").unwrap()),
        });

        assert_eq!(account.name(), "Grace");
        assert_eq!(account.role().as_str(), "admin");
        assert_eq!(account.id(), id);
        assert_eq!(account.password_hashes().len(), 1);
    }

    #[test]
    fn from_parts_rejects_out_of_lockstep_records() {
        let result = Account::from_parts(
            Uuid::new_v4(),
            email("a@x.com"),
            "Ada".to_owned(),
            Role::default(),
            vec![hash("h1"), hash("h2")],
            vec![Channel::parse("form").unwrap()],
            true,
            false,
            None,
        );
        assert!(matches!(result, Err(DomainError::CorruptAccount(_))));
    }

    #[quickcheck]
    fn hashes_and_channels_stay_in_lockstep(extra_channels: Vec<u8>) -> bool {
        let mut account = form_account();
        for n in extra_channels {
            let channel = Channel::parse(&format!("provider{n}")).unwrap();
            if !account.has_channel(&channel) {
                account
                    .link_channel(hash(&format!("hash{n}")), channel)
                    .unwrap();
            }
        }
        account.password_hashes().len() == account.channels().len()
            && !account.password_hashes().is_empty()
    }
}
