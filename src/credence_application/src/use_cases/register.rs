use credence_core::{
    Account, AccountStore, AccountStoreError, Channel, CredentialHasher, Email, EmailClient,
    HasherError, Password, Role,
};

/// What the reconciler decided for a (email, channel, password) triple.
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new account was created. `verification_pending` is true when the
    /// signup channel requires the email address to be activated before the
    /// account can log in.
    Created { verification_pending: bool },
    /// The email was already on file and the new channel's credential was
    /// attached to the existing account.
    ChannelLinked,
    /// The email was already on file with this exact channel. Not an error:
    /// the operation is idempotent and nothing was mutated.
    ChannelAlreadyLinked,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Account store error: {0}")]
    Store(#[from] AccountStoreError),
    #[error("{0}")]
    Hasher(#[from] HasherError),
}

/// Register use case - reconciles a signup against the account on file for
/// the email, creating, linking, or rejecting as a duplicate.
pub struct RegisterUseCase<'a, S, E, H>
where
    S: AccountStore,
    E: EmailClient,
    H: CredentialHasher,
{
    accounts: &'a S,
    email_client: &'a E,
    hasher: &'a H,
}

impl<'a, S, E, H> RegisterUseCase<'a, S, E, H>
where
    S: AccountStore,
    E: EmailClient,
    H: CredentialHasher,
{
    pub fn new(accounts: &'a S, email_client: &'a E, hasher: &'a H) -> Self {
        Self {
            accounts,
            email_client,
            hasher,
        }
    }

    /// Execute the register use case.
    ///
    /// Two concurrent signups for the same new email can both observe
    /// "absent" here; the store's unique constraint on email decides the
    /// winner and the loser surfaces `DuplicateEmail`.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all, fields(channel = %channel))]
    pub async fn execute(
        &self,
        email: Email,
        name: String,
        password: Password,
        role: Role,
        channel: Channel,
    ) -> Result<RegisterOutcome, RegisterError> {
        match self.accounts.find_by_email(&email).await? {
            None => {
                let password_hash = self.hasher.hash(&password).await?;
                let account = Account::open(email, name, role, password_hash, channel);
                let verification_pending = !account.is_verified();

                if let Some(code) = account.activation_code() {
                    self.request_activation_email(&account, code.as_str()).await;
                }

                self.accounts.insert(account).await?;
                Ok(RegisterOutcome::Created {
                    verification_pending,
                })
            }
            Some(mut account) => {
                if account.has_channel(&channel) {
                    return Ok(RegisterOutcome::ChannelAlreadyLinked);
                }

                let password_hash = self.hasher.hash(&password).await?;
                match account.link_channel(password_hash, channel) {
                    Ok(()) => {
                        self.accounts.update(account).await?;
                        Ok(RegisterOutcome::ChannelLinked)
                    }
                    // Unreachable after the has_channel check, but the
                    // duplicate answer stays correct either way.
                    Err(_) => Ok(RegisterOutcome::ChannelAlreadyLinked),
                }
            }
        }
    }

    /// Fire-and-forget: a failed delivery is logged but never fails the
    /// signup. The account holder can re-trigger activation later.
    async fn request_activation_email(&self, account: &Account, code: &str) {
        let content = format!(
            "Hi {}, confirm your email address with activation code {}",
            account.name(),
            code
        );
        if let Err(error) = self
            .email_client
            .send_email(account.email(), "Activate your account", &content)
            .await
        {
            tracing::warn!(%error, "failed to send activation email");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use credence_core::{ActivationCode, StoredPasswordHash};
    use secrecy::{ExposeSecret, Secret};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use super::*;

    #[derive(Clone, Default)]
    struct MockAccountStore {
        accounts: Arc<RwLock<HashMap<String, Account>>>,
    }

    #[async_trait::async_trait]
    impl AccountStore for MockAccountStore {
        async fn find_by_email(
            &self,
            email: &Email,
        ) -> Result<Option<Account>, AccountStoreError> {
            Ok(self
                .accounts
                .read()
                .await
                .get(email.as_ref().expose_secret())
                .cloned())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Account>, AccountStoreError> {
            unimplemented!()
        }

        async fn find_by_activation_code(
            &self,
            _code: &ActivationCode,
        ) -> Result<Option<Account>, AccountStoreError> {
            unimplemented!()
        }

        async fn insert(&self, account: Account) -> Result<(), AccountStoreError> {
            let mut accounts = self.accounts.write().await;
            let key = account.email().as_ref().expose_secret().clone();
            if accounts.contains_key(&key) {
                return Err(AccountStoreError::DuplicateEmail);
            }
            accounts.insert(key, account);
            Ok(())
        }

        async fn update(&self, account: Account) -> Result<(), AccountStoreError> {
            let mut accounts = self.accounts.write().await;
            let key = account.email().as_ref().expose_secret().clone();
            if !accounts.contains_key(&key) {
                return Err(AccountStoreError::AccountNotFound);
            }
            accounts.insert(key, account);
            Ok(())
        }
    }

    #[derive(Clone)]
    struct MockHasher;

    #[async_trait::async_trait]
    impl CredentialHasher for MockHasher {
        async fn hash(&self, password: &Password) -> Result<StoredPasswordHash, HasherError> {
            Ok(StoredPasswordHash::from(format!(
                "hashed:{}",
                password.as_ref().expose_secret()
            )))
        }

        async fn verify(
            &self,
            candidate: &Password,
            hash: &StoredPasswordHash,
        ) -> Result<bool, HasherError> {
            Ok(hash.as_ref().expose_secret()
                == &format!("hashed:{}", candidate.as_ref().expose_secret()))
        }
    }

    #[derive(Clone, Default)]
    struct MockEmailClient {
        sent: Arc<RwLock<Vec<(String, String, String)>>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl EmailClient for MockEmailClient {
        async fn send_email(
            &self,
            recipient: &Email,
            subject: &str,
            content: &str,
        ) -> Result<(), String> {
            if self.fail {
                return Err("delivery refused".to_owned());
            }
            self.sent.write().await.push((
                recipient.as_ref().expose_secret().clone(),
                subject.to_owned(),
                content.to_owned(),
            ));
            Ok(())
        }
    }

    fn email(raw: &str) -> Email {
        Email::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    fn channel(raw: &str) -> Channel {
        Channel::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn form_signup_creates_an_unverified_account_and_requests_email() {
        let store = MockAccountStore::default();
        let mail = MockEmailClient::default();
        let hasher = MockHasher;
        let use_case = RegisterUseCase::new(&store, &mail, &hasher);

        let outcome = use_case
            .execute(
                email("a@x.com"),
                "Ada".to_owned(),
                password("secret1"),
                Role::default(),
                channel("form"),
            )
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RegisterOutcome::Created {
                verification_pending: true
            }
        );

        let account = store.accounts.read().await.get("a@x.com").cloned().unwrap();
        assert!(!account.is_verified());
        assert_eq!(account.password_hashes().len(), 1);
        assert_eq!(account.channels().len(), 1);

        let sent = mail.sent.read().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "a@x.com");
        assert!(sent[0].2.contains(account.activation_code().unwrap().as_str()));
    }

    #[tokio::test]
    async fn provider_signup_is_verified_immediately_and_sends_nothing() {
        let store = MockAccountStore::default();
        let mail = MockEmailClient::default();
        let hasher = MockHasher;
        let use_case = RegisterUseCase::new(&store, &mail, &hasher);

        let outcome = use_case
            .execute(
                email("b@x.com"),
                "Bea".to_owned(),
                password("secret1"),
                Role::default(),
                channel("google"),
            )
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RegisterOutcome::Created {
                verification_pending: false
            }
        );
        let account = store.accounts.read().await.get("b@x.com").cloned().unwrap();
        assert!(account.is_verified());
        assert!(account.activation_code().is_none());
        assert!(mail.sent.read().await.is_empty());
    }

    #[tokio::test]
    async fn failed_activation_email_does_not_fail_the_signup() {
        let store = MockAccountStore::default();
        let mail = MockEmailClient {
            fail: true,
            ..MockEmailClient::default()
        };
        let hasher = MockHasher;
        let use_case = RegisterUseCase::new(&store, &mail, &hasher);

        let outcome = use_case
            .execute(
                email("a@x.com"),
                "Ada".to_owned(),
                password("secret1"),
                Role::default(),
                channel("form"),
            )
            .await
            .unwrap();

        assert!(matches!(outcome, RegisterOutcome::Created { .. }));
        assert!(store.accounts.read().await.contains_key("a@x.com"));
    }

    #[tokio::test]
    async fn repeating_the_same_channel_is_idempotent() {
        let store = MockAccountStore::default();
        let mail = MockEmailClient::default();
        let hasher = MockHasher;
        let use_case = RegisterUseCase::new(&store, &mail, &hasher);

        for _ in 0..2 {
            use_case
                .execute(
                    email("a@x.com"),
                    "Ada".to_owned(),
                    password("secret1"),
                    Role::default(),
                    channel("form"),
                )
                .await
                .unwrap();
        }

        let outcome = use_case
            .execute(
                email("a@x.com"),
                "Ada".to_owned(),
                password("other99"),
                Role::default(),
                channel("form"),
            )
            .await
            .unwrap();

        assert_eq!(outcome, RegisterOutcome::ChannelAlreadyLinked);
        let account = store.accounts.read().await.get("a@x.com").cloned().unwrap();
        assert_eq!(account.password_hashes().len(), 1);
    }

    #[tokio::test]
    async fn a_new_channel_links_a_credential_and_verifies_the_account() {
        let store = MockAccountStore::default();
        let mail = MockEmailClient::default();
        let hasher = MockHasher;
        let use_case = RegisterUseCase::new(&store, &mail, &hasher);

        use_case
            .execute(
                email("a@x.com"),
                "Ada".to_owned(),
                password("secret1"),
                Role::default(),
                channel("form"),
            )
            .await
            .unwrap();

        let outcome = use_case
            .execute(
                email("a@x.com"),
                "Ada".to_owned(),
                password("other99"),
                Role::default(),
                channel("google"),
            )
            .await
            .unwrap();

        assert_eq!(outcome, RegisterOutcome::ChannelLinked);
        let account = store.accounts.read().await.get("a@x.com").cloned().unwrap();
        assert_eq!(account.password_hashes().len(), 2);
        assert_eq!(account.channels().len(), 2);
        assert!(account.is_verified());
    }
}
