use credence_core::{
    AccountStore, AccountStoreError, Channel, CredentialHasher, Email, HasherError, Password,
    Principal,
};

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error("Account not found")]
    AccountNotFound,
    #[error("Email address has not been verified")]
    EmailUnverified,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account store error: {0}")]
    Store(#[from] AccountStoreError),
    #[error("{0}")]
    Hasher(#[from] HasherError),
}

/// Sign-in use case - answers whether an (email, password, channel) triple
/// may log in, and produces the sanitized principal when it may.
///
/// Checks run in a fixed order: existence, then the verification gate, then
/// credential matching. Matching is channel-independent: the candidate is
/// tried against every hash on file, so a password registered under one
/// channel still signs in through another.
pub struct SignInUseCase<'a, S, H>
where
    S: AccountStore,
    H: CredentialHasher,
{
    accounts: &'a S,
    hasher: &'a H,
}

impl<'a, S, H> SignInUseCase<'a, S, H>
where
    S: AccountStore,
    H: CredentialHasher,
{
    pub fn new(accounts: &'a S, hasher: &'a H) -> Self {
        Self { accounts, hasher }
    }

    /// Execute the sign-in use case. The caller mints a session token only
    /// after this returns Ok; a token is never handed out for an email that
    /// does not exist or failed verification.
    #[tracing::instrument(name = "SignInUseCase::execute", skip_all, fields(channel = %channel))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        channel: Channel,
    ) -> Result<Principal, SignInError> {
        let Some(mut account) = self.accounts.find_by_email(&email).await? else {
            return Err(SignInError::AccountNotFound);
        };

        if !account.is_verified() {
            return Err(SignInError::EmailUnverified);
        }

        let mut matched = false;
        for hash in account.password_hashes() {
            if self.hasher.verify(&password, hash).await? {
                matched = true;
                break;
            }
        }
        if !matched {
            return Err(SignInError::InvalidCredentials);
        }

        account.set_logged(true);
        let principal = Principal::from(&account);
        self.accounts.update(account).await?;

        Ok(principal)
    }
}
