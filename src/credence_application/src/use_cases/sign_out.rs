use credence_core::{AccountStore, AccountStoreError, Email};

#[derive(Debug, thiserror::Error)]
pub enum SignOutError {
    #[error("Account not found")]
    AccountNotFound,
    #[error("Account store error: {0}")]
    Store(#[from] AccountStoreError),
}

/// Sign-out use case - clears the advisory `logged` flag. Tokens stay valid
/// until they expire; this flag is informational only.
pub struct SignOutUseCase<'a, S>
where
    S: AccountStore,
{
    accounts: &'a S,
}

impl<'a, S> SignOutUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(accounts: &'a S) -> Self {
        Self { accounts }
    }

    #[tracing::instrument(name = "SignOutUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), SignOutError> {
        let Some(mut account) = self.accounts.find_by_email(&email).await? else {
            return Err(SignOutError::AccountNotFound);
        };

        account.set_logged(false);
        self.accounts.update(account).await?;
        Ok(())
    }
}
