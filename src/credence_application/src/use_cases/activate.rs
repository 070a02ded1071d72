use credence_core::{AccountStore, AccountStoreError, ActivationCode};

#[derive(Debug, thiserror::Error)]
pub enum ActivateError {
    #[error("No account matches this activation code")]
    CodeNotFound,
    #[error("Account store error: {0}")]
    Store(#[from] AccountStoreError),
}

/// Activation use case - redeems an activation code and flips the account
/// to verified. Idempotent: redeeming a code for an already-verified
/// account succeeds again, and the code itself is not invalidated (once
/// verified it no longer gates anything).
pub struct ActivateAccountUseCase<'a, S>
where
    S: AccountStore,
{
    accounts: &'a S,
}

impl<'a, S> ActivateAccountUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(accounts: &'a S) -> Self {
        Self { accounts }
    }

    #[tracing::instrument(name = "ActivateAccountUseCase::execute", skip_all)]
    pub async fn execute(&self, code: ActivationCode) -> Result<(), ActivateError> {
        let Some(mut account) = self.accounts.find_by_activation_code(&code).await? else {
            return Err(ActivateError::CodeNotFound);
        };

        account.mark_verified();
        self.accounts.update(account).await?;
        Ok(())
    }
}
