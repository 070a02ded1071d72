use credence_core::{AccountStore, AccountStoreError, ProfilePatch};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum EditProfileError {
    #[error("Account store error: {0}")]
    Store(#[from] AccountStoreError),
}

/// Profile edit use case - applies an allow-listed patch (name, role) to an
/// account. Editing an id that does not exist is a silent no-op and reports
/// `false`; only store failures are errors.
pub struct EditProfileUseCase<'a, S>
where
    S: AccountStore,
{
    accounts: &'a S,
}

impl<'a, S> EditProfileUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(accounts: &'a S) -> Self {
        Self { accounts }
    }

    #[tracing::instrument(name = "EditProfileUseCase::execute", skip(self, patch))]
    pub async fn execute(
        &self,
        account_id: Uuid,
        patch: ProfilePatch,
    ) -> Result<bool, EditProfileError> {
        let Some(mut account) = self.accounts.find_by_id(account_id).await? else {
            return Ok(false);
        };

        account.apply_profile_patch(patch);
        self.accounts.update(account).await?;
        Ok(true)
    }
}
