use std::sync::Arc;

use credence_core::{Account, AccountStore, AccountStoreError, ActivationCode, Email};
use dashmap::{DashMap, Entry};
use secrecy::ExposeSecret;
use uuid::Uuid;

/// Account store backed by a shared concurrent map, keyed by email. Used by
/// the test suites and for local development without a database.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<DashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        Ok(self
            .accounts
            .get(email.as_ref().expose_secret())
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.value().id() == id)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_activation_code(
        &self,
        code: &ActivationCode,
    ) -> Result<Option<Account>, AccountStoreError> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.value().activation_code() == Some(code))
            .map(|entry| entry.value().clone()))
    }

    async fn insert(&self, account: Account) -> Result<(), AccountStoreError> {
        // The entry API makes the uniqueness check and the insert atomic,
        // mirroring the database's unique constraint on email.
        match self
            .accounts
            .entry(account.email().as_ref().expose_secret().clone())
        {
            Entry::Occupied(_) => Err(AccountStoreError::DuplicateEmail),
            Entry::Vacant(vacant) => {
                vacant.insert(account);
                Ok(())
            }
        }
    }

    async fn update(&self, account: Account) -> Result<(), AccountStoreError> {
        match self
            .accounts
            .get_mut(account.email().as_ref().expose_secret())
        {
            Some(mut entry) => {
                *entry = account;
                Ok(())
            }
            None => Err(AccountStoreError::AccountNotFound),
        }
    }
}
