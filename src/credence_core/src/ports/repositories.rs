use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{account::Account, activation_code::ActivationCode, email::Email};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("An account with this email already exists")]
    DuplicateEmail,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateEmail, Self::DuplicateEmail) => true,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Keyed record repository over accounts. The store's unique constraint on
/// email is the sole safety net for concurrent signups racing to create the
/// same account: exactly one `insert` wins, the loser sees `DuplicateEmail`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError>;
    async fn find_by_activation_code(
        &self,
        code: &ActivationCode,
    ) -> Result<Option<Account>, AccountStoreError>;
    async fn insert(&self, account: Account) -> Result<(), AccountStoreError>;
    async fn update(&self, account: Account) -> Result<(), AccountStoreError>;
}
