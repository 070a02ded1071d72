use credence_core::{
    Account, AccountStore, AccountStoreError, ActivationCode, Channel, Email, Role,
    StoredPasswordHash,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

/// Account store backed by PostgreSQL. The unique constraint on
/// `accounts.email` is the safety net for concurrent creations of the same
/// address.
#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_ACCOUNT: &str = r#"
    SELECT id, email, name, role, password_hashes, channels, verified, logged, activation_code
    FROM accounts
"#;

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Finding account by email in PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query(&format!("{SELECT_ACCOUNT} WHERE email = $1"))
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        row.map(row_to_account).transpose()
    }

    #[tracing::instrument(name = "Finding account by id in PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query(&format!("{SELECT_ACCOUNT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        row.map(row_to_account).transpose()
    }

    #[tracing::instrument(name = "Finding account by activation code in PostgreSQL", skip_all)]
    async fn find_by_activation_code(
        &self,
        code: &ActivationCode,
    ) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query(&format!("{SELECT_ACCOUNT} WHERE activation_code = $1"))
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        row.map(row_to_account).transpose()
    }

    #[tracing::instrument(name = "Inserting account into PostgreSQL", skip_all)]
    async fn insert(&self, account: Account) -> Result<(), AccountStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO accounts
                    (id, email, name, role, password_hashes, channels, verified, logged, activation_code)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(account.id())
        .bind(account.email().as_ref().expose_secret())
        .bind(account.name())
        .bind(account.role().as_str())
        .bind(exposed_hashes(&account))
        .bind(channel_tags(&account))
        .bind(account.is_verified())
        .bind(account.is_logged())
        .bind(account.activation_code().map(|code| code.as_str().to_owned()));

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return AccountStoreError::DuplicateEmail;
                }
            }
            AccountStoreError::Unexpected(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Updating account in PostgreSQL", skip_all)]
    async fn update(&self, account: Account) -> Result<(), AccountStoreError> {
        let query = sqlx::query(
            r#"
                UPDATE accounts
                SET name = $2,
                    role = $3,
                    password_hashes = $4,
                    channels = $5,
                    verified = $6,
                    logged = $7,
                    activation_code = $8
                WHERE id = $1
            "#,
        )
        .bind(account.id())
        .bind(account.name())
        .bind(account.role().as_str())
        .bind(exposed_hashes(&account))
        .bind(channel_tags(&account))
        .bind(account.is_verified())
        .bind(account.is_logged())
        .bind(account.activation_code().map(|code| code.as_str().to_owned()));

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }
}

fn exposed_hashes(account: &Account) -> Vec<String> {
    account
        .password_hashes()
        .iter()
        .map(|hash| hash.as_ref().expose_secret().clone())
        .collect()
}

fn channel_tags(account: &Account) -> Vec<String> {
    account
        .channels()
        .iter()
        .map(|channel| channel.as_str().to_owned())
        .collect()
}

fn row_to_account(row: PgRow) -> Result<Account, AccountStoreError> {
    let id: Uuid = get(&row, "id")?;
    let email: String = get(&row, "email")?;
    let name: String = get(&row, "name")?;
    let role: String = get(&row, "role")?;
    let password_hashes: Vec<String> = get(&row, "password_hashes")?;
    let channels: Vec<String> = get(&row, "channels")?;
    let verified: bool = get(&row, "verified")?;
    let logged: bool = get(&row, "logged")?;
    let activation_code: Option<String> = get(&row, "activation_code")?;

    let email = Email::try_from(Secret::from(email))
        .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
    let role = Role::parse(&role).map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
    let password_hashes = password_hashes
        .into_iter()
        .map(StoredPasswordHash::from)
        .collect();
    let channels = channels
        .iter()
        .map(|raw| Channel::parse(raw))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
    let activation_code = activation_code
        .as_deref()
        .map(ActivationCode::parse)
        .transpose()
        .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

    Account::from_parts(
        id,
        email,
        name,
        role,
        password_hashes,
        channels,
        verified,
        logged,
        activation_code,
    )
    .map_err(|e| AccountStoreError::Unexpected(e.to_string()))
}

fn get<'r, T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>>(
    row: &'r PgRow,
    column: &str,
) -> Result<T, AccountStoreError> {
    row.try_get(column)
        .map_err(|e| AccountStoreError::Unexpected(e.to_string()))
}
