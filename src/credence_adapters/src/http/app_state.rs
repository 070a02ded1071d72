use crate::auth::session::SessionConfig;

/// Shared state behind every route: the account store, the outbound email
/// client, the password hasher, and the token signing configuration.
#[derive(Clone)]
pub struct AppState<S, E, H> {
    pub accounts: S,
    pub email_client: E,
    pub hasher: H,
    pub sessions: SessionConfig,
}

impl<S, E, H> AppState<S, E, H> {
    pub fn new(accounts: S, email_client: E, hasher: H, sessions: SessionConfig) -> Self {
        Self {
            accounts,
            email_client,
            hasher,
            sessions,
        }
    }
}
