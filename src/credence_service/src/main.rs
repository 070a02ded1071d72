use color_eyre::eyre::Result;
use credence_adapters::{
    Argon2CredentialHasher, PostgresAccountStore, PostmarkEmailClient, Settings,
    auth::session::SessionConfig,
};
use credence_core::Email;
use credence_service::{IdentityService, get_postgres_pool};
use reqwest::Client as HttpClient;
use secrecy::Secret;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    let settings = Settings::load()?;

    let pg_pool =
        get_postgres_pool(&settings.postgres.url, settings.postgres.max_connections).await?;
    sqlx::migrate!().run(&pg_pool).await?;

    let account_store = PostgresAccountStore::new(pg_pool);

    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;
    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(Secret::from(settings.email_client.sender.clone()))?,
        settings.email_client.auth_token.clone(),
        http_client,
    );

    let hasher = Argon2CredentialHasher::new();
    let sessions = SessionConfig::new(
        settings.auth.jwt_secret.clone(),
        settings.auth.token_ttl_seconds,
    );

    let service = IdentityService::new(account_store, email_client, hasher, sessions);

    let allowed_origins = (!settings.auth.allowed_origins.is_empty())
        .then(|| settings.auth.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;
    service.run_standalone(listener, allowed_origins).await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
