pub mod telemetry;

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, patch, post},
};
use credence_adapters::{
    config::AllowedOrigins,
    http::{
        AppState,
        routes::{activate, edit_profile, refresh_token, register, sign_in, sign_out},
    },
};
use credence_adapters::auth::session::SessionConfig;
use credence_core::{AccountStore, CredentialHasher, EmailClient};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// The account-identity service: registration, activation, sign-in/out,
/// token refresh, and profile edits behind a single router.
pub struct IdentityService {
    router: Router,
}

impl IdentityService {
    /// Compose the router over the given store, email client, and hasher.
    /// The collaborators implement `Clone` over shared internals, so one
    /// instance of each is shared by every route.
    pub fn new<S, E, H>(accounts: S, email_client: E, hasher: H, sessions: SessionConfig) -> Self
    where
        S: AccountStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        H: CredentialHasher + Clone + 'static,
    {
        let state = AppState::new(accounts, email_client, hasher, sessions);

        let router = Router::new()
            .route("/register", post(register::<S, E, H>))
            .route("/sign-in", post(sign_in::<S, E, H>))
            .route("/sign-out", post(sign_out::<S, E, H>))
            .route("/activate/{code}", get(activate::<S, E, H>))
            .route("/token/refresh", post(refresh_token::<S, E, H>))
            .route("/profile/{id}", patch(edit_profile::<S, E, H>))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a plain router, optionally behind a CORS allow-list,
    /// so the service can be mounted inside a larger application.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serve on the given listener until the process is stopped.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Identity service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

/// Connection pool against the configured PostgreSQL instance.
pub async fn get_postgres_pool(
    url: &Secret<String>,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url.expose_secret())
        .await
}
