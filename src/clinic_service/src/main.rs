use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use clinic_adapters::{
    Argon2Hasher, HttpEmailClient, JwtTokenIssuer, PostgresAddressStore, PostgresAuditStore,
    PostgresClinicStore, PostgresTokenStore, PostgresUserStore, Settings,
};
use clinic_axum::AppState;
use clinic_core::Email;
use clinic_service::ClinicService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let settings = Settings::load();

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(settings.database_url.expose_secret())
        .await?;

    sqlx::migrate!().run(&pg_pool).await?;

    let http_client = reqwest::Client::builder()
        .timeout(settings.email.timeout)
        .build()?;

    let email_client = Arc::new(HttpEmailClient::new(
        settings.email.base_url.clone(),
        Email::parse(settings.email.sender.clone())?,
        settings.email.auth_token.clone(),
        http_client,
    ));

    let state = AppState {
        users: Arc::new(PostgresUserStore::new(pg_pool.clone())),
        tokens: Arc::new(PostgresTokenStore::new(pg_pool.clone())),
        audit: Arc::new(PostgresAuditStore::new(pg_pool.clone())),
        clinics: Arc::new(PostgresClinicStore::new(pg_pool.clone())),
        addresses: Arc::new(PostgresAddressStore::new(pg_pool)),
        email_client,
        hasher: Arc::new(Argon2Hasher::default()),
        token_issuer: Arc::new(JwtTokenIssuer::new(
            settings.jwt_secret.clone(),
            settings.jwt_ttl_seconds,
        )),
        public_base_url: settings.public_base_url.clone(),
        verification_token_ttl: settings.verification_token_ttl,
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.app_port)).await?;

    ClinicService::new(state)
        .run(listener, &settings.allowed_origins)
        .await?;

    Ok(())
}
