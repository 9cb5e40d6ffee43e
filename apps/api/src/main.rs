mod account;
mod applications;
mod auth;
mod config;
mod customizer;
mod db;
mod errors;
mod llm_client;
mod matching;
mod models;
mod outreach;
mod pages;
mod plans;
mod profile;
mod resume;
mod routes;
mod state;
mod storage;
mod store;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::GoTrueClient;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::S3ObjectStore;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobtrack API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    if config.run_migrations {
        run_migrations(&db).await?;
    }

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!(
        "S3 client initialized (buckets: {}, {})",
        config.resume_bucket, config.documents_bucket
    );

    // Initialize auth client
    let auth = GoTrueClient::new(config.auth_url.clone(), config.auth_anon_key.clone())?;
    info!("Auth client initialized ({})", config.auth_url);

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_api_url.clone(),
        config.openai_api_key.clone(),
        config.llm_model.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    // Build app state
    let state = AppState {
        store: Arc::new(PgStore::new(db)),
        storage: Arc::new(S3ObjectStore::new(s3, config.storage_public_url.clone())),
        auth: Arc::new(auth),
        generator: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to SITE_URL once the client is served from it

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "jobtrack-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.s3_region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // Path-style addressing so bucket names are not resolved as subdomains
    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
