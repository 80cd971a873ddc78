mod completion;
mod config;
mod dashboard;
mod errors;
mod extract;
mod metadata;
mod models;
mod prompts;
mod routes;
mod session;
mod state;
mod storage;
mod upload;

use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::metadata::create_pool;
use crate::prompts::PromptStore;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvscope API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and apply migrations
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = storage::build_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Initialize the completion client
    let completion = CompletionClient::new(
        config.completion_endpoint.clone(),
        config.completion_api_key.clone(),
    );
    info!("Completion client initialized");

    let prompts = PromptStore::new(&config.prompt_dir);
    let sessions = SessionStore::new(config.session_ttl_secs);

    // Expired sessions are dropped lazily on access; the sweep keeps
    // abandoned ones from accumulating.
    let sweeper = sessions.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(60));
        loop {
            tick.tick().await;
            sweeper.purge_expired().await;
        }
    });

    // Build app state
    let state = AppState {
        db,
        s3,
        http: reqwest::Client::new(),
        completion,
        prompts,
        sessions,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
