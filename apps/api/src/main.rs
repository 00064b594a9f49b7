mod assessment;
mod auth;
mod career;
mod config;
mod db;
mod errors;
mod jobs;
mod models;
mod routes;
mod state;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::jobs::provider::{AdzunaProvider, JobSearchProvider, StaticJobFeed};
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting CareerHack API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and apply migrations
    let db = create_pool(&config.database_url).await?;

    // Pick the job search backend: Adzuna when credentials are configured,
    // otherwise the deterministic static feed.
    let job_search: Arc<dyn JobSearchProvider> =
        match (&config.adzuna_app_id, &config.adzuna_app_key) {
            (Some(app_id), Some(app_key)) => {
                info!("Job search backend: Adzuna");
                Arc::new(AdzunaProvider::new(
                    config.adzuna_base_url.clone(),
                    app_id.clone(),
                    app_key.clone(),
                ))
            }
            _ => {
                info!("Adzuna credentials not set; job search backend: static feed");
                Arc::new(StaticJobFeed)
            }
        };

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        job_search,
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
