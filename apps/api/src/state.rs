use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::jobs::provider::JobSearchProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable job search backend. Default: StaticJobFeed; swapped for the
    /// Adzuna client when ADZUNA_APP_ID / ADZUNA_APP_KEY are set.
    pub job_search: Arc<dyn JobSearchProvider>,
}
