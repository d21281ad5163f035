use std::sync::Arc;

use runlens_tracker::TrackerClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: runlens_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Tracking-service client (shared connection pool).
    pub tracker: Arc<TrackerClient>,
}
