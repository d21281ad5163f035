pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{keys, reports};
use crate::state::AppState;

/// Build the application route tree.
///
/// The paths (and their flat, root-level layout) are the wire contract
/// consumed by the bot frontend:
///
/// ```text
/// GET  /get_keys?telegram_id=<id>   -> stored keys for one user
/// POST /add_key                     -> verify + store a key
/// POST /delete_key                  -> remove a stored key
/// POST /get_projects                -> viewer's projects
/// POST /get_runs                    -> runs of one project
/// POST /get_run_data                -> run descriptor + metric series
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/get_keys", get(keys::get_keys))
        .route("/add_key", post(keys::add_key))
        .route("/delete_key", post(keys::delete_key))
        .route("/get_projects", post(reports::get_projects))
        .route("/get_runs", post(reports::get_runs))
        .route("/get_run_data", post(reports::get_run_data))
}
