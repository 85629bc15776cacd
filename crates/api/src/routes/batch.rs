//! Route definitions for the batch actions.

use axum::routing::get;
use axum::Router;

use crate::handlers::batch;
use crate::state::AppState;

/// Batch routes. Both require `X-Requested-With: XMLHttpRequest`.
///
/// ```text
/// GET|POST    /import         -> run_import
/// GET         /provision      -> run_provision (?from=YYYY-MM-DD&to=YYYY-MM-DD)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/import", get(batch::run_import).post(batch::run_import))
        .route("/provision", get(batch::run_provision))
}
