pub mod batch;
pub mod entry;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the page route tree (everything that runs under the request timeout).
///
/// Route hierarchy:
///
/// ```text
/// /                                   index view
/// /entry                              list
///     /create                         create form / create
///     /view/{id}                      view
///     /edit/{id}                      edit form / save or re-import
///     /delete/{id}                    delete form / delete
/// /print                              manual entries + extra data
/// ```
///
/// `/health` and the batch routes are mounted separately by
/// [`crate::router::build_app_router`].
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index::index))
        .nest("/entry", entry::router())
        .route("/print", get(handlers::print::print_view))
}
