//! Route definitions for the entry screens.
//!
//! Mounted at `/entry` by `page_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::entry;
use crate::state::AppState;

/// Entry routes.
///
/// ```text
/// GET         /               -> list_entries
/// GET|POST    /create         -> create_form | create_entry
/// GET         /view/{id}      -> view_entry
/// GET|POST    /edit/{id}      -> edit_form | edit_entry
/// GET|POST    /delete/{id}    -> delete_form | delete_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entry::list_entries))
        .route("/create", get(entry::create_form).post(entry::create_entry))
        .route("/view/{id}", get(entry::view_entry))
        .route("/edit/{id}", get(entry::edit_form).post(entry::edit_entry))
        .route(
            "/delete/{id}",
            get(entry::delete_form).post(entry::delete_entry),
        )
}
