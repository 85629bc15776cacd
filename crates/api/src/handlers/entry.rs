//! Handlers for the entry screens.
//!
//! Each screen answers GET with its form view and POST with the submitted
//! action. A successful action redirects (`303 See Other`); a failed one
//! re-renders the form view with `error: true` and status 422. Submissions
//! carry the raw entry record as the service expects it; all validation and
//! mapping happens in the core.

use apprep_core::entry::EntryRecord;
use apprep_core::error::CoreError;
use apprep_core::types::{DbId, RawRecord};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Submit button of the edit screen.
const SUBMIT_SAVE: &str = "save";
const SUBMIT_IMPORT: &str = "import";

/// JSON body of every entry form.
#[derive(Debug, Default, Deserialize)]
pub struct EntryForm {
    /// Raw entry record.
    pub entry: Option<RawRecord>,
    /// `save` (default) or `import`; edit screen only.
    pub submit: Option<String>,
    /// Must be truthy for a delete to happen.
    pub confirm: Option<Value>,
}

impl EntryForm {
    fn submit(&self) -> &str {
        self.submit.as_deref().unwrap_or(SUBMIT_SAVE)
    }

    /// Loose truthiness: `false`, `0`, `""`, `"0"` and `null` are false.
    fn confirmed(&self) -> bool {
        match &self.confirm {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty() && s != "0",
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
        }
    }
}

/// Form view: the entry being edited (if any) and whether the last
/// submission failed.
#[derive(Debug, Serialize)]
pub struct FormState {
    pub entry: Option<RawRecord>,
    pub error: bool,
}

fn form_view(status: StatusCode, entry: Option<RawRecord>, error: bool) -> Response {
    (status, Json(FormState { entry, error })).into_response()
}

fn failed_form(entry: Option<RawRecord>) -> Response {
    form_view(StatusCode::UNPROCESSABLE_ENTITY, entry, true)
}

fn view_path(id: DbId) -> String {
    format!("/entry/view/{id}")
}

/// Load entry `id` or fail with 404. Negative ids never exist.
async fn find_entry(state: &AppState, id: DbId) -> AppResult<EntryRecord> {
    let found = if id < 0 {
        None
    } else {
        state.entries.retrieve_entry(id).await
    };
    found.ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))
}

fn to_record(state: &AppState, entry: &EntryRecord) -> RawRecord {
    state.entries.mapper().to_record(entry)
}

// ---------------------------------------------------------------------------
// GET /entry
// ---------------------------------------------------------------------------

/// List every entry, oldest first.
pub async fn list_entries(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let list = state.entries.retrieve_entry_list().await;
    let data = state.entries.mapper().to_records(&list);
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// GET|POST /entry/create
// ---------------------------------------------------------------------------

pub async fn create_form() -> Response {
    form_view(StatusCode::OK, None, false)
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(form): Json<EntryForm>,
) -> AppResult<Response> {
    let Some(raw) = form.entry else {
        return Ok(failed_form(None));
    };

    match state.entries.create_entry(&raw).await {
        Some(id) => {
            tracing::info!(entry_id = id, "Entry created via form");
            Ok(Redirect::to(&view_path(id)).into_response())
        }
        None => Ok(failed_form(None)),
    }
}

// ---------------------------------------------------------------------------
// GET /entry/view/{id}
// ---------------------------------------------------------------------------

pub async fn view_entry(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = find_entry(&state, id).await?;
    Ok(Json(DataResponse {
        data: to_record(&state, &entry),
    }))
}

// ---------------------------------------------------------------------------
// GET|POST /entry/edit/{id}
// ---------------------------------------------------------------------------

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let entry = find_entry(&state, id).await?;
    Ok(form_view(StatusCode::OK, Some(to_record(&state, &entry)), false))
}

/// Save the submitted entry, or re-import its content (`submit: "import"`).
pub async fn edit_entry(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(form): Json<EntryForm>,
) -> AppResult<Response> {
    let entry = find_entry(&state, id).await?;

    let done = match &form.entry {
        Some(raw) => match form.submit() {
            SUBMIT_IMPORT => state.entries.import_entry(id, raw).await,
            SUBMIT_SAVE => state.entries.update_entry(id, raw).await,
            other => {
                tracing::warn!(entry_id = id, submit = other, "Unknown edit action");
                false
            }
        },
        None => false,
    };

    if done {
        tracing::info!(entry_id = id, submit = form.submit(), "Entry edited via form");
        return Ok(Redirect::to(&view_path(id)).into_response());
    }
    Ok(failed_form(Some(to_record(&state, &entry))))
}

// ---------------------------------------------------------------------------
// GET|POST /entry/delete/{id}
// ---------------------------------------------------------------------------

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let entry = find_entry(&state, id).await?;
    Ok(form_view(StatusCode::OK, Some(to_record(&state, &entry)), false))
}

/// Delete the entry when the form is confirmed, then go back to the list.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(form): Json<EntryForm>,
) -> AppResult<Response> {
    let entry = find_entry(&state, id).await?;

    let done = form.confirmed()
        && match &form.entry {
            Some(raw) => state.entries.delete_entry(id, raw).await,
            None => false,
        };

    if done {
        tracing::info!(entry_id = id, "Entry deleted via form");
        return Ok(Redirect::to("/entry").into_response());
    }
    Ok(failed_form(Some(to_record(&state, &entry))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(confirm: Value) -> EntryForm {
        EntryForm {
            confirm: Some(confirm),
            ..EntryForm::default()
        }
    }

    #[test]
    fn confirm_truthiness() {
        assert!(form(json!(true)).confirmed());
        assert!(form(json!(1)).confirmed());
        assert!(form(json!("1")).confirmed());
        assert!(form(json!("yes")).confirmed());

        assert!(!form(json!(false)).confirmed());
        assert!(!form(json!(0)).confirmed());
        assert!(!form(json!("")).confirmed());
        assert!(!form(json!("0")).confirmed());
        assert!(!form(Value::Null).confirmed());
        assert!(!EntryForm::default().confirmed());
    }

    #[test]
    fn submit_defaults_to_save() {
        assert_eq!(EntryForm::default().submit(), SUBMIT_SAVE);
        let import = EntryForm {
            submit: Some("import".into()),
            ..EntryForm::default()
        };
        assert_eq!(import.submit(), SUBMIT_IMPORT);
    }
}
