use apprep_core::types::RawRecord;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PrintView {
    /// Manual entries in canonical raw form.
    pub entries: Vec<RawRecord>,
    pub extra_data: Value,
}

/// GET /print
pub async fn print_view(State(state): State<AppState>) -> Json<DataResponse<PrintView>> {
    let list = state.print.entry_list().await;

    Json(DataResponse {
        data: PrintView {
            entries: state.entries.mapper().to_records(&list),
            extra_data: state.print.extra_data().clone(),
        },
    })
}
