//! Landing view: what the import and provisioning buttons will do.

use std::collections::BTreeMap;

use apprep_core::field_map::EntryField;
use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct IndexView {
    pub import: ImportView,
    pub provision: ProvisionView,
}

#[derive(Debug, Serialize)]
pub struct ImportView {
    pub path: String,
    /// Seconds; `0` means unlimited.
    pub time_limit: u64,
    /// Field name -> column letter.
    pub fields: BTreeMap<&'static str, String>,
}

#[derive(Debug, Serialize)]
pub struct ProvisionView {
    pub datetime_from: Option<NaiveDate>,
    pub datetime_to: Option<NaiveDate>,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Json<IndexView> {
    let import = &state.config.import;
    let fields = EntryField::ALL
        .into_iter()
        .filter_map(|field| {
            import
                .fields
                .key(field)
                .map(|column| (field.key(), column.to_string()))
        })
        .collect();

    Json(IndexView {
        import: ImportView {
            path: import.path.display().to_string(),
            time_limit: import.time_limit_secs,
            fields,
        },
        provision: ProvisionView {
            datetime_from: state.config.provision.from,
            datetime_to: state.config.provision.to,
        },
    })
}
