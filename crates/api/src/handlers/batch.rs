//! Handlers for the script-driven batch actions.
//!
//! Both run to completion inside the request and answer `{"result": bool}`.
//! They sit outside the request timeout; the import carries its own limit.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::xhr::XhrRequest;
use crate::response::ResultResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET|POST /import
// ---------------------------------------------------------------------------

/// Import the configured spreadsheet.
pub async fn run_import(
    _xhr: XhrRequest,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let config = &state.config.import;
    tracing::info!(path = %config.path.display(), "Import requested");

    let result = state
        .importer
        .import(&config.path, config.time_limit())
        .await;

    Ok(Json(ResultResponse { result }))
}

// ---------------------------------------------------------------------------
// GET /provision
// ---------------------------------------------------------------------------

/// Optional overrides of the configured provisioning window.
#[derive(Debug, Default, Deserialize)]
pub struct ProvisionParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Insert one summary entry per work week of the window.
pub async fn run_provision(
    _xhr: XhrRequest,
    State(state): State<AppState>,
    Query(params): Query<ProvisionParams>,
) -> AppResult<impl IntoResponse> {
    let window = &state.config.provision;
    let from = params
        .from
        .or(window.from)
        .ok_or_else(|| AppError::BadRequest("No provisioning start date given".into()))?;
    let to = params
        .to
        .or(window.to)
        .ok_or_else(|| AppError::BadRequest("No provisioning end date given".into()))?;

    tracing::info!(%from, %to, "Provisioning requested");

    let result = state
        .provisioner
        .provision(from.and_time(NaiveTime::MIN), to.and_time(NaiveTime::MIN))
        .await;

    Ok(Json(ResultResponse { result }))
}
