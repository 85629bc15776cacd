//! Guard for routes that are only meant to be called from page scripts.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// Header sent by script-initiated requests.
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// Value of [`REQUESTED_WITH_HEADER`] that marks an XHR call.
pub const XHR_VALUE: &str = "XMLHttpRequest";

/// Marker extractor: succeeds only for requests carrying
/// `X-Requested-With: XMLHttpRequest`, and rejects everything else with
/// `405 Method Not Allowed`.
///
/// ```ignore
/// async fn run_import(_xhr: XhrRequest, State(state): State<AppState>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct XhrRequest;

impl<S> FromRequestParts<S> for XhrRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_xhr = parts
            .headers
            .get(REQUESTED_WITH_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == XHR_VALUE);

        if is_xhr {
            Ok(XhrRequest)
        } else {
            Err(AppError::XhrRequired)
        }
    }
}
