//! Shared response envelope types for handlers.
//!
//! Entry data is wrapped in a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "result": bool }` answer of the batch endpoints.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: bool,
}
