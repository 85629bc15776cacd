//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is involved.

use apprep_api::error::AppError;
use apprep_core::error::{CoreError, MappingError};
use apprep_core::field_map::EntryField;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Entry",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Entry with id 42 not found");
}

#[tokio::test]
async fn mapping_error_names_the_field() {
    let err = AppError::Core(CoreError::Mapping(MappingError::new(EntryField::DatetimeTo)));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MAPPING_ERROR");
    assert_eq!(json["error"], "Missing key: datetime_to");
}

#[tokio::test]
async fn xhr_required_returns_405() {
    let (status, json) = error_to_response(AppError::XhrRequired).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["code"], "XHR_REQUIRED");
}

#[tokio::test]
async fn persistence_error_is_sanitized() {
    let err = AppError::Core(CoreError::Persistence("connection refused at 10.0.0.3".into()));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("datetime_to: required".into()));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "datetime_to: required");
}

#[tokio::test]
async fn source_read_error_is_sanitized() {
    let err = AppError::Core(CoreError::SourceRead("Spreadsheet not found: /srv/import.xlsx".into()));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}
