/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Entry windows are wall-clock times without a zone, as recorded by the user.
pub type Timestamp = chrono::NaiveDateTime;

/// Untyped field mapping as submitted by a form or read from a spreadsheet row.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;
