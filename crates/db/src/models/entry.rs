//! Row model for the `entry` table.

use apprep_core::entry::EntryRecord;
use apprep_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `entry` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EntryRow {
    pub id: DbId,
    pub datetime_from: Timestamp,
    pub datetime_to: Timestamp,
    pub content: Option<String>,
    pub issue: Option<String>,
}

impl From<EntryRow> for EntryRecord {
    fn from(row: EntryRow) -> Self {
        EntryRecord {
            id: row.id,
            datetime_from: row.datetime_from,
            datetime_to: row.datetime_to,
            content: row.content,
            issue: row.issue,
        }
    }
}
