//! The entry record: one logged activity window.

use crate::types::{DbId, Timestamp};

/// Id carried by records that have not been persisted yet.
pub const NEW_ENTRY_ID: DbId = -1;

/// Maximum length of entry content in characters.
pub const MAX_CONTENT_LENGTH: usize = 4096;

/// Maximum length of an issue tag in characters.
pub const MAX_ISSUE_LENGTH: usize = 256;

/// A timesheet entry.
///
/// `datetime_from <= datetime_to` is expected but not enforced anywhere;
/// reversed windows are stored as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub id: DbId,
    pub datetime_from: Timestamp,
    pub datetime_to: Timestamp,
    pub content: Option<String>,
    pub issue: Option<String>,
}

impl EntryRecord {
    /// An unsaved entry with no content or issue.
    pub fn new(datetime_from: Timestamp, datetime_to: Timestamp) -> Self {
        Self {
            id: NEW_ENTRY_ID,
            datetime_from,
            datetime_to,
            content: None,
            issue: None,
        }
    }

    /// Manual entries span a window; imported ones are single moments.
    pub fn is_manual(&self) -> bool {
        self.datetime_from != self.datetime_to
    }

    /// Whether both ends of this entry lie inside `[from, to]`.
    pub fn lies_within(&self, from: Timestamp, to: Timestamp) -> bool {
        (from..=to).contains(&self.datetime_from) && (from..=to).contains(&self.datetime_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_entry_has_placeholder_id() {
        let entry = EntryRecord::new(at(2, 8), at(2, 8));
        assert_eq!(entry.id, NEW_ENTRY_ID);
        assert!(entry.content.is_none());
        assert!(entry.issue.is_none());
    }

    #[test]
    fn manual_means_distinct_ends() {
        assert!(!EntryRecord::new(at(2, 8), at(2, 8)).is_manual());
        assert!(EntryRecord::new(at(1, 0), at(5, 0)).is_manual());
    }

    #[test]
    fn lies_within_is_inclusive() {
        let entry = EntryRecord::new(at(1, 0), at(5, 0));
        assert!(entry.lies_within(at(1, 0), at(5, 0)));
        assert!(!entry.lies_within(at(1, 1), at(5, 0)));
        assert!(!entry.lies_within(at(1, 0), at(4, 23)));
    }
}
