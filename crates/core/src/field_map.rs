//! Canonical entry fields and the per-source key tables that locate them.
//!
//! A [`FieldMap`] tells a mapper which key of a raw record holds which
//! canonical field. Web forms use the canonical names; spreadsheets use
//! column letters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The named fields a raw record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    Id,
    DatetimeFrom,
    DatetimeTo,
    Content,
    /// Short label prefixed to the content on import (e.g. a project name).
    #[serde(rename = "hint")]
    ContentHint,
    Issue,
}

impl EntryField {
    /// Every field, in canonical order.
    pub const ALL: [EntryField; 6] = [
        EntryField::Id,
        EntryField::DatetimeFrom,
        EntryField::DatetimeTo,
        EntryField::Content,
        EntryField::ContentHint,
        EntryField::Issue,
    ];

    /// Canonical key used by forms and by the persisted representation.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::DatetimeFrom => "datetime_from",
            Self::DatetimeTo => "datetime_to",
            Self::Content => "content",
            Self::ContentHint => "hint",
            Self::Issue => "issue",
        }
    }
}

impl std::fmt::Display for EntryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Field map
// ---------------------------------------------------------------------------

/// Mapping from canonical field to the source key that holds it.
///
/// Fields without an entry are treated as absent from every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    keys: HashMap<EntryField, String>,
}

impl FieldMap {
    /// An empty map: every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity map over the canonical keys (the hint field is not part of it).
    pub fn canonical() -> Self {
        EntryField::ALL
            .into_iter()
            .filter(|field| *field != EntryField::ContentHint)
            .fold(Self::new(), |map, field| map.with(field, field.key()))
    }

    /// Default column layout of the timesheet export.
    ///
    /// | Field           | Column |
    /// |-----------------|--------|
    /// | `datetime_from` | `D`    |
    /// | `datetime_to`   | `D`    |
    /// | `content`       | `W`    |
    /// | `hint`          | `T`    |
    /// | `issue`         | `A`    |
    ///
    /// There is no id column; imported rows are always new entries.
    pub fn spreadsheet_default() -> Self {
        Self::new()
            .with(EntryField::DatetimeFrom, "D")
            .with(EntryField::DatetimeTo, "D")
            .with(EntryField::Content, "W")
            .with(EntryField::ContentHint, "T")
            .with(EntryField::Issue, "A")
    }

    /// Builder-style insert.
    pub fn with(mut self, field: EntryField, key: impl Into<String>) -> Self {
        self.set(field, key);
        self
    }

    pub fn set(&mut self, field: EntryField, key: impl Into<String>) {
        self.keys.insert(field, key.into());
    }

    pub fn remove(&mut self, field: EntryField) {
        self.keys.remove(&field);
    }

    /// Source key for `field`, if mapped.
    pub fn key(&self, field: EntryField) -> Option<&str> {
        self.keys.get(&field).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_map_is_identity_without_hint() {
        let map = FieldMap::canonical();
        assert_eq!(map.key(EntryField::Id), Some("id"));
        assert_eq!(map.key(EntryField::DatetimeFrom), Some("datetime_from"));
        assert_eq!(map.key(EntryField::DatetimeTo), Some("datetime_to"));
        assert_eq!(map.key(EntryField::Content), Some("content"));
        assert_eq!(map.key(EntryField::Issue), Some("issue"));
        assert_eq!(map.key(EntryField::ContentHint), None);
    }

    #[test]
    fn spreadsheet_default_has_no_id_column() {
        let map = FieldMap::spreadsheet_default();
        assert_eq!(map.key(EntryField::Id), None);
        assert_eq!(map.key(EntryField::DatetimeFrom), Some("D"));
        assert_eq!(map.key(EntryField::DatetimeTo), Some("D"));
        assert_eq!(map.key(EntryField::ContentHint), Some("T"));
    }

    #[test]
    fn set_and_remove_override_columns() {
        let mut map = FieldMap::spreadsheet_default();
        map.set(EntryField::Id, "B");
        map.remove(EntryField::ContentHint);
        assert_eq!(map.key(EntryField::Id), Some("B"));
        assert_eq!(map.key(EntryField::ContentHint), None);
    }

    #[test]
    fn field_display_uses_canonical_key() {
        assert_eq!(EntryField::DatetimeFrom.to_string(), "datetime_from");
        assert_eq!(EntryField::ContentHint.to_string(), "hint");
    }
}
