//! Data behind the printable report.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::entry::EntryRecord;
use crate::store::EntryStore;

pub struct PrintService {
    store: Arc<dyn EntryStore>,
    extra_data: Value,
}

impl PrintService {
    pub fn new(store: Arc<dyn EntryStore>, extra_data: Value) -> Self {
        Self { store, extra_data }
    }

    /// Manual entries, oldest first.
    pub async fn entry_list(&self) -> Vec<EntryRecord> {
        self.store.get_all_manual().await.unwrap_or_else(|err| {
            tracing::error!(error = %err, "Could not load entries for print");
            Vec::new()
        })
    }

    /// Free-form document shown alongside the entries (report header data).
    pub fn extra_data(&self) -> &Value {
        &self.extra_data
    }
}

/// Load the extra data document from `path`.
///
/// An unset path gives an empty object. So does an unreadable or invalid
/// file, with a warning.
pub fn load_extra_data(path: Option<&Path>) -> Value {
    let empty = || Value::Object(Default::default());
    let Some(path) = path else {
        return empty();
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Could not read print extra data");
            return empty();
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Print extra data is not valid JSON");
            empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryEntryStore;
    use crate::test_support::{at, day};
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn lists_only_manual_entries() {
        let store = Arc::new(MemoryEntryStore::with_entries([
            EntryRecord::new(at(2024, 1, 2, 9, 0), at(2024, 1, 2, 9, 0)),
            EntryRecord::new(day(2024, 1, 1), day(2024, 1, 5)),
        ]));
        let service = PrintService::new(store, json!({ "name": "Jane" }));

        let list = service.entry_list().await;
        assert_eq!(list.len(), 1);
        assert!(list[0].is_manual());
        assert_eq!(service.extra_data()["name"], "Jane");
    }

    #[test]
    fn loads_json_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"company": "ACME", "year": 2}}"#).unwrap();
        file.flush().unwrap();

        let data = load_extra_data(Some(file.path()));
        assert_eq!(data, json!({ "company": "ACME", "year": 2 }));
    }

    #[test]
    fn missing_or_invalid_files_give_empty_object() {
        assert_eq!(load_extra_data(None), json!({}));

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_extra_data(Some(&dir.path().join("absent.json"))), json!({}));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();
        assert_eq!(load_extra_data(Some(file.path())), json!({}));
    }
}
