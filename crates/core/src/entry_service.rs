//! Create, read, update, re-import and delete of single entries.
//!
//! Input arrives as raw form records in the modify shape (date-only layout,
//! indirect id). Every failure is logged here and surfaces to the caller only
//! as `None` or `false`.

use std::sync::Arc;

use crate::accumulate::accumulate_content;
use crate::entry::EntryRecord;
use crate::error::CoreError;
use crate::mapper::EntryMapper;
use crate::store::EntryStore;
use crate::types::{DbId, RawRecord};
use crate::validation::EntryValidator;

pub struct EntryService {
    store: Arc<dyn EntryStore>,
    mapper: EntryMapper,
    validator: EntryValidator,
}

impl EntryService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        let mapper = EntryMapper::modify();
        let validator = mapper.validator(true);
        Self {
            store,
            mapper,
            validator,
        }
    }

    pub fn mapper(&self) -> &EntryMapper {
        &self.mapper
    }

    /// Validate, map and insert `raw`. Returns the new id.
    pub async fn create_entry(&self, raw: &RawRecord) -> Option<DbId> {
        let entry = self.entry_from_raw(raw)?;
        match self.store.insert_one(&entry).await {
            Ok(id) => {
                tracing::info!(id, "Entry created");
                Some(id)
            }
            Err(err) => {
                tracing::error!(raw = ?raw, entry = ?entry, error = %err, "Could not insert entry");
                None
            }
        }
    }

    pub async fn retrieve_entry_list(&self) -> Vec<EntryRecord> {
        self.store.get_all().await.unwrap_or_else(|err| {
            tracing::error!(error = %err, "Could not load entries");
            Vec::new()
        })
    }

    pub async fn retrieve_entry_list_manual(&self) -> Vec<EntryRecord> {
        self.store.get_all_manual().await.unwrap_or_else(|err| {
            tracing::error!(error = %err, "Could not load manual entries");
            Vec::new()
        })
    }

    pub async fn retrieve_entry(&self, id: DbId) -> Option<EntryRecord> {
        self.store.get_one_by_id(id).await.unwrap_or_else(|err| {
            tracing::error!(id, error = %err, "Could not load entry");
            None
        })
    }

    /// Replace the entry `id` with `raw`. The mapped id must be `id`.
    pub async fn update_entry(&self, id: DbId, raw: &RawRecord) -> bool {
        let Some(entry) = self.owned_entry(id, raw) else {
            return false;
        };
        self.update(&entry, raw).await
    }

    /// Like [`update_entry`](Self::update_entry), but the content becomes the
    /// summary of all entries inside the submitted window and the issue is
    /// cleared.
    pub async fn import_entry(&self, id: DbId, raw: &RawRecord) -> bool {
        let Some(mut entry) = self.owned_entry(id, raw) else {
            return false;
        };

        let list = match self
            .store
            .get_all_between(entry.datetime_from, entry.datetime_to)
            .await
        {
            Ok(list) => list,
            Err(err) => {
                tracing::error!(id, entry = ?entry, error = %err, "Could not load entries to re-import");
                return false;
            }
        };

        entry.content = Some(accumulate_content(&list));
        entry.issue = None;
        self.update(&entry, raw).await
    }

    /// Delete the entry `id`. The mapped id of `raw` must be `id`.
    pub async fn delete_entry(&self, id: DbId, raw: &RawRecord) -> bool {
        if self.owned_entry(id, raw).is_none() {
            return false;
        }
        match self.store.delete_one_by_id(id).await {
            Ok(true) => {
                tracing::info!(id, "Entry deleted");
                true
            }
            Ok(false) => {
                tracing::error!(id, raw = ?raw, "No entry was deleted");
                false
            }
            Err(err) => {
                tracing::error!(id, raw = ?raw, error = %err, "Could not delete entry");
                false
            }
        }
    }

    // -- helpers --

    async fn update(&self, entry: &EntryRecord, raw: &RawRecord) -> bool {
        match self.store.update_one(entry).await {
            Ok(true) => {
                tracing::info!(id = entry.id, "Entry updated");
                true
            }
            Ok(false) => {
                tracing::error!(raw = ?raw, entry = ?entry, "No entry was updated");
                false
            }
            Err(err) => {
                tracing::error!(raw = ?raw, entry = ?entry, error = %err, "Could not update entry");
                false
            }
        }
    }

    /// Map `raw` and require its id to be `id`.
    fn owned_entry(&self, id: DbId, raw: &RawRecord) -> Option<EntryRecord> {
        let entry = self.entry_from_raw(raw)?;
        if entry.id != id {
            tracing::error!(id, mapped_id = entry.id, raw = ?raw, "Submitted entry id does not match");
            return None;
        }
        Some(entry)
    }

    fn entry_from_raw(&self, raw: &RawRecord) -> Option<EntryRecord> {
        match self.parse_entry(raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::error!(raw = ?raw, error = %err, "Could not read submitted entry");
                None
            }
        }
    }

    /// Validate `raw`, then map it.
    fn parse_entry(&self, raw: &RawRecord) -> Result<EntryRecord, CoreError> {
        self.validator
            .validate(raw)
            .map_err(|errors| CoreError::Validation(errors.to_string()))?;
        Ok(self.mapper.from_record(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::store::MemoryEntryStore;
    use crate::test_support::{at, day, FlakyStore};
    use serde_json::{json, Value};

    fn raw(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    /// Form record whose `id` names the key holding the id.
    fn form(id: DbId, from: &str, to: &str, content: &str, issue: &str) -> RawRecord {
        let mut record = raw(json!({
            "id": id.to_string(),
            "datetime_from": from,
            "datetime_to": to,
            "content": content,
            "issue": issue,
        }));
        record.insert(id.to_string(), json!(id));
        record
    }

    fn moment(ts: crate::types::Timestamp, content: &str) -> EntryRecord {
        EntryRecord {
            content: Some(content.into()),
            ..EntryRecord::new(ts, ts)
        }
    }

    fn service_with(entries: Vec<EntryRecord>) -> (Arc<MemoryEntryStore>, EntryService) {
        let store = Arc::new(MemoryEntryStore::with_entries(entries));
        let service = EntryService::new(store.clone());
        (store, service)
    }

    // -- parse --

    #[test]
    fn invalid_form_is_a_validation_error() {
        let service = EntryService::new(Arc::new(MemoryEntryStore::new()));
        let record = form(1, "2024-01-01 08:00", "2024-01-05", "", "");

        assert_matches!(
            service.parse_entry(&record),
            Err(CoreError::Validation(msg)) if msg.contains("datetime_from")
        );
    }

    #[test]
    fn valid_form_parses_to_entry() {
        let service = EntryService::new(Arc::new(MemoryEntryStore::new()));
        let record = form(4, "2024-01-01", "2024-01-05", "Week", "APP-1");

        let entry = service.parse_entry(&record).unwrap();
        assert_eq!(entry.id, 4);
        assert_eq!(entry.datetime_from, day(2024, 1, 1));
        assert_eq!(entry.issue.as_deref(), Some("APP-1"));
    }

    // -- create --

    #[tokio::test]
    async fn create_inserts_valid_form() {
        let (store, service) = service_with(vec![]);
        let id = service
            .create_entry(&raw(json!({
                "id": -1,
                "datetime_from": "2024-01-01",
                "datetime_to": "2024-01-05",
                "content": "Week one",
                "issue": null,
            })))
            .await;

        assert_eq!(id, Some(1));
        let stored = store.snapshot();
        assert_eq!(stored[0].datetime_from, day(2024, 1, 1));
        assert_eq!(stored[0].datetime_to, day(2024, 1, 5));
        assert_eq!(stored[0].issue, None);
    }

    #[tokio::test]
    async fn create_rejects_invalid_form() {
        let (store, service) = service_with(vec![]);
        let missing_id = raw(json!({
            "datetime_from": "2024-01-01",
            "datetime_to": "2024-01-05",
        }));
        let wrong_layout = raw(json!({
            "id": -1,
            "datetime_from": "2024-01-01 08:00:00",
            "datetime_to": "2024-01-05",
        }));

        assert_eq!(service.create_entry(&missing_id).await, None);
        assert_eq!(service.create_entry(&wrong_layout).await, None);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn create_reports_store_failure() {
        let store = Arc::new(FlakyStore::rejecting("boom"));
        let service = EntryService::new(store.clone());
        let record = form(-1, "2024-01-01", "2024-01-05", "boom", "");
        assert_eq!(service.create_entry(&record).await, None);
    }

    // -- retrieve --

    #[tokio::test]
    async fn retrieves_lists_and_single_entries() {
        let (_, service) = service_with(vec![
            moment(at(2024, 1, 2, 9, 0), "single"),
            EntryRecord::new(day(2024, 1, 1), day(2024, 1, 5)),
        ]);

        assert_eq!(service.retrieve_entry_list().await.len(), 2);
        let manual = service.retrieve_entry_list_manual().await;
        assert_eq!(manual.len(), 1);
        assert_eq!(manual[0].id, 2);

        assert_eq!(
            service.retrieve_entry(1).await.and_then(|e| e.content),
            Some("single".into())
        );
        assert_eq!(service.retrieve_entry(42).await, None);
    }

    // -- update --

    #[tokio::test]
    async fn update_replaces_matching_entry() {
        let (store, service) =
            service_with(vec![EntryRecord::new(day(2024, 1, 1), day(2024, 1, 5))]);
        let record = form(1, "2024-01-08", "2024-01-12", "Edited", "APP-9");

        assert!(service.update_entry(1, &record).await);
        let entry = &store.snapshot()[0];
        assert_eq!(entry.datetime_from, day(2024, 1, 8));
        assert_eq!(entry.content.as_deref(), Some("Edited"));
        assert_eq!(entry.issue.as_deref(), Some("APP-9"));
    }

    #[tokio::test]
    async fn update_requires_matching_id() {
        let (store, service) =
            service_with(vec![EntryRecord::new(day(2024, 1, 1), day(2024, 1, 5))]);
        let record = form(2, "2024-01-08", "2024-01-12", "Edited", "");

        assert!(!service.update_entry(1, &record).await);
        assert_eq!(store.snapshot()[0].content, None);
    }

    #[tokio::test]
    async fn plain_id_value_does_not_resolve() {
        let (_, service) = service_with(vec![EntryRecord::new(day(2024, 1, 1), day(2024, 1, 5))]);
        let record = raw(json!({
            "id": 1,
            "datetime_from": "2024-01-01",
            "datetime_to": "2024-01-05",
        }));
        assert!(!service.update_entry(1, &record).await);
    }

    #[tokio::test]
    async fn update_of_missing_entry_fails() {
        let (_, service) = service_with(vec![]);
        let record = form(7, "2024-01-08", "2024-01-12", "Edited", "");
        assert!(!service.update_entry(7, &record).await);
    }

    // -- import --

    #[tokio::test]
    async fn import_accumulates_window_and_clears_issue() {
        let (store, service) = service_with(vec![
            EntryRecord {
                issue: Some("WEEK".into()),
                ..EntryRecord::new(day(2024, 1, 1), day(2024, 1, 5))
            },
            moment(at(2024, 1, 2, 9, 0), "A"),
            moment(at(2024, 1, 3, 9, 0), "B"),
        ]);
        let record = form(1, "2024-01-01", "2024-01-05", "ignored", "WEEK");

        assert!(service.import_entry(1, &record).await);
        let week = service.retrieve_entry(1).await.unwrap();
        assert_eq!(week.issue, None);
        // The week entry itself lies inside its own window.
        assert_eq!(
            week.content.as_deref(),
            Some("(01-01-2024) \n(02-01-2024) A\n(03-01-2024) B")
        );
        assert_eq!(store.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn import_requires_matching_id() {
        let (_, service) = service_with(vec![EntryRecord::new(day(2024, 1, 1), day(2024, 1, 5))]);
        let record = form(3, "2024-01-01", "2024-01-05", "", "");
        assert!(!service.import_entry(1, &record).await);
    }

    // -- delete --

    #[tokio::test]
    async fn delete_removes_matching_entry() {
        let (store, service) =
            service_with(vec![EntryRecord::new(day(2024, 1, 1), day(2024, 1, 5))]);
        let record = form(1, "2024-01-01", "2024-01-05", "", "");

        assert!(service.delete_entry(1, &record).await);
        assert!(store.snapshot().is_empty());
        assert!(!service.delete_entry(1, &record).await);
    }

    #[tokio::test]
    async fn delete_requires_valid_matching_form() {
        let (store, service) =
            service_with(vec![EntryRecord::new(day(2024, 1, 1), day(2024, 1, 5))]);

        assert!(!service.delete_entry(1, &form(2, "2024-01-01", "2024-01-05", "", "")).await);
        assert!(!service.delete_entry(1, &raw(json!({ "id": "1", "1": 1 }))).await);
        assert_eq!(store.snapshot().len(), 1);
    }
}
