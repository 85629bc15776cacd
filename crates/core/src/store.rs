//! Persistence boundary for entries.
//!
//! Services and pipelines only talk to [`EntryStore`]. The PostgreSQL
//! implementation lives in the db crate; [`MemoryEntryStore`] keeps entries
//! in process and applies the same ordering rules.

use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::entry::EntryRecord;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Insert `entry` (its id is ignored) and return the assigned id.
    async fn insert_one(&self, entry: &EntryRecord) -> Result<DbId, CoreError>;

    /// Every entry, oldest first.
    async fn get_all(&self) -> Result<Vec<EntryRecord>, CoreError>;

    /// Entries whose both ends lie inside `[from, to]`, ordered by the
    /// calendar day of `datetime_from`, then by issue descending.
    async fn get_all_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<EntryRecord>, CoreError>;

    /// Entries spanning a window (`datetime_from != datetime_to`).
    async fn get_all_manual(&self) -> Result<Vec<EntryRecord>, CoreError>;

    async fn get_one_by_id(&self, id: DbId) -> Result<Option<EntryRecord>, CoreError>;

    /// Replace from/to/content/issue of the entry with `entry.id`.
    ///
    /// Returns `false` when no such entry exists.
    async fn update_one(&self, entry: &EntryRecord) -> Result<bool, CoreError>;

    /// Returns `true` if an entry was deleted.
    async fn delete_one_by_id(&self, id: DbId) -> Result<bool, CoreError>;
}

/// Ordering of [`EntryStore::get_all_between`]: day of `datetime_from`
/// ascending, issue descending with missing issues last, id ascending.
pub fn between_order(a: &EntryRecord, b: &EntryRecord) -> Ordering {
    let issue_desc = match (&a.issue, &b.issue) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => y.cmp(x),
    };
    a.datetime_from
        .date()
        .cmp(&b.datetime_from.date())
        .then(issue_desc)
        .then(a.id.cmp(&b.id))
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryState {
    next_id: DbId,
    entries: Vec<EntryRecord>,
}

/// Process-local [`EntryStore`].
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    state: Mutex<MemoryState>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`, assigning fresh ids.
    pub fn with_entries(entries: impl IntoIterator<Item = EntryRecord>) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            for entry in entries {
                state.push(entry);
            }
        }
        store
    }

    /// Snapshot of all entries in insertion order.
    pub fn snapshot(&self) -> Vec<EntryRecord> {
        self.lock().entries.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // Every mutation is a single step, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MemoryState {
    fn push(&mut self, entry: EntryRecord) -> DbId {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(EntryRecord { id, ..entry });
        id
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn insert_one(&self, entry: &EntryRecord) -> Result<DbId, CoreError> {
        Ok(self.lock().push(entry.clone()))
    }

    async fn get_all(&self) -> Result<Vec<EntryRecord>, CoreError> {
        let mut list = self.snapshot();
        list.sort_by(|a, b| a.datetime_from.cmp(&b.datetime_from).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn get_all_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<EntryRecord>, CoreError> {
        let mut list: Vec<EntryRecord> = self
            .snapshot()
            .into_iter()
            .filter(|entry| entry.lies_within(from, to))
            .collect();
        list.sort_by(between_order);
        Ok(list)
    }

    async fn get_all_manual(&self) -> Result<Vec<EntryRecord>, CoreError> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .filter(EntryRecord::is_manual)
            .collect())
    }

    async fn get_one_by_id(&self, id: DbId) -> Result<Option<EntryRecord>, CoreError> {
        Ok(self.lock().entries.iter().find(|e| e.id == id).cloned())
    }

    async fn update_one(&self, entry: &EntryRecord) -> Result<bool, CoreError> {
        let mut state = self.lock();
        match state.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                *existing = entry.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one_by_id(&self, id: DbId) -> Result<bool, CoreError> {
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|e| e.id != id);
        Ok(state.entries.len() < before)
    }
}
