//! Store wrappers used by the async unit tests.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entry::EntryRecord;
use crate::error::CoreError;
use crate::store::{EntryStore, MemoryEntryStore};
use crate::types::{DbId, Timestamp};

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> Timestamp {
    at(y, m, d, 0, 0)
}

/// [`MemoryEntryStore`] with injectable failures and latency.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryEntryStore,
    /// Inserts whose content contains this marker fail.
    pub reject_content: Option<String>,
    /// Range queries fail.
    pub fail_queries: bool,
    /// Every insert sleeps this long first.
    pub insert_delay: Option<Duration>,
}

impl FlakyStore {
    pub fn rejecting(marker: &str) -> Self {
        Self {
            reject_content: Some(marker.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl EntryStore for FlakyStore {
    async fn insert_one(&self, entry: &EntryRecord) -> Result<DbId, CoreError> {
        if let Some(delay) = self.insert_delay {
            tokio::time::sleep(delay).await;
        }
        if let (Some(marker), Some(content)) = (&self.reject_content, &entry.content) {
            if content.contains(marker.as_str()) {
                return Err(CoreError::Persistence("insert rejected".into()));
            }
        }
        self.inner.insert_one(entry).await
    }

    async fn get_all(&self) -> Result<Vec<EntryRecord>, CoreError> {
        self.inner.get_all().await
    }

    async fn get_all_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<EntryRecord>, CoreError> {
        if self.fail_queries {
            return Err(CoreError::Persistence("query failed".into()));
        }
        self.inner.get_all_between(from, to).await
    }

    async fn get_all_manual(&self) -> Result<Vec<EntryRecord>, CoreError> {
        self.inner.get_all_manual().await
    }

    async fn get_one_by_id(&self, id: DbId) -> Result<Option<EntryRecord>, CoreError> {
        self.inner.get_one_by_id(id).await
    }

    async fn update_one(&self, entry: &EntryRecord) -> Result<bool, CoreError> {
        self.inner.update_one(entry).await
    }

    async fn delete_one_by_id(&self, id: DbId) -> Result<bool, CoreError> {
        self.inner.delete_one_by_id(id).await
    }
}
