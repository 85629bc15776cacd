//! Repository for the `entry` table.

use apprep_core::entry::EntryRecord;
use apprep_core::error::CoreError;
use apprep_core::store::EntryStore;
use apprep_core::types::{DbId, Timestamp};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::entry::EntryRow;

/// Column list for `entry` queries.
const COLUMNS: &str = "id, datetime_from, datetime_to, content, issue";

/// Provides CRUD and range queries for entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert an entry, ignoring its id. Returns the assigned id.
    pub async fn insert_one(pool: &PgPool, entry: &EntryRecord) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO entry (datetime_from, datetime_to, content, issue) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(entry.datetime_from)
        .bind(entry.datetime_to)
        .bind(&entry.content)
        .bind(&entry.issue)
        .fetch_one(pool)
        .await
    }

    /// All entries, oldest first.
    pub async fn get_all(pool: &PgPool) -> Result<Vec<EntryRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entry ORDER BY datetime_from, id");
        sqlx::query_as::<_, EntryRow>(&query).fetch_all(pool).await
    }

    /// Entries with both ends inside `[from, to]`.
    ///
    /// Ordered by the day of `datetime_from`, then issue descending (missing
    /// issues last), then id.
    pub async fn get_all_between(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<EntryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entry \
             WHERE datetime_from BETWEEN $1 AND $2 \
               AND datetime_to BETWEEN $1 AND $2 \
             ORDER BY datetime_from::date, issue DESC NULLS LAST, id"
        );
        sqlx::query_as::<_, EntryRow>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Entries spanning a window rather than a single moment.
    pub async fn get_all_manual(pool: &PgPool) -> Result<Vec<EntryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entry \
             WHERE datetime_from <> datetime_to \
             ORDER BY datetime_from, id"
        );
        sqlx::query_as::<_, EntryRow>(&query).fetch_all(pool).await
    }

    pub async fn get_one_by_id(pool: &PgPool, id: DbId) -> Result<Option<EntryRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entry WHERE id = $1");
        sqlx::query_as::<_, EntryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every column of the entry with `entry.id`.
    ///
    /// Returns `true` if a row matched.
    pub async fn update_one(pool: &PgPool, entry: &EntryRecord) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE entry SET \
                datetime_from = $1, datetime_to = $2, content = $3, issue = $4 \
             WHERE id = $5",
        )
        .bind(entry.datetime_from)
        .bind(entry.datetime_to)
        .bind(&entry.content)
        .bind(&entry.issue)
        .bind(entry.id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `true` if a row was removed.
    pub async fn delete_one_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entry WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// EntryStore adapter
// ---------------------------------------------------------------------------

/// [`EntryStore`] over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgEntryStore {
    pool: PgPool,
}

impl PgEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn persistence(err: sqlx::Error) -> CoreError {
    CoreError::Persistence(err.to_string())
}

fn records(rows: Vec<EntryRow>) -> Vec<EntryRecord> {
    rows.into_iter().map(EntryRecord::from).collect()
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn insert_one(&self, entry: &EntryRecord) -> Result<DbId, CoreError> {
        EntryRepo::insert_one(&self.pool, entry)
            .await
            .map_err(persistence)
    }

    async fn get_all(&self) -> Result<Vec<EntryRecord>, CoreError> {
        EntryRepo::get_all(&self.pool)
            .await
            .map(records)
            .map_err(persistence)
    }

    async fn get_all_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<EntryRecord>, CoreError> {
        EntryRepo::get_all_between(&self.pool, from, to)
            .await
            .map(records)
            .map_err(persistence)
    }

    async fn get_all_manual(&self) -> Result<Vec<EntryRecord>, CoreError> {
        EntryRepo::get_all_manual(&self.pool)
            .await
            .map(records)
            .map_err(persistence)
    }

    async fn get_one_by_id(&self, id: DbId) -> Result<Option<EntryRecord>, CoreError> {
        EntryRepo::get_one_by_id(&self.pool, id)
            .await
            .map(|row| row.map(EntryRecord::from))
            .map_err(persistence)
    }

    async fn update_one(&self, entry: &EntryRecord) -> Result<bool, CoreError> {
        EntryRepo::update_one(&self.pool, entry)
            .await
            .map_err(persistence)
    }

    async fn delete_one_by_id(&self, id: DbId) -> Result<bool, CoreError> {
        EntryRepo::delete_one_by_id(&self.pool, id)
            .await
            .map_err(persistence)
    }
}
