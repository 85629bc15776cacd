//! Spreadsheet import.
//!
//! Rows of the first worksheet are mapped through an import [`EntryMapper`]
//! and inserted one by one. Row 1 is the header and is skipped, as are empty
//! rows. A row that fails to map or insert is logged and the run continues.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::CoreError;
use crate::field_map::FieldMap;
use crate::mapper::EntryMapper;
use crate::spreadsheet::{self, SheetRow};
use crate::store::EntryStore;

/// Sheet row number of the header.
const HEADER_ROW: usize = 1;

/// Per-run outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub failed: usize,
    pub skipped: usize,
}

pub struct ImportPipeline {
    store: Arc<dyn EntryStore>,
    mapper: EntryMapper,
}

impl ImportPipeline {
    pub fn new(store: Arc<dyn EntryStore>, fields: FieldMap) -> Self {
        Self {
            store,
            mapper: EntryMapper::import(fields),
        }
    }

    /// Import every row of the spreadsheet at `path`.
    ///
    /// Returns `false` when the file cannot be read or the run exceeds
    /// `time_limit`; rows inserted before the deadline stay inserted. A limit
    /// of `None` or zero means no limit.
    pub async fn import(&self, path: &Path, time_limit: Option<Duration>) -> bool {
        match time_limit.filter(|limit| !limit.is_zero()) {
            Some(limit) => match tokio::time::timeout(limit, self.run(path)).await {
                Ok(done) => done,
                Err(_) => {
                    tracing::error!(
                        path = %path.display(),
                        limit_secs = limit.as_secs_f64(),
                        "Import exceeded its time limit",
                    );
                    false
                }
            },
            None => self.run(path).await,
        }
    }

    async fn run(&self, path: &Path) -> bool {
        let rows = match load_rows(path).await {
            Ok(rows) => rows,
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "Could not read import source");
                return false;
            }
        };

        let summary = self.import_rows(&rows).await;
        tracing::info!(
            path = %path.display(),
            inserted = summary.inserted,
            failed = summary.failed,
            skipped = summary.skipped,
            "Import finished",
        );
        true
    }

    /// Map and insert `rows`, skipping the header and empty rows.
    pub async fn import_rows(&self, rows: &[SheetRow]) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for row in rows {
            if row.index == HEADER_ROW {
                tracing::debug!(row = ?row.cells, "Skipping header row");
                summary.skipped += 1;
                continue;
            }
            if row.is_empty() {
                summary.skipped += 1;
                continue;
            }

            let entry = match self.mapper.from_record(&row.cells) {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::error!(index = row.index, row = ?row.cells, error = %err, "Could not map row");
                    summary.failed += 1;
                    continue;
                }
            };

            match self.store.insert_one(&entry).await {
                Ok(id) => {
                    tracing::debug!(index = row.index, id, "Imported row");
                    summary.inserted += 1;
                }
                Err(err) => {
                    tracing::error!(
                        index = row.index,
                        row = ?row.cells,
                        entry = ?entry,
                        error = %err,
                        "Could not insert row",
                    );
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

/// Read the spreadsheet at `path` off the async runtime.
async fn load_rows(path: &Path) -> Result<Vec<SheetRow>, CoreError> {
    let source = path.to_path_buf();
    tokio::task::spawn_blocking(move || spreadsheet::read_rows(&source))
        .await
        .map_err(|err| CoreError::Internal(format!("import reader task failed: {err}")))?
        .map_err(|err| CoreError::SourceRead(err.to_string()))
}
