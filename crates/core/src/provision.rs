//! Weekly report provisioning.
//!
//! For every Monday-to-Friday week inside a window, the entries of that week
//! are folded into one summary entry spanning Monday 00:00 to Friday 00:00.

use std::sync::Arc;

use chrono::NaiveTime;

use crate::accumulate::accumulate_content;
use crate::datetime::{is_weekend, last_saturday, next_friday, next_monday};
use crate::entry::{EntryRecord, NEW_ENTRY_ID};
use crate::store::EntryStore;
use crate::types::Timestamp;

/// Placeholder entries, one per work week whose Monday lies in `[from, to]`.
///
/// A weekday start is first rewound to the preceding Saturday, so the week
/// containing `from` is included. A reversed or weekend-only window yields
/// nothing. The walk stops early if the calendar cannot be advanced.
pub fn work_weeks(from: Timestamp, to: Timestamp) -> Vec<EntryRecord> {
    let end = to.date();
    let mut current = from.date();

    if !is_weekend(current) {
        match last_saturday(current) {
            Some(saturday) => current = saturday,
            None => tracing::error!(%current, "Could not rewind to the previous Saturday"),
        }
    }

    let mut weeks = Vec::new();
    while current <= end {
        let Some(monday) = next_monday(current) else {
            tracing::error!(%current, "Could not advance to the next Monday");
            break;
        };
        if monday > end {
            break;
        }
        let Some(friday) = next_friday(monday) else {
            tracing::error!(%monday, "Could not advance to the next Friday");
            break;
        };

        weeks.push(EntryRecord::new(
            monday.and_time(NaiveTime::MIN),
            friday.and_time(NaiveTime::MIN),
        ));
        current = friday;
    }
    weeks
}

pub struct Provisioner {
    store: Arc<dyn EntryStore>,
}

impl Provisioner {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Insert a summary entry for each work week of `[from, to]`.
    ///
    /// Per-week failures are logged and skipped; the run itself always
    /// reports success.
    pub async fn provision(&self, from: Timestamp, to: Timestamp) -> bool {
        let weeks = work_weeks(from, to);
        let total = weeks.len();
        let mut provisioned = 0;

        for week in weeks {
            if self.provision_week(week).await {
                provisioned += 1;
            }
        }

        tracing::info!(%from, %to, weeks = total, provisioned, "Provisioning finished");
        true
    }

    async fn provision_week(&self, mut week: EntryRecord) -> bool {
        let (from, to) = (week.datetime_from, week.datetime_to);

        let list = match self.store.get_all_between(from, to).await {
            Ok(list) => list,
            Err(err) => {
                tracing::error!(%from, %to, error = %err, "Could not load week entries");
                return false;
            }
        };

        week.content = Some(accumulate_content(&list));
        week.issue = None;
        week.id = NEW_ENTRY_ID;

        match self.store.insert_one(&week).await {
            Ok(id) => {
                tracing::debug!(id, %from, %to, entries = list.len(), "Provisioned week");
                true
            }
            Err(err) => {
                tracing::error!(%from, %to, entry = ?week, error = %err, "Could not insert week summary");
                false
            }
        }
    }
}
