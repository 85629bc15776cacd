//! Date-time formats accepted by the mappers, plus the calendar helpers the
//! provisioning walk is built on.
//!
//! Relative weekday moves follow "next Monday" / "last Saturday" semantics:
//! the target is always strictly after (or before) the starting day, so
//! moving to the next Monday from a Monday advances a full week.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

/// A textual date-time layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeFormat {
    /// `2024-01-02 08:30:00`; used for persistence and the direct mapper.
    Seconds,
    /// `2024-01-02 08:30`; used by spreadsheet exports.
    Minutes,
    /// `2024-01-02`; used by the edit form. Parsed values land at midnight.
    DateOnly,
}

impl DateTimeFormat {
    /// The format every serialized entry uses.
    pub const CANONICAL: DateTimeFormat = DateTimeFormat::Seconds;

    /// strftime pattern for this layout.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Seconds => "%Y-%m-%d %H:%M:%S",
            Self::Minutes => "%Y-%m-%d %H:%M",
            Self::DateOnly => "%Y-%m-%d",
        }
    }

    /// Parse `value` strictly; trailing input is rejected.
    pub fn parse(self, value: &str) -> Option<Timestamp> {
        match self {
            Self::DateOnly => NaiveDate::parse_from_str(value, self.pattern())
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN)),
            _ => NaiveDateTime::parse_from_str(value, self.pattern()).ok(),
        }
    }

    pub fn format(self, value: &Timestamp) -> String {
        value.format(self.pattern()).to_string()
    }
}

// ---------------------------------------------------------------------------
// Calendar helpers
// ---------------------------------------------------------------------------

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first `target` weekday strictly after `date`.
///
/// Returns `None` when the result would leave the representable calendar.
pub fn next_weekday(date: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let current = date.weekday().num_days_from_monday();
    let wanted = target.num_days_from_monday();
    let ahead = match (wanted + 7 - current) % 7 {
        0 => 7,
        n => n,
    };
    date.checked_add_days(Days::new(u64::from(ahead)))
}

/// The last `target` weekday strictly before `date`.
pub fn last_weekday(date: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let current = date.weekday().num_days_from_monday();
    let wanted = target.num_days_from_monday();
    let behind = match (current + 7 - wanted) % 7 {
        0 => 7,
        n => n,
    };
    date.checked_sub_days(Days::new(u64::from(behind)))
}

pub fn next_monday(date: NaiveDate) -> Option<NaiveDate> {
    next_weekday(date, Weekday::Mon)
}

pub fn next_friday(date: NaiveDate) -> Option<NaiveDate> {
    next_weekday(date, Weekday::Fri)
}

pub fn last_saturday(date: NaiveDate) -> Option<NaiveDate> {
    last_weekday(date, Weekday::Sat)
}
