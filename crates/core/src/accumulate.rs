//! Content accumulation: many entries folded into one summary.

use crate::entry::EntryRecord;

/// Date layout used in summary lines (`02-01-2024`).
pub const SUMMARY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Render one summary line as `(dd-mm-yyyy) content`.
///
/// Entries without content still produce a dated line.
pub fn summary_line(entry: &EntryRecord) -> String {
    format!(
        "({}) {}",
        entry.datetime_from.format(SUMMARY_DATE_FORMAT),
        entry.content.as_deref().unwrap_or_default()
    )
}

/// Join the summary lines of `entries` with newlines, keeping their order.
pub fn accumulate_content(entries: &[EntryRecord]) -> String {
    entries
        .iter()
        .map(summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(day: u32, content: Option<&str>) -> EntryRecord {
        let at = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        EntryRecord {
            content: content.map(String::from),
            ..EntryRecord::new(at, at)
        }
    }

    #[test]
    fn joins_lines_in_given_order() {
        let list = vec![entry(2, Some("A")), entry(3, Some("B"))];
        assert_eq!(accumulate_content(&list), "(02-01-2024) A\n(03-01-2024) B");
    }

    #[test]
    fn empty_list_gives_empty_summary() {
        assert_eq!(accumulate_content(&[]), "");
    }

    #[test]
    fn missing_content_keeps_date_prefix() {
        assert_eq!(summary_line(&entry(4, None)), "(04-01-2024) ");
    }

    #[test]
    fn preserves_multiline_content() {
        let list = vec![entry(2, Some("one\ntwo"))];
        assert_eq!(accumulate_content(&list), "(02-01-2024) one\ntwo");
    }
}
