//! Tabular sources for the import pipeline.
//!
//! A source is read into ordered [`SheetRow`]s whose cells are keyed by
//! column letter (`A`, `B`, ..., `AA`). Sheet row numbers start at 1, so the
//! header is always row 1. Empty cells are left out of the row.
//!
//! Workbooks (`xlsx`, `xlsm`, `xls`, `ods`) are read with `calamine`; files
//! ending in `.csv` with the `csv` reader.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use serde_json::Value;

use crate::types::RawRecord;

/// Layout cells holding a date-time are rendered in.
const CELL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, thiserror::Error)]
pub enum SpreadsheetError {
    #[error("Spreadsheet not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook has no worksheet")]
    NoWorksheet,

    #[error("Could not read CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// One worksheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based sheet row number.
    pub index: usize,
    /// Non-empty cells keyed by column letter.
    pub cells: RawRecord,
}

impl SheetRow {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Supported source kinds, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Workbook,
    Csv,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Workbook,
        }
    }
}

/// Read every row of the first worksheet of `path`.
///
/// This is blocking file I/O; async callers run it on the blocking pool.
pub fn read_rows(path: &Path) -> Result<Vec<SheetRow>, SpreadsheetError> {
    if !path.is_file() {
        return Err(SpreadsheetError::NotFound(path.to_path_buf()));
    }
    match SourceKind::from_path(path) {
        SourceKind::Workbook => read_workbook(path),
        SourceKind::Csv => read_csv(path),
    }
}

fn read_workbook(path: &Path) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)??;

    // The range starts at the first used cell, not necessarily A1.
    let (first_row, first_col) = range.start().unwrap_or((0, 0));

    let rows = range
        .rows()
        .enumerate()
        .map(|(offset, cells)| {
            let cells = cells
                .iter()
                .enumerate()
                .filter_map(|(col, cell)| {
                    let text = cell_text(cell);
                    (!text.is_empty())
                        .then(|| (column_letter(first_col as usize + col), Value::String(text)))
                })
                .collect();
            SheetRow {
                index: first_row as usize + offset + 1,
                cells,
            }
        })
        .collect();
    Ok(rows)
}

fn read_csv(path: &Path) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (offset, record) in reader.records().enumerate() {
        let record = record?;
        let cells = record
            .iter()
            .enumerate()
            .filter(|(_, field)| !field.is_empty())
            .map(|(col, field)| (column_letter(col), Value::String(field.to_string())))
            .collect();
        rows.push(SheetRow {
            index: offset + 1,
            cells,
        });
    }
    Ok(rows)
}

/// Display text of a workbook cell.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|v| v.format(CELL_DATETIME_FORMAT).to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        other => other.to_string(),
    }
}

/// Spreadsheet column letter for a 0-based column index (`0 -> A`, `26 -> AA`).
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
