//! Header row detection within the first rows of a sheet.
//!
//! Exports often start with a merged title cell or blank lines, so the
//! header is the first row of the scan window that looks like one.

use crate::columns::{ColumnMap, Field};
use crate::error::{ImportError, ImportResult};
use crate::tabular::Table;
use crate::tabular::weekly::has_weekday_columns;

/// Rows examined when looking for the header.
pub const HEADER_SCAN_ROWS: usize = 10;

/// Weekday abbreviations that mark a weekly grid header.
const GRID_WEEKDAY_MARKERS: &[&str] = &["lu", "ma", "me", "je", "ve"];

/// A generic header needs strictly more distinct names than this.
const MIN_GENERIC_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One row per week, one column per weekday.
    WeeklyGrid,
    /// One row per event.
    PerEvent,
}

#[derive(Debug, Clone)]
pub struct HeaderRow {
    /// Index of the header row in the table; data starts on the next row.
    pub index: usize,
    pub columns: ColumnMap,
    pub layout: Layout,
}

impl HeaderRow {
    pub fn data_start(&self) -> usize {
        self.index + 1
    }
}

/// Locate the header row, checking grid signals before the generic
/// column-count rule.
pub fn find_header(table: &Table) -> ImportResult<HeaderRow> {
    for (index, row) in table.rows().iter().take(HEADER_SCAN_ROWS).enumerate() {
        let columns = ColumnMap::from_row(row);
        if columns.is_empty() {
            continue;
        }

        let week_and_date = columns.has_field(Field::WeekNumber) && columns.has_field(Field::WeekDate);
        let weekday_marker = GRID_WEEKDAY_MARKERS.iter().any(|d| columns.get(d).is_some());
        let generic = columns.len() > MIN_GENERIC_COLUMNS;

        if week_and_date || weekday_marker || generic {
            let layout = if columns.has_field(Field::WeekNumber) && has_weekday_columns(&columns) {
                Layout::WeeklyGrid
            } else {
                Layout::PerEvent
            };
            return Ok(HeaderRow {
                index,
                columns,
                layout,
            });
        }
    }

    Err(ImportError::Invalid(format!(
        "aucune ligne d'en-tête trouvée dans les {HEADER_SCAN_ROWS} premières lignes. \
         Formats attendus : un planning hebdomadaire (colonnes « N° Semaine », « Date », « LU » … « VE ») \
         ou une liste d'événements (colonnes « Date début », « Date fin », « Type », …)"
    )))
}
