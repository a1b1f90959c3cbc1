//! Tabular sources: spreadsheets, delimited text, and tables extracted by
//! external tools.
//!
//! A sheet is turned into a [`Table`] of [`Cell`]s first. Header detection
//! then decides between the weekly-grid layout and the one-row-per-event
//! layout.

mod header;
mod rows;
mod weekly;

pub use header::{HEADER_SCAN_ROWS, HeaderRow, Layout, find_header};

use crate::cell::Cell;
use crate::collect::EventCollector;
use crate::error::ImportResult;

static EMPTY_CELL: Cell = Cell::Empty;

/// Rows of cells plus the physical position of the first row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    first_row: usize,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Table { first_row: 0, rows }
    }

    /// Table whose first row sits `first_row` rows (0-based) below the top
    /// of the sheet, as with spreadsheet ranges that skip leading rows.
    pub fn with_offset(first_row: usize, rows: Vec<Vec<Cell>>) -> Self {
        Table { first_row, rows }
    }

    /// Convenience for text-only tables such as CSV.
    pub fn from_text_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|s| Cell::from(s.as_ref())).collect())
            .collect();
        Table::new(rows)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| is_blank_row(row))
    }

    /// 1-based physical line of the row at `index`.
    pub fn line_number(&self, index: usize) -> usize {
        self.first_row + index + 1
    }

    /// Cell at `(row, column)`; missing cells read as empty.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }
}

pub(crate) fn is_blank_row(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_blank)
}

/// Parse a spreadsheet-like table: scan for the header, then dispatch on
/// the detected layout.
pub(crate) fn parse_sheet(table: &Table, collector: &mut EventCollector<'_>) -> ImportResult<()> {
    let header = find_header(table)?;
    log::debug!(
        "Header found at line {} ({:?} layout, {} columns)",
        table.line_number(header.index),
        header.layout,
        header.columns.len()
    );

    match header.layout {
        Layout::WeeklyGrid => weekly::parse_rows(table, &header, collector),
        Layout::PerEvent => rows::parse_rows(table, header.index, &header.columns, collector),
    }
}

/// Parse a table whose first non-blank row is the header, without any
/// header scan. Used for delimited text.
pub(crate) fn parse_delimited(table: &Table, collector: &mut EventCollector<'_>) -> ImportResult<()> {
    let Some(header_index) = table.rows().iter().position(|row| !is_blank_row(row)) else {
        return Err(crate::error::ImportError::EmptyInput);
    };
    let columns = crate::columns::ColumnMap::from_row(&table.rows()[header_index]);
    rows::parse_rows(table, header_index, &columns, collector)
}
