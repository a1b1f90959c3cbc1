//! Workbook (.xlsx / .xls) reading using calamine.

use std::fmt;
use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};

use crate::cell::Cell;
use crate::error::{ImportError, ImportResult};
use crate::tabular::Table;

/// Open a workbook from memory and return its first sheet holding data.
pub(crate) fn read_table(bytes: &[u8]) -> ImportResult<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::Invalid(format!("classeur illisible ({e})")))?;

    let names = workbook.sheet_names();
    first_non_empty(names.into_iter().map(|name| {
        let range = workbook.worksheet_range(&name);
        (name, range)
    }))
}

/// Sheets that fail to load are skipped. The workbook is only empty when
/// at least one sheet loaded; if none did, it is corrupt.
fn first_non_empty<E: fmt::Display>(
    sheets: impl IntoIterator<Item = (String, Result<Range<Data>, E>)>,
) -> ImportResult<Table> {
    let mut loaded_any = false;
    let mut last_error = None;

    for (name, range) in sheets {
        let range = match range {
            Ok(range) => range,
            Err(e) => {
                log::warn!("Skipping sheet '{name}': {e}");
                last_error = Some(format!("feuille « {name} » : {e}"));
                continue;
            }
        };
        loaded_any = true;

        let table = range_to_table(&range);
        if !table.is_empty() {
            log::debug!("Using sheet '{name}' ({} rows)", table.len());
            return Ok(table);
        }
    }

    match last_error {
        Some(error) if !loaded_any => Err(ImportError::Invalid(format!("aucune feuille lisible ({error})"))),
        _ => Err(ImportError::EmptyInput),
    }
}

/// Convert a calamine range, keeping its row offset so line numbers match
/// the sheet.
pub(crate) fn range_to_table(range: &Range<Data>) -> Table {
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let rows = range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();
    Table::with_offset(first_row, rows)
}
