//! One-row-per-event layout.

use crate::cell::Cell;
use crate::classify::{DEFAULT_TYPE_LABEL, classify};
use crate::collect::{EventCollector, Location, RecordIssue};
use crate::columns::{ColumnMap, Field, ResolvedColumns, resolve};
use crate::date_range::DayRange;
use crate::error::{ImportError, ImportResult};
use crate::event::AvailabilityStatus;
use crate::tabular::{Table, is_blank_row};

/// What one data row turns into.
struct RowEvent {
    range: DayRange,
    status: AvailabilityStatus,
    note: Option<String>,
}

pub(super) fn parse_rows(
    table: &Table,
    header_index: usize,
    columns: &ColumnMap,
    collector: &mut EventCollector<'_>,
) -> ImportResult<()> {
    let resolved = resolve(columns, &[Field::StartDate, Field::EndDate, Field::Status]);
    if resolved.get(Field::StartDate).is_none() {
        return Err(ImportError::Invalid(
            "colonne de date de début introuvable (attendu : « Date début », « Début », « Date » ou « Start »)"
                .to_string(),
        ));
    }

    for (index, row) in table.rows().iter().enumerate().skip(header_index + 1) {
        if is_blank_row(row) {
            continue;
        }
        let location = Location::Line(table.line_number(index));
        match read_row(table, index, &resolved) {
            Ok(event) => collector.push(event.range, event.status, event.note),
            Err(issue) => collector.skip(location, issue),
        }
    }

    Ok(())
}

fn read_row(table: &Table, index: usize, columns: &ResolvedColumns) -> Result<RowEvent, RecordIssue> {
    let column_cell = move |field: Field| columns.get(field).map(|column| table.cell(index, column));

    let start = column_cell(Field::StartDate)
        .and_then(Cell::date_like)
        .ok_or(RecordIssue::MissingStartDate)?
        .decode()
        .ok_or(RecordIssue::InvalidDate)?;

    let end = match column_cell(Field::EndDate).and_then(Cell::date_like) {
        Some(raw) => raw.decode().ok_or(RecordIssue::InvalidDate)?,
        None => start,
    };

    let range = DayRange::spanning(start, end).ok_or(RecordIssue::InvertedRange)?;

    let type_text = column_cell(Field::Status)
        .map(|cell| cell.text().trim().to_string())
        .filter(|text| !text.is_empty());
    let status = classify(type_text.as_deref().unwrap_or(DEFAULT_TYPE_LABEL));

    Ok(RowEvent {
        range,
        status,
        note: type_text,
    })
}
