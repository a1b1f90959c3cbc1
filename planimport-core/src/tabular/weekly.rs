//! Weekly-grid layout: one row per week anchored on its Monday, one column
//! per weekday holding a short status code.

use chrono::{Days, NaiveDate};

use crate::cell::Cell;
use crate::classify::classify_grid_cell;
use crate::collect::{EventCollector, Location, RecordIssue};
use crate::columns::{ColumnMap, Field};
use crate::date_range::{DayRange, decode_serial, parse_grid_date};
use crate::error::{ImportError, ImportResult};
use crate::tabular::{HeaderRow, Table, is_blank_row};

/// Weekday header spellings and their offset from Monday.
const WEEKDAY_HEADERS: &[(&str, u64)] = &[
    ("lu", 0),
    ("ma", 1),
    ("me", 2),
    ("je", 3),
    ("ve", 4),
    ("sa", 5),
    ("di", 6),
    ("l", 0),
    ("j", 3),
    ("v", 4),
    ("mo", 0),
    ("tu", 1),
    ("we", 2),
    ("th", 3),
    ("fr", 4),
    ("su", 6),
];

/// A week-number or anchor cell carrying any of these marks a period
/// summary row rather than a week.
const SUMMARY_MARKERS: &[&str] = &["synthèse", "synthese", "période", "periode"];

/// A weekday column and its offset from Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WeekdayColumn {
    pub offset: u64,
    pub column: usize,
}

/// Weekday columns ordered Monday to Sunday regardless of sheet order.
/// When two headers name the same weekday, the leftmost column is kept.
pub(crate) fn weekday_columns(columns: &ColumnMap) -> Vec<WeekdayColumn> {
    let mut found: Vec<WeekdayColumn> = WEEKDAY_HEADERS
        .iter()
        .filter_map(|(name, offset)| {
            columns.get(name).map(|column| WeekdayColumn {
                offset: *offset,
                column,
            })
        })
        .collect();
    found.sort_by_key(|day| (day.offset, day.column));
    found.dedup_by_key(|day| day.offset);
    found
}

pub(crate) fn has_weekday_columns(columns: &ColumnMap) -> bool {
    !weekday_columns(columns).is_empty()
}

pub(super) fn parse_rows(
    table: &Table,
    header: &HeaderRow,
    collector: &mut EventCollector<'_>,
) -> ImportResult<()> {
    let date_column = header.columns.find(Field::WeekDate.synonyms()).ok_or_else(|| {
        ImportError::Invalid("colonne « Date » du lundi introuvable dans le planning hebdomadaire".to_string())
    })?;
    let week_column = header.columns.find(Field::WeekNumber.synonyms());
    let days = weekday_columns(&header.columns);
    log::debug!(
        "Weekly grid: anchor column {date_column}, weekday offsets {:?}",
        days.iter().map(|d| d.offset).collect::<Vec<_>>()
    );

    for (index, row) in table.rows().iter().enumerate().skip(header.data_start()) {
        if is_blank_row(row) {
            continue;
        }
        let labels = [week_column, Some(date_column)];
        if labels.into_iter().flatten().any(|column| is_summary_cell(table.cell(index, column))) {
            continue;
        }
        let location = Location::Line(table.line_number(index));

        let Some(monday) = anchor_date(table.cell(index, date_column)) else {
            collector.skip(location, RecordIssue::InvalidWeekDate);
            continue;
        };

        for day in &days {
            let Some(date) = monday.checked_add_days(Days::new(day.offset)) else {
                collector.skip(location, RecordIssue::Unexpected("date hors limites".to_string()));
                break;
            };
            let text = table.cell(index, day.column).text().trim().to_string();
            let status = classify_grid_cell(&text);
            collector.push(DayRange::single(date), status, Some(text));
        }
    }

    Ok(())
}

/// Text anchors must be strict `DD/MM/YYYY`; native and serial date cells
/// are taken as they are.
fn anchor_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(dt) => Some(dt.date()),
        Cell::Number(serial) => decode_serial(*serial),
        Cell::Text(text) => parse_grid_date(text),
        _ => None,
    }
}

fn is_summary_cell(cell: &Cell) -> bool {
    let text = cell.text().to_lowercase();
    SUMMARY_MARKERS.iter().any(|marker| text.contains(marker))
}
