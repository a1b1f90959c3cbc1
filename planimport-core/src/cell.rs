//! Format-neutral cell values for tabular sources.

use std::fmt;

use calamine::Data;
use chrono::NaiveDateTime;

use crate::date_range::{DateLike, decode_serial_datetime};

/// One cell of a spreadsheet or CSV row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
    /// Spreadsheet error value such as `#REF!`; reads as empty text.
    Error,
}

impl Cell {
    /// Plain text of the cell, as a person would read it.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty | Cell::Error => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Bool(b) => b.to_string(),
            Cell::Date(dt) => dt.format("%d/%m/%Y").to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Empty | Cell::Error => true,
            _ => false,
        }
    }

    /// Input for the date decoder, or `None` for empty cells. Error and
    /// boolean cells are present but never decode.
    pub fn date_like(&self) -> Option<DateLike> {
        match self {
            Cell::Date(dt) => Some(DateLike::DateTime(*dt)),
            Cell::Number(n) => Some(DateLike::Serial(*n)),
            Cell::Text(s) if s.trim().is_empty() => None,
            Cell::Text(s) => Some(DateLike::Text(s.clone())),
            Cell::Bool(_) | Cell::Error => Some(DateLike::Text(self.text())),
            Cell::Empty => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

fn format_number(n: f64) -> String {
    // Avoid trailing ".0" for whole numbers
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => match decode_serial_datetime(dt.as_f64()) {
                Some(value) => Cell::Date(value),
                None => Cell::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(_) => Cell::Error,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_text_of_each_variant() {
        assert_eq!(Cell::Empty.text(), "");
        assert_eq!(Cell::Error.text(), "");
        assert_eq!(Cell::Text("LU".into()).text(), "LU");
        assert_eq!(Cell::Number(7.0).text(), "7");
        assert_eq!(Cell::Number(7.5).text(), "7.5");
        assert_eq!(Cell::Bool(true).text(), "true");
        let dt = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(Cell::Date(dt).text(), "13/01/2025");
    }

    #[test]
    fn test_blank_cells() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text("   ".into()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(Cell::from(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(
            Cell::from(&Data::String("Vacances".into())),
            Cell::Text("Vacances".into())
        );
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
        assert_eq!(
            Cell::from(&Data::DateTimeIso("2025-01-13".into())),
            Cell::Text("2025-01-13".into())
        );
    }

    #[test]
    fn test_date_like_of_cells() {
        assert_eq!(Cell::Number(45670.0).date_like(), Some(DateLike::Serial(45670.0)));
        assert_eq!(Cell::Text("  ".into()).date_like(), None);
        assert_eq!(Cell::Empty.date_like(), None);
        assert_eq!(Cell::Bool(false).date_like().and_then(|d| d.decode()), None);
        assert!(Cell::Bool(false).date_like().is_some());
        assert!(Cell::Error.date_like().is_some());
        assert_eq!(Cell::Error.date_like().and_then(|d| d.decode()), None);
    }
}
