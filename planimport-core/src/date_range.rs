//! Decoding of raw date values and expansion to whole-day ranges.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Day zero of the spreadsheet serial date system. Using the 30th rather
/// than the 31st keeps serials from 61 onward aligned with the 1900
/// leap-year bug that spreadsheet files carry.
const SERIAL_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1899, 12, 30) {
    Some(date) => date,
    None => panic!("invalid serial epoch"),
};

/// Serial of 9999-12-31, the last date spreadsheets can represent.
const MAX_SERIAL: f64 = 2_958_465.0;

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(time) => time,
    None => panic!("invalid end of day"),
};

/// Date-time layouts accepted for free-form date strings, most specific first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date layouts accepted for free-form date strings. Day-first wins over
/// month-first since sources are French.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d", "%Y%m%d"];

/// A date value as found in a source file, before decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum DateLike {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    /// Days since the spreadsheet epoch; the fractional part is time of day.
    Serial(f64),
    Text(String),
}

impl DateLike {
    /// Normalize to a calendar day. `None` when the value cannot be read as
    /// a date.
    pub fn decode(&self) -> Option<NaiveDate> {
        match self {
            DateLike::DateTime(dt) => Some(dt.date()),
            DateLike::Date(d) => Some(*d),
            DateLike::Serial(serial) => decode_serial(*serial),
            DateLike::Text(text) => parse_text_date(text),
        }
    }
}

/// Convert a spreadsheet serial to its calendar day.
pub fn decode_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(0.0..MAX_SERIAL + 1.0).contains(&serial) {
        return None;
    }
    SERIAL_EPOCH.checked_add_days(Days::new(serial.floor() as u64))
}

/// Convert a spreadsheet serial to a date-time, keeping the time of day.
pub fn decode_serial_datetime(serial: f64) -> Option<NaiveDateTime> {
    let day = decode_serial(serial)?;
    let millis = ((serial - serial.floor()) * 86_400_000.0).round() as i64;
    day.and_time(NaiveTime::MIN)
        .checked_add_signed(chrono::Duration::milliseconds(millis))
}

/// Lenient parsing of a human-written or machine-exported date string.
/// Years must be written with four digits: `%Y` alone would read
/// `13/01/25` as year 25.
pub fn parse_text_date(text: &str) -> Option<NaiveDate> {
    parse_any_text_date(text).filter(|date| (1000..=9999).contains(&date.year()))
}

fn parse_any_text_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local().date());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Strict `DD/MM/YYYY` parsing used for weekly-grid anchor dates.
pub fn parse_grid_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let numeric = |s: &str, lengths: std::ops::RangeInclusive<usize>| {
        lengths.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !numeric(day, 1..=2) || !numeric(month, 1..=2) || !numeric(year, 4..=4) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// A range of whole days: from midnight of the first day to the last
/// millisecond of the last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayRange {
    pub fn single(day: NaiveDate) -> Self {
        DayRange {
            start: day.and_time(NaiveTime::MIN),
            end: day.and_time(END_OF_DAY),
        }
    }

    /// Range covering `first..=last`. `None` when `last` precedes `first`.
    pub fn spanning(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        if last < first {
            return None;
        }
        Some(DayRange {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(END_OF_DAY),
        })
    }
}
