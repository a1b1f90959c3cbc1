//! iCalendar (.ics) import using the icalendar crate's parser.

use chrono::NaiveDate;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::classify::classify;
use crate::collect::{EventCollector, Location, RecordIssue};
use crate::date_range::DayRange;
use crate::error::{ImportError, ImportResult};

pub(crate) fn parse(content: &str, collector: &mut EventCollector<'_>) -> ImportResult<()> {
    if content.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }
    if !content.to_ascii_uppercase().contains("BEGIN:VCALENDAR") {
        return Err(ImportError::Invalid("ce n'est pas un calendrier iCalendar".to_string()));
    }

    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded)
        .map_err(|e| ImportError::Invalid(format!("calendrier iCalendar illisible ({e})")))?;

    let mut vevents = Vec::new();
    collect_vevents(&calendar.components, &mut vevents);
    if vevents.is_empty() {
        return Err(ImportError::NoEvents);
    }
    log::debug!("Found {} VEVENT components", vevents.len());

    for (index, vevent) in vevents.into_iter().enumerate() {
        match read_event(vevent) {
            Ok((range, summary)) => {
                let status = classify(&summary);
                collector.push(range, status, Some(summary));
            }
            Err(issue) => collector.skip(Location::Event(index + 1), issue),
        }
    }

    Ok(())
}

/// Gather VEVENTs at any depth, so a document wrapped in VCALENDAR and a
/// bare component list both work.
fn collect_vevents<'c, 'a>(components: &'c [Component<'a>], out: &mut Vec<&'c Component<'a>>) {
    for component in components {
        if component.name == "VEVENT" {
            out.push(component);
        } else {
            collect_vevents(&component.components, out);
        }
    }
}

fn read_event(vevent: &Component<'_>) -> Result<(DayRange, String), RecordIssue> {
    let start = vevent.find_prop("DTSTART").ok_or(RecordIssue::MissingStartDate)?;
    let end = vevent.find_prop("DTEND").ok_or(RecordIssue::MissingEndDate)?;
    let start = DatePerhapsTime::try_from(start).map_err(|_| RecordIssue::InvalidDate)?;
    let end = DatePerhapsTime::try_from(end).map_err(|_| RecordIssue::InvalidDate)?;

    let first = to_day(&start);
    let mut last = to_day(&end);

    // All-day DTEND is exclusive
    if matches!((&start, &end), (DatePerhapsTime::Date(_), DatePerhapsTime::Date(_))) && last > first {
        last = last.pred_opt().ok_or(RecordIssue::InvalidDate)?;
    }

    let range = DayRange::spanning(first, last).ok_or(RecordIssue::InvertedRange)?;
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape_text(p.val.as_ref()))
        .unwrap_or_default();

    Ok((range, summary))
}

/// Calendar day of a DTSTART/DTEND value, in the time zone it was written in.
fn to_day(value: &DatePerhapsTime) -> NaiveDate {
    match value {
        DatePerhapsTime::Date(d) => *d,
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => dt.date_naive(),
            CalendarDateTime::Floating(naive) => naive.date(),
            CalendarDateTime::WithTimezone { date_time, .. } => date_time.date(),
        },
    }
}

/// Undo RFC 5545 TEXT escaping (`\,` `\;` `\n` `\\`).
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out.trim().to_string()
}
