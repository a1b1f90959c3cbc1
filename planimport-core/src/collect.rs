//! Per-parse accumulation of events and record-level warnings.

use std::fmt;

use crate::date_range::DayRange;
use crate::event::{AvailabilityStatus, CalendarEvent};
use crate::ids::IdGenerator;

/// Why a single record was skipped. Never fatal to the file.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordIssue {
    MissingStartDate,
    MissingEndDate,
    InvalidDate,
    InvalidWeekDate,
    InvertedRange,
    Unexpected(String),
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIssue::MissingStartDate => f.write_str("date de début manquante"),
            RecordIssue::MissingEndDate => f.write_str("date de fin manquante"),
            RecordIssue::InvalidDate => f.write_str("date invalide"),
            RecordIssue::InvalidWeekDate => f.write_str("date de semaine invalide (attendu JJ/MM/AAAA)"),
            RecordIssue::InvertedRange => f.write_str("la date de fin précède la date de début"),
            RecordIssue::Unexpected(detail) => write!(f, "erreur inattendue ({detail})"),
        }
    }
}

/// Where a skipped record sits in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// 1-based physical line or sheet row.
    Line(usize),
    /// 1-based position among the calendar's events.
    Event(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Line(n) => write!(f, "Ligne {n}"),
            Location::Event(n) => write!(f, "Événement {n}"),
        }
    }
}

/// Builds the events of one parse and records what was skipped.
pub(crate) struct EventCollector<'a> {
    subject_id: &'a str,
    ids: &'a mut dyn IdGenerator,
    events: Vec<CalendarEvent>,
    warnings: Vec<String>,
}

impl<'a> EventCollector<'a> {
    pub(crate) fn new(subject_id: &'a str, ids: &'a mut dyn IdGenerator) -> Self {
        EventCollector {
            subject_id,
            ids,
            events: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, range: DayRange, status: AvailabilityStatus, note: Option<String>) {
        let event = CalendarEvent {
            id: self.ids.next_id(),
            subject_id: self.subject_id.to_string(),
            start_date: range.start,
            end_date: range.end,
            status,
            note: note.filter(|n| !n.trim().is_empty()),
            is_imported: true,
        };
        self.events.push(event);
    }

    pub(crate) fn skip(&mut self, location: Location, issue: RecordIssue) {
        let warning = format!("{location} : {issue}");
        log::warn!("Skipping record: {warning}");
        self.warnings.push(warning);
    }

    pub(crate) fn finish(self) -> (Vec<CalendarEvent>, Vec<String>) {
        (self.events, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use chrono::NaiveDate;

    #[test]
    fn test_push_stamps_subject_and_ids() {
        let mut ids = SequentialIds::new("t");
        let mut collector = EventCollector::new("alice", &mut ids);
        let day = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        collector.push(DayRange::single(day), AvailabilityStatus::School, Some("  ".into()));
        collector.push(DayRange::single(day), AvailabilityStatus::Company, Some("Atelier".into()));

        let (events, warnings) = collector.finish();
        assert!(warnings.is_empty());
        assert_eq!(events[0].id, "t-1");
        assert_eq!(events[1].id, "t-2");
        assert_eq!(events[0].subject_id, "alice");
        assert_eq!(events[0].note, None);
        assert_eq!(events[1].note.as_deref(), Some("Atelier"));
        assert!(events.iter().all(|e| e.is_imported));
    }

    #[test]
    fn test_skip_formats_warning() {
        let mut ids = SequentialIds::new("t");
        let mut collector = EventCollector::new("alice", &mut ids);
        collector.skip(Location::Line(5), RecordIssue::InvertedRange);
        collector.skip(Location::Event(2), RecordIssue::MissingEndDate);

        let (_, warnings) = collector.finish();
        assert_eq!(
            warnings,
            vec![
                "Ligne 5 : la date de fin précède la date de début",
                "Événement 2 : date de fin manquante",
            ]
        );
    }
}
