//! Availability records produced by an import.
//!
//! Events are built once by the parsers and never mutated afterwards.
//! Persisting them is the caller's job.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// What a day means for the person the calendar belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
    School,
    Vacation,
    Company,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Unavailable => "unavailable",
            AvailabilityStatus::School => "school",
            AvailabilityStatus::Vacation => "vacation",
            AvailabilityStatus::Company => "company",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One imported day range with its classified status.
///
/// `start_date` is always midnight and `end_date` always 23:59:59.999,
/// with `end_date >= start_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub subject_id: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: AvailabilityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub is_imported: bool,
}

/// Outcome of one import, whatever the source format.
///
/// `success` implies at least one event; errors imply failure. Warnings can
/// be present either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub success: bool,
    pub events: Vec<CalendarEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ParseResult {
    /// Build a successful result. An empty event list is downgraded to a
    /// zero-yield failure so the invariant holds.
    pub fn success(events: Vec<CalendarEvent>, warnings: Vec<String>) -> Self {
        if events.is_empty() {
            return Self::failure(&ImportError::NoValidEvents, warnings);
        }
        ParseResult {
            success: true,
            events,
            errors: Vec::new(),
            warnings,
        }
    }

    pub fn failure(error: &ImportError, warnings: Vec<String>) -> Self {
        ParseResult {
            success: false,
            events: Vec::new(),
            errors: vec![error.to_string()],
            warnings,
        }
    }

    /// Number of events per status, in status order.
    pub fn status_counts(&self) -> BTreeMap<AvailabilityStatus, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.events {
            *counts.entry(event.status).or_insert(0) += 1;
        }
        counts
    }
}
