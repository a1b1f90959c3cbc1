//! Keyword classification of free-text labels into availability statuses.
//!
//! Two independent rule tables exist. Descriptive labels (ICS summaries,
//! "Type" columns) go through [`classify`]. Weekly-grid cells hold terse
//! codes and go through [`classify_grid_cell`]. Rules are evaluated top to
//! bottom and the first match wins, so table order is behavior.

use crate::event::AvailabilityStatus;

/// How a rule tests a lower-cased, trimmed label.
#[derive(Debug, Clone, Copy)]
enum Matcher {
    Exact(&'static str),
    ContainsAny(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, label: &str) -> bool {
        match self {
            Matcher::Exact(expected) => label == *expected,
            Matcher::ContainsAny(keywords) => keywords.iter().any(|k| label.contains(k)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    matcher: Matcher,
    status: AvailabilityStatus,
}

const fn contains(keywords: &'static [&'static str], status: AvailabilityStatus) -> Rule {
    Rule {
        matcher: Matcher::ContainsAny(keywords),
        status,
    }
}

const VACATION_KEYWORDS: &[&str] = &["vacances", "congé", "conge"];
const SCHOOL_KEYWORDS: &[&str] = &[
    "école",
    "ecole",
    "cours",
    "cfa",
    "université",
    "universite",
    "formation",
    "étude",
    "etude",
];
const UNAVAILABLE_KEYWORDS: &[&str] = &["absent", "indisponible"];
const AVAILABLE_KEYWORDS: &[&str] = &["disponible"];
const COMPANY_KEYWORDS: &[&str] = &["entreprise", "travail", "work"];

const TEXT_RULES: &[Rule] = &[
    contains(VACATION_KEYWORDS, AvailabilityStatus::Vacation),
    contains(SCHOOL_KEYWORDS, AvailabilityStatus::School),
    contains(UNAVAILABLE_KEYWORDS, AvailabilityStatus::Unavailable),
    contains(AVAILABLE_KEYWORDS, AvailabilityStatus::Available),
    contains(COMPANY_KEYWORDS, AvailabilityStatus::Company),
];

/// Untagged entries in student calendars are class days.
pub const TEXT_DEFAULT: AvailabilityStatus = AvailabilityStatus::School;

/// Label used when a tabular row has no type column or an empty one.
pub const DEFAULT_TYPE_LABEL: &str = "école";

const GRID_RULES: &[Rule] = &[
    Rule {
        matcher: Matcher::Exact("7"),
        status: AvailabilityStatus::School,
    },
    contains(
        &["férié", "ferie", "vacances", "exam"],
        AvailabilityStatus::Vacation,
    ),
    // "indisponible" contains "disponible" and must be tested first.
    contains(&["indisponible"], AvailabilityStatus::Unavailable),
    contains(&["disponible"], AvailabilityStatus::Available),
];

/// Blank or colored grid cells mean a day at the host company.
pub const GRID_DEFAULT: AvailabilityStatus = AvailabilityStatus::Company;

fn first_match(rules: &[Rule], label: &str) -> Option<AvailabilityStatus> {
    let normalized = label.trim().to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matcher.matches(&normalized))
        .map(|rule| rule.status)
}

/// Classify a descriptive label. Never fails: unmatched text is school.
pub fn classify(label: &str) -> AvailabilityStatus {
    first_match(TEXT_RULES, label).unwrap_or(TEXT_DEFAULT)
}

/// Classify the content of one weekly-grid day cell.
pub fn classify_grid_cell(cell: &str) -> AvailabilityStatus {
    first_match(GRID_RULES, cell).unwrap_or(GRID_DEFAULT)
}
