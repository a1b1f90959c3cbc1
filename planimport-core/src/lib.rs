//! Calendar export import for availability planning.
//!
//! Turns iCalendar, spreadsheet and CSV exports into a uniform list of
//! whole-day availability records for one person:
//! - `import` is the entry point (`parse`, `parse_path`, `parse_table`)
//! - `classify` maps labels and grid codes to an `AvailabilityStatus`
//! - `date_range` decodes raw date values and builds day ranges
//!
//! Malformed records never fail an import; they are skipped and reported as
//! warnings in the `ParseResult`.

pub mod cell;
pub mod classify;
mod collect;
pub mod columns;
pub mod date_range;
mod delimited;
pub mod error;
pub mod event;
mod ics;
pub mod ids;
pub mod import;
mod spreadsheet;
pub mod tabular;

pub use cell::Cell;
pub use error::{ImportError, ImportResult};
pub use event::{AvailabilityStatus, CalendarEvent, ParseResult};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use import::{FileFormat, ImportFile, parse, parse_path, parse_table};
pub use tabular::Table;
