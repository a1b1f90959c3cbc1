//! Terminal rendering of import results using owo_colors.

use owo_colors::OwoColorize;
use planimport_core::{AvailabilityStatus, CalendarEvent, ParseResult};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for AvailabilityStatus {
    fn render(&self) -> String {
        let label = self.as_str();
        match self {
            AvailabilityStatus::Available => label.green().to_string(),
            AvailabilityStatus::Unavailable => label.red().to_string(),
            AvailabilityStatus::School => label.blue().to_string(),
            AvailabilityStatus::Vacation => label.yellow().to_string(),
            AvailabilityStatus::Company => label.magenta().to_string(),
        }
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let start = self.start_date.date();
        let end = self.end_date.date();
        let days = if start == end {
            start.format("%d/%m/%Y").to_string()
        } else {
            format!("{} → {}", start.format("%d/%m/%Y"), end.format("%d/%m/%Y"))
        };
        let note = self.note.as_deref().unwrap_or("");
        format!("{} {} {}", days, self.status.render(), note.dimmed())
    }
}

/// Threshold for compact view (show counts instead of individual events)
const COMPACT_THRESHOLD: usize = 20;

impl Render for ParseResult {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        if self.success {
            lines.push(format!("{} {} imported", "✓".green(), pluralize("event", self.events.len())));
        } else {
            lines.push(format!("{} import failed", "✗".red()));
        }

        for error in &self.errors {
            lines.push(format!("   {}", error.red()));
        }

        if self.events.len() <= COMPACT_THRESHOLD {
            for event in &self.events {
                lines.push(format!("   {}", event.render()));
            }
        } else {
            for (status, count) in self.status_counts() {
                lines.push(format!("   {} {}", status.render(), count));
            }
        }

        if !self.warnings.is_empty() {
            lines.push(format!("   {}", pluralize("warning", self.warnings.len()).yellow()));
            for warning in &self.warnings {
                lines.push(format!("   {} {}", "!".yellow(), warning.dimmed()));
            }
        }

        lines.join("\n")
    }
}

/// "1 event", "2 events"
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("event", 1), "1 event");
        assert_eq!(pluralize("warning", 3), "3 warnings");
    }
}
