//! Single entry point for calendar imports.
//!
//! The file name's extension picks the parser. Whatever happens inside, the
//! caller gets a [`ParseResult`]: fatal problems become `errors`, skipped
//! records become `warnings`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::collect::EventCollector;
use crate::error::{ImportError, ImportResult};
use crate::event::ParseResult;
use crate::ids::IdGenerator;
use crate::tabular::{self, Table};
use crate::{delimited, ics, spreadsheet};

/// Extensions accepted by [`parse`], lower-case and without the dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["ics", "xlsx", "xls", "csv"];

/// Human-readable list used in error messages.
pub const SUPPORTED_EXTENSIONS_LABEL: &str = ".ics, .xlsx, .xls, .csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Ics,
    Spreadsheet,
    Csv,
}

impl FileFormat {
    /// Detect the format from a file name, ignoring case.
    pub fn from_file_name(name: &str) -> ImportResult<Self> {
        let extension = Path::new(name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "ics" => Ok(FileFormat::Ics),
            "xlsx" | "xls" => Ok(FileFormat::Spreadsheet),
            "csv" => Ok(FileFormat::Csv),
            "" => Err(ImportError::UnsupportedFormat("aucune extension".to_string())),
            other => Err(ImportError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// An uploaded file: its name (for format detection) and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl ImportFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        ImportFile {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Parse one file into events stamped with `subject_id`.
pub fn parse(file: &ImportFile, subject_id: &str, ids: &mut dyn IdGenerator) -> ParseResult {
    let format = match FileFormat::from_file_name(&file.name) {
        Ok(format) => format,
        Err(e) => {
            log::warn!("Rejected '{}': {e}", file.name);
            return ParseResult::failure(&e, Vec::new());
        }
    };
    log::debug!("Importing '{}' as {format:?}", file.name);

    let mut collector = EventCollector::new(subject_id, ids);
    let outcome = if file.content.is_empty() {
        Err(ImportError::EmptyInput)
    } else {
        panic::catch_unwind(AssertUnwindSafe(|| dispatch(format, &file.content, &mut collector)))
            .unwrap_or_else(|payload| Err(ImportError::Unexpected(panic_message(payload.as_ref()))))
    };

    finish(&file.name, outcome, collector)
}

fn dispatch(format: FileFormat, content: &[u8], collector: &mut EventCollector<'_>) -> ImportResult<()> {
    match format {
        FileFormat::Ics => ics::parse(&delimited::decode_text(content), collector),
        FileFormat::Csv => delimited::read_table(&delimited::decode_text(content))
            .and_then(|table| tabular::parse_delimited(&table, collector)),
        FileFormat::Spreadsheet => {
            spreadsheet::read_table(content).and_then(|table| tabular::parse_sheet(&table, collector))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "cause inconnue".to_string())
}

/// Parse a table that was already extracted from its document, such as
/// the tabular surrogate of a PDF. The header is located as for a
/// spreadsheet.
pub fn parse_table(table: &Table, subject_id: &str, ids: &mut dyn IdGenerator) -> ParseResult {
    let mut collector = EventCollector::new(subject_id, ids);
    let outcome = if table.is_empty() {
        Err(ImportError::EmptyInput)
    } else {
        tabular::parse_sheet(table, &mut collector)
    };
    finish("<table>", outcome, collector)
}

/// Read a file from disk, then [`parse`] it.
pub async fn parse_path(
    path: impl AsRef<Path>,
    subject_id: &str,
    ids: &mut dyn IdGenerator,
) -> ParseResult {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Reject unknown formats before touching the disk
    if let Err(e) = FileFormat::from_file_name(&name) {
        return ParseResult::failure(&e, Vec::new());
    }

    match tokio::fs::read(path).await {
        Ok(content) => parse(&ImportFile::new(name, content), subject_id, ids),
        Err(e) => {
            log::warn!("Could not read {}: {e}", path.display());
            ParseResult::failure(&ImportError::Unreadable(e), Vec::new())
        }
    }
}

fn finish(name: &str, outcome: ImportResult<()>, collector: EventCollector<'_>) -> ParseResult {
    let (events, warnings) = collector.finish();

    let outcome = outcome.and_then(|()| match (events.is_empty(), warnings.is_empty()) {
        (true, true) => Err(ImportError::NoEvents),
        (true, false) => Err(ImportError::NoValidEvents),
        _ => Ok(()),
    });

    match outcome {
        Ok(()) => {
            log::info!(
                "Imported {} events from '{name}' ({} skipped)",
                events.len(),
                warnings.len()
            );
            ParseResult::success(events, warnings)
        }
        Err(e) => {
            log::warn!("Import of '{name}' failed: {e}");
            ParseResult::failure(&e, warnings)
        }
    }
}
