//! Delimited text (.csv) reading.
//!
//! Sources are machine-generated from a simple template: the first
//! non-blank line is the header and every following line is one event.

use crate::cell::Cell;
use crate::error::{ImportError, ImportResult};
use crate::tabular::Table;

/// Decode file bytes as text, dropping a UTF-8 byte order mark.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// `;` when the header line uses more semicolons than commas, as French
/// spreadsheet exports do, else `,`.
pub(crate) fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}

/// Read CSV text into a table whose row indices match physical lines.
pub(crate) fn read_table(text: &str) -> ImportResult<Table> {
    if text.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let delimiter = sniff_delimiter(text);
    log::debug!("Parsing CSV with delimiter {:?}", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ImportError::Invalid(format!("CSV illisible ({e})")))?;

        // The reader drops blank lines; pad so row N stays line N + 1.
        if let Some(position) = record.position() {
            let line = physical_line(text, position.byte() as usize);
            while rows.len() + 1 < line {
                rows.push(Vec::new());
            }
        }

        rows.push(record.iter().map(|field| Cell::from(clean_field(field))).collect());
    }

    Ok(Table::new(rows))
}

/// 1-based line of the first record starting at or after `offset`. The
/// reader's own line counter ignores the empty lines it skips.
fn physical_line(text: &str, offset: usize) -> usize {
    let bytes = text.as_bytes();
    let mut start = offset.min(bytes.len());
    while start < bytes.len() && matches!(bytes[start], b'\n' | b'\r') {
        start += 1;
    }
    bytes[..start].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Trim whitespace and any quotes the reader left around a field.
fn clean_field(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
        .trim()
}
