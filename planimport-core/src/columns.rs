//! Header discovery and resolution of logical fields to physical columns.
//!
//! Header names are human-authored, so every logical field carries an
//! ordered list of French and English spellings. Lookups are
//! case-insensitive and ignore surrounding whitespace.

use std::collections::HashMap;

use crate::cell::Cell;

/// Logical fields a tabular parser may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    StartDate,
    EndDate,
    Status,
    WeekNumber,
    WeekDate,
}

impl Field {
    /// Accepted header spellings, in priority order.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Field::StartDate => &[
                "date début",
                "date debut",
                "date_début",
                "date_debut",
                "date de début",
                "date de debut",
                "début",
                "debut",
                "start date",
                "start_date",
                "startdate",
                "start",
                "date",
            ],
            Field::EndDate => &[
                "date fin",
                "date_fin",
                "date de fin",
                "fin",
                "end date",
                "end_date",
                "enddate",
                "end",
            ],
            Field::Status => &[
                "type",
                "statut",
                "status",
                "état",
                "etat",
                "motif",
                "libellé",
                "libelle",
                "description",
                "summary",
            ],
            Field::WeekNumber => &[
                "n° semaine",
                "n°semaine",
                "no semaine",
                "n semaine",
                "num semaine",
                "numéro semaine",
                "numero semaine",
                "semaine",
                "week",
                "week number",
            ],
            Field::WeekDate => &["date", "lundi", "date lundi", "date du lundi", "monday"],
        }
    }
}

/// Normalized header name to column index, built fresh for each file.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: HashMap<String, usize>,
}

impl ColumnMap {
    /// Map every non-blank cell of a header row. When a name repeats, the
    /// leftmost column keeps it.
    pub fn from_row(row: &[Cell]) -> Self {
        let mut columns = HashMap::new();
        for (index, cell) in row.iter().enumerate() {
            let name = normalize_header(&cell.text());
            if !name.is_empty() {
                columns.entry(name).or_insert(index);
            }
        }
        ColumnMap { columns }
    }

    /// Number of distinct non-empty header names.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.columns.get(&normalize_header(name)).copied()
    }

    /// First synonym present in the map wins.
    pub fn find(&self, synonyms: &[&str]) -> Option<usize> {
        synonyms.iter().find_map(|name| self.get(name))
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.find(field.synonyms()).is_some()
    }
}

/// Fields resolved to column indices; unresolved fields are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedColumns {
    columns: HashMap<Field, usize>,
}

impl ResolvedColumns {
    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

/// Resolve each requested field against the discovered headers.
pub fn resolve(map: &ColumnMap, fields: &[Field]) -> ResolvedColumns {
    let columns = fields
        .iter()
        .filter_map(|field| map.find(field.synonyms()).map(|index| (*field, index)))
        .collect();
    ResolvedColumns { columns }
}

/// Lower-case, trim and collapse inner whitespace.
pub fn normalize_header(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
