// src/models/core.rs
use serde::{Deserialize, Serialize};

use crate::models::fixes::FixEntry;
use crate::models::stats::{DuplicateGroup, QualityReport};

/// The role a column plays in validation and duplicate matching. Assigned
/// once at ingestion by the shell's column-role mapping; the engine never
/// re-derives roles from column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Email,
    Phone,
    FirstName,
    LastName,
    FullName,
    Company,
    JobTitle,
    Country,
    Industry,
    Other,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::FirstName => "first_name",
            FieldKind::LastName => "last_name",
            FieldKind::FullName => "full_name",
            FieldKind::Company => "company",
            FieldKind::JobTitle => "job_title",
            FieldKind::Country => "country",
            FieldKind::Industry => "industry",
            FieldKind::Other => "other",
        }
    }

    pub fn is_person_name(&self) -> bool {
        matches!(
            self,
            FieldKind::FirstName | FieldKind::LastName | FieldKind::FullName
        )
    }
}

/// Which entity a record represents, selecting the duplicate-detection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataMode {
    People,
    Company,
}

impl DataMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataMode::People => "people",
            DataMode::Company => "company",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: FieldKind,
}

/// An ingested table. Raw cell values are immutable once the table exists;
/// corrections are written to a separate cleaned copy so the original input
/// stays available for the audit trail. Rows are identified by their stable
/// 0-based index.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, padding or truncating each row to the column count so
    /// every (row, column) index is addressable.
    pub fn new(columns: Vec<Column>, mut rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        for row in rows.iter_mut() {
            row.resize(width, String::new());
        }
        Self { columns, rows }
    }

    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        &self.rows[row][column]
    }

    /// First column with the given role, if the table has one.
    pub fn column_of_kind(&self, kind: FieldKind) -> Option<usize> {
        self.columns.iter().position(|c| c.kind == kind)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// A (row, field) flagged during validation, surfaced alongside the ledger
/// so the shell can render issue lists without re-deriving them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordIssue {
    pub row_index: usize,
    pub field: String,
    pub issue: String,
}

/// Everything one batch run produces. Plain data for the shell to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct EngineOutput {
    pub run_id: String,
    pub cleaned_rows: Vec<Vec<String>>,
    pub report: QualityReport,
    pub fixes: Vec<FixEntry>,
    pub duplicate_groups: Vec<DuplicateGroup>,
    pub missing_records: Vec<RecordIssue>,
    pub invalid_records: Vec<RecordIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_pads_short_rows() {
        let table = Table::new(
            vec![
                Column {
                    name: "email".into(),
                    kind: FieldKind::Email,
                },
                Column {
                    name: "phone".into(),
                    kind: FieldKind::Phone,
                },
            ],
            vec![vec!["a@b.com".into()]],
        );
        assert_eq!(table.cell(0, 1), "");
        assert_eq!(table.column_of_kind(FieldKind::Phone), Some(1));
    }
}
