// src/report.rs
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::models::core::Table;
use crate::models::fixes::{FixEntry, ProcessingMode};
use crate::models::stats::{DuplicateGroup, QualityReport};

/// Aggregate one run's verdicts, ledger, and duplicate partition into the
/// summary report.
pub fn build_report(
    table: &Table,
    missing_fields: usize,
    invalid_fields: usize,
    groups: &[DuplicateGroup],
    fixes: &[FixEntry],
    run_id: &str,
    generated_at: DateTime<Utc>,
) -> QualityReport {
    let records = table.record_count();
    let total_columns = table.column_count();
    let duplicate_rows: usize = groups.iter().map(DuplicateGroup::size).sum();

    let mut offline_fixes = 0;
    let mut online_fixes = 0;
    let mut manual_review = 0;
    for fix in fixes {
        match fix.processing_mode {
            ProcessingMode::Offline => offline_fixes += 1,
            ProcessingMode::Online => online_fixes += 1,
            ProcessingMode::Manual => manual_review += 1,
        }
    }

    // Empty-cell census over every column, validated or not.
    let mut missing_per_column: BTreeMap<String, usize> = table
        .columns
        .iter()
        .map(|c| (c.name.clone(), 0))
        .collect();
    for row in &table.rows {
        for (column, value) in table.columns.iter().zip(row.iter()) {
            if value.trim().is_empty() {
                *missing_per_column.entry(column.name.clone()).or_insert(0) += 1;
            }
        }
    }

    QualityReport {
        run_id: run_id.to_string(),
        generated_at,
        records,
        total_columns,
        all_columns: table.column_names(),
        missing_fields,
        invalid_fields,
        duplicate_rows,
        standardized_fields: offline_fixes,
        offline_fixes,
        online_fixes,
        manual_review,
        missing_per_column,
        overall_quality_score: quality_score(records, total_columns, missing_fields, invalid_fields, duplicate_rows),
    }
}

/// Defect-density score: the share of cells not implicated by a missing
/// field, invalid field, or duplicate row, on a 0-100 scale. Simple by
/// design; it is a triage signal, not a calibrated metric.
fn quality_score(
    records: usize,
    columns: usize,
    missing_fields: usize,
    invalid_fields: usize,
    duplicate_rows: usize,
) -> f64 {
    let total_cells = records * columns;
    if total_cells == 0 {
        return 100.0;
    }
    let defects = (missing_fields + invalid_fields + duplicate_rows) as f64;
    let score = 100.0 * (1.0 - defects / total_cells as f64);
    (score.clamp(0.0, 100.0) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::{Column, FieldKind};
    use crate::models::stats::MatchReason;

    fn table() -> Table {
        Table::new(
            vec![
                Column {
                    name: "email".into(),
                    kind: FieldKind::Email,
                },
                Column {
                    name: "country".into(),
                    kind: FieldKind::Country,
                },
            ],
            vec![
                vec!["a@b.com".into(), "France".into()],
                vec!["".into(), "Germany".into()],
            ],
        )
    }

    #[test]
    fn test_clean_table_scores_100() {
        assert_eq!(quality_score(10, 4, 0, 0, 0), 100.0);
    }

    #[test]
    fn test_empty_table_scores_100() {
        assert_eq!(quality_score(0, 0, 0, 0, 0), 100.0);
    }

    #[test]
    fn test_score_is_clamped_at_zero() {
        assert_eq!(quality_score(1, 1, 5, 5, 5), 0.0);
    }

    #[test]
    fn test_report_counts_fix_modes_and_missing_cells() {
        let fixes = vec![
            FixEntry {
                row_index: 1,
                field: "email".into(),
                original: "".into(),
                suggested: "".into(),
                confidence: 0.0,
                processing_mode: ProcessingMode::Manual,
                note: "Email missing".into(),
                verified_online: false,
            },
        ];
        let groups = vec![DuplicateGroup {
            rows: vec![0, 1],
            reason: MatchReason::EmailMatch,
        }];
        let report = build_report(&table(), 1, 0, &groups, &fixes, "run-1", Utc::now());
        assert_eq!(report.records, 2);
        assert_eq!(report.total_columns, 2);
        assert_eq!(report.manual_review, 1);
        assert_eq!(report.offline_fixes, 0);
        assert_eq!(report.duplicate_rows, 2);
        assert_eq!(report.missing_per_column["email"], 1);
        assert_eq!(report.missing_per_column["country"], 0);
        // 1 missing + 0 invalid + 2 duplicate rows over 4 cells.
        assert_eq!(report.overall_quality_score, 25.0);
    }
}
