// src/models/stats.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why a duplicate group was merged. When several keys contributed, the
/// group carries the highest-priority one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchReason {
    EmailMatch,
    PhoneMatch,
    NameAndCompanyMatch,
    CompanyNameMatch,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchReason::EmailMatch => "EMAIL_MATCH",
            MatchReason::PhoneMatch => "PHONE_MATCH",
            MatchReason::NameAndCompanyMatch => "NAME_AND_COMPANY_MATCH",
            MatchReason::CompanyNameMatch => "COMPANY_NAME_MATCH",
        }
    }

    /// Merge-reason precedence: email beats phone beats fuzzy name/company.
    pub fn priority(&self) -> u8 {
        match self {
            MatchReason::EmailMatch => 3,
            MatchReason::PhoneMatch => 2,
            MatchReason::NameAndCompanyMatch | MatchReason::CompanyNameMatch => 1,
        }
    }
}

/// Rows considered the same underlying entity. Disjoint; singletons are
/// never materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Sorted row indices, length >= 2.
    pub rows: Vec<usize>,
    pub reason: MatchReason,
}

impl DuplicateGroup {
    pub fn size(&self) -> usize {
        self.rows.len()
    }
}

/// Aggregate quality metrics for one run. Recomputed fresh each run, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub records: usize,
    pub total_columns: usize,
    pub all_columns: Vec<String>,
    pub missing_fields: usize,
    pub invalid_fields: usize,
    pub duplicate_rows: usize,
    pub standardized_fields: usize,
    pub offline_fixes: usize,
    pub online_fixes: usize,
    pub manual_review: usize,
    /// Empty-cell count per column, across every column in the table.
    pub missing_per_column: BTreeMap<String, usize>,
    /// Defect-density score in [0, 100]: the share of cells not implicated
    /// by a missing field, invalid field, or duplicate row. A deliberately
    /// simple metric, not a calibrated statistical one.
    pub overall_quality_score: f64,
}
