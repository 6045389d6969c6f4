// src/models/verdicts.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictKind {
    Valid,
    Missing,
    InvalidFormat,
    UnrecognizedReference,
}

/// Per-(row, field) validation outcome. Validators always return one of
/// these; there is no error path out of a validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub kind: VerdictKind,
    /// Proposed replacement value, when the validator found one.
    pub candidate: Option<String>,
    /// Confidence in the candidate, in [0, 1]. Zero when there is none.
    pub confidence: f64,
    pub note: String,
}

impl ValidationVerdict {
    pub fn valid() -> Self {
        Self {
            kind: VerdictKind::Valid,
            candidate: None,
            confidence: 1.0,
            note: "Valid".to_string(),
        }
    }

    /// Valid value that nevertheless has a canonical spelling to apply,
    /// e.g. a known job-title variant or a differently-cased country.
    pub fn valid_with_candidate(candidate: String, confidence: f64, note: impl Into<String>) -> Self {
        Self {
            kind: VerdictKind::Valid,
            candidate: Some(candidate),
            confidence,
            note: note.into(),
        }
    }

    pub fn missing(note: impl Into<String>) -> Self {
        Self {
            kind: VerdictKind::Missing,
            candidate: None,
            confidence: 0.0,
            note: note.into(),
        }
    }

    pub fn invalid_format(
        candidate: Option<String>,
        confidence: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            kind: VerdictKind::InvalidFormat,
            candidate,
            confidence,
            note: note.into(),
        }
    }

    pub fn unrecognized(
        candidate: Option<String>,
        confidence: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            kind: VerdictKind::UnrecognizedReference,
            candidate,
            confidence,
            note: note.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.kind == VerdictKind::Valid
    }
}
