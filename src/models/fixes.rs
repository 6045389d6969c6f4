// src/models/fixes.rs
use serde::{Deserialize, Serialize};

/// How a correction was (or is to be) carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingMode {
    /// Applied automatically from reference data, no network involved.
    Offline,
    /// Candidate recorded, awaiting external verification before applying.
    Online,
    /// No confident candidate; a human has to look at it.
    Manual,
}

impl ProcessingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingMode::Offline => "OFFLINE",
            ProcessingMode::Online => "ONLINE",
            ProcessingMode::Manual => "MANUAL",
        }
    }
}

/// Provenance of a suggestion delivered through the adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FixSource {
    Offline,
    Online,
    Ai,
    Manual,
}

/// One ledger entry. The ledger is append-only within a run, ordered by
/// (row index, column order), and never mutates the raw input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixEntry {
    pub row_index: usize,
    pub field: String,
    pub original: String,
    pub suggested: String,
    pub confidence: f64,
    pub processing_mode: ProcessingMode,
    pub note: String,
    pub verified_online: bool,
}
