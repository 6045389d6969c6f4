// src/utils/constants.rs
//
// Policy thresholds for fix resolution and duplicate detection. These are
// tunable per run through EngineConfig; the values here are the defaults.

/// Minimum confidence for a correction to be applied automatically.
pub const ACCEPT_THRESHOLD: f64 = 0.80;

/// Minimum confidence for a correction to be escalated for online verification.
pub const SUGGEST_THRESHOLD: f64 = 0.60;

/// Minimum 0-100 similarity for a fuzzy reference match to produce a candidate.
pub const MIN_REFERENCE_FUZZY_SCORE: f64 = 60.0;

/// Minimum 0-100 similarity for an email domain suggestion.
pub const MIN_DOMAIN_FUZZY_SCORE: f64 = 70.0;

/// Minimum 0-100 name similarity for people-mode duplicate merging.
pub const DUPLICATE_NAME_SIMILARITY: f64 = 90.0;

/// Minimum 0-100 company similarity for duplicate merging.
pub const DUPLICATE_COMPANY_SIMILARITY: f64 = 90.0;

/// Confidence assigned when an exact reference hit maps a value to its
/// canonical form (case, whitespace, or known-variant differences only).
pub const EXACT_STANDARDIZE_CONFIDENCE: f64 = 0.90;

/// Confidence for a phone number that is valid once separators are removed.
pub const PHONE_REFORMAT_CONFIDENCE: f64 = 0.90;

/// Confidence for an email whose shape defects could be repaired mechanically.
pub const EMAIL_SHAPE_FIX_CONFIDENCE: f64 = 0.85;

pub const PHONE_MIN_DIGITS: usize = 7;
pub const PHONE_MAX_DIGITS: usize = 15;

/// Upper bound on a single external provider call, in seconds.
pub const ADAPTER_TIMEOUT_SECONDS: u64 = 10;
