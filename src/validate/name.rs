// src/validate/name.rs
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::verdicts::ValidationVerdict;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z \-']*$").unwrap());

/// Validate a person-name field. Names carry no reference data, so a bad
/// name never gets a candidate; it flows to manual review.
pub fn validate_name(value: &str) -> ValidationVerdict {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ValidationVerdict::missing("Name missing");
    }

    if NAME_RE.is_match(trimmed) {
        return ValidationVerdict::valid();
    }

    let note = if trimmed.chars().any(|c| c.is_ascii_digit()) {
        "Invalid: contains numbers"
    } else {
        "Invalid: contains special characters"
    };
    ValidationVerdict::invalid_format(None, 0.0, note)
}
