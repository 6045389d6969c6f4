// src/validate/phone.rs
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::verdicts::ValidationVerdict;
use crate::utils::constants::PHONE_REFORMAT_CONFIDENCE;

// E.164-shaped: optional leading '+', then 7-15 digits.
static PHONE_SHAPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").unwrap());

/// Validate a phone number. A number that is sound once its separators are
/// removed is valid with a normalized candidate (digits untouched, so the
/// rewrite is high-confidence); one whose digits are wrong has no plausible
/// candidate and goes to manual review.
pub fn validate_phone(value: &str) -> ValidationVerdict {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ValidationVerdict::missing("Phone number missing");
    }

    if PHONE_SHAPE_RE.is_match(trimmed) {
        return ValidationVerdict::valid();
    }

    let stripped = strip_separators(trimmed);
    if PHONE_SHAPE_RE.is_match(&stripped) {
        return ValidationVerdict::valid_with_candidate(
            stripped,
            PHONE_REFORMAT_CONFIDENCE,
            "Standardized format (separators removed)",
        );
    }

    let digit_count = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    ValidationVerdict::invalid_format(
        None,
        0.0,
        format!("Invalid: {} digits (need 7-15)", digit_count),
    )
}

fn strip_separators(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')' | '/'))
        .collect()
}
