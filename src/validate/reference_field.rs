// src/validate/reference_field.rs
//
// Shared validator for job title, country, and industry: exact reference
// lookup, then fuzzy, then manual. The three fields differ only in which
// reference set they consult.
use crate::models::core::FieldKind;
use crate::models::verdicts::ValidationVerdict;
use crate::reference::store::{ReferenceDomain, ReferenceStore};
use crate::utils::config::EngineConfig;
use crate::utils::constants::EXACT_STANDARDIZE_CONFIDENCE;

pub fn validate_reference_field(
    kind: FieldKind,
    value: &str,
    store: &ReferenceStore,
    config: &EngineConfig,
) -> ValidationVerdict {
    let domain = match kind {
        FieldKind::JobTitle => ReferenceDomain::JobTitles,
        FieldKind::Country => ReferenceDomain::Countries,
        FieldKind::Industry => ReferenceDomain::Industries,
        _ => unreachable!("not a reference-backed field kind"),
    };
    let label = kind.as_str();

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ValidationVerdict::missing(format!("{} missing", capitalize(label)));
    }

    let set = store.set(domain);
    if set.is_empty() {
        // No reference available; nothing to judge the value against.
        return ValidationVerdict::valid();
    }

    if let Some(canonical) = set.lookup_exact(trimmed) {
        if canonical == trimmed {
            return ValidationVerdict::valid();
        }
        // Recognized variant (or casing/whitespace difference); offer the
        // canonical spelling as a standardization.
        return ValidationVerdict::valid_with_candidate(
            canonical.to_string(),
            EXACT_STANDARDIZE_CONFIDENCE,
            format!("Standardized to known {}", label),
        );
    }

    match set.lookup_fuzzy(trimmed, config.reference_min_score) {
        Some((canonical, score)) => ValidationVerdict::unrecognized(
            Some(canonical.clone()),
            score / 100.0,
            format!("Unrecognized {}, closest known '{}'", label, canonical),
        ),
        None => ValidationVerdict::unrecognized(
            None,
            0.0,
            format!("Unrecognized {}", label),
        ),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::verdicts::VerdictKind;

    fn store() -> ReferenceStore {
        ReferenceStore::from_parts(
            vec!["France".to_string(), "Germany".to_string()],
            vec!["Software".to_string(), "Logistics".to_string()],
            vec![
                ("chief executive officer".to_string(), "CEO".to_string()),
                ("cto".to_string(), "CTO".to_string()),
            ],
            vec![],
        )
    }

    #[test]
    fn test_canonical_value_is_valid() {
        let verdict = validate_reference_field(
            FieldKind::Country,
            "France",
            &store(),
            &EngineConfig::default(),
        );
        assert!(verdict.is_valid());
        assert!(verdict.candidate.is_none());
    }

    #[test]
    fn test_known_variant_standardizes_to_canonical() {
        let verdict = validate_reference_field(
            FieldKind::JobTitle,
            "Chief Executive Officer",
            &store(),
            &EngineConfig::default(),
        );
        assert!(verdict.is_valid());
        assert_eq!(verdict.candidate.as_deref(), Some("CEO"));
        assert_eq!(verdict.confidence, EXACT_STANDARDIZE_CONFIDENCE);
    }

    #[test]
    fn test_near_miss_gets_fuzzy_candidate() {
        let verdict = validate_reference_field(
            FieldKind::Country,
            "Germny",
            &store(),
            &EngineConfig::default(),
        );
        assert_eq!(verdict.kind, VerdictKind::UnrecognizedReference);
        assert_eq!(verdict.candidate.as_deref(), Some("Germany"));
        assert!(verdict.confidence >= 0.60);
    }

    #[test]
    fn test_unmatchable_value_goes_manual() {
        let verdict = validate_reference_field(
            FieldKind::Industry,
            "Underwater Basket Weaving",
            &store(),
            &EngineConfig::default(),
        );
        assert_eq!(verdict.kind, VerdictKind::UnrecognizedReference);
        assert!(verdict.candidate.is_none());
        assert_eq!(verdict.confidence, 0.0);
    }

    #[test]
    fn test_empty_reference_set_degrades_to_valid() {
        let verdict = validate_reference_field(
            FieldKind::JobTitle,
            "Anything Goes",
            &ReferenceStore::empty(),
            &EngineConfig::default(),
        );
        assert!(verdict.is_valid());
    }

    #[test]
    fn test_empty_value_is_missing() {
        let verdict = validate_reference_field(
            FieldKind::Country,
            " ",
            &store(),
            &EngineConfig::default(),
        );
        assert_eq!(verdict.kind, VerdictKind::Missing);
    }
}
