// src/resolve/mod.rs
pub mod adapters;

use crate::models::core::Column;
use crate::models::fixes::{FixEntry, ProcessingMode};
use crate::models::verdicts::{ValidationVerdict, VerdictKind};
use crate::utils::config::EngineConfig;

/// Outcome of resolving one verdict: the ledger entry plus the cleaned
/// value to write, when the fix was confident enough to apply offline.
#[derive(Debug, Clone)]
pub struct ResolvedFix {
    pub entry: FixEntry,
    pub applied_value: Option<String>,
}

/// Turns validator verdicts into ledger entries under the configured
/// thresholds. Every non-valid verdict resolves to exactly one entry; a
/// valid verdict resolves only when it carries a standardization candidate.
#[derive(Debug, Clone)]
pub struct FixResolver {
    config: EngineConfig,
}

impl FixResolver {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn resolve(
        &self,
        row_index: usize,
        column: &Column,
        original: &str,
        verdict: &ValidationVerdict,
    ) -> Option<ResolvedFix> {
        match verdict.kind {
            VerdictKind::Valid => {
                // A valid value with a canonical spelling still gets
                // standardized and ledgered.
                let candidate = verdict.candidate.as_ref()?;
                Some(self.resolve_candidate(
                    row_index,
                    column,
                    original,
                    candidate.clone(),
                    verdict.confidence,
                    &verdict.note,
                ))
            }
            VerdictKind::Missing => Some(ResolvedFix {
                // Missing values have no plausible candidate; never
                // auto-filled, always a human decision.
                entry: FixEntry {
                    row_index,
                    field: column.name.clone(),
                    original: original.to_string(),
                    suggested: String::new(),
                    confidence: 0.0,
                    processing_mode: ProcessingMode::Manual,
                    note: verdict.note.clone(),
                    verified_online: false,
                },
                applied_value: None,
            }),
            VerdictKind::InvalidFormat | VerdictKind::UnrecognizedReference => {
                match &verdict.candidate {
                    Some(candidate) => Some(self.resolve_candidate(
                        row_index,
                        column,
                        original,
                        candidate.clone(),
                        verdict.confidence,
                        &verdict.note,
                    )),
                    None => Some(ResolvedFix {
                        entry: FixEntry {
                            row_index,
                            field: column.name.clone(),
                            original: original.to_string(),
                            suggested: String::new(),
                            confidence: 0.0,
                            processing_mode: ProcessingMode::Manual,
                            note: format!("{} - manual review required", verdict.note),
                            verified_online: false,
                        },
                        applied_value: None,
                    }),
                }
            }
        }
    }

    fn resolve_candidate(
        &self,
        row_index: usize,
        column: &Column,
        original: &str,
        candidate: String,
        confidence: f64,
        note: &str,
    ) -> ResolvedFix {
        let (mode, applied_value) = if confidence >= self.config.accept_threshold {
            (ProcessingMode::Offline, Some(candidate.clone()))
        } else if confidence >= self.config.suggest_threshold {
            // Eligible for external confirmation; the cleaned value stays
            // as the original until verified.
            (ProcessingMode::Online, None)
        } else {
            (ProcessingMode::Manual, None)
        };
        ResolvedFix {
            entry: FixEntry {
                row_index,
                field: column.name.clone(),
                original: original.to_string(),
                suggested: candidate,
                confidence,
                processing_mode: mode,
                note: note.to_string(),
                verified_online: false,
            },
            applied_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::FieldKind;

    fn column() -> Column {
        Column {
            name: "job_title".into(),
            kind: FieldKind::JobTitle,
        }
    }

    fn resolver() -> FixResolver {
        FixResolver::new(EngineConfig::default())
    }

    #[test]
    fn test_high_confidence_applies_offline() {
        let verdict = ValidationVerdict::unrecognized(Some("CEO".into()), 0.92, "close match");
        let resolved = resolver().resolve(3, &column(), "C.E.O.", &verdict).unwrap();
        assert_eq!(resolved.entry.processing_mode, ProcessingMode::Offline);
        assert_eq!(resolved.applied_value.as_deref(), Some("CEO"));
        assert!(resolved.entry.confidence >= 0.80);
    }

    #[test]
    fn test_mid_confidence_goes_online_without_applying() {
        let verdict = ValidationVerdict::unrecognized(Some("CTO".into()), 0.70, "weak match");
        let resolved = resolver().resolve(0, &column(), "cheif tech", &verdict).unwrap();
        assert_eq!(resolved.entry.processing_mode, ProcessingMode::Online);
        assert!(resolved.applied_value.is_none());
        assert_eq!(resolved.entry.suggested, "CTO");
    }

    #[test]
    fn test_low_confidence_goes_manual() {
        let verdict = ValidationVerdict::unrecognized(Some("COO".into()), 0.40, "distant match");
        let resolved = resolver().resolve(0, &column(), "???", &verdict).unwrap();
        assert_eq!(resolved.entry.processing_mode, ProcessingMode::Manual);
        assert!(resolved.applied_value.is_none());
    }

    #[test]
    fn test_missing_is_always_manual() {
        let verdict = ValidationVerdict::missing("Job title missing");
        let resolved = resolver().resolve(1, &column(), "", &verdict).unwrap();
        assert_eq!(resolved.entry.processing_mode, ProcessingMode::Manual);
        assert_eq!(resolved.entry.confidence, 0.0);
        assert!(resolved.applied_value.is_none());
    }

    #[test]
    fn test_candidateless_invalid_is_manual_with_zero_confidence() {
        let verdict = ValidationVerdict::invalid_format(None, 0.0, "Invalid: contains numbers");
        let resolved = resolver().resolve(2, &column(), "J0hn", &verdict).unwrap();
        assert_eq!(resolved.entry.processing_mode, ProcessingMode::Manual);
        assert_eq!(resolved.entry.confidence, 0.0);
    }

    #[test]
    fn test_plain_valid_produces_no_entry() {
        let verdict = ValidationVerdict::valid();
        assert!(resolver().resolve(0, &column(), "CEO", &verdict).is_none());
    }

    #[test]
    fn test_custom_thresholds_are_honored() {
        let config = EngineConfig {
            accept_threshold: 0.95,
            ..EngineConfig::default()
        };
        let resolver = FixResolver::new(config);
        let verdict = ValidationVerdict::unrecognized(Some("CEO".into()), 0.92, "close match");
        let resolved = resolver.resolve(0, &column(), "ceo.", &verdict).unwrap();
        // 0.92 is below the raised accept threshold: online, not offline.
        assert_eq!(resolved.entry.processing_mode, ProcessingMode::Online);
    }
}
