// src/validate/mod.rs
pub mod email;
pub mod name;
pub mod phone;
pub mod reference_field;

use crate::models::core::FieldKind;
use crate::models::verdicts::ValidationVerdict;
use crate::reference::store::ReferenceStore;
use crate::utils::config::EngineConfig;

/// Validate one cell according to its column role. Returns None for roles
/// that carry no validator (company, free-form columns); those cells still
/// participate in duplicate matching but produce no verdict.
pub fn validate_field(
    kind: FieldKind,
    value: &str,
    store: &ReferenceStore,
    config: &EngineConfig,
) -> Option<ValidationVerdict> {
    match kind {
        FieldKind::Email => Some(email::validate_email(value, store, config)),
        FieldKind::Phone => Some(phone::validate_phone(value)),
        FieldKind::FirstName | FieldKind::LastName | FieldKind::FullName => {
            Some(name::validate_name(value))
        }
        FieldKind::JobTitle | FieldKind::Country | FieldKind::Industry => Some(
            reference_field::validate_reference_field(kind, value, store, config),
        ),
        FieldKind::Company | FieldKind::Other => None,
    }
}
