// src/validate/email.rs
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::verdicts::ValidationVerdict;
use crate::reference::store::{ReferenceDomain, ReferenceStore};
use crate::utils::config::EngineConfig;
use crate::utils::constants::EMAIL_SHAPE_FIX_CONFIDENCE;

static LOCAL_PART_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+\-]+$").unwrap());
static DOMAIN_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-]+$").unwrap());

/// Validate an email address: syntactic shape first, then the domain part
/// against the known-domain reference set. An empty reference set means the
/// domain check is skipped, not failed.
pub fn validate_email(
    value: &str,
    store: &ReferenceStore,
    config: &EngineConfig,
) -> ValidationVerdict {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ValidationVerdict::missing("Email missing");
    }

    if let Err(note) = check_shape(trimmed) {
        // A mechanical repair (dropping stray characters, joining extra '@'
        // parts, completing a dotless domain) may yield a usable candidate.
        let repaired = suggest_shape_fix(trimmed);
        if repaired != trimmed && check_shape(&repaired).is_ok() {
            return ValidationVerdict::invalid_format(
                Some(repaired),
                EMAIL_SHAPE_FIX_CONFIDENCE,
                format!("Auto-fixable: {}", note),
            );
        }
        return ValidationVerdict::invalid_format(None, 0.0, note);
    }

    let lowered = trimmed.to_lowercase();
    let (local, domain) = match lowered.split_once('@') {
        Some(parts) => parts,
        None => return ValidationVerdict::invalid_format(None, 0.0, "Invalid: missing @ symbol"),
    };

    let domains = store.set(ReferenceDomain::EmailDomains);
    if domains.is_empty() || domains.lookup_exact(domain).is_some() {
        return ValidationVerdict::valid();
    }

    match domains.lookup_fuzzy(domain, config.domain_min_score) {
        Some((known_domain, score)) => ValidationVerdict::unrecognized(
            Some(format!("{}@{}", local, known_domain)),
            score / 100.0,
            format!("Unrecognized domain '{}', closest known '{}'", domain, known_domain),
        ),
        None => ValidationVerdict::unrecognized(
            None,
            0.0,
            format!("Unrecognized domain '{}'", domain),
        ),
    }
}

fn check_shape(email: &str) -> Result<(), String> {
    if email.chars().any(char::is_whitespace) {
        return Err("Invalid: contains whitespace".to_string());
    }
    let at_count = email.matches('@').count();
    if at_count == 0 {
        return Err("Invalid: missing @ symbol".to_string());
    }
    if at_count > 1 {
        return Err(format!("Invalid: contains {} @ symbols (should be 1)", at_count));
    }
    let (local, domain) = email.split_once('@').unwrap_or((email, ""));
    if local.is_empty() {
        return Err("Invalid: empty local part before @".to_string());
    }
    if !LOCAL_PART_RE.is_match(local) {
        return Err("Invalid: local part contains invalid characters".to_string());
    }
    if domain.is_empty() {
        return Err("Invalid: empty domain after @".to_string());
    }
    if !domain.contains('.') {
        return Err("Invalid: domain missing a dot (e.g. gmail.com, not gmailcom)".to_string());
    }
    for label in domain.split('.') {
        if label.is_empty() {
            return Err("Invalid: domain has an empty part (e.g. example..com)".to_string());
        }
        if !DOMAIN_LABEL_RE.is_match(label) {
            return Err(format!("Invalid: domain part '{}' contains invalid characters", label));
        }
    }
    Ok(())
}

/// Best-effort mechanical cleanup of a malformed address. Returns the input
/// unchanged when nothing obvious applies.
fn suggest_shape_fix(email: &str) -> String {
    let mut email: String = email.chars().filter(|c| !c.is_whitespace()).collect();

    // Fold extra '@' signs into the domain.
    if email.matches('@').count() > 1 {
        let parts: Vec<&str> = email.split('@').collect();
        email = format!("{}@{}", parts[0], parts[1..].join(""));
    }

    if let Some((local, domain)) = email.split_once('@') {
        let local: String = local
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
            .collect();
        let domain: String = domain
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
            .collect();
        let domain = if !domain.is_empty() && !domain.contains('.') {
            format!("{}.com", domain)
        } else {
            domain
        };
        email = format!("{}@{}", local, domain);
    }
    email
}
