// src/utils/mod.rs
pub mod config;
pub mod constants;
pub mod env;

/// Lowercase and collapse internal whitespace. The shared normalization for
/// reference lookups and match keys.
pub fn normalize_text(value: &str) -> String {
    value
        .split_whitespace()
        .map(|token| token.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduce a phone number to its digits. Numbers outside a plausible length
/// are considered unusable as a match key and normalize to empty.
pub fn normalize_phone(phone: &str) -> String {
    let digits_only: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits_only.len() == 11 && digits_only.starts_with('1') {
        return digits_only[1..].to_string();
    }
    if (constants::PHONE_MIN_DIGITS..=constants::PHONE_MAX_DIGITS).contains(&digits_only.len()) {
        return digits_only;
    }
    String::new()
}

/// Normalize an email address for duplicate matching: lowercase, strip any
/// "+tag" suffix from the local part, and fold well-known provider aliases
/// (googlemail -> gmail, dot-insensitive gmail local parts).
pub fn normalize_email(email: &str) -> String {
    let email_trimmed = email.trim().to_lowercase();
    if !email_trimmed.contains('@') {
        return email_trimmed;
    }
    let parts: Vec<&str> = email_trimmed.splitn(2, '@').collect();
    if parts.len() != 2 {
        return email_trimmed;
    }
    let (local_part_full, domain_part) = (parts[0], parts[1]);

    let local_part_no_plus = local_part_full.split('+').next().unwrap_or("").to_string();

    let final_domain_part = match domain_part {
        "googlemail.com" => "gmail.com",
        _ => domain_part,
    };

    let final_local_part = if final_domain_part == "gmail.com" {
        local_part_no_plus.replace('.', "")
    } else {
        local_part_no_plus
    };

    if final_local_part.is_empty() {
        String::new()
    } else {
        format!("{}@{}", final_local_part, final_domain_part)
    }
}

/// Token-sorted Jaro-Winkler similarity on a 0-100 scale. Sorting the tokens
/// first makes the score insensitive to word order ("Acme Corp" vs
/// "Corp Acme"), which is what reference values and company names need.
pub fn similarity_score(a: &str, b: &str) -> f64 {
    let a_sorted = token_sorted(a);
    let b_sorted = token_sorted(b);
    if a_sorted.is_empty() || b_sorted.is_empty() {
        return 0.0;
    }
    strsim::jaro_winkler(&a_sorted, &b_sorted) * 100.0
}

fn token_sorted(value: &str) -> String {
    let normalized = normalize_text(value);
    let mut tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Acme   Corp  "), "acme corp");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+1 (555) 010-0001"), "5550100001");
        assert_eq!(normalize_phone("555-0001"), "5550001");
        assert_eq!(normalize_phone("12"), "");
    }

    #[test]
    fn test_normalize_email_provider_aliases() {
        assert_eq!(
            normalize_email("John.Doe+news@GoogleMail.com"),
            "johndoe@gmail.com"
        );
        assert_eq!(normalize_email("jane@acme.com "), "jane@acme.com");
    }

    #[test]
    fn test_similarity_is_word_order_insensitive() {
        let forward = similarity_score("Acme Corp", "Corp Acme");
        assert!(forward > 99.0);
    }

    #[test]
    fn test_similarity_of_unrelated_strings_is_low() {
        assert!(similarity_score("Acme Corp", "Globex Industries") < 60.0);
    }
}
