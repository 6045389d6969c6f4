// src/matching/keys.rs
use crate::models::core::{FieldKind, Table};
use crate::utils::{normalize_email, normalize_phone, normalize_text};

/// Normalized match keys for one row. Empty fields normalize to None and
/// never match each other.
#[derive(Debug, Clone, Default)]
pub struct MatchKeys {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub person: Option<String>,
    pub company: Option<String>,
}

/// Extract the match keys for every row. Person identity prefers a full-name
/// column and falls back to "first last".
pub fn extract_match_keys(table: &Table) -> Vec<MatchKeys> {
    let email_col = table.column_of_kind(FieldKind::Email);
    let phone_col = table.column_of_kind(FieldKind::Phone);
    let full_name_col = table.column_of_kind(FieldKind::FullName);
    let first_name_col = table.column_of_kind(FieldKind::FirstName);
    let last_name_col = table.column_of_kind(FieldKind::LastName);
    let company_col = table.column_of_kind(FieldKind::Company);

    (0..table.record_count())
        .map(|row| {
            let email = email_col
                .map(|col| normalize_email(table.cell(row, col)))
                .filter(|v| !v.is_empty());
            let phone = phone_col
                .map(|col| normalize_phone(table.cell(row, col)))
                .filter(|v| !v.is_empty());
            let person = person_key(table, row, full_name_col, first_name_col, last_name_col);
            let company = company_col
                .map(|col| normalize_text(table.cell(row, col)))
                .filter(|v| !v.is_empty());
            MatchKeys {
                email,
                phone,
                person,
                company,
            }
        })
        .collect()
}

fn person_key(
    table: &Table,
    row: usize,
    full_name_col: Option<usize>,
    first_name_col: Option<usize>,
    last_name_col: Option<usize>,
) -> Option<String> {
    if let Some(col) = full_name_col {
        let full = normalize_text(table.cell(row, col));
        if !full.is_empty() {
            return Some(full);
        }
    }
    let first = first_name_col
        .map(|col| normalize_text(table.cell(row, col)))
        .unwrap_or_default();
    let last = last_name_col
        .map(|col| normalize_text(table.cell(row, col)))
        .unwrap_or_default();
    let joined = [first, last]
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
