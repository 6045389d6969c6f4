// src/matching/detector.rs
//
// Entity-aware duplicate detection. Rows merge through a disjoint-set: two
// rows join the same group when ANY match key connects them, directly or
// transitively. The policy differs by mode; people mode never merges on a
// shared company alone, so distinct people at one company stay separate.
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use std::collections::HashMap;

use crate::matching::keys::{extract_match_keys, MatchKeys};
use crate::models::core::{DataMode, Table};
use crate::models::stats::{DuplicateGroup, MatchReason};
use crate::utils::config::EngineConfig;
use crate::utils::similarity_score;

/// Partition the table into duplicate groups under the mode's policy.
/// Deterministic: union order cannot change the final partition, and group
/// reasons take the highest-priority key observed inside each group.
pub fn detect_duplicates(
    table: &Table,
    mode: DataMode,
    config: &EngineConfig,
) -> Vec<DuplicateGroup> {
    let row_count = table.record_count();
    if row_count < 2 {
        return Vec::new();
    }

    let keys = extract_match_keys(table);
    let mut union_find: UnionFind<usize> = UnionFind::new(row_count);
    // Every matching pair and its reason, kept so settled groups can be
    // tagged afterwards.
    let mut matched_pairs: Vec<(usize, usize, MatchReason)> = Vec::new();

    union_exact_key(
        &keys,
        |k| k.email.as_deref(),
        MatchReason::EmailMatch,
        &mut union_find,
        &mut matched_pairs,
    );
    union_exact_key(
        &keys,
        |k| k.phone.as_deref(),
        MatchReason::PhoneMatch,
        &mut union_find,
        &mut matched_pairs,
    );
    union_fuzzy_pairs(&keys, mode, config, &mut union_find, &mut matched_pairs);

    // Collect settled components of size >= 2.
    let mut components: HashMap<usize, Vec<usize>> = HashMap::new();
    for row in 0..row_count {
        components.entry(union_find.find(row)).or_default().push(row);
    }

    let mut reasons: HashMap<usize, MatchReason> = HashMap::new();
    for (a, _b, reason) in &matched_pairs {
        let root = union_find.find(*a);
        let current = reasons.entry(root).or_insert(*reason);
        if reason.priority() > current.priority() {
            *current = *reason;
        }
    }

    let mut groups: Vec<DuplicateGroup> = components
        .into_iter()
        .filter(|(_, rows)| rows.len() >= 2)
        .map(|(root, mut rows)| {
            rows.sort_unstable();
            DuplicateGroup {
                rows,
                reason: reasons[&root],
            }
        })
        .collect();
    groups.sort_by_key(|g| g.rows[0]);

    info!(
        "Duplicate detection ({} mode): {} rows -> {} groups",
        mode.as_str(),
        row_count,
        groups.len()
    );
    groups
}

/// Bucket rows by an exact key and union every bucket of size >= 2.
fn union_exact_key<'a>(
    keys: &'a [MatchKeys],
    key_of: impl Fn(&'a MatchKeys) -> Option<&'a str>,
    reason: MatchReason,
    union_find: &mut UnionFind<usize>,
    matched_pairs: &mut Vec<(usize, usize, MatchReason)>,
) {
    let mut buckets: HashMap<&str, Vec<usize>> = HashMap::new();
    for (row, row_keys) in keys.iter().enumerate() {
        if let Some(key) = key_of(row_keys) {
            buckets.entry(key).or_default().push(row);
        }
    }
    for rows in buckets.values().filter(|rows| rows.len() >= 2) {
        let first = rows[0];
        for &other in &rows[1..] {
            union_find.union(first, other);
            matched_pairs.push((first, other, reason));
            debug!("{}: rows {} and {} share a key", reason.as_str(), first, other);
        }
    }
}

/// Pairwise fuzzy comparison. O(n^2) candidate pairs, acceptable for the
/// moderate batch sizes this engine targets.
fn union_fuzzy_pairs(
    keys: &[MatchKeys],
    mode: DataMode,
    config: &EngineConfig,
    union_find: &mut UnionFind<usize>,
    matched_pairs: &mut Vec<(usize, usize, MatchReason)>,
) {
    for i in 0..keys.len() {
        for j in (i + 1)..keys.len() {
            match mode {
                DataMode::People => {
                    // Both the person and the company have to agree;
                    // company-only agreement is explicitly not a merge.
                    let (Some(person_i), Some(company_i)) =
                        (keys[i].person.as_deref(), keys[i].company.as_deref())
                    else {
                        continue;
                    };
                    let (Some(person_j), Some(company_j)) =
                        (keys[j].person.as_deref(), keys[j].company.as_deref())
                    else {
                        continue;
                    };
                    if similarity_score(person_i, person_j) >= config.name_similarity_threshold
                        && similarity_score(company_i, company_j)
                            >= config.company_similarity_threshold
                    {
                        union_find.union(i, j);
                        matched_pairs.push((i, j, MatchReason::NameAndCompanyMatch));
                    }
                }
                DataMode::Company => {
                    let (Some(company_i), Some(company_j)) =
                        (keys[i].company.as_deref(), keys[j].company.as_deref())
                    else {
                        continue;
                    };
                    if similarity_score(company_i, company_j)
                        >= config.company_similarity_threshold
                    {
                        union_find.union(i, j);
                        matched_pairs.push((i, j, MatchReason::CompanyNameMatch));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::{Column, FieldKind};

    fn people_table(rows: Vec<Vec<&str>>) -> Table {
        let columns = vec![
            Column {
                name: "full_name".into(),
                kind: FieldKind::FullName,
            },
            Column {
                name: "email".into(),
                kind: FieldKind::Email,
            },
            Column {
                name: "phone".into(),
                kind: FieldKind::Phone,
            },
            Column {
                name: "company".into(),
                kind: FieldKind::Company,
            },
        ];
        Table::new(
            columns,
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        )
    }

    #[test]
    fn test_shared_email_merges_with_email_reason() {
        // Same email under two spellings of the company; the merge is
        // email-driven and the group carries the top-priority reason.
        let table = people_table(vec![
            vec!["John Doe", "john@acme.com", "+1-555-0001", "Acme Corp"],
            vec!["John Doe", "john@acme.com", "555-0001", "Acme"],
        ]);
        let groups = detect_duplicates(&table, DataMode::People, &EngineConfig::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].rows, vec![0, 1]);
        assert_eq!(groups[0].reason, MatchReason::EmailMatch);
    }

    #[test]
    fn test_same_company_different_people_never_merge() {
        let table = people_table(vec![
            vec!["John Doe", "john@acme.com", "5550100001", "Acme Corp"],
            vec!["Mary Major", "mary@acme.net", "5550100002", "Acme Corp"],
        ]);
        let groups = detect_duplicates(&table, DataMode::People, &EngineConfig::default());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_fuzzy_name_and_company_merge_in_people_mode() {
        let table = people_table(vec![
            vec!["Jonathan Smith", "", "", "Globex Corporation"],
            vec!["Jonathan Smith", "", "", "Globex Corp"],
        ]);
        let groups = detect_duplicates(&table, DataMode::People, &EngineConfig::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].reason, MatchReason::NameAndCompanyMatch);
    }

    #[test]
    fn test_company_mode_merges_on_company_alone() {
        let table = people_table(vec![
            vec!["John Doe", "", "", "Initech Industries"],
            vec!["Mary Major", "", "", "Initech Industries"],
        ]);
        let groups = detect_duplicates(&table, DataMode::Company, &EngineConfig::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].reason, MatchReason::CompanyNameMatch);
    }

    #[test]
    fn test_transitive_chains_form_one_group() {
        // 0-1 share an email, 1-2 share a phone: one group of three, tagged
        // with the email reason.
        let table = people_table(vec![
            vec!["A One", "shared@acme.com", "5550100001", "Acme"],
            vec!["B Two", "shared@acme.com", "5550100002", "Globex"],
            vec!["C Three", "c@other.com", "5550100002", "Initech"],
        ]);
        let groups = detect_duplicates(&table, DataMode::People, &EngineConfig::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].rows, vec![0, 1, 2]);
        assert_eq!(groups[0].reason, MatchReason::EmailMatch);
    }

    #[test]
    fn test_empty_keys_never_match_each_other() {
        let table = people_table(vec![
            vec!["", "", "", ""],
            vec!["", "", "", ""],
        ]);
        let people = detect_duplicates(&table, DataMode::People, &EngineConfig::default());
        let companies = detect_duplicates(&table, DataMode::Company, &EngineConfig::default());
        assert!(people.is_empty());
        assert!(companies.is_empty());
    }

    #[test]
    fn test_detection_is_idempotent() {
        let table = people_table(vec![
            vec!["John Doe", "john@acme.com", "+1-555-0001", "Acme Corp"],
            vec!["John Doe", "john@acme.com", "555-0001", "Acme"],
            vec!["Mary Major", "mary@globex.com", "5550100002", "Globex"],
        ]);
        let first = detect_duplicates(&table, DataMode::People, &EngineConfig::default());
        let second = detect_duplicates(&table, DataMode::People, &EngineConfig::default());
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.rows, b.rows);
            assert_eq!(a.reason, b.reason);
        }
    }
}
