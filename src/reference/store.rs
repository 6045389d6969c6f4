// src/reference/store.rs
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

use crate::reference::loader::{load_json_map, load_json_set, load_line_list};
use crate::utils::{normalize_text, similarity_score};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceDomain {
    Countries,
    Industries,
    JobTitles,
    EmailDomains,
}

impl ReferenceDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceDomain::Countries => "countries",
            ReferenceDomain::Industries => "industries",
            ReferenceDomain::JobTitles => "job_titles",
            ReferenceDomain::EmailDomains => "email_domains",
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            ReferenceDomain::Countries => "countries.json",
            ReferenceDomain::Industries => "industries.json",
            ReferenceDomain::JobTitles => "job_title_map.json",
            ReferenceDomain::EmailDomains => "email_domains.csv",
        }
    }
}

/// One reference domain indexed two ways: a normalized hash index for exact
/// lookup and an ordered entry list for fuzzy scans. Canonicals are kept
/// sorted so iteration order, and therefore fuzzy tie-breaking, is
/// deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    canonicals: Vec<String>,
    /// normalized variant or canonical -> index into `canonicals`.
    index: HashMap<String, usize>,
    /// (normalized lookup string, canonical index) in canonical-first order.
    entries: Vec<(String, usize)>,
}

impl ReferenceSet {
    /// Build from canonical values only (countries, industries, domains).
    pub fn from_canonicals(mut values: Vec<String>) -> Self {
        values.sort();
        values.dedup();
        let mut set = ReferenceSet {
            canonicals: values,
            ..Default::default()
        };
        for idx in 0..set.canonicals.len() {
            let normalized = normalize_text(&set.canonicals[idx]);
            set.push_entry(normalized, idx);
        }
        set
    }

    /// Build from variant -> canonical pairs (the job-title dictionary).
    /// Every canonical is also indexed under its own normalized form.
    pub fn from_map(pairs: Vec<(String, String)>) -> Self {
        let mut canonicals: Vec<String> = pairs.iter().map(|(_, c)| c.clone()).collect();
        canonicals.sort();
        canonicals.dedup();

        let mut set = ReferenceSet {
            canonicals,
            ..Default::default()
        };
        for idx in 0..set.canonicals.len() {
            let normalized = normalize_text(&set.canonicals[idx]);
            set.push_entry(normalized, idx);
        }
        // Variants attach after canonicals so a canonical always wins an
        // exact-score tie.
        let mut variants: Vec<(String, String)> = pairs;
        variants.sort();
        for (variant, canonical) in variants {
            if let Some(idx) = set.canonicals.iter().position(|c| *c == canonical) {
                set.push_entry(normalize_text(&variant), idx);
            }
        }
        set
    }

    fn push_entry(&mut self, normalized: String, canonical_idx: usize) {
        if normalized.is_empty() || self.index.contains_key(&normalized) {
            return;
        }
        self.index.insert(normalized.clone(), canonical_idx);
        self.entries.push((normalized, canonical_idx));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Exact lookup after normalization. Returns the canonical form.
    pub fn lookup_exact(&self, value: &str) -> Option<&str> {
        let normalized = normalize_text(value);
        self.index
            .get(&normalized)
            .map(|idx| self.canonicals[*idx].as_str())
    }

    /// Best fuzzy match at or above `min_score` (0-100). Scans every entry;
    /// ties resolve to the entry appearing first in canonical iteration
    /// order, which keeps results reproducible.
    pub fn lookup_fuzzy(&self, value: &str, min_score: f64) -> Option<(String, f64)> {
        let normalized = normalize_text(value);
        if normalized.is_empty() || self.entries.is_empty() {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for (entry, canonical_idx) in &self.entries {
            let score = similarity_score(&normalized, entry);
            let improved = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if improved {
                best = Some((*canonical_idx, score));
            }
        }
        best.filter(|(_, score)| *score >= min_score)
            .map(|(idx, score)| (self.canonicals[idx].clone(), score))
    }
}

/// Immutable reference data for the process lifetime. Loaded once at start;
/// safe to share read-only across concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    countries: ReferenceSet,
    industries: ReferenceSet,
    job_titles: ReferenceSet,
    email_domains: ReferenceSet,
}

impl ReferenceStore {
    /// Load every domain from `dir`. A missing or unparseable file degrades
    /// that domain to an empty set; validation for its fields falls back to
    /// format-only checks instead of failing the run.
    pub fn load(dir: &Path) -> Self {
        let store = ReferenceStore {
            countries: Self::load_set(dir, ReferenceDomain::Countries),
            industries: Self::load_set(dir, ReferenceDomain::Industries),
            job_titles: Self::load_map(dir, ReferenceDomain::JobTitles),
            email_domains: Self::load_lines(dir, ReferenceDomain::EmailDomains),
        };
        info!(
            "Reference store loaded: {} countries, {} industries, {} job titles, {} email domains",
            store.countries.len(),
            store.industries.len(),
            store.job_titles.len(),
            store.email_domains.len()
        );
        store
    }

    /// A store with every domain empty. Used by tests and by callers that
    /// want format-only validation.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set(&self, domain: ReferenceDomain) -> &ReferenceSet {
        match domain {
            ReferenceDomain::Countries => &self.countries,
            ReferenceDomain::Industries => &self.industries,
            ReferenceDomain::JobTitles => &self.job_titles,
            ReferenceDomain::EmailDomains => &self.email_domains,
        }
    }

    fn load_set(dir: &Path, domain: ReferenceDomain) -> ReferenceSet {
        match load_json_set(&dir.join(domain.file_name())) {
            Ok(values) => ReferenceSet::from_canonicals(values),
            Err(e) => {
                warn!("Reference domain '{}' unavailable: {:#}", domain.as_str(), e);
                ReferenceSet::default()
            }
        }
    }

    fn load_map(dir: &Path, domain: ReferenceDomain) -> ReferenceSet {
        match load_json_map(&dir.join(domain.file_name())) {
            Ok(pairs) => ReferenceSet::from_map(pairs),
            Err(e) => {
                warn!("Reference domain '{}' unavailable: {:#}", domain.as_str(), e);
                ReferenceSet::default()
            }
        }
    }

    fn load_lines(dir: &Path, domain: ReferenceDomain) -> ReferenceSet {
        match load_line_list(&dir.join(domain.file_name())) {
            Ok(values) => {
                let lowered = values.into_iter().map(|v| v.to_lowercase()).collect();
                ReferenceSet::from_canonicals(lowered)
            }
            Err(e) => {
                warn!("Reference domain '{}' unavailable: {:#}", domain.as_str(), e);
                ReferenceSet::default()
            }
        }
    }

    /// Convenience constructor for in-memory reference data.
    pub fn from_parts(
        countries: Vec<String>,
        industries: Vec<String>,
        job_titles: Vec<(String, String)>,
        email_domains: Vec<String>,
    ) -> Self {
        ReferenceStore {
            countries: ReferenceSet::from_canonicals(countries),
            industries: ReferenceSet::from_canonicals(industries),
            job_titles: ReferenceSet::from_map(job_titles),
            email_domains: ReferenceSet::from_canonicals(
                email_domains.into_iter().map(|d| d.to_lowercase()).collect(),
            ),
        }
    }
}
