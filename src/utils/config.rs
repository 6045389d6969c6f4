// src/utils/config.rs
use log::debug;
use std::env;
use std::time::Duration;

use crate::utils::constants::{
    ACCEPT_THRESHOLD, ADAPTER_TIMEOUT_SECONDS, DUPLICATE_COMPANY_SIMILARITY,
    DUPLICATE_NAME_SIMILARITY, MIN_DOMAIN_FUZZY_SCORE, MIN_REFERENCE_FUZZY_SCORE,
    SUGGEST_THRESHOLD,
};

/// Engine-wide policy knobs. Constructed once and passed into the engine so
/// runs can be tuned independently; nothing here is module-level state.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Corrections at or above this confidence are applied offline.
    pub accept_threshold: f64,
    /// Corrections at or above this confidence (but below accept) are
    /// recorded as online-eligible suggestions.
    pub suggest_threshold: f64,
    /// 0-100 floor for fuzzy reference lookups (job title, country, industry).
    pub reference_min_score: f64,
    /// 0-100 floor for email domain suggestions.
    pub domain_min_score: f64,
    /// 0-100 person-name similarity required for a people-mode fuzzy merge.
    pub name_similarity_threshold: f64,
    /// 0-100 company similarity required for a fuzzy merge.
    pub company_similarity_threshold: f64,
    /// Upper bound on a single external provider call.
    pub adapter_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            accept_threshold: ACCEPT_THRESHOLD,
            suggest_threshold: SUGGEST_THRESHOLD,
            reference_min_score: MIN_REFERENCE_FUZZY_SCORE,
            domain_min_score: MIN_DOMAIN_FUZZY_SCORE,
            name_similarity_threshold: DUPLICATE_NAME_SIMILARITY,
            company_similarity_threshold: DUPLICATE_COMPANY_SIMILARITY,
            adapter_timeout: Duration::from_secs(ADAPTER_TIMEOUT_SECONDS),
        }
    }
}

impl EngineConfig {
    /// Create configuration from environment variables, falling back to the
    /// defaults in `utils::constants` for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            accept_threshold: read_f64("QUALITY_ACCEPT_THRESHOLD", defaults.accept_threshold),
            suggest_threshold: read_f64("QUALITY_SUGGEST_THRESHOLD", defaults.suggest_threshold),
            reference_min_score: read_f64(
                "QUALITY_REFERENCE_MIN_SCORE",
                defaults.reference_min_score,
            ),
            domain_min_score: read_f64("QUALITY_DOMAIN_MIN_SCORE", defaults.domain_min_score),
            name_similarity_threshold: read_f64(
                "QUALITY_NAME_SIMILARITY",
                defaults.name_similarity_threshold,
            ),
            company_similarity_threshold: read_f64(
                "QUALITY_COMPANY_SIMILARITY",
                defaults.company_similarity_threshold,
            ),
            adapter_timeout: Duration::from_secs(read_u64(
                "QUALITY_ADAPTER_TIMEOUT_SECONDS",
                defaults.adapter_timeout.as_secs(),
            )),
        };
        debug!(
            "Engine config: accept={}, suggest={}, reference_min={}",
            config.accept_threshold, config.suggest_threshold, config.reference_min_score
        );
        config
    }
}

fn read_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}

fn read_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
