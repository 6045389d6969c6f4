// src/resolve/adapters.rs
//
// Contracts for on-demand single-value resolution. The engine owns the
// interface; real providers live outside this crate and are trusted only
// for a suggestion, a confidence, and their provenance.
use anyhow::Result;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::models::core::FieldKind;
use crate::models::fixes::FixSource;

/// Which registered adapter a `resolve_single` call should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderKind {
    Online,
    Ai,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Online => "ONLINE",
            ProviderKind::Ai => "AI",
        }
    }
}

/// What an adapter hands back for one (field, value) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterResolution {
    pub suggestion: String,
    pub confidence: f64,
    pub source: FixSource,
    pub details: String,
}

impl AdapterResolution {
    /// The degraded result used when a provider times out or fails: keep
    /// the original value and route it to manual review.
    pub fn manual_fallback(value: &str, details: impl Into<String>) -> Self {
        Self {
            suggestion: value.to_string(),
            confidence: 0.0,
            source: FixSource::Manual,
            details: details.into(),
        }
    }
}

/// A pluggable single-value suggestion source. Calls are stateless and
/// independent; they may run concurrently with each other and with a batch
/// run.
pub trait SuggestionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn suggest<'a>(
        &'a self,
        field: FieldKind,
        value: &'a str,
    ) -> BoxFuture<'a, Result<AdapterResolution>>;
}

/// Offline stand-in for an AI suggestion service: trims and title-cases the
/// value. Keeps the on-demand path exercisable without network access.
pub struct HeuristicSuggester;

impl HeuristicSuggester {
    const CONFIDENCE: f64 = 0.82;
}

impl SuggestionProvider for HeuristicSuggester {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn suggest<'a>(
        &'a self,
        field: FieldKind,
        value: &'a str,
    ) -> BoxFuture<'a, Result<AdapterResolution>> {
        Box::pin(async move {
            let suggestion = title_case(value.trim());
            Ok(AdapterResolution {
                suggestion,
                confidence: Self::CONFIDENCE,
                source: FixSource::Ai,
                details: format!("Heuristic cleanup for {}", field.as_str()),
            })
        })
    }
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
