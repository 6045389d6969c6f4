// src/lib.rs

pub mod engine;
pub mod ingest;
pub mod matching;
pub mod models;
pub mod reference;
pub mod report;
pub mod resolve;
pub mod utils;
pub mod validate;

pub use engine::DataQualityEngine;
pub use models::core::{Column, DataMode, EngineOutput, FieldKind, Table};
pub use models::fixes::{FixEntry, FixSource, ProcessingMode};
pub use models::stats::{DuplicateGroup, MatchReason, QualityReport};
pub use models::verdicts::{ValidationVerdict, VerdictKind};
pub use reference::store::{ReferenceDomain, ReferenceStore};
pub use resolve::adapters::{AdapterResolution, ProviderKind, SuggestionProvider};
pub use utils::config::EngineConfig;
