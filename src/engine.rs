// src/engine.rs
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::matching::detector::detect_duplicates;
use crate::models::core::{DataMode, EngineOutput, FieldKind, RecordIssue, Table};
use crate::models::fixes::{FixEntry, ProcessingMode};
use crate::models::verdicts::VerdictKind;
use crate::reference::store::ReferenceStore;
use crate::report::build_report;
use crate::resolve::adapters::{AdapterResolution, ProviderKind, SuggestionProvider};
use crate::resolve::FixResolver;
use crate::utils::config::EngineConfig;
use crate::validate::validate_field;

/// The batch data-quality engine. Holds only immutable reference data and
/// policy configuration, so a single instance is safe to share across
/// concurrent runs; each `run` is a pure function of its input table.
pub struct DataQualityEngine {
    store: Arc<ReferenceStore>,
    config: EngineConfig,
    resolver: FixResolver,
    online_adapter: Option<Arc<dyn SuggestionProvider>>,
    ai_adapter: Option<Arc<dyn SuggestionProvider>>,
}

impl DataQualityEngine {
    pub fn new(store: Arc<ReferenceStore>, config: EngineConfig) -> Self {
        let resolver = FixResolver::new(config.clone());
        Self {
            store,
            config,
            resolver,
            online_adapter: None,
            ai_adapter: None,
        }
    }

    pub fn with_online_adapter(mut self, adapter: Arc<dyn SuggestionProvider>) -> Self {
        self.online_adapter = Some(adapter);
        self
    }

    pub fn with_ai_adapter(mut self, adapter: Arc<dyn SuggestionProvider>) -> Self {
        self.ai_adapter = Some(adapter);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full batch pipeline: validate every cell, detect duplicates,
    /// resolve fixes, aggregate the report. Deterministic for a given table
    /// and mode.
    pub fn run(&self, table: &Table, mode: DataMode) -> EngineOutput {
        let run_id = Uuid::new_v4().to_string();
        let generated_at = Utc::now();
        info!(
            "Run {}: {} records x {} columns, {} mode",
            run_id,
            table.record_count(),
            table.column_count(),
            mode.as_str()
        );

        let mut cleaned_rows = table.rows.clone();
        let mut fixes: Vec<FixEntry> = Vec::new();
        let mut missing_records: Vec<RecordIssue> = Vec::new();
        let mut invalid_records: Vec<RecordIssue> = Vec::new();
        let mut missing_fields = 0usize;
        let mut invalid_fields = 0usize;

        for row in 0..table.record_count() {
            for (col_idx, column) in table.columns.iter().enumerate() {
                let raw = table.cell(row, col_idx);
                let Some(verdict) = validate_field(column.kind, raw, &self.store, &self.config)
                else {
                    continue;
                };

                match verdict.kind {
                    VerdictKind::Valid => {}
                    VerdictKind::Missing => {
                        missing_fields += 1;
                        missing_records.push(RecordIssue {
                            row_index: row,
                            field: column.name.clone(),
                            issue: verdict.note.clone(),
                        });
                    }
                    VerdictKind::InvalidFormat | VerdictKind::UnrecognizedReference => {
                        invalid_fields += 1;
                        invalid_records.push(RecordIssue {
                            row_index: row,
                            field: column.name.clone(),
                            issue: verdict.note.clone(),
                        });
                    }
                }

                if let Some(resolved) = self.resolver.resolve(row, column, raw, &verdict) {
                    if let Some(value) = resolved.applied_value {
                        debug!(
                            "Row {} field '{}': applying '{}' (confidence {:.2})",
                            row, column.name, value, resolved.entry.confidence
                        );
                        cleaned_rows[row][col_idx] = value;
                    }
                    fixes.push(resolved.entry);
                }
            }
        }

        let duplicate_groups = detect_duplicates(table, mode, &self.config);
        let report = build_report(
            table,
            missing_fields,
            invalid_fields,
            &duplicate_groups,
            &fixes,
            &run_id,
            generated_at,
        );
        info!(
            "Run {} complete: score {:.1}, {} fixes ({} offline / {} online / {} manual), {} duplicate groups",
            run_id,
            report.overall_quality_score,
            fixes.len(),
            report.offline_fixes,
            report.online_fixes,
            report.manual_review,
            duplicate_groups.len()
        );

        EngineOutput {
            run_id,
            cleaned_rows,
            report,
            fixes,
            duplicate_groups,
            missing_records,
            invalid_records,
        }
    }

    /// Resolve a single (field, value) pair through the chosen provider,
    /// bounded by the configured timeout. Provider failure or timeout
    /// degrades to a manual-review resolution; it never aborts anything.
    pub async fn resolve_single(
        &self,
        field: FieldKind,
        value: &str,
        provider: ProviderKind,
    ) -> Result<AdapterResolution> {
        let adapter = match provider {
            ProviderKind::Online => self.online_adapter.as_ref(),
            ProviderKind::Ai => self.ai_adapter.as_ref(),
        }
        .ok_or_else(|| anyhow!("No {} adapter registered", provider.as_str()))?;

        match tokio::time::timeout(self.config.adapter_timeout, adapter.suggest(field, value))
            .await
        {
            Ok(Ok(resolution)) => Ok(resolution),
            Ok(Err(e)) => {
                warn!("Adapter '{}' failed for {}: {:#}", adapter.name(), field.as_str(), e);
                Ok(AdapterResolution::manual_fallback(
                    value,
                    format!("Provider '{}' failed: {}", adapter.name(), e),
                ))
            }
            Err(_) => {
                warn!(
                    "Adapter '{}' timed out after {:?}",
                    adapter.name(),
                    self.config.adapter_timeout
                );
                Ok(AdapterResolution::manual_fallback(
                    value,
                    format!("Provider '{}' timed out", adapter.name()),
                ))
            }
        }
    }

    /// Fold an externally verified resolution back into a batch output.
    /// Supersedes the ledger entry for that (row, field) and marks it
    /// verified; duplicate detection and other fields are left untouched.
    pub fn apply_verified_fix(
        &self,
        output: &mut EngineOutput,
        row_index: usize,
        field: &str,
        resolution: &AdapterResolution,
    ) -> Result<()> {
        if row_index >= output.cleaned_rows.len() {
            return Err(anyhow!(
                "Row index {} out of range ({} rows)",
                row_index,
                output.cleaned_rows.len()
            ));
        }
        let col_idx = output
            .report
            .all_columns
            .iter()
            .position(|name| name == field)
            .with_context(|| format!("Unknown field '{}'", field))?;

        let apply = resolution.confidence >= self.config.accept_threshold;
        match output
            .fixes
            .iter_mut()
            .find(|f| f.row_index == row_index && f.field == field)
        {
            Some(entry) => {
                entry.suggested = resolution.suggestion.clone();
                entry.confidence = resolution.confidence;
                entry.note = resolution.details.clone();
                entry.processing_mode = ProcessingMode::Online;
                entry.verified_online = true;
            }
            None => {
                output.fixes.push(FixEntry {
                    row_index,
                    field: field.to_string(),
                    original: output.cleaned_rows[row_index][col_idx].clone(),
                    suggested: resolution.suggestion.clone(),
                    confidence: resolution.confidence,
                    processing_mode: ProcessingMode::Online,
                    note: resolution.details.clone(),
                    verified_online: true,
                });
            }
        }
        if apply {
            output.cleaned_rows[row_index][col_idx] = resolution.suggestion.clone();
        }
        Ok(())
    }
}
