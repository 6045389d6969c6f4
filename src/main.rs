// src/main.rs
use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use quality_lib::engine::DataQualityEngine;
use quality_lib::ingest::{derive_domain_column, read_csv_table, write_cleaned_csv, ColumnRoleMap};
use quality_lib::models::core::DataMode;
use quality_lib::reference::store::ReferenceStore;
use quality_lib::resolve::adapters::HeuristicSuggester;
use quality_lib::utils::config::EngineConfig;
use quality_lib::utils::env::load_env;

#[derive(Parser)]
#[command(
    name = "quality",
    about = "Batch data-quality pipeline for B2B contact records"
)]
struct Cli {
    /// Input CSV file
    input: PathBuf,

    /// Dataset entity type: people or company
    #[arg(long, default_value = "people")]
    mode: String,

    /// Directory holding the reference datasets
    #[arg(long, default_value = "reference")]
    reference_dir: PathBuf,

    /// Optional JSON file overriding the column-role mapping
    #[arg(long)]
    roles: Option<PathBuf>,

    /// Directory for cleaned data, fixes, and the report
    #[arg(long, default_value = "out")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    load_env();
    let cli = Cli::parse();

    let mode = match cli.mode.as_str() {
        "people" => DataMode::People,
        "company" => DataMode::Company,
        other => bail!("Unknown mode '{}' (expected people or company)", other),
    };

    let config = EngineConfig::from_env();
    let store = Arc::new(ReferenceStore::load(&cli.reference_dir));
    let engine =
        DataQualityEngine::new(store, config).with_ai_adapter(Arc::new(HeuristicSuggester));

    let roles = match &cli.roles {
        Some(path) => ColumnRoleMap::from_json_file(path)?,
        None => ColumnRoleMap::default(),
    };
    let mut table = read_csv_table(&cli.input, &roles)?;
    derive_domain_column(&mut table);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!(
        "Processing {} records ({} mode)...",
        table.record_count(),
        mode.as_str()
    ));

    let output = engine.run(&table, mode);

    pb.finish_with_message(format!(
        "Score {:.1} - {} fixes, {} duplicate groups",
        output.report.overall_quality_score,
        output.fixes.len(),
        output.duplicate_groups.len()
    ));

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("Failed to create {}", cli.output_dir.display()))?;
    write_cleaned_csv(
        &cli.output_dir.join("cleaned_data.csv"),
        &table,
        &output.cleaned_rows,
    )?;
    fs::write(
        cli.output_dir.join("fixes.json"),
        serde_json::to_string_pretty(&output.fixes).context("Failed to serialize fixes")?,
    )?;
    fs::write(
        cli.output_dir.join("report.json"),
        serde_json::to_string_pretty(&output.report).context("Failed to serialize report")?,
    )?;
    fs::write(
        cli.output_dir.join("duplicate_groups.json"),
        serde_json::to_string_pretty(&output.duplicate_groups)
            .context("Failed to serialize duplicate groups")?,
    )?;

    info!(
        "Run {} written to {}: {} offline / {} online / {} manual",
        output.run_id,
        cli.output_dir.display(),
        output.report.offline_fixes,
        output.report.online_fixes,
        output.report.manual_review
    );
    Ok(())
}
