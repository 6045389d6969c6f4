// src/ingest.rs
//
// Shell-side ingestion: CSV parsing, header normalization, and the
// column-role mapping. Roles are decided exactly once here; the engine
// never re-derives a column's role from its name.
use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use url::Url;

use crate::models::core::{Column, FieldKind, Table};

/// Maps normalized header names to field roles. The built-in table covers
/// the common B2B export header spellings; a JSON file can override it.
#[derive(Debug, Clone)]
pub struct ColumnRoleMap {
    rules: HashMap<String, FieldKind>,
}

impl Default for ColumnRoleMap {
    fn default() -> Self {
        let mut rules = HashMap::new();
        for name in ["email", "people_email", "work_email", "business_email"] {
            rules.insert(name.to_string(), FieldKind::Email);
        }
        for name in ["phone", "people_phone", "work_phone", "mobile"] {
            rules.insert(name.to_string(), FieldKind::Phone);
        }
        rules.insert("first_name".to_string(), FieldKind::FirstName);
        rules.insert("last_name".to_string(), FieldKind::LastName);
        for name in ["person_name", "full_name", "name"] {
            rules.insert(name.to_string(), FieldKind::FullName);
        }
        for name in ["company_name", "company", "organization", "org_name"] {
            rules.insert(name.to_string(), FieldKind::Company);
        }
        for name in ["job_title", "jobtitle", "title"] {
            rules.insert(name.to_string(), FieldKind::JobTitle);
        }
        rules.insert("country".to_string(), FieldKind::Country);
        rules.insert("industry".to_string(), FieldKind::Industry);
        Self { rules }
    }
}

impl ColumnRoleMap {
    /// Load an override mapping from a JSON object of header -> role
    /// ("email", "phone", "first_name", ...). Unlisted headers fall back
    /// to the built-in table.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read role map {}", path.display()))?;
        let overrides: HashMap<String, FieldKind> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse role map {}", path.display()))?;
        let mut map = Self::default();
        for (header, kind) in overrides {
            map.rules.insert(normalize_header(&header), kind);
        }
        Ok(map)
    }

    pub fn resolve(&self, header: &str) -> FieldKind {
        self.rules
            .get(&normalize_header(header))
            .copied()
            .unwrap_or(FieldKind::Other)
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Read a CSV file into a Table with normalized headers and assigned roles.
pub fn read_csv_table(path: &Path, roles: &ColumnRoleMap) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let columns: Vec<Column> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| {
            let name = normalize_header(h);
            let kind = roles.resolve(&name);
            Column { name, kind }
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;
        rows.push(record.iter().map(String::from).collect());
    }
    let table = Table::new(columns, rows);
    info!(
        "Ingested {} records across {} columns from {}",
        table.record_count(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}

/// Append a derived "domain" column from a website column when the table
/// has no domain column of its own. Enrichment only; the derived column
/// carries no validation role.
pub fn derive_domain_column(table: &mut Table) {
    let has_domain = table.columns.iter().any(|c| c.name == "domain");
    let website_col = table
        .columns
        .iter()
        .position(|c| c.name == "website" || c.name == "domain_url");
    let Some(website_col) = website_col else {
        return;
    };
    if has_domain {
        return;
    }

    table.columns.push(Column {
        name: "domain".to_string(),
        kind: FieldKind::Other,
    });
    for row in table.rows.iter_mut() {
        let derived = extract_domain(&row[website_col]).unwrap_or_default();
        row.push(derived);
    }
    debug!("Derived domain column from website values");
}

fn extract_domain(value: &str) -> Option<String> {
    let text = value.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    let with_scheme = if text.contains("://") {
        text.clone()
    } else {
        format!("http://{}", text)
    };
    let host = Url::parse(&with_scheme).ok()?.host_str()?.to_string();
    if host.contains('.') {
        Some(host)
    } else {
        None
    }
}

/// Serialize the cleaned copy of a table back to CSV.
pub fn write_cleaned_csv(path: &Path, table: &Table, cleaned_rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer
        .write_record(table.columns.iter().map(|c| c.name.as_str()))
        .context("Failed to write CSV header")?;
    for row in cleaned_rows {
        writer.write_record(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}
