// src/reference/loader.rs
//
// File-format concerns for reference data. The store only cares about
// canonical strings and their variants; how they sit on disk lives here.
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a JSON array of strings. Blank entries are dropped.
pub fn load_json_set(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference file {}", path.display()))?;
    let values: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON array in {}", path.display()))?;
    Ok(values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect())
}

/// Load a JSON object mapping variant -> canonical.
pub fn load_json_map(path: &Path) -> Result<Vec<(String, String)>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference file {}", path.display()))?;
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON map in {}", path.display()))?;
    let mut pairs = Vec::with_capacity(map.len());
    for (variant, canonical) in map {
        let canonical = canonical
            .as_str()
            .with_context(|| format!("Non-string value for key '{}' in {}", variant, path.display()))?
            .trim()
            .to_string();
        let variant = variant.trim().to_string();
        if !variant.is_empty() && !canonical.is_empty() {
            pairs.push((variant, canonical));
        }
    }
    Ok(pairs)
}

/// Load a one-value-per-line list (the email-domain file). A header line
/// reading "domain" is tolerated and skipped.
pub fn load_line_list(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference file {}", path.display()))?;
    Ok(raw
        .lines()
        .map(|line| line.trim().trim_matches('"').to_string())
        .filter(|line| !line.is_empty() && !line.eq_ignore_ascii_case("domain"))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_json_set_drops_blanks() {
        let path = temp_file("ref_set_test.json", r#"["France", "  ", "Germany "]"#);
        let values = load_json_set(&path).unwrap();
        assert_eq!(values, vec!["France".to_string(), "Germany".to_string()]);
    }

    #[test]
    fn test_load_json_map() {
        let path = temp_file(
            "ref_map_test.json",
            r#"{"chief executive officer": "CEO", "cto": "CTO"}"#,
        );
        let mut pairs = load_json_map(&path).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("chief executive officer".to_string(), "CEO".to_string()),
                ("cto".to_string(), "CTO".to_string()),
            ]
        );
    }

    #[test]
    fn test_load_line_list_skips_header() {
        let path = temp_file("ref_lines_test.csv", "domain\ngmail.com\nacme.com\n\n");
        let values = load_line_list(&path).unwrap();
        assert_eq!(values, vec!["gmail.com".to_string(), "acme.com".to_string()]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_json_set(Path::new("/nonexistent/countries.json")).is_err());
    }
}
