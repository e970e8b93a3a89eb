//! Configuration file upkeep: detect fields missing from an older file and
//! rewrite it with their defaults.

use super::Config;
use crate::errors::AppResult;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Every key a current configuration file carries.
pub const KNOWN_FIELDS: &[&str] = &[
    "api_base_url",
    "timeout_secs",
    "read_retries",
    "database",
    "default_room",
    "log_level",
    "shift_flag_polarity",
    "show_weekday",
];

/// Keys absent from the YAML document.
pub fn missing_fields(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content)?;
    let Some(map) = yaml.as_mapping() else {
        return Ok(KNOWN_FIELDS.to_vec());
    };
    Ok(KNOWN_FIELDS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(*k))
        .collect())
}

/// Rewrite the file with every field present. Returns the fields that were added.
pub fn migrate_file(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    let missing = missing_fields(&content)?;
    if missing.is_empty() {
        return Ok(missing);
    }
    let cfg: Config = serde_yaml::from_str(&content)?;
    fs::write(path, cfg.to_yaml()?)?;
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_fields() {
        let missing = missing_fields("api_base_url: http://x\ndatabase: /tmp/a.sqlite\n").unwrap();
        assert!(!missing.contains(&"api_base_url"));
        assert!(missing.contains(&"shift_flag_polarity"));
        assert_eq!(missing.len(), KNOWN_FIELDS.len() - 2);
    }

    #[test]
    fn migrate_adds_defaults() {
        let mut path = std::env::temp_dir();
        path.push("rsala_migrate_cfg_test.conf");
        fs::write(&path, "api_base_url: http://x\n").unwrap();
        let added = migrate_file(&path).unwrap();
        assert!(added.contains(&"read_retries"));
        let again = missing_fields(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(again.is_empty());
        fs::remove_file(&path).ok();
    }
}
