//! User-supplied column aliases from TOML
//!
//! ```toml
//! [aliases]
//! "Pickup City" = "origin_city"
//! "Linehaul" = "rate"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ratefinder_types::{ConfigError, Error, Result};
use serde::Deserialize;

use crate::schema::{CanonicalField, ColumnAliases};

#[derive(Debug, Deserialize)]
struct AliasFile {
    #[serde(default)]
    aliases: BTreeMap<String, CanonicalField>,
}

/// Built-in aliases extended with the overrides in `path`
pub fn load_aliases_from_file(path: &Path) -> Result<ColumnAliases> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!(
            "Failed to read alias file {}: {}",
            path.display(),
            e
        )))
    })?;
    load_aliases_from_str(&content)
}

pub fn load_aliases_from_str(toml_content: &str) -> Result<ColumnAliases> {
    let file: AliasFile = toml::from_str(toml_content).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!("Failed to parse alias TOML: {}", e)))
    })?;
    log::debug!("loaded {} column alias override(s)", file.aliases.len());
    Ok(ColumnAliases::builtin().with_overrides(file.aliases))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOML: &str = r#"
[aliases]
"Pickup City" = "origin_city"
"Drop City" = "destination_city"
"Linehaul" = "rate"
"#;

    #[test]
    fn test_load_from_str() {
        let aliases = load_aliases_from_str(TEST_TOML).unwrap();
        let map = aliases
            .resolve(["Pickup City", "Drop City", "Equipment Type", "Linehaul"])
            .unwrap();
        assert!(map.has(CanonicalField::OriginCity));
        assert!(map.has(CanonicalField::Rate));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = load_aliases_from_str("[aliases]\n\"Pickup\" = \"pickup_zone\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_empty_file_is_builtin() {
        let aliases = load_aliases_from_str("").unwrap();
        assert!(aliases
            .resolve(["origin_city", "destination_city", "equipment_type", "rate"])
            .is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.toml");
        std::fs::write(&path, TEST_TOML).unwrap();
        assert!(load_aliases_from_file(&path).is_ok());
        assert!(load_aliases_from_file(&dir.path().join("missing.toml")).is_err());
    }
}
