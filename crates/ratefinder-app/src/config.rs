//! Configuration management for ratefinder
//!
//! Config stored at: ~/.config/ratefinder/config.json

use std::path::{Path, PathBuf};

use ratefinder_types::{ConfigError, GeocoderKind, OutputFormat, Result};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Radius used when a search gives none
    #[serde(default = "default_radius_miles")]
    pub default_radius_miles: f64,

    /// Best-carrier result count
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default)]
    pub geocoder: GeocoderKind,

    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    #[serde(default = "default_geocode_timeout_secs")]
    pub geocode_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Lane table loaded when no --data is given
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// TOML file with extra column aliases
    #[serde(default)]
    pub aliases_file: Option<PathBuf>,
}

fn default_radius_miles() -> f64 {
    50.0
}

fn default_max_results() -> usize {
    10
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_geocode_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("ratefinder/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_radius_miles: default_radius_miles(),
            max_results: default_max_results(),
            geocoder: GeocoderKind::default(),
            nominatim_url: default_nominatim_url(),
            geocode_timeout_secs: default_geocode_timeout_secs(),
            user_agent: default_user_agent(),
            output_format: OutputFormat::default(),
            data_file: None,
            aliases_file: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("ratefinder");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default location, or defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)).into())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Ratefinder Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "Default radius:   {} mi", self.default_radius_miles)?;
        writeln!(f, "Max results:      {}", self.max_results)?;
        writeln!(f, "Geocoder:         {}", self.geocoder)?;
        writeln!(f, "Nominatim URL:    {}", self.nominatim_url)?;
        writeln!(f, "Geocode timeout:  {}s", self.geocode_timeout_secs)?;
        writeln!(f, "User agent:       {}", self.user_agent)?;
        writeln!(f, "Output format:    {}", self.output_format)?;
        writeln!(
            f,
            "Data file:        {}",
            self.data_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in sample)".to_string())
        )?;
        writeln!(
            f,
            "Aliases file:     {}",
            self.aliases_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_radius_miles, 50.0);
        assert_eq!(config.max_results, 10);
        assert_eq!(config.geocoder, GeocoderKind::Offline);
        assert!(config.user_agent.starts_with("ratefinder/"));
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let config: Config = serde_json::from_str(r#"{"geocoder": "nominatim", "max_results": 3}"#).unwrap();
        assert_eq!(config.geocoder, GeocoderKind::Nominatim);
        assert_eq!(config.max_results, 3);
        assert_eq!(config.default_radius_miles, 50.0);
        assert_eq!(config.nominatim_url, "https://nominatim.openstreetmap.org");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            default_radius_miles: 120.0,
            data_file: Some(PathBuf::from("/data/lanes.csv")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
