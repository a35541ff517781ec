//! Configuration management for vitrine
//!
//! Config stored at: ~/.config/vitrine/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vitrine_types::{ConfigError, OutputFormat, Result};

use crate::logging::LoggingConfig;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the document and its backup (overrides the default data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Refuse to store documents larger than this many bytes
    #[serde(default)]
    pub storage_quota_bytes: Option<usize>,

    /// Messaging number that receives booking notifications
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,

    /// Business name used when the site settings have none
    #[serde(default = "default_business_name")]
    pub business_name: String,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_whatsapp_number() -> String {
    "2250748735115".to_string()
}

fn default_business_name() -> String {
    "Vitrine".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_format: default_output_format(),
            logging: LoggingConfig::default(),
            storage_quota_bytes: None,
            whatsapp_number: default_whatsapp_number(),
            business_name: default_business_name(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("vitrine");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("vitrine");
        Ok(data_dir)
    }

    /// Load config from the default location, or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or use defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Vitrine Configuration")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(
            f,
            "Log level:      {} ({})",
            self.logging.level, self.logging.format
        )?;
        writeln!(
            f,
            "Storage quota:  {}",
            self.storage_quota_bytes
                .map(|q| format!("{q} bytes"))
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        writeln!(f, "WhatsApp:       {}", self.whatsapp_number)?;
        writeln!(f, "Business name:  {}", self.business_name)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vitrine_types::Error;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            data_dir: Some(dir.path().join("data")),
            output_format: OutputFormat::Json,
            storage_quota_bytes: Some(5 * 1024 * 1024),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"output_format":"json"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.whatsapp_number, "2250748735115");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }
}
