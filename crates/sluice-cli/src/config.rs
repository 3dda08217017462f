//! CLI configuration

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Overrides the config file location
pub const CONFIG_ENV: &str = "SLUICE_CONFIG";

/// Location of the config file
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sluice")
        .join("config.toml")
}

/// A settable config key
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Graph document queried when `--graph` is not given
    Graph,
    /// Output format, `table` or `json`
    Format,
    /// Maximum number of results per query
    Limit,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [Self::Graph, Self::Format, Self::Limit];

    pub fn name(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Format => "format",
            Self::Limit => "limit",
        }
    }

    /// What applies while the key is unset
    pub fn fallback(self) -> &'static str {
        match self {
            Self::Graph => "none, --graph required",
            Self::Format => "table",
            Self::Limit => "unlimited",
        }
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Graph document used when `--graph` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<PathBuf>,
    /// Output format used when `--format` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Result limit used when `--limit` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Config {
    /// Load the config file, falling back to defaults
    pub fn load() -> Self {
        let path = config_file_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Graph => self.graph.as_ref().map(|p| p.display().to_string()),
            ConfigKey::Format => self.format.clone(),
            ConfigKey::Limit => self.limit.map(|l| l.to_string()),
        }
    }

    /// Parse and store `value`, leaving the config untouched on error
    pub fn set(&mut self, key: ConfigKey, value: &str) -> anyhow::Result<()> {
        match key {
            ConfigKey::Graph => self.graph = Some(PathBuf::from(value)),
            ConfigKey::Format => {
                let format = value.to_lowercase();
                if !matches!(format.as_str(), "table" | "json") {
                    anyhow::bail!("Invalid format: {} (expected table or json)", value);
                }
                self.format = Some(format);
            }
            ConfigKey::Limit => match value.parse::<usize>() {
                Ok(0) => anyhow::bail!("Limit must be at least 1; unset it for no limit"),
                Ok(limit) => self.limit = Some(limit),
                Err(_) => anyhow::bail!("Invalid limit: {} (expected a number)", value),
            },
        }
        Ok(())
    }

    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::Graph => self.graph = None,
            ConfigKey::Format => self.format = None,
            ConfigKey::Limit => self.limit = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_unset() {
        let mut config = Config::default();
        assert_eq!(config.get(ConfigKey::Limit), None);

        config.set(ConfigKey::Limit, "5").unwrap();
        config.set(ConfigKey::Format, "JSON").unwrap();
        config.set(ConfigKey::Graph, "modern.json").unwrap();

        assert_eq!(config.get(ConfigKey::Limit).as_deref(), Some("5"));
        assert_eq!(config.get(ConfigKey::Format).as_deref(), Some("json"));
        assert_eq!(config.get(ConfigKey::Graph).as_deref(), Some("modern.json"));

        config.unset(ConfigKey::Limit);
        assert_eq!(config.limit, None);
        assert_eq!(config.get(ConfigKey::Format).as_deref(), Some("json"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set(ConfigKey::Limit, "many").is_err());
        assert!(config.set(ConfigKey::Limit, "0").is_err());
        assert!(config.set(ConfigKey::Format, "xml").is_err());
        assert!(config.limit.is_none());
        assert!(config.format.is_none());
    }

    #[test]
    fn test_key_names_match_cli_values() {
        for key in ConfigKey::ALL {
            let value = key.to_possible_value().unwrap();
            assert_eq!(value.get_name(), key.name());
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "format = \"json\"\nlimit = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.format.as_deref(), Some("json"));
        assert_eq!(config.limit, Some(3));
        assert!(config.graph.is_none());

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(!text.contains("graph"));
    }
}
