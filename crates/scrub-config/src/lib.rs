use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Simple configuration for scrub
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Payload column names, first match wins
    #[serde(default = "default_payload_columns")]
    pub payload_columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub default_path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            id_column: default_id_column(),
            payload_columns: default_payload_columns(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_path: default_output_path(),
        }
    }
}

fn default_id_column() -> String {
    "record_id".to_string()
}

fn default_payload_columns() -> Vec<String> {
    vec!["Data_json".to_string(), "data_json".to_string()]
}

fn default_output_path() -> PathBuf {
    PathBuf::from("redacted_output.csv")
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit path; the file must exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        if config.input.payload_columns.is_empty() {
            anyhow::bail!("input.payload_columns must name at least one column");
        }
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "scrub", "scrub") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.scrub/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.id_column, "record_id");
        assert_eq!(config.input.payload_columns, vec!["Data_json", "data_json"]);
        assert_eq!(config.output.default_path, PathBuf::from("redacted_output.csv"));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.input.payload_columns, config.input.payload_columns);
    }

    #[test]
    fn test_partial_config() {
        let parsed: Config = toml::from_str(
            r#"
[input]
payload_columns = ["payload"]
"#,
        )
        .unwrap();
        assert_eq!(parsed.input.payload_columns, vec!["payload"]);
        assert_eq!(parsed.input.id_column, "record_id");
        assert_eq!(parsed.output.default_path, PathBuf::from("redacted_output.csv"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\ndefault_path = \"out.csv\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output.default_path, PathBuf::from("out.csv"));
    }

    #[test]
    fn test_load_from_rejects_empty_payload_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[input]\npayload_columns = []\n").unwrap();

        assert!(Config::load_from(&path).is_err());
        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
