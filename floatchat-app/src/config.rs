use anyhow::{Context, Result};
use floatchat_schemas::file_formats::ConfigFile;
use std::{fs, path::Path};
use tracing::info;

/// Runtime settings: `floatchat.yaml` merged with command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub default_query: String,
    pub log_level: String,
    pub output_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        ConfigFile::default().into()
    }
}

impl From<ConfigFile> for AppConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            host: file.server.host,
            port: file.server.port,
            default_query: file.default_query,
            log_level: file.log_level,
            output_dir: file.output_dir,
        }
    }
}

impl AppConfig {
    /// Loads the YAML file at `path`. A missing file yields the defaults; a
    /// file that exists but does not parse is an error.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!("No config file at '{}', using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse YAML from {}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(file.into())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let config = AppConfig::load("/no/such/floatchat.yaml").unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.default_query, "ocean data");
        assert_eq!(config.output_dir, "./data/runs");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::from_yaml("server:\n  port: 8080\nlog_level: debug\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.default_query, "ocean data");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("floatchat.yaml");
        fs::write(&path, "server: [not, a, map]\n").unwrap();
        let err = AppConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse YAML"));
    }
}
