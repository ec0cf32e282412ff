use serde::{Deserialize, Serialize};

/// Layout of `floatchat.yaml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub server: ServerSection,
    pub default_query: String,
    pub log_level: String,
    pub output_dir: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            server: ServerSection::default(),
            default_query: "ocean data".to_string(),
            log_level: "info".to_string(),
            output_dir: "./data/runs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}
