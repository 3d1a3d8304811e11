use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::error::{Result, SchemaError};

/// Remote schema registry loaded from a TOML file:
///
/// ```toml
/// [[remotes]]
/// uri = "http://localhost:1234/integer.json"
/// path = "schemas/integer.json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotesConfig {
    #[serde(default)]
    pub remotes: Vec<RemoteEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub uri: String,
    pub path: String,
}

impl RemotesConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SchemaError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Load every mapped document, resolving relative paths against `base_dir`.
    pub fn load_schemas(&self, base_dir: &Path) -> Result<HashMap<String, Value>> {
        let mut schemas = HashMap::with_capacity(self.remotes.len());
        for entry in &self.remotes {
            let path = base_dir.join(&entry.path);
            let content = std::fs::read_to_string(&path)?;
            schemas.insert(entry.uri.clone(), serde_json::from_str(&content)?);
        }
        Ok(schemas)
    }
}
