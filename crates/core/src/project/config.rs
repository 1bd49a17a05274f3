use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_DEPTH: usize = 10;

fn default_source_dir() -> String {
    "src".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["java".to_string()]
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_exclude_dirs() -> Vec<String> {
    [".git", "target", "build", "node_modules"].iter().map(|s| s.to_string()).collect()
}

/// Error type for loading the optional project config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Serializable per-project settings.
///
/// Lives (optionally) at `.navigator/config.yaml` or `.navigator/config.json`
/// in the project root; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Source subdirectory the indexer is restricted to.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Eligible file extensions, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Depth bound used when the caller does not pass one.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Directory names skipped during the walk.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    /// Method names never recorded as call targets.
    #[serde(default)]
    pub skip_calls: Vec<String>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            extensions: default_extensions(),
            max_depth: default_max_depth(),
            exclude_dirs: default_exclude_dirs(),
            skip_calls: Vec::new(),
        }
    }
}

impl NavigatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("'source_dir' must not be empty".into()));
        }
        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(ConfigError::Invalid("'extensions' must name at least one extension".into()));
        }
        Ok(())
    }
}
