//! Project layout and configuration.
//!
//! A project is any directory containing the configured source subdirectory
//! (default `src`). An optional `.navigator/` directory holds a config file
//! overriding the defaults.

pub mod config;
pub mod layout;

use std::fs;
use std::path::{Path, PathBuf};

pub use config::{ConfigError, NavigatorConfig, DEFAULT_MAX_DEPTH};
pub use layout::ProjectLayout;

/// Load the project config for a layout, falling back to defaults when no
/// config file exists. YAML is preferred over JSON.
pub fn load_config(layout: &ProjectLayout) -> Result<NavigatorConfig, ConfigError> {
    let Some(path) = layout.config_candidates().into_iter().find(|p| p.is_file()) else {
        return Ok(NavigatorConfig::default());
    };
    let body = fs::read(path)
        .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
    let config: NavigatorConfig = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_slice(&body)?
    } else {
        serde_yaml::from_slice(&body)?
    };
    config.validate()?;
    Ok(config)
}

/// Convenience wrapper bundling layout, config, and the resolved source root.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub layout: ProjectLayout,
    pub config: NavigatorConfig,
    pub source_root: PathBuf,
}

impl ProjectContext {
    /// Load the project config for a given root. Does not check the source root.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let layout = ProjectLayout::new(root);
        let config = load_config(&layout)?;
        Ok(Self::with_config(layout, config))
    }

    pub fn with_config(layout: ProjectLayout, config: NavigatorConfig) -> Self {
        let source_root = layout.source_root(&config);
        Self { layout, config, source_root }
    }

    pub fn has_source_root(&self) -> bool {
        self.source_root.is_dir()
    }
}
