use std::path::{Path, PathBuf};

use crate::project::NavigatorConfig;

/// Logical layout of a project on disk.
///
/// This is derived from a chosen root path. It does *not* perform any IO itself.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Root directory of the project.
    pub root: PathBuf,
    /// Directory for navigator metadata (.navigator).
    pub meta_dir: PathBuf,
    /// Optional YAML config (`.navigator/config.yaml`).
    pub config_yaml_path: PathBuf,
    /// Alternate YAML config spelling (`.navigator/config.yml`).
    pub config_yml_path: PathBuf,
    /// Optional JSON config (`.navigator/config.json`).
    pub config_json_path: PathBuf,
}

impl ProjectLayout {
    /// Compute the default layout for a project rooted at `root`.
    ///
    /// This does *not* touch the filesystem.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let meta_dir = root.join(".navigator");
        let config_yaml_path = meta_dir.join("config.yaml");
        let config_yml_path = meta_dir.join("config.yml");
        let config_json_path = meta_dir.join("config.json");

        Self { root, meta_dir, config_yaml_path, config_yml_path, config_json_path }
    }

    /// Config files in lookup order; the first one that exists is used.
    pub fn config_candidates(&self) -> [&Path; 3] {
        [
            self.config_yaml_path.as_path(),
            self.config_yml_path.as_path(),
            self.config_json_path.as_path(),
        ]
    }

    /// Directory the indexer walks, per the configured `source_dir`.
    pub fn source_root(&self, config: &NavigatorConfig) -> PathBuf {
        let dir = Path::new(&config.source_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.root.join(dir)
        }
    }

    /// Render `path` relative to the project root when possible.
    pub fn relative_string(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_string_lossy().to_string(),
            Err(_) => path.to_string_lossy().to_string(),
        }
    }
}
