//! Source tree walking and per-file declaration indexing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::analysis::ParseError;
use crate::model::ClassDecl;

/// Trait implemented by language frontends (currently only Java).
pub trait SourceParser: Send + Sync {
    fn parse(&self, path: &Path, source: &str) -> Result<Vec<ClassDecl>, ParseError>;
    fn name(&self) -> &'static str;
}

/// A file that was skipped during indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// File extensions (without the dot) that are eligible for parsing.
    pub extensions: Vec<String>,
    /// Directory names that are never descended into.
    pub exclude_dirs: Vec<String>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["java".to_string()],
            exclude_dirs: Vec::new(),
        }
    }
}

/// Every class found under the source root, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    pub classes: Vec<ClassDecl>,
    pub warnings: Vec<ParseWarning>,
    pub files_scanned: usize,
}

impl SourceIndex {
    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}

/// Walk `source_root` in sorted order and parse every eligible file.
///
/// A file that fails to read or parse is recorded as a [`ParseWarning`] and
/// the walk continues.
pub fn index_sources(
    source_root: &Path,
    parser: &dyn SourceParser,
    options: &IndexOptions,
) -> SourceIndex {
    info!("indexer: start ({}) -> {}", parser.name(), source_root.display());
    let mut index = SourceIndex::default();

    let walker = WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| keep_entry(e, &options.exclude_dirs));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("indexer: walk error: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_extension(entry.path(), &options.extensions) {
            continue;
        }
        index.files_scanned += 1;

        let path = entry.path();
        match parse_file(path, parser) {
            Ok(classes) => {
                debug!("indexer: {} -> {} classes", path.display(), classes.len());
                index.classes.extend(classes);
            }
            Err(err) => {
                warn!("indexer: skipping {}: {}", path.display(), err);
                index.warnings.push(ParseWarning { path: path.to_path_buf(), reason: err.to_string() });
            }
        }
    }

    info!(
        "indexer: done, files={} classes={} methods={} skipped={}",
        index.files_scanned,
        index.classes.len(),
        index.method_count(),
        index.warnings.len()
    );
    index
}

fn parse_file(path: &Path, parser: &dyn SourceParser) -> Result<Vec<ClassDecl>, ParseError> {
    let bytes = fs::read(path)?;
    let source = String::from_utf8(bytes).map_err(|_| ParseError::Encoding)?;
    parser.parse(path, &source)
}

fn keep_entry(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    if entry.depth() > 0 && entry.file_type().is_dir() {
        if let Some(name) = entry.file_name().to_str() {
            return !exclude_dirs.iter().any(|d| d == name);
        }
    }
    true
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}
