use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use navigator_core::render::source::FunctionSource;
use navigator_core::services::NavigationOutcome;
use serde::Serialize;

/// File names written into `--output-dir`.
pub const DIAGRAM_FILE: &str = "call_chain.mmd";
pub const RECORD_FILE: &str = "call_chain.json";
pub const CLASSES_FILE: &str = "classes.json";
pub const SOURCES_FILE: &str = "sources.json";

/// `--json --with-source` payload.
#[derive(Debug, Serialize)]
pub struct RecordWithSources<'a> {
    pub call_chain: &'a navigator_core::render::CallChainRecord,
    pub sources: &'a [FunctionSource],
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the diagram, record, and class summary (plus sources if given) into `dir`.
///
/// Returns the written paths in write order.
pub fn write_outputs(
    dir: &Path,
    outcome: &NavigationOutcome,
    sources: Option<&[FunctionSource]>,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output dir: {}", dir.display()))?;

    let diagram_path = dir.join(DIAGRAM_FILE);
    fs::write(&diagram_path, &outcome.diagram)
        .with_context(|| format!("Failed to write {}", diagram_path.display()))?;

    let record_path = dir.join(RECORD_FILE);
    write_json(&record_path, &outcome.record)?;

    let classes_path = dir.join(CLASSES_FILE);
    write_json(&classes_path, &outcome.class_summaries)?;

    let mut written = vec![diagram_path, record_path, classes_path];
    if let Some(sources) = sources {
        let sources_path = dir.join(SOURCES_FILE);
        write_json(&sources_path, sources)?;
        written.push(sources_path);
    }
    Ok(written)
}
