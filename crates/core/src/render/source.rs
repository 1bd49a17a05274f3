//! Extraction of the source text behind each function of a record.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::render::CallChainRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSource {
    pub function_name: String,
    pub code_contents: String,
}

/// Read lines `start..=end` (1-based) of a file, keeping line terminators.
pub fn read_code_lines(path: &Path, start: usize, end: usize) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file {}", path.display()))?;
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    if start == 0 || start > end || end > lines.len() {
        return Err(anyhow!(
            "Invalid line range {}-{} for {} ({} lines)",
            start,
            end,
            path.display(),
            lines.len()
        ));
    }
    Ok(lines[start - 1..end].concat())
}

/// Source snippets for every function in `record`, in record order.
///
/// Entries whose file or range cannot be read are skipped with a warning.
pub fn extract_sources(record: &CallChainRecord) -> Vec<FunctionSource> {
    record
        .functions
        .iter()
        .filter_map(|func| {
            let function_name = format!("{}.{}", func.class_name, func.name);
            match read_code_lines(Path::new(&func.file_path), func.start_line, func.end_line) {
                Ok(code_contents) => Some(FunctionSource { function_name, code_contents }),
                Err(err) => {
                    warn!("source: skipping {}: {:#}", function_name, err);
                    None
                }
            }
        })
        .collect()
}
