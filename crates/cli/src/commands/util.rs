use anyhow::{anyhow, Result};
use navigator_core::analysis::CatalogEntry;
use navigator_core::model::HttpMethod;
use navigator_core::render::CallChainRecord;
use navigator_core::services::NavigationOutcome;

/// Parse an optional `--http-method` value.
pub fn parse_http_method(raw: Option<&str>) -> Result<Option<HttpMethod>> {
    raw.map(|m| {
        HttpMethod::parse(m).ok_or_else(|| {
            anyhow!("Unknown HTTP method '{m}' (expected GET, POST, PUT, DELETE, PATCH, or REQUEST)")
        })
    })
    .transpose()
}

/// Listing of every known function, printed when a query matches nothing.
pub fn format_catalog(entries: &[CatalogEntry]) -> String {
    let mut out = String::from("Available functions:\n");
    if entries.is_empty() {
        out.push_str("  (none indexed)\n");
    }
    for entry in entries {
        match (&entry.http_method, &entry.endpoint_path) {
            (Some(method), Some(path)) => {
                out.push_str(&format!("  {} (REST: {} {})\n", entry.qualified_name, method, path))
            }
            _ => out.push_str(&format!("  {}\n", entry.qualified_name)),
        }
    }
    out
}

/// Notice listing matches that were not traversed.
pub fn format_alternates(token: &str, outcome: &NavigationOutcome) -> Option<String> {
    if !outcome.is_ambiguous() {
        return None;
    }
    let mut out = format!(
        "Multiple functions match '{}'; using the first: {}\n",
        token, outcome.record.target_function
    );
    for alt in &outcome.alternates {
        out.push_str(&format!("  other match: {alt}\n"));
    }
    Some(out)
}

pub fn format_chain_summary(record: &CallChainRecord) -> String {
    let mut lines = vec![
        "=== Call Chain Summary ===".to_string(),
        format!("Total functions in chain: {}", record.total_functions),
        format!("Starting function: {}", record.target_function),
    ];
    if let Some(start) = record.functions.first().filter(|f| f.is_rest_endpoint) {
        lines.push(format!("REST Endpoint: {} {}", start.http_method, start.endpoint_path));
    }
    lines.push(format!("Max depth: {}", record.max_depth));
    lines.push(String::new());
    lines.join("\n")
}

pub fn format_function_info(record: &CallChainRecord) -> String {
    let mut lines = vec!["=== Function Information ===".to_string(), String::new()];
    for (i, func) in record.functions.iter().enumerate() {
        lines.push(format!("{}. {}.{}", i + 1, func.class_name, func.name));
        if func.is_rest_endpoint {
            lines.push(format!("   REST Endpoint: {} {}", func.http_method, func.endpoint_path));
        }
        lines.push(format!("   File: {}", func.file_path));
        lines.push(format!("   Lines: {}-{}", func.start_line, func.end_line));
        lines.push(format!("   Public: {}", if func.is_public { "Yes" } else { "No" }));
        if func.called_functions.is_empty() {
            lines.push("   Calls: None".to_string());
        } else {
            lines.push(format!("   Calls: {}", func.called_functions.join(", ")));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}
