use std::path::PathBuf;

use anyhow::{Context, Result};
use navigator_core::analysis::{JavaParser, Query};
use navigator_core::render::source::extract_sources;
use navigator_core::services::{open_project, NavigationError, NavigationRequest, Navigator};
use tracing::debug;

use crate::canonicalize_or_current;
use crate::commands::{
    format_alternates, format_catalog, format_chain_summary, format_function_info,
    parse_http_method, write_outputs, RecordWithSources,
};

/// Arguments of a single navigation run, as parsed by the binary.
#[derive(Debug, Clone, Default)]
pub struct NavigateArgs {
    pub function_token: String,
    pub project_dir: String,
    pub max_depth: Option<usize>,
    pub http_method: Option<String>,
    pub json: bool,
    pub output_dir: Option<PathBuf>,
    pub with_source: bool,
}

/// Resolve the query, walk its call chain, and report it.
pub fn navigate_command(args: &NavigateArgs) -> Result<()> {
    let http_method = parse_http_method(args.http_method.as_deref())?;
    let root = canonicalize_or_current(&args.project_dir)?;
    debug!("navigate: token='{}' root={}", args.function_token, root.display());
    let ctx = open_project(&root)
        .with_context(|| format!("Failed to open project at {}", root.display()))?;

    let parser = JavaParser;
    let navigator = Navigator::new(&ctx, &parser);
    let request =
        NavigationRequest::new(Query::new(&args.function_token).with_http_method(http_method))
            .with_max_depth(args.max_depth);

    let outcome = match navigator.navigate(&request) {
        Ok(outcome) => outcome,
        Err(err) => {
            if let NavigationError::NotFound { available, .. } = &err {
                eprint!("{}", format_catalog(available));
            }
            return Err(err).context("Navigation failed");
        }
    };

    if !outcome.warnings.is_empty() {
        eprintln!("Skipped {} unparseable file(s):", outcome.warnings.len());
        for warning in &outcome.warnings {
            eprintln!("  {}: {}", ctx.layout.relative_string(&warning.path), warning.reason);
        }
    }

    let sources = args.with_source.then(|| extract_sources(&outcome.record));

    if let Some(dir) = &args.output_dir {
        let written = write_outputs(dir, &outcome, sources.as_deref())?;
        if !args.json {
            println!("Wrote:");
            for path in &written {
                println!("  {}", path.display());
            }
            println!();
        }
    }

    if args.json {
        if let Some(notice) = format_alternates(&args.function_token, &outcome) {
            eprint!("{notice}");
        }
        let json = match &sources {
            Some(sources) => serde_json::to_string_pretty(&RecordWithSources {
                call_chain: &outcome.record,
                sources,
            })?,
            None => serde_json::to_string_pretty(&outcome.record)?,
        };
        println!("{json}");
        return Ok(());
    }

    println!(
        "Indexed {} function(s) from {}",
        outcome.graph.len(),
        ctx.layout.relative_string(&ctx.source_root)
    );
    if let Some(notice) = format_alternates(&args.function_token, &outcome) {
        print!("{notice}");
    }
    println!("Call chain for: {}", outcome.record.target_function);
    println!();
    println!("```mermaid");
    print!("{}", outcome.diagram);
    println!("```");
    println!();
    println!("{}", format_chain_summary(&outcome.record));
    println!("{}", format_function_info(&outcome.record));

    if let Some(sources) = &sources {
        if args.output_dir.is_none() {
            println!("=== Source ===");
            println!();
            for source in sources {
                println!("// {}", source.function_name);
                print!("{}", source.code_contents);
                println!();
            }
        }
    }

    Ok(())
}
