use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use java_navigator::commands::{navigate_command, NavigateArgs};
use java_navigator::init_tracing;

/// Call-chain navigator for Java source trees.
///
/// This CLI is a thin wrapper around `navigator-core` (exposed in code as
/// `navigator_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "java-navigator",
    version,
    about = "Trace the call chain of a Java function or REST endpoint",
    long_about = None
)]
struct Cli {
    /// Function name, `Class.method`, or REST path (e.g. `/api/users/{id}`).
    /// REST paths must start with `/`; `api/users` is treated as a name.
    function_token: String,

    /// Project root containing the source directory.
    project_dir: String,

    /// Maximum traversal depth. Defaults to the project config (10).
    #[arg(long)]
    max_depth: Option<usize>,

    /// HTTP method filter for REST path queries (GET, POST, ...).
    #[arg(long)]
    http_method: Option<String>,

    /// Enable debug logging on stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Print only the structured record as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write `call_chain.mmd`, `call_chain.json`, and `classes.json` here.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also extract the source text of every function in the chain.
    #[arg(long, default_value_t = false)]
    with_source: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let args = NavigateArgs {
        function_token: cli.function_token,
        project_dir: cli.project_dir,
        max_depth: cli.max_depth,
        http_method: cli.http_method,
        json: cli.json,
        output_dir: cli.output_dir,
        with_source: cli.with_source,
    };
    navigate_command(&args)
}
