use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::{
    index_sources, match_query, traverse, CallGraph, CallResolver, CatalogEntry, ClassSummary,
    IndexOptions, MatchRule, ParseWarning, Query, QueryMatch, SourceIndex, SourceParser,
    VisitedChain,
};
use crate::project::{ConfigError, ProjectContext};
use crate::render::{build_record, render_mermaid, CallChainRecord};

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Source directory not found at {}", .source_root.display())]
    InvalidProject { source_root: PathBuf },
    #[error("No function matches '{token}'")]
    NotFound { token: String, available: Vec<CatalogEntry> },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Request to navigate from one query token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub query: Query,
    /// Falls back to the project config when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl NavigationRequest {
    pub fn new(query: Query) -> Self {
        Self { query, max_depth: None }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Everything a frontend needs to report one navigation run.
#[derive(Debug, Clone)]
pub struct NavigationOutcome {
    pub record: CallChainRecord,
    pub diagram: String,
    pub chain: VisitedChain,
    pub rule: MatchRule,
    /// Qualified names of matches that were not traversed.
    pub alternates: Vec<String>,
    pub warnings: Vec<ParseWarning>,
    pub class_summaries: Vec<ClassSummary>,
    pub graph: CallGraph,
}

impl NavigationOutcome {
    pub fn is_ambiguous(&self) -> bool {
        !self.alternates.is_empty()
    }
}

/// Load the project at `root` and verify its source directory exists.
pub fn open_project(root: impl AsRef<Path>) -> Result<ProjectContext, NavigationError> {
    let ctx = ProjectContext::from_root(root)?;
    if !ctx.has_source_root() {
        return Err(NavigationError::InvalidProject { source_root: ctx.source_root.clone() });
    }
    Ok(ctx)
}

/// Coordinator that ties project context + parser to a single pipeline run.
pub struct Navigator<'a> {
    pub ctx: &'a ProjectContext,
    pub parser: &'a dyn SourceParser,
}

impl<'a> Navigator<'a> {
    pub fn new(ctx: &'a ProjectContext, parser: &'a dyn SourceParser) -> Self {
        Self { ctx, parser }
    }

    fn index_options(&self) -> IndexOptions {
        IndexOptions {
            extensions: self.ctx.config.extensions.clone(),
            exclude_dirs: self.ctx.config.exclude_dirs.clone(),
        }
    }

    /// Index the source root. Fails without parsing if the directory is missing.
    pub fn index(&self) -> Result<SourceIndex, NavigationError> {
        if !self.ctx.has_source_root() {
            return Err(NavigationError::InvalidProject {
                source_root: self.ctx.source_root.clone(),
            });
        }
        Ok(index_sources(&self.ctx.source_root, self.parser, &self.index_options()))
    }

    /// Index, resolve, and assemble the project call graph.
    pub fn build_graph(&self) -> Result<(CallGraph, Vec<ParseWarning>), NavigationError> {
        let mut index = self.index()?;
        let warnings = std::mem::take(&mut index.warnings);
        let resolver = CallResolver::new(&index, &self.ctx.config.skip_calls);
        Ok((CallGraph::build(index, &resolver), warnings))
    }

    pub fn navigate(&self, request: &NavigationRequest) -> Result<NavigationOutcome, NavigationError> {
        let (graph, warnings) = self.build_graph()?;
        let max_depth = request.max_depth.unwrap_or(self.ctx.config.max_depth);

        let Some(QueryMatch { rule, primary, alternates }) = match_query(&graph, &request.query)
        else {
            return Err(NavigationError::NotFound {
                token: request.query.token.clone(),
                available: graph.catalog(),
            });
        };

        let alternates: Vec<String> = alternates
            .iter()
            .map(|&id| graph.node(id).qualified_name().to_string())
            .collect();
        if !alternates.is_empty() {
            warn!(
                "navigate: '{}' is ambiguous; using {} (also matched: {})",
                request.query.token,
                graph.node(primary).qualified_name(),
                alternates.join(", ")
            );
        }

        let chain = traverse(&graph, primary, max_depth);
        let diagram = render_mermaid(&graph, &chain);
        let record = build_record(&graph, &chain, &request.query.token);
        info!(
            "navigate: {} -> {} function(s) at max depth {}",
            record.target_function, record.total_functions, max_depth
        );

        Ok(NavigationOutcome {
            record,
            diagram,
            chain,
            rule,
            alternates,
            warnings,
            class_summaries: graph.class_summaries(),
            graph,
        })
    }
}
