//! Analysis pipeline: indexing, call resolution, graph assembly, query
//! matching, and traversal.
//!
//! Stages run strictly in sequence. The index is complete before any call is
//! resolved, and the resulting [`CallGraph`] is read-only for everything
//! downstream.

pub mod annotations;
pub mod graph;
pub mod indexer;
pub mod java;
pub mod query;
pub mod resolver;
pub mod scanner;
pub mod traverse;

use thiserror::Error;

pub use graph::{CallGraph, CatalogEntry, ClassSummary};
pub use indexer::{index_sources, IndexOptions, ParseWarning, SourceIndex, SourceParser};
pub use java::JavaParser;
pub use query::{match_query, MatchRule, Query, QueryMatch};
pub use resolver::CallResolver;
pub use traverse::{traverse, VisitedChain, VisitedNode};

/// Reasons a single source file is skipped during indexing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is not valid UTF-8")]
    Encoding,
    #[error("unbalanced braces near line {line}")]
    Unbalanced { line: usize },
}
