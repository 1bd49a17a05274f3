//! Resolution of a user token to start nodes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::annotations::normalize_path;
use crate::analysis::CallGraph;
use crate::model::{HttpMethod, QualifiedName};

/// What the user asked for: a bare name, `Class.method`, or a REST path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub token: String,
    /// Only consulted for REST path tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<HttpMethod>,
}

impl Query {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), http_method: None }
    }

    pub fn with_http_method(mut self, method: Option<HttpMethod>) -> Self {
        self.http_method = method;
        self
    }

    pub fn is_path(&self) -> bool {
        self.token.trim_start().starts_with('/')
    }
}

/// Which rule produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    RestPath,
    Qualified,
    BareName,
}

/// Primary start node plus informational alternates, all in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMatch {
    pub rule: MatchRule,
    pub primary: usize,
    pub alternates: Vec<usize>,
}

impl QueryMatch {
    pub fn is_ambiguous(&self) -> bool {
        !self.alternates.is_empty()
    }
}

/// Apply REST path, then qualified, then bare-name matching; the first rule
/// with at least one hit wins. `None` means nothing matched.
pub fn match_query(graph: &CallGraph, query: &Query) -> Option<QueryMatch> {
    let rules: [(MatchRule, Vec<usize>); 3] = [
        (MatchRule::RestPath, match_rest_path(graph, query)),
        (MatchRule::Qualified, match_qualified(graph, &query.token)),
        (MatchRule::BareName, match_bare_name(graph, &query.token)),
    ];

    let (rule, hits) = rules.into_iter().find(|(_, hits)| !hits.is_empty())?;
    debug!("query: '{}' matched {} node(s) by {:?}", query.token, hits.len(), rule);
    let mut hits = hits.into_iter();
    let primary = hits.next()?;
    Some(QueryMatch { rule, primary, alternates: hits.collect() })
}

fn match_rest_path(graph: &CallGraph, query: &Query) -> Vec<usize> {
    if !query.is_path() {
        return Vec::new();
    }
    let wanted = normalize_path(&[query.token.trim()]);
    graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| {
            node.rest.as_ref().is_some_and(|rest| {
                rest.path == wanted
                    && query.http_method.map_or(true, |m| rest.http_method.accepts(m))
            })
        })
        .map(|(i, _)| i)
        .collect()
}

fn match_qualified(graph: &CallGraph, token: &str) -> Vec<usize> {
    QualifiedName::parse(token.trim()).and_then(|q| graph.find(&q)).into_iter().collect()
}

fn match_bare_name(graph: &CallGraph, token: &str) -> Vec<usize> {
    let token = token.trim();
    graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.name == token)
        .map(|(i, _)| i)
        .collect()
}
