//! Project-wide call graph assembly.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::resolver::CallResolver;
use crate::analysis::SourceIndex;
use crate::model::{CallEdge, CalleeRef, ClassKind, MethodDecl, QualifiedName};

/// Immutable call graph built once per query.
///
/// Nodes are stored in discovery order; node indices are stable for the
/// lifetime of the value and are what the matcher and traverser hand around.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    nodes: Vec<MethodDecl>,
    index: HashMap<QualifiedName, usize>,
    /// Callee references after opportunistic resolution, including dangling ones.
    callees: Vec<Vec<CalleeRef>>,
    /// Resolved successors consumed by traversal.
    adjacency: Vec<Vec<usize>>,
    classes: Vec<ClassInfo>,
}

/// Class-level facts retained for the class summary.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ClassInfo {
    name: String,
    kind: ClassKind,
    file_path: PathBuf,
    start_line: usize,
    end_line: usize,
    is_public: bool,
    base_path: Option<String>,
    method_count: usize,
}

/// One line of the "available functions" listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub qualified_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSummary {
    pub class_name: String,
    pub kind: ClassKind,
    pub file_path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub is_public: bool,
    pub is_rest_endpoint: bool,
    pub endpoint_path: String,
    pub method_count: usize,
    pub dependencies: Vec<String>,
}

impl CallGraph {
    /// Merge the index into a graph.
    ///
    /// Duplicate identities keep the first declaration and union their edges.
    /// Unqualified references fan out to every method of that name; when no
    /// method matches they stay dangling and never reach the adjacency.
    pub fn build(index: SourceIndex, resolver: &CallResolver) -> Self {
        let mut graph = CallGraph::default();

        for class in &index.classes {
            graph.classes.push(ClassInfo {
                name: class.name.clone(),
                kind: class.kind,
                file_path: class.file_path.clone(),
                start_line: class.start_line,
                end_line: class.end_line,
                is_public: class.is_public,
                base_path: class.base_path.clone(),
                method_count: class.methods.len(),
            });

            for method in &class.methods {
                let calls = resolver.resolve(class, method);
                let id = method.qualified_name();
                match graph.index.get(&id) {
                    Some(&existing) => {
                        warn!(
                            "graph: {} declared again at {}:{}; overloads share one node",
                            id,
                            method.file_path.display(),
                            method.start_line
                        );
                        for call in calls {
                            push_unique(&mut graph.callees[existing], call);
                        }
                    }
                    None => {
                        graph.index.insert(id, graph.nodes.len());
                        let mut node = method.clone();
                        node.body = String::new();
                        graph.nodes.push(node);
                        graph.callees.push(calls);
                    }
                }
            }
        }

        graph.resolve_unqualified();
        graph.build_adjacency();
        info!(
            "graph: nodes={} edges={}",
            graph.nodes.len(),
            graph.adjacency.iter().map(Vec::len).sum::<usize>()
        );
        graph
    }

    fn resolve_unqualified(&mut self) {
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, node) in self.nodes.iter().enumerate() {
            by_name.entry(node.name.as_str()).or_default().push(i);
        }

        let mut resolved_all = Vec::with_capacity(self.callees.len());
        for calls in &self.callees {
            let mut resolved = Vec::with_capacity(calls.len());
            for call in calls {
                match call {
                    CalleeRef::Unqualified(name) => match by_name.get(name.as_str()) {
                        Some(candidates) => {
                            if candidates.len() > 1 {
                                debug!("graph: unqualified {} fans out to {}", name, candidates.len());
                            }
                            for &c in candidates {
                                push_unique(
                                    &mut resolved,
                                    CalleeRef::Qualified(self.nodes[c].qualified_name()),
                                );
                            }
                        }
                        None => push_unique(&mut resolved, call.clone()),
                    },
                    CalleeRef::Qualified(_) => push_unique(&mut resolved, call.clone()),
                }
            }
            resolved_all.push(resolved);
        }
        self.callees = resolved_all;
    }

    fn build_adjacency(&mut self) {
        self.adjacency = self
            .callees
            .iter()
            .map(|calls| {
                let mut targets = Vec::new();
                for call in calls {
                    if let CalleeRef::Qualified(q) = call {
                        if let Some(&target) = self.index.get(q) {
                            if !targets.contains(&target) {
                                targets.push(target);
                            }
                        }
                    }
                }
                targets
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: usize) -> &MethodDecl {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[MethodDecl] {
        &self.nodes
    }

    pub fn find(&self, name: &QualifiedName) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Callee references of a node, dangling ones included.
    pub fn callees(&self, id: usize) -> &[CalleeRef] {
        &self.callees[id]
    }

    /// Every caller-to-callee relation after fan-out, dangling ones included.
    pub fn edges(&self) -> Vec<CallEdge> {
        self.nodes
            .iter()
            .zip(&self.callees)
            .flat_map(|(node, calls)| {
                calls.iter().map(move |callee| CallEdge {
                    caller: node.qualified_name(),
                    callee: callee.clone(),
                })
            })
            .collect()
    }

    /// Resolved successor nodes, in edge order.
    pub fn successors(&self, id: usize) -> &[usize] {
        &self.adjacency[id]
    }

    /// Every node sorted by qualified name, with its route if it has one.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .nodes
            .iter()
            .map(|n| CatalogEntry {
                qualified_name: n.qualified_name().to_string(),
                http_method: n.rest.as_ref().map(|r| r.http_method.to_string()),
                endpoint_path: n.rest.as_ref().map(|r| r.path.clone()),
            })
            .collect();
        entries.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
        entries
    }

    /// One summary per indexed class, in discovery order.
    pub fn class_summaries(&self) -> Vec<ClassSummary> {
        self.classes
            .iter()
            .map(|class| {
                let dependencies: BTreeSet<String> = self
                    .nodes
                    .iter()
                    .enumerate()
                    .filter(|(_, n)| n.class_name == class.name)
                    .flat_map(|(i, _)| self.adjacency[i].iter())
                    .map(|&t| self.nodes[t].class_name.clone())
                    .filter(|dep| *dep != class.name)
                    .collect();
                ClassSummary {
                    class_name: class.name.clone(),
                    kind: class.kind,
                    file_path: class.file_path.display().to_string(),
                    start_line: class.start_line,
                    end_line: class.end_line,
                    is_public: class.is_public,
                    is_rest_endpoint: class.base_path.is_some(),
                    endpoint_path: class.base_path.clone().unwrap_or_default(),
                    method_count: class.method_count,
                    dependencies: dependencies.into_iter().collect(),
                }
            })
            .collect()
    }
}

fn push_unique(calls: &mut Vec<CalleeRef>, call: CalleeRef) {
    if !calls.contains(&call) {
        calls.push(call);
    }
}
