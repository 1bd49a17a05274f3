//! Serialization of a visited chain into a Mermaid diagram and a JSON record.
//!
//! Both renderers are pure; writing files is left to the frontend.

pub mod source;

use serde::{Deserialize, Serialize};

use crate::analysis::{CallGraph, VisitedChain};
use crate::model::MethodDecl;

/// Per-function entry of the structured record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    pub class_name: String,
    pub file_path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub is_public: bool,
    pub is_rest_endpoint: bool,
    pub endpoint_path: String,
    pub http_method: String,
    pub called_functions: Vec<String>,
}

/// Structured form of a call chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallChainRecord {
    pub start_point: String,
    pub target_function: String,
    pub total_functions: usize,
    pub max_depth: usize,
    pub functions: Vec<FunctionRecord>,
}

/// Mermaid flowchart: node lines in visit order, then edges by source order.
pub fn render_mermaid(graph: &CallGraph, chain: &VisitedChain) -> String {
    let mut out = String::from("graph TD\n");
    for visited in &chain.nodes {
        let label = node_label(graph.node(visited.node));
        out.push_str(&format!("    node{}[\"{}\"]\n", visited.seq, label));
    }
    for visited in &chain.nodes {
        for target in &visited.calls {
            out.push_str(&format!("    node{} --> node{}\n", visited.seq, target));
        }
    }
    out
}

fn node_label(method: &MethodDecl) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(rest) = &method.rest {
        parts.push(format!("{} {}", rest.http_method, rest.path));
    }
    parts.push(format!("{}.{}", method.class_name, method.name));
    parts.push(format!("L{}-{}", method.start_line, method.end_line));
    // Escaped newline keeps each node on a single diagram line.
    parts.join("\\n").replace('"', "#quot;")
}

/// Build the structured record for `chain`.
pub fn build_record(graph: &CallGraph, chain: &VisitedChain, start_point: &str) -> CallChainRecord {
    let functions: Vec<FunctionRecord> = chain
        .nodes
        .iter()
        .map(|visited| {
            let method = graph.node(visited.node);
            let called_functions = visited
                .calls
                .iter()
                .map(|&seq| graph.node(chain.nodes[seq].node).qualified_name().to_string())
                .collect();
            FunctionRecord {
                name: method.name.clone(),
                class_name: method.class_name.clone(),
                file_path: method.file_path.display().to_string(),
                start_line: method.start_line,
                end_line: method.end_line,
                is_public: method.is_public,
                is_rest_endpoint: method.rest.is_some(),
                endpoint_path: method.rest.as_ref().map(|r| r.path.clone()).unwrap_or_default(),
                http_method: method
                    .rest
                    .as_ref()
                    .map(|r| r.http_method.to_string())
                    .unwrap_or_default(),
                called_functions,
            }
        })
        .collect();

    let target_function = chain
        .start()
        .map(|s| graph.node(s.node).qualified_name().to_string())
        .unwrap_or_default();

    CallChainRecord {
        start_point: start_point.to_string(),
        target_function,
        total_functions: functions.len(),
        max_depth: chain.max_depth,
        functions,
    }
}
