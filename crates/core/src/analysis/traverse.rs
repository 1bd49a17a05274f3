//! Depth-bounded breadth-first walk over the call graph.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::analysis::CallGraph;

/// A node reached by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedNode {
    /// BFS discovery order, 0-based.
    pub seq: usize,
    /// Graph node index.
    pub node: usize,
    pub depth: usize,
    /// Sequence ids of retained callees, in edge order.
    pub calls: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedChain {
    pub max_depth: usize,
    pub nodes: Vec<VisitedNode>,
}

impl VisitedChain {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<&VisitedNode> {
        self.nodes.first()
    }
}

/// Walk from `start`, expanding a node at depth `d` only while `d < max_depth`.
///
/// The seen-set is filled on discovery, so no node is enqueued twice and the
/// walk ends after at most `graph.len()` steps even on cyclic graphs. Only
/// expanded nodes report edges; every edge of an expanded node points at a
/// visited node.
pub fn traverse(graph: &CallGraph, start: usize, max_depth: usize) -> VisitedChain {
    let mut seq_of: HashMap<usize, usize> = HashMap::from([(start, 0)]);
    let mut order = vec![(start, 0usize)];
    let mut queue = VecDeque::from([(start, 0usize)]);

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for &next in graph.successors(node) {
            if seq_of.contains_key(&next) {
                continue;
            }
            seq_of.insert(next, order.len());
            order.push((next, depth + 1));
            queue.push_back((next, depth + 1));
        }
    }

    let nodes: Vec<VisitedNode> = order
        .iter()
        .enumerate()
        .map(|(seq, &(node, depth))| {
            let calls = if depth < max_depth {
                graph.successors(node).iter().filter_map(|t| seq_of.get(t).copied()).collect()
            } else {
                Vec::new()
            };
            VisitedNode { seq, node, depth, calls }
        })
        .collect();

    debug!(
        "traverse: start={} max_depth={} visited={}",
        graph.node(start).qualified_name(),
        max_depth,
        nodes.len()
    );
    VisitedChain { max_depth, nodes }
}
