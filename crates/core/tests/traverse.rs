use std::collections::HashSet;

use navigator_core::analysis::{traverse, VisitedChain};

mod common;

use common::{graph_of, node_id};

fn assert_edge_closure(chain: &VisitedChain) {
    for visited in &chain.nodes {
        for &target in &visited.calls {
            assert!(target < chain.len(), "edge to unvisited seq {target}");
        }
    }
}

fn assert_no_duplicates(chain: &VisitedChain) {
    let unique: HashSet<usize> = chain.nodes.iter().map(|v| v.node).collect();
    assert_eq!(unique.len(), chain.len());
}

#[test]
fn cycle_terminates_and_visits_each_node_once() {
    let graph = graph_of(&[("Loop.java", "class Loop {\n    void a() { b(); }\n    void b() { a(); }\n}\n")]);
    let a = node_id(&graph, "Loop.a");
    let b = node_id(&graph, "Loop.b");

    let chain = traverse(&graph, a, 10);
    let order: Vec<usize> = chain.nodes.iter().map(|v| v.node).collect();
    assert_eq!(order, vec![a, b]);
    assert_eq!(chain.nodes[0].calls, vec![1]);
    assert_eq!(chain.nodes[1].calls, vec![0]);
    assert_edge_closure(&chain);
}

#[test]
fn depth_zero_yields_single_node_without_edges() {
    let graph = graph_of(&[("Loop.java", "class Loop {\n    void a() { b(); }\n    void b() { a(); }\n}\n")]);
    let chain = traverse(&graph, node_id(&graph, "Loop.a"), 0);
    assert_eq!(chain.len(), 1);
    assert_eq!(chain.max_depth, 0);
    assert!(chain.nodes[0].calls.is_empty());
}

#[test]
fn self_recursion_reports_edge_only_when_expanded() {
    let graph = graph_of(&[("R.java", "class R {\n    void r() { r(); }\n}\n")]);
    let r = node_id(&graph, "R.r");
    assert!(traverse(&graph, r, 0).nodes[0].calls.is_empty());

    let chain = traverse(&graph, r, 1);
    assert_eq!(chain.len(), 1);
    assert_eq!(chain.nodes[0].calls, vec![0]);
}

#[test]
fn nodes_at_the_bound_are_not_expanded() {
    let graph = graph_of(&[(
        "Line.java",
        "class Line {\n    void a() { b(); }\n    void b() { c(); }\n    void c() { d(); }\n    void d() { }\n}\n",
    )]);
    let chain = traverse(&graph, node_id(&graph, "Line.a"), 2);
    let depths: Vec<(usize, usize)> = chain.nodes.iter().map(|v| (v.seq, v.depth)).collect();
    assert_eq!(depths, vec![(0, 0), (1, 1), (2, 2)]);
    assert_eq!(chain.nodes[2].node, node_id(&graph, "Line.c"));
    assert!(chain.nodes[2].calls.is_empty());
}

#[test]
fn diamond_visits_shared_callee_once() {
    let graph = graph_of(&[(
        "D.java",
        "class D {\n    void a() { b(); c(); }\n    void b() { d(); }\n    void c() { d(); }\n    void d() { }\n}\n",
    )]);
    let chain = traverse(&graph, node_id(&graph, "D.a"), 10);
    assert_eq!(chain.len(), 4);
    assert_no_duplicates(&chain);
    assert_eq!(chain.nodes[0].calls, vec![1, 2]);
    assert_eq!(chain.nodes[1].calls, vec![3]);
    assert_eq!(chain.nodes[2].calls, vec![3]);
    assert_edge_closure(&chain);
}
