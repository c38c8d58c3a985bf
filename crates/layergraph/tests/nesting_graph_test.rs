use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::nesting_graph::{cleanup, run};
use layergraph::{EdgeLabel, GraphLabel, NodeLabel};

fn opts() -> GraphOptions {
    GraphOptions {
        multigraph: true,
        compound: true,
        directed: true,
    }
}

#[test]
fn cleanup_removes_root_and_nesting_edges() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(opts());
    g.set_node("a", NodeLabel::default());
    g.set_node("sub", NodeLabel::default());
    g.set_node("b", NodeLabel::default());
    g.set_parent("b", Some("sub"));
    g.set_edge_with_label("a", "b", EdgeLabel::default());

    run(&mut g);
    assert!(g.graph().nesting_root.is_some());
    assert!(g.node("sub").unwrap().border_top.is_some());

    cleanup(&mut g);
    assert!(g.graph().nesting_root.is_none());
    for e in g.edge_keys() {
        assert!(!g.edge_by_key(&e).unwrap().nesting_edge);
    }
}
