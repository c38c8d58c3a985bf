use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::position::bk::position_x;
use layergraph::{DummyKind, EdgeLabel, GraphLabel, NodeLabel};

fn dummy_node() -> NodeLabel {
    NodeLabel {
        width: 10.0,
        height: 10.0,
        dummy: Some(DummyKind::Edge),
        ..Default::default()
    }
}

#[test]
fn straightens_a_dummy_chain_over_a_real_node() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: false,
        directed: true,
    });
    g.set_node(
        "a",
        NodeLabel {
            width: 10.0,
            height: 10.0,
            rank: Some(0),
            order: Some(0),
            ..Default::default()
        },
    );
    g.set_node(
        "b",
        NodeLabel {
            width: 10.0,
            height: 10.0,
            rank: Some(1),
            order: Some(0),
            ..dummy_node()
        },
    );
    g.set_node(
        "c",
        NodeLabel {
            width: 10.0,
            height: 10.0,
            rank: Some(2),
            order: Some(0),
            ..Default::default()
        },
    );
    g.set_edge_with_label("a", "b", EdgeLabel::default());
    g.set_edge_with_label("b", "c", EdgeLabel::default());

    let xs = position_x(&g);
    assert!((xs["a"] - xs["b"]).abs() < 1e-6);
    assert!((xs["b"] - xs["c"]).abs() < 1e-6);
}

#[test]
fn separates_siblings_by_nodesep() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: false,
        directed: true,
    });
    g.set_node(
        "a",
        NodeLabel {
            width: 10.0,
            height: 10.0,
            rank: Some(0),
            order: Some(0),
            ..Default::default()
        },
    );
    g.set_node(
        "b",
        NodeLabel {
            width: 10.0,
            height: 10.0,
            rank: Some(0),
            order: Some(1),
            ..Default::default()
        },
    );

    let xs = position_x(&g);
    assert!(xs["b"] - xs["a"] >= 10.0 + 50.0 - 1e-6);
}
