use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::normalize::{run, undo};
use layergraph::{DummyKind, EdgeLabel, GraphLabel, NodeLabel, Point};

fn opts() -> GraphOptions {
    GraphOptions {
        multigraph: true,
        compound: false,
        directed: true,
    }
}

#[test]
fn splits_a_three_rank_edge_into_two_dummies() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(opts());
    g.set_node(
        "a",
        NodeLabel {
            rank: Some(0),
            ..Default::default()
        },
    );
    g.set_node(
        "b",
        NodeLabel {
            rank: Some(2),
            ..Default::default()
        },
    );
    g.set_edge_with_label("a", "b", EdgeLabel::default());

    run(&mut g);

    assert_eq!(g.graph().dummy_chains.len(), 1);
    assert!(!g.has_edge("a", "b", None));
    let mid = g.successors("a")[0].to_string();
    assert_eq!(g.node(&mid).unwrap().rank, Some(1));
    assert_eq!(g.node(&mid).unwrap().dummy, Some(DummyKind::Edge));
    assert!(g.has_edge(&mid, "b", None));
}

#[test]
fn leaves_unit_length_edges_alone() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(opts());
    g.set_node(
        "a",
        NodeLabel {
            rank: Some(0),
            ..Default::default()
        },
    );
    g.set_node(
        "b",
        NodeLabel {
            rank: Some(1),
            ..Default::default()
        },
    );
    g.set_edge_with_label("a", "b", EdgeLabel::default());

    run(&mut g);
    assert!(g.graph().dummy_chains.is_empty());
    assert!(g.has_edge("a", "b", None));
}

#[test]
fn undo_collapses_the_chain_back_with_collected_points() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(opts());
    g.set_node(
        "a",
        NodeLabel {
            rank: Some(0),
            ..Default::default()
        },
    );
    g.set_node(
        "b",
        NodeLabel {
            rank: Some(2),
            ..Default::default()
        },
    );
    g.set_edge_with_label("a", "b", EdgeLabel::default());
    run(&mut g);

    let mid = g.successors("a")[0].to_string();
    if let Some(n) = g.node_mut(&mid) {
        n.x = Some(5.0);
        n.y = Some(10.0);
    }

    undo(&mut g);
    assert!(g.has_edge("a", "b", None));
    assert_eq!(
        g.edge("a", "b", None).unwrap().points,
        vec![Point { x: 5.0, y: 10.0 }]
    );
    assert!(!g.has_node(&mid));
}
