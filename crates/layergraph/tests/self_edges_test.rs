use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::self_edges::{insert_self_edges, position_self_edges, remove_self_edges};
use layergraph::{DummyKind, EdgeLabel, GraphLabel, NodeLabel};

fn opts() -> GraphOptions {
    GraphOptions {
        multigraph: true,
        compound: false,
        directed: true,
    }
}

#[test]
fn stashes_and_reinserts_a_self_loop() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(opts());
    g.set_node(
        "a",
        NodeLabel {
            width: 100.0,
            height: 100.0,
            rank: Some(0),
            ..Default::default()
        },
    );
    g.set_edge_with_label("a", "a", EdgeLabel::default());

    remove_self_edges(&mut g);
    assert!(!g.has_edge("a", "a", None));
    assert_eq!(g.node("a").unwrap().self_edges.len(), 1);

    insert_self_edges(&mut g);
    assert!(g.node("a").unwrap().self_edges.is_empty());
    let dummies: Vec<String> = g
        .node_ids()
        .into_iter()
        .filter(|id| g.node(id).unwrap().dummy == Some(DummyKind::SelfEdge))
        .collect();
    assert_eq!(dummies.len(), 1);

    if let Some(n) = g.node_mut(&dummies[0]) {
        n.x = Some(150.0);
        n.y = Some(0.0);
    }
    if let Some(n) = g.node_mut("a") {
        n.x = Some(0.0);
        n.y = Some(0.0);
    }

    position_self_edges(&mut g);
    assert!(g.has_edge("a", "a", None));
    assert_eq!(g.edge("a", "a", None).unwrap().points.len(), 5);
    assert!(!g.has_node(&dummies[0]));
}
