use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::order::{order, OrderOptions};
use layergraph::{EdgeLabel, GraphLabel, NodeLabel};

#[test]
fn untangles_a_simple_crossing() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: false,
        directed: true,
    });
    g.set_node(
        "a1",
        NodeLabel {
            rank: Some(0),
            ..Default::default()
        },
    );
    g.set_node(
        "a2",
        NodeLabel {
            rank: Some(0),
            ..Default::default()
        },
    );
    g.set_node(
        "b1",
        NodeLabel {
            rank: Some(1),
            ..Default::default()
        },
    );
    g.set_node(
        "b2",
        NodeLabel {
            rank: Some(1),
            ..Default::default()
        },
    );
    g.set_edge_with_label("a1", "b1", EdgeLabel::default());
    g.set_edge_with_label("a2", "b2", EdgeLabel::default());

    order(&mut g, OrderOptions::default());

    let a1_order = g.node("a1").unwrap().order.unwrap();
    let a2_order = g.node("a2").unwrap().order.unwrap();
    let b1_order = g.node("b1").unwrap().order.unwrap();
    let b2_order = g.node("b2").unwrap().order.unwrap();
    assert_eq!(a1_order < a2_order, b1_order < b2_order);
}

#[test]
fn disable_heuristic_still_assigns_an_initial_order() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: false,
        directed: true,
    });
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

    order(
        &mut g,
        OrderOptions {
            disable_optimal_order_heuristic: true,
        },
    );
    assert!(g.node("a").unwrap().order.is_some());
    assert!(g.node("b").unwrap().order.is_some());
}
