use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::rank::feasible_tree::feasible_tree;
use layergraph::{EdgeLabel, GraphLabel, NodeLabel};

#[test]
fn builds_a_tree_spanning_every_node() {
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
    g.set_node(
        "c",
        NodeLabel {
            rank: Some(1),
            ..Default::default()
        },
    );
    g.set_edge_with_label("a", "b", EdgeLabel::default());
    g.set_edge_with_label("a", "c", EdgeLabel::default());

    let t = feasible_tree(&mut g);
    assert_eq!(t.node_count(), 3);
}

#[test]
fn shifts_ranks_to_tighten_a_slack_component() {
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
            rank: Some(3),
            ..Default::default()
        },
    );
    g.set_edge_with_label("a", "b", EdgeLabel::default());

    let t = feasible_tree(&mut g);
    assert_eq!(t.node_count(), 2);
    assert_eq!(
        g.node("b").unwrap().rank.unwrap() - g.node("a").unwrap().rank.unwrap(),
        1
    );
}
