use layergraph::graphlib::{EdgeKey, Graph, GraphOptions};
use layergraph::rank::util::{longest_path, slack};
use layergraph::{EdgeLabel, GraphLabel, NodeLabel};

#[test]
fn assigns_sinks_rank_zero() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: false,
        directed: true,
    });
    g.set_node("a", NodeLabel::default());
    g.set_node("b", NodeLabel::default());
    g.set_node("c", NodeLabel::default());
    g.set_edge_with_label("a", "b", EdgeLabel::default());
    g.set_edge_with_label("b", "c", EdgeLabel::default());

    longest_path(&mut g);
    assert_eq!(g.node("c").unwrap().rank, Some(0));
    assert_eq!(g.node("b").unwrap().rank, Some(1));
    assert_eq!(g.node("a").unwrap().rank, Some(2));
}

#[test]
fn zero_slack_edge_is_tight() {
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

    assert_eq!(slack(&g, &EdgeKey::new("a", "b", None::<String>)), 0);
}
