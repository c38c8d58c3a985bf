use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::order::init_order;
use layergraph::{EdgeLabel, GraphLabel, NodeLabel};

#[test]
fn groups_nodes_into_one_layer_per_rank() {
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

    let layering = init_order(&g);
    assert_eq!(layering.len(), 2);
    assert_eq!(layering[0], vec!["a".to_string()]);
    assert_eq!(layering[1].len(), 2);
}
