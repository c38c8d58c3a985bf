use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::order::cross_count;
use layergraph::{EdgeLabel, GraphLabel, NodeLabel};

#[test]
fn counts_a_single_crossing() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: false,
        directed: true,
    });
    for v in ["a1", "a2", "b1", "b2"] {
        g.set_node(v, NodeLabel::default());
    }
    g.set_edge_with_label("a1", "b2", EdgeLabel::default());
    g.set_edge_with_label("a2", "b1", EdgeLabel::default());

    let layering = vec![
        vec!["a1".to_string(), "a2".to_string()],
        vec!["b1".to_string(), "b2".to_string()],
    ];
    assert_eq!(cross_count(&g, &layering), 1.0);
}

#[test]
fn zero_crossings_when_edges_dont_cross() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: false,
        directed: true,
    });
    for v in ["a1", "a2", "b1", "b2"] {
        g.set_node(v, NodeLabel::default());
    }
    g.set_edge_with_label("a1", "b1", EdgeLabel::default());
    g.set_edge_with_label("a2", "b2", EdgeLabel::default());

    let layering = vec![
        vec!["a1".to_string(), "a2".to_string()],
        vec!["b1".to_string(), "b2".to_string()],
    ];
    assert_eq!(cross_count(&g, &layering), 0.0);
}
