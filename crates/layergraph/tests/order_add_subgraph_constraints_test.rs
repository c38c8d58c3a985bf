use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::order::{add_subgraph_constraints, LayerGraphLabel, LayerNodeLabel, WeightLabel};

#[test]
fn links_consecutive_subgraphs_in_visiting_order() {
    let mut g: Graph<LayerNodeLabel, WeightLabel, LayerGraphLabel> = Graph::new(GraphOptions {
        multigraph: false,
        compound: true,
        directed: true,
    });
    g.set_node("sg1", LayerNodeLabel::default());
    g.set_node("sg2", LayerNodeLabel::default());
    g.set_node("a", LayerNodeLabel::default());
    g.set_node("b", LayerNodeLabel::default());
    g.set_parent("a", Some("sg1"));
    g.set_parent("b", Some("sg2"));

    let mut cg: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    add_subgraph_constraints(&g, &mut cg, &["a".to_string(), "b".to_string()]);
    assert!(cg.has_edge("sg1", "sg2", None));
}
