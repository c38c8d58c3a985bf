use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::order::{barycenter, sort, LayerGraphLabel, LayerNodeLabel, SortEntry, WeightLabel};

fn lg() -> Graph<LayerNodeLabel, WeightLabel, LayerGraphLabel> {
    Graph::new(GraphOptions {
        multigraph: false,
        compound: true,
        directed: true,
    })
}

#[test]
fn barycenter_averages_weighted_neighbor_orders() {
    let mut g = lg();
    g.set_node("root", LayerNodeLabel::default());
    g.set_node(
        "u1",
        LayerNodeLabel {
            order: Some(0),
            ..Default::default()
        },
    );
    g.set_node(
        "u2",
        LayerNodeLabel {
            order: Some(4),
            ..Default::default()
        },
    );
    g.set_node("v", LayerNodeLabel::default());
    g.set_edge_with_label("u1", "v", WeightLabel { weight: 1.0 });
    g.set_edge_with_label("u2", "v", WeightLabel { weight: 1.0 });

    let entries = barycenter(&g, &["v".to_string()]);
    assert_eq!(entries[0].barycenter, Some(2.0));
}

#[test]
fn nodes_with_no_in_edges_are_unsortable() {
    let mut g = lg();
    g.set_node("v", LayerNodeLabel::default());
    let entries = barycenter(&g, &["v".to_string()]);
    assert_eq!(entries[0].barycenter, None);
}

#[test]
fn sort_interleaves_unsortable_entries_at_their_original_index() {
    let entries = vec![
        SortEntry {
            vs: vec!["a".into()],
            i: 0,
            barycenter: Some(2.0),
            weight: Some(1.0),
        },
        SortEntry {
            vs: vec!["b".into()],
            i: 1,
            barycenter: None,
            weight: None,
        },
        SortEntry {
            vs: vec!["c".into()],
            i: 2,
            barycenter: Some(1.0),
            weight: Some(1.0),
        },
    ];
    let result = sort(&entries, false);
    assert_eq!(
        result.vs,
        vec!["c".to_string(), "b".to_string(), "a".to_string()]
    );
}
