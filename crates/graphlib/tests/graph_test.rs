use graphlib::{EdgeKey, Graph, GraphOptions};

#[test]
fn node_defaults_are_created_on_demand_when_an_edge_is_set() {
    let mut g: Graph<i32, (), ()> = Graph::new(GraphOptions::default());
    g.set_default_node_label(|| 42);
    g.set_edge("a", "b");

    assert_eq!(g.node("a"), Some(&42));
    assert_eq!(g.node("b"), Some(&42));
    assert_eq!(g.node_count(), 2);
}

#[test]
fn set_node_preserves_existing_parent() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions {
        compound: true,
        ..Default::default()
    });
    g.set_node("child", ());
    g.set_node("parent", ());
    g.set_parent("child", Some("parent"));

    g.set_node("child", ());
    assert_eq!(g.parent("child"), Some("parent"));
}

#[test]
fn remove_node_reparents_children_to_root() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions {
        compound: true,
        ..Default::default()
    });
    g.set_node("grandparent", ());
    g.set_node("parent", ());
    g.set_node("child", ());
    g.set_parent("parent", Some("grandparent"));
    g.set_parent("child", Some("parent"));

    g.remove_node("parent");

    assert_eq!(g.parent("child"), None);
    assert!(g.children_root().contains(&"child"));
    assert!(!g.has_node("parent"));
}

#[test]
fn remove_node_removes_incident_edges() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_path(&["a", "b", "c"]);

    g.remove_node("b");

    assert!(!g.has_edge("a", "b", None));
    assert!(!g.has_edge("b", "c", None));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn multigraph_allows_named_parallel_edges() {
    let mut g: Graph<(), i32, ()> = Graph::new(GraphOptions {
        multigraph: true,
        ..Default::default()
    });
    g.set_edge_key(EdgeKey::new("a", "b", Some("first")), 1);
    g.set_edge_key(EdgeKey::new("a", "b", Some("second")), 2);

    assert_eq!(g.edge("a", "b", Some("first")), Some(&1));
    assert_eq!(g.edge("a", "b", Some("second")), Some(&2));
    assert_eq!(g.out_edges("a", Some("b")).len(), 2);
}

#[test]
fn node_iteration_preserves_insertion_order() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_node("z", ());
    g.set_node("a", ());
    g.set_node("m", ());

    assert_eq!(g.node_ids(), vec!["z", "a", "m"]);
}

#[test]
fn sources_and_sinks_are_computed_from_adjacency() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_path(&["a", "b", "c"]);

    assert_eq!(g.sources(), vec!["a"]);
    assert_eq!(g.sinks(), vec!["c"]);
}
