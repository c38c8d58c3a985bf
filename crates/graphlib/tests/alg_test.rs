use graphlib::alg;
use graphlib::{Graph, GraphOptions};

#[test]
fn preorder_visits_each_reachable_node_once_depth_first() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_edge("a", "b");
    g.set_edge("a", "c");
    g.set_edge("b", "d");

    let order = alg::preorder(&g, &["a"]);
    assert_eq!(order[0], "a");
    assert_eq!(order.len(), 4);
    assert!(order.iter().position(|n| n == "b").unwrap() < order.iter().position(|n| n == "d").unwrap());
}

#[test]
fn postorder_visits_children_before_parents() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_edge("a", "b");
    g.set_edge("b", "c");

    let order = alg::postorder(&g, &["a"]);
    assert_eq!(order, vec!["c", "b", "a"]);
}

#[test]
fn components_groups_weakly_connected_nodes() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_edge("a", "b");
    g.set_node("isolated", ());

    let mut components = alg::components(&g);
    components.sort_by_key(|c| c.len());

    assert_eq!(components.len(), 2);
    assert_eq!(components[0], vec!["isolated"]);
    assert_eq!(components[1].len(), 2);
}

#[test]
fn find_cycles_reports_a_simple_cycle() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.set_edge("c", "a");
    g.set_edge("a", "d");

    let cycles = alg::find_cycles(&g);
    assert_eq!(cycles.len(), 1);
    let mut cycle = cycles[0].clone();
    cycle.sort();
    assert_eq!(cycle, vec!["a", "b", "c"]);
}

#[test]
fn find_cycles_reports_self_loops() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_edge("a", "a");
    g.set_edge("a", "b");

    let cycles = alg::find_cycles(&g);
    assert_eq!(cycles, vec![vec!["a".to_string()]]);
}

#[test]
fn acyclic_graph_has_no_cycles() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_path(&["a", "b", "c"]);

    assert!(alg::find_cycles(&g).is_empty());
}
