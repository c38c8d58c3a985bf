use layergraph::graphlib::{Graph, GraphOptions};
use layergraph::{layout, EdgeLabel, Error, GraphLabel, NodeLabel};

#[test]
fn lays_out_a_simple_chain() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
        directed: true,
    });
    g.set_node(
        "a",
        NodeLabel {
            width: 50.0,
            height: 50.0,
            ..Default::default()
        },
    );
    g.set_node(
        "b",
        NodeLabel {
            width: 50.0,
            height: 50.0,
            ..Default::default()
        },
    );
    g.set_node(
        "c",
        NodeLabel {
            width: 50.0,
            height: 50.0,
            ..Default::default()
        },
    );
    g.set_edge_with_label("a", "b", EdgeLabel::default());
    g.set_edge_with_label("b", "c", EdgeLabel::default());

    layout(&mut g).unwrap();

    let a = g.node("a").unwrap();
    let b = g.node("b").unwrap();
    let c = g.node("c").unwrap();
    assert!(a.x.is_some() && a.y.is_some());
    assert!(b.y.unwrap() > a.y.unwrap());
    assert!(c.y.unwrap() > b.y.unwrap());
}

#[test]
fn empty_graph_has_margin_only_dimensions() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
        directed: true,
    });
    g.graph_mut().marginx = 10.0;
    g.graph_mut().marginy = 20.0;

    layout(&mut g).unwrap();

    assert_eq!(g.graph().width, Some(20.0));
    assert_eq!(g.graph().height, Some(40.0));
}

#[test]
fn single_node_is_placed_at_its_own_half_size() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
        directed: true,
    });
    g.graph_mut().marginx = 10.0;
    g.graph_mut().marginy = 20.0;
    g.set_node(
        "a",
        NodeLabel {
            width: 50.0,
            height: 100.0,
            ..Default::default()
        },
    );

    layout(&mut g).unwrap();

    let a = g.node("a").unwrap();
    assert_eq!(a.x, Some(25.0 + 10.0));
    assert_eq!(a.y, Some(50.0 + 20.0));
    assert_eq!(g.graph().width, Some(50.0 + 2.0 * 10.0));
    assert_eq!(g.graph().height, Some(100.0 + 2.0 * 20.0));
}

#[test]
fn two_nodes_one_edge_ranks_and_boundary_points() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
        directed: true,
    });
    g.set_node(
        "a",
        NodeLabel {
            width: 50.0,
            height: 50.0,
            ..Default::default()
        },
    );
    g.set_node(
        "b",
        NodeLabel {
            width: 50.0,
            height: 50.0,
            ..Default::default()
        },
    );
    g.set_edge_with_label("a", "b", EdgeLabel::default());

    layout(&mut g).unwrap();

    let a = g.node("a").unwrap();
    let b = g.node("b").unwrap();
    assert_eq!(a.rank, Some(0));
    assert_eq!(b.rank, Some(1));
    let ranksep = g.graph().ranksep;
    assert_eq!(b.y.unwrap() - a.y.unwrap(), (a.height + b.height) / 2.0 + ranksep);

    let edge = g.edge("a", "b", None).unwrap();
    assert_eq!(edge.points.len(), 2);
}

#[test]
fn self_loop_produces_a_five_point_polyline() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
        directed: true,
    });
    g.set_node(
        "a",
        NodeLabel {
            width: 100.0,
            height: 100.0,
            ..Default::default()
        },
    );
    g.set_edge_with_label("a", "a", EdgeLabel::default());

    layout(&mut g).unwrap();

    let a = g.node("a").unwrap();
    assert_eq!(a.width, 100.0);
    let edge = g.edge("a", "a", None).unwrap();
    assert_eq!(edge.points.len(), 5);
}

#[test]
fn long_edge_gets_monotone_intermediate_points() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
        directed: true,
    });
    g.set_node(
        "a",
        NodeLabel {
            width: 50.0,
            height: 50.0,
            ..Default::default()
        },
    );
    g.set_node(
        "b",
        NodeLabel {
            width: 50.0,
            height: 50.0,
            ..Default::default()
        },
    );
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            minlen: 3,
            ..Default::default()
        },
    );

    layout(&mut g).unwrap();

    let a = g.node("a").unwrap();
    let b = g.node("b").unwrap();
    let edge = g.edge("a", "b", None).unwrap();
    assert!(edge.points.len() > 2);
    let mut ys: Vec<f64> = edge.points.iter().map(|p| p.y).collect();
    let mut sorted = ys.clone();
    sorted.sort_by(|x, y| x.partial_cmp(y).unwrap());
    assert_eq!(ys, sorted);
    assert!(ys.first().unwrap() <= &a.y.unwrap());
    ys.retain(|y| *y > a.y.unwrap() && *y < b.y.unwrap());
    assert!(!ys.is_empty());
}

#[test]
fn compound_parent_encloses_its_children() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
        directed: true,
    });
    g.set_node("p", NodeLabel::default());
    g.set_node(
        "a",
        NodeLabel {
            width: 50.0,
            height: 50.0,
            ..Default::default()
        },
    );
    g.set_node(
        "b",
        NodeLabel {
            width: 50.0,
            height: 50.0,
            ..Default::default()
        },
    );
    g.set_parent("a", Some("p"));
    g.set_parent("b", Some("p"));
    g.set_edge_with_label("a", "b", EdgeLabel::default());

    layout(&mut g).unwrap();

    let a = g.node("a").unwrap();
    let b = g.node("b").unwrap();
    assert!(a.rank.unwrap() < b.rank.unwrap());

    let (ax, ay, aw, ah) = (a.x.unwrap(), a.y.unwrap(), a.width, a.height);
    let (bx, by, bw, bh) = (b.x.unwrap(), b.y.unwrap(), b.width, b.height);
    let p = g.node("p").unwrap();
    let (px, py, pw, ph) = (p.x.unwrap(), p.y.unwrap(), p.width, p.height);

    assert!(px - pw / 2.0 <= (ax - aw / 2.0).min(bx - bw / 2.0));
    assert!(px + pw / 2.0 >= (ax + aw / 2.0).max(bx + bw / 2.0));
    assert!(py - ph / 2.0 <= (ay - ah / 2.0).min(by - bh / 2.0));
    assert!(py + ph / 2.0 >= (ay + ah / 2.0).max(by + bh / 2.0));
}

#[test]
fn rejects_an_undirected_graph() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: false,
        directed: false,
    });
    g.set_node("a", NodeLabel::default());
    assert!(matches!(layout(&mut g), Err(Error::NotDirected)));
}

#[test]
fn rejects_a_zero_minlen_edge() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: false,
        directed: true,
    });
    g.set_node("a", NodeLabel::default());
    g.set_node("b", NodeLabel::default());
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            minlen: 0,
            ..Default::default()
        },
    );
    assert!(matches!(layout(&mut g), Err(Error::InvalidMinlen { .. })));
}
