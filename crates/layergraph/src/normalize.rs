//! Split long edges into chains of rank-adjacent dummy nodes.
//!
//! [`run`] replaces every edge `(u, v)` whose endpoints are more than one rank apart with a
//! chain `u -> d_1 -> ... -> v`, one dummy per intermediate rank, storing the original edge
//! label on the chain so [`undo`] can collapse it back into a single polyline edge.

use graphlib::{EdgeKey, Graph};

use crate::model::{DummyKind, EdgeLabel, GraphLabel, NodeLabel, Point};

fn add_dummy_node(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, label: NodeLabel, prefix: &str) -> String {
    if !g.has_node(prefix) {
        g.set_node(prefix, label);
        return prefix.to_string();
    }
    for i in 1usize.. {
        let v = format!("{prefix}{i}");
        if !g.has_node(&v) {
            g.set_node(&v, label);
            return v;
        }
    }
    unreachable!()
}

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    g.graph_mut().dummy_chains.clear();
    for e in g.edge_keys() {
        normalize_edge(g, e);
    }
}

fn normalize_edge(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, e: EdgeKey) {
    let v = e.v.clone();
    let w = e.w.clone();
    let name = e.name.clone();

    let v_rank = g.node(&v).and_then(|n| n.rank).unwrap_or(0);
    let w_rank = g.node(&w).and_then(|n| n.rank).unwrap_or(0);
    let Some(mut edge_label) = g.edge_by_key(&e).cloned() else {
        return;
    };
    let label_rank = edge_label.label_rank;

    if w_rank == v_rank + 1 {
        return;
    }

    g.remove_edge(&e.v, &e.w, e.name.as_deref());
    edge_label.points.clear();

    let mut prev = v;
    let mut first_dummy: Option<String> = None;
    let mut r = v_rank + 1;

    while r < w_rank {
        let dummy_id = add_dummy_node(
            g,
            NodeLabel {
                width: 0.0,
                height: 0.0,
                rank: Some(r),
                dummy: Some(DummyKind::Edge),
                edge_label: Some(Box::new(edge_label.clone())),
                edge_obj: Some(e.clone()),
                ..Default::default()
            },
            "_d",
        );

        if first_dummy.is_none() {
            first_dummy = Some(dummy_id.clone());
            g.graph_mut().dummy_chains.push(dummy_id.clone());
        }

        if label_rank == Some(r) {
            if let Some(n) = g.node_mut(&dummy_id) {
                n.width = edge_label.width;
                n.height = edge_label.height;
                n.dummy = Some(DummyKind::EdgeLabel);
                n.labelpos = Some(edge_label.labelpos);
            }
        }

        g.set_edge_key(
            EdgeKey::new(prev.clone(), dummy_id.clone(), name.clone()),
            EdgeLabel {
                weight: edge_label.weight,
                ..Default::default()
            },
        );
        prev = dummy_id;
        r += 1;
    }

    g.set_edge_key(
        EdgeKey::new(prev, w, name),
        EdgeLabel {
            weight: edge_label.weight,
            ..Default::default()
        },
    );
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let chains = g.graph().dummy_chains.clone();
    for start in chains {
        let Some(start_node) = g.node(&start) else {
            continue;
        };
        let Some(mut orig_label) = start_node.edge_label.as_deref().cloned() else {
            continue;
        };
        let Some(edge_obj) = start_node.edge_obj.clone() else {
            continue;
        };

        let mut v = start.clone();
        loop {
            let Some(node) = g.node(&v) else { break };
            if node.dummy.is_none() {
                break;
            }
            let w = g.successors(&v).first().map(|s| s.to_string()).unwrap_or_default();

            if let (Some(x), Some(y)) = (node.x, node.y) {
                orig_label.points.push(Point { x, y });
                if node.dummy == Some(DummyKind::EdgeLabel) {
                    orig_label.x = Some(x);
                    orig_label.y = Some(y);
                    orig_label.width = node.width;
                    orig_label.height = node.height;
                }
            }

            g.remove_node(&v);
            if w.is_empty() {
                break;
            }
            v = w;
        }

        g.set_edge_key(edge_obj, orig_label);
    }
}
