//! Self-loop extraction, order reservation, and final polyline placement.
//!
//! Self-loops break ranking (`rank(v) - rank(v) == 0`, never `>= minlen`) and ordering (a node
//! has no meaningful position relative to itself), so they are stashed on the owning node before
//! those stages run and reinstated as real edges with a hand-built loop polyline afterwards.

use graphlib::{EdgeKey, Graph};

use crate::model::{DummyKind, EdgeLabel, GraphLabel, NodeLabel, Point, SelfEdge};

pub fn remove_self_edges(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for ek in g.edge_keys() {
        if ek.v != ek.w {
            continue;
        }
        let Some(label) = g.edge_by_key(&ek).cloned() else {
            continue;
        };
        if let Some(n) = g.node_mut(&ek.v) {
            n.self_edges.push(SelfEdge { edge_obj: ek.clone(), label });
        }
        g.remove_edge(&ek.v, &ek.w, ek.name.as_deref());
    }
}

pub fn insert_self_edges(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let layering = crate::util::build_layer_matrix(g);
    for layer in layering {
        let mut extra: usize = 0;
        for (idx, node_id) in layer.iter().enumerate() {
            let Some(rank) = g.node(node_id).and_then(|n| n.rank) else {
                continue;
            };

            if let Some(n) = g.node_mut(node_id) {
                n.order = Some(idx + extra);
            }

            let self_edges = g.node(node_id).map(|n| n.self_edges.clone()).unwrap_or_default();
            if self_edges.is_empty() {
                continue;
            }
            if let Some(n) = g.node_mut(node_id) {
                n.self_edges.clear();
            }

            for se in self_edges {
                extra += 1;
                let selfedge_id = crate::util::unique_id("_se");
                g.set_node(
                    selfedge_id,
                    NodeLabel {
                        width: se.label.width,
                        height: se.label.height,
                        rank: Some(rank),
                        order: Some(idx + extra),
                        dummy: Some(DummyKind::SelfEdge),
                        edge_label: Some(Box::new(se.label)),
                        edge_obj: Some(se.edge_obj),
                        ..Default::default()
                    },
                );
            }
        }
    }
}

pub fn position_self_edges(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for id in g.node_ids() {
        let Some(node) = g.node(&id).cloned() else { continue };
        if node.dummy != Some(DummyKind::SelfEdge) {
            continue;
        }
        let (Some(x), Some(y)) = (node.x, node.y) else { continue };
        let Some(edge_obj) = node.edge_obj.clone() else {
            continue;
        };
        let Some(mut label) = node.edge_label.as_deref().cloned() else {
            continue;
        };
        let Some(v_node) = g.node(&edge_obj.v) else { continue };
        let (Some(vx), Some(vy)) = (v_node.x, v_node.y) else {
            continue;
        };

        let i = vx + v_node.width / 2.0;
        let a = vy;
        let o = x - i;
        let l = v_node.height / 2.0;

        label.points = vec![
            Point { x: i + 2.0 * o / 3.0, y: a - l },
            Point { x: i + 5.0 * o / 6.0, y: a - l },
            Point { x: i + o, y: a },
            Point { x: i + 5.0 * o / 6.0, y: a + l },
            Point { x: i + 2.0 * o / 3.0, y: a + l },
        ];
        label.x = Some(x);
        label.y = Some(y);

        g.set_edge_key(EdgeKey::new(edge_obj.v.clone(), edge_obj.w.clone(), edge_obj.name.clone()), label);
        g.remove_node(&id);
    }
}
