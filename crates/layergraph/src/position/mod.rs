//! Positioning: assigns every leaf node (and, by extension via border dummies, every compound
//! node) an `(x, y)` coordinate.
//!
//! `y` is simple: one band per rank, as tall as the tallest node in it, stacked with `ranksep`
//! between bands. `x` is the hard part, delegated to [`bk`]'s Brandes-Köpf compaction.

pub mod bk;

use graphlib::Graph;

use crate::model::{EdgeLabel, GraphLabel, NodeLabel};

pub fn position(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    crate::util::time("position", || position_inner(g))
}

fn position_inner(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    assign_y(g);

    let xs = bk::position_x(g);
    for (v, x) in xs {
        if let Some(n) = g.node_mut(&v) {
            n.x = Some(x);
        }
    }
}

fn assign_y(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let layering = crate::util::build_layer_matrix(g);
    let ranksep = g.graph().ranksep;

    let mut y: f64 = 0.0;
    for layer in &layering {
        let max_h = layer.iter().filter_map(|v| g.node(v)).map(|n| n.height).fold(0.0_f64, f64::max);
        for v in layer {
            if let Some(n) = g.node_mut(v) {
                n.y = Some(y + max_h / 2.0);
            }
        }
        y += max_h + ranksep;
    }
}
