//! Canonicalize to a top-to-bottom coordinate system before positioning, and map back after.
//!
//! Position only knows how to solve the TB case; for `LR`/`RL` we swap width/height (and swap
//! back + transpose afterwards), and for `BT`/`RL` we negate y (and undo it afterwards).

use graphlib::Graph;

use crate::model::{EdgeLabel, GraphLabel, NodeLabel, RankDir};

pub fn adjust(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    match g.graph().rankdir {
        RankDir::LR | RankDir::RL => swap_width_height(g),
        RankDir::TB | RankDir::BT => {}
    }
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    match g.graph().rankdir {
        RankDir::BT | RankDir::RL => reverse_y(g),
        RankDir::TB | RankDir::LR => {}
    }

    match g.graph().rankdir {
        RankDir::LR | RankDir::RL => {
            swap_xy(g);
            swap_width_height(g);
        }
        RankDir::TB | RankDir::BT => {}
    }
}

fn swap_width_height(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for v in g.node_ids() {
        if let Some(n) = g.node_mut(&v) {
            std::mem::swap(&mut n.width, &mut n.height);
            for se in &mut n.self_edges {
                std::mem::swap(&mut se.label.width, &mut se.label.height);
            }
        }
    }
    for e in g.edge_keys() {
        if let Some(lbl) = g.edge_mut_by_key(&e) {
            std::mem::swap(&mut lbl.width, &mut lbl.height);
        }
    }
}

fn reverse_y(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for v in g.node_ids() {
        if let Some(n) = g.node_mut(&v) {
            if let Some(y) = n.y {
                n.y = Some(-y);
            }
        }
    }
    for e in g.edge_keys() {
        if let Some(lbl) = g.edge_mut_by_key(&e) {
            for p in &mut lbl.points {
                p.y = -p.y;
            }
            if let Some(y) = lbl.y {
                lbl.y = Some(-y);
            }
        }
    }
}

fn swap_xy(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for v in g.node_ids() {
        if let Some(n) = g.node_mut(&v) {
            if let (Some(x), Some(y)) = (n.x, n.y) {
                n.x = Some(y);
                n.y = Some(x);
            }
        }
    }
    for e in g.edge_keys() {
        if let Some(lbl) = g.edge_mut_by_key(&e) {
            for p in &mut lbl.points {
                std::mem::swap(&mut p.x, &mut p.y);
            }
            if let (Some(x), Some(y)) = (lbl.x, lbl.y) {
                lbl.x = Some(y);
                lbl.y = Some(x);
            }
        }
    }
}
