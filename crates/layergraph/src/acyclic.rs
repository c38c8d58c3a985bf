//! Break cycles by reversing a feedback arc set (FAS) so ranking can assume a DAG.
//!
//! [`run`] picks the FAS according to [`Acyclicer`], reverses each selected edge in place and
//! marks it `reversed`, preserving the original multi-edge name so [`undo`] can put it back.

use graphlib::{EdgeKey, Graph};

use crate::model::{Acyclicer, EdgeLabel, GraphLabel, NodeLabel};

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let fas = match g.graph().acyclicer {
        Acyclicer::Greedy => crate::greedy_fas::greedy_fas_with_weight(g, |lbl: &EdgeLabel| {
            if !lbl.weight.is_finite() {
                return 0;
            }
            lbl.weight.round() as i64
        }),
        Acyclicer::Dfs => dfs_fas(g),
    };

    for e in fas.into_iter().filter(|e| e.v != e.w) {
        let Some(label) = g.edge_by_key(&e).cloned() else {
            continue;
        };
        g.remove_edge(&e.v, &e.w, e.name.as_deref());

        let mut label = label;
        label.forward_name = e.name.clone();
        label.reversed = true;

        let name = unique_rev_name(g, &e.w, &e.v);
        g.set_edge_key(EdgeKey::new(e.w, e.v, Some(name)), label);
    }
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for e in g.edge_keys() {
        let Some(label) = g.edge_by_key(&e).cloned() else {
            continue;
        };
        if !label.reversed {
            continue;
        }
        g.remove_edge(&e.v, &e.w, e.name.as_deref());

        let mut label = label;
        let forward_name = label.forward_name.take();
        label.reversed = false;
        label.points.reverse();
        g.set_edge_key(EdgeKey::new(e.w, e.v, forward_name), label);
    }
}

fn unique_rev_name(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str, w: &str) -> String {
    for i in 1usize.. {
        let candidate = format!("rev{i}");
        if !g.has_edge(v, w, Some(&candidate)) {
            return candidate;
        }
    }
    unreachable!()
}

/// Depth-first feedback-arc-set: any back-edge found while walking the DFS tree (an edge whose
/// head is already on the current recursion stack) is reversed.
fn dfs_fas(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Vec<EdgeKey> {
    let mut fas: Vec<EdgeKey> = Vec::new();
    let mut stack: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
    let mut visited: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();

    fn dfs(
        g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
        v: &str,
        visited: &mut std::collections::BTreeSet<String>,
        stack: &mut std::collections::BTreeSet<String>,
        fas: &mut Vec<EdgeKey>,
    ) {
        if !visited.insert(v.to_string()) {
            return;
        }
        stack.insert(v.to_string());
        for e in g.out_edges(v, None) {
            if e.v == e.w {
                continue;
            }
            if stack.contains(&e.w) {
                fas.push(e);
            } else {
                dfs(g, &e.w, visited, stack, fas);
            }
        }
        stack.remove(v);
    }

    for v in g.nodes() {
        dfs(g, v, &mut visited, &mut stack, &mut fas);
    }
    fas
}
