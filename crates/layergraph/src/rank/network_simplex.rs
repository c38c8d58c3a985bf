//! Network simplex: starting from a feasible spanning tree, repeatedly swaps a negative-cut-value
//! tree edge for the least slack edge crossing the same cut, until every tree edge has a
//! nonnegative cut value. Minimizes the total weighted rank-distance of every edge.

use graphlib::{alg, EdgeKey, Graph};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use super::feasible_tree;
use super::tree::{TreeEdgeLabel, TreeNodeLabel};
use crate::model::{EdgeLabel, GraphLabel, NodeLabel};

type TreeGraph = Graph<TreeNodeLabel, TreeEdgeLabel, ()>;

pub fn network_simplex(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let mut simplified = crate::util::simplify(g);
    super::util::longest_path(&mut simplified);
    let mut t = feasible_tree::feasible_tree(&mut simplified);

    init_low_lim_values(&mut t, None);
    init_cut_values(&mut t, &simplified);

    while let Some(e) = leave_edge(&t) {
        let f = enter_edge(&t, &simplified, &e);
        exchange_edges(&mut t, &simplified, &e, &f);
    }

    for v in g.node_ids() {
        if let Some(rank) = simplified.node(&v).and_then(|n| n.rank) {
            if let Some(lbl) = g.node_mut(&v) {
                lbl.rank = Some(rank);
            }
        }
    }
}

/// Our tree graphs are built with `directed: false`, but the underlying storage is always
/// directional: a tree edge may have been recorded as `(a, b)` or `(b, a)` depending on which
/// side was discovered first. Every lookup that treats the tree as undirected goes through here.
pub fn find_tree_edge(t: &TreeGraph, a: &str, b: &str) -> Option<EdgeKey> {
    if t.has_edge(a, b, None) {
        Some(EdgeKey::new(a, b, None::<String>))
    } else if t.has_edge(b, a, None) {
        Some(EdgeKey::new(b, a, None::<String>))
    } else {
        None
    }
}

fn is_tree_edge(t: &TreeGraph, a: &str, b: &str) -> bool {
    find_tree_edge(t, a, b).is_some()
}

pub fn init_low_lim_values(tree: &mut TreeGraph, root: Option<&str>) {
    let Some(root) = root.map(String::from).or_else(|| tree.node_ids().into_iter().next()) else {
        return;
    };

    let mut visited: HashSet<String> = HashSet::default();
    let _ = dfs_assign_low_lim(tree, &mut visited, 1, &root, None);
}

fn dfs_assign_low_lim(tree: &mut TreeGraph, visited: &mut HashSet<String>, next_lim: i32, v: &str, parent: Option<&str>) -> i32 {
    let low = next_lim;
    visited.insert(v.to_string());

    let neighbors: Vec<String> = tree.neighbors(v).into_iter().map(String::from).collect();
    let mut next_lim = next_lim;
    for w in neighbors {
        if !visited.contains(&w) {
            next_lim = dfs_assign_low_lim(tree, visited, next_lim, &w, Some(v));
        }
    }

    if let Some(label) = tree.node_mut(v) {
        label.low = low;
        label.lim = next_lim;
        label.parent = parent.map(String::from);
    }
    next_lim + 1
}

pub fn init_cut_values(t: &mut TreeGraph, g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let roots = t.node_ids();
    let mut vs = alg::postorder(t, &roots.iter().map(String::as_str).collect::<Vec<_>>());
    vs.pop();
    for v in vs {
        assign_cut_value(t, g, &v);
    }
}

fn assign_cut_value(t: &mut TreeGraph, g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, child: &str) {
    let Some(parent) = t.node(child).and_then(|lbl| lbl.parent.clone()) else {
        return;
    };
    let cutvalue = calc_cut_value(t, g, child);
    if let Some(edge_key) = find_tree_edge(t, child, &parent) {
        if let Some(edge) = t.edge_mut_by_key(&edge_key) {
            edge.cutvalue = cutvalue;
        }
    }
}

pub fn calc_cut_value(t: &TreeGraph, g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, child: &str) -> f64 {
    let Some(parent) = t.node(child).and_then(|lbl| lbl.parent.clone()) else {
        return 0.0;
    };

    let mut child_is_tail = true;
    let mut graph_edge = g.edge(child, &parent, None);
    if graph_edge.is_none() {
        child_is_tail = false;
        graph_edge = g.edge(&parent, child, None);
    }
    let Some(graph_edge) = graph_edge else {
        return 0.0;
    };

    let mut cut_value = graph_edge.weight;

    for ek in g.out_edges(child, None) {
        let other = ek.w.clone();
        if other == parent {
            continue;
        }
        let weight = g.edge_by_key(&ek).map(|e| e.weight).unwrap_or(0.0);

        let points_to_head = child_is_tail;
        cut_value += if points_to_head { weight } else { -weight };

        if let Some(other_edge_key) = find_tree_edge(t, child, &other) {
            if let Some(other_cut_value) = t.edge_by_key(&other_edge_key).map(|e| e.cutvalue) {
                cut_value += if points_to_head { -other_cut_value } else { other_cut_value };
            }
        }
    }

    for ek in g.in_edges(child, None) {
        let other = ek.v.clone();
        if other == parent {
            continue;
        }
        let weight = g.edge_by_key(&ek).map(|e| e.weight).unwrap_or(0.0);

        let points_to_head = !child_is_tail;
        cut_value += if points_to_head { weight } else { -weight };

        if let Some(other_edge_key) = find_tree_edge(t, child, &other) {
            if let Some(other_cut_value) = t.edge_by_key(&other_edge_key).map(|e| e.cutvalue) {
                cut_value += if points_to_head { -other_cut_value } else { other_cut_value };
            }
        }
    }

    cut_value
}

pub fn leave_edge(t: &TreeGraph) -> Option<EdgeKey> {
    t.edges().find(|e| t.edge_by_key(e).map(|lbl| lbl.cutvalue < 0.0).unwrap_or(false)).cloned()
}

pub fn enter_edge(t: &TreeGraph, g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, edge: &EdgeKey) -> EdgeKey {
    let (v, w) = if g.has_edge(&edge.v, &edge.w, None) { (edge.v.as_str(), edge.w.as_str()) } else { (edge.w.as_str(), edge.v.as_str()) };

    let mut t_labels: HashMap<String, (i32, i32)> = HashMap::default();
    for id in t.node_ids() {
        if let Some(lbl) = t.node(&id) {
            t_labels.insert(id.clone(), (lbl.low, lbl.lim));
        }
    }

    let Some(&(_, v_lim)) = t_labels.get(v) else { return edge.clone() };
    let Some(&(w_low, w_lim)) = t_labels.get(w) else { return edge.clone() };
    let Some(&(v_low, _)) = t_labels.get(v) else { return edge.clone() };

    let ((tail_low, tail_lim), flip) = if v_lim > w_lim { ((w_low, w_lim), true) } else { ((v_low, v_lim), false) };

    let mut g_rank: HashMap<String, i32> = HashMap::default();
    for v in g.node_ids() {
        if let Some(n) = g.node(&v) {
            g_rank.insert(v, n.rank.unwrap_or(0));
        }
    }

    let mut best: Option<(i32, EdgeKey)> = None;
    for key in g.edge_keys() {
        let Some(&(_, v_lim)) = t_labels.get(&key.v) else { continue };
        let Some(&(_, w_lim)) = t_labels.get(&key.w) else { continue };
        let v_desc = tail_low <= v_lim && v_lim <= tail_lim;
        let w_desc = tail_low <= w_lim && w_lim <= tail_lim;

        if flip == v_desc && flip != w_desc {
            let v_rank = g_rank.get(&key.v).copied().unwrap_or(0);
            let w_rank = g_rank.get(&key.w).copied().unwrap_or(0);
            let minlen: i32 = g.edge_by_key(&key).map(|e| e.minlen as i32).unwrap_or(1);
            let slack = w_rank - v_rank - minlen;

            let better = best.as_ref().map(|(best_slack, _)| slack < *best_slack).unwrap_or(true);
            if better {
                best = Some((slack, key));
            }
        }
    }

    best.map(|(_, e)| e).unwrap_or_else(|| edge.clone())
}

pub fn exchange_edges(t: &mut TreeGraph, g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, e: &EdgeKey, f: &EdgeKey) {
    t.remove_edge(&e.v, &e.w, None);
    t.set_edge_with_label(&f.v, &f.w, TreeEdgeLabel::default());
    init_low_lim_values(t, None);
    init_cut_values(t, g);
    update_ranks(t, g);
}

fn update_ranks(t: &TreeGraph, g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let Some(root) = t.node_ids().into_iter().find(|v| t.node(v).map(|lbl| lbl.parent.is_none()).unwrap_or(false)) else {
        return;
    };

    let vs = alg::preorder(t, &[root.as_str()]);
    for v in vs.into_iter().skip(1) {
        let Some(parent) = t.node(&v).and_then(|lbl| lbl.parent.clone()) else {
            continue;
        };

        let (minlen, flipped) = match g.edge(&v, &parent, None) {
            Some(e) => (e.minlen as i32, false),
            None => match g.edge(&parent, &v, None) {
                Some(e) => (e.minlen as i32, true),
                None => continue,
            },
        };

        let Some(parent_rank) = g.node(&parent).and_then(|n| n.rank) else {
            continue;
        };
        let rank = if flipped { parent_rank + minlen } else { parent_rank - minlen };
        if let Some(node) = g.node_mut(&v) {
            node.rank = Some(rank);
        }
    }
}
