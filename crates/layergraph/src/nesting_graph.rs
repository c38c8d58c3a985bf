//! Nesting-graph construction for compound graphs.
//!
//! Wraps every compound subtree in a synthetic top/bottom border pair and injects
//! high-weight "nesting edges" from a synthetic root, so the plain (non-compound) ranker keeps
//! each subgraph's descendants in a contiguous rank range without knowing anything about
//! compound structure itself. [`cleanup`] removes the synthetics once ranking is done.

use std::collections::BTreeMap;

use graphlib::{EdgeKey, Graph, alg};
use rustc_hash::FxHashMap;

use crate::model::{DummyKind, EdgeLabel, GraphLabel, NodeLabel};

#[derive(Default)]
struct DummyNodeIdGen {
    next_suffix: FxHashMap<&'static str, usize>,
}

impl DummyNodeIdGen {
    fn unique_id(&mut self, g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, prefix: &'static str) -> String {
        let suffix = match self.next_suffix.get(&prefix).copied() {
            Some(v) => v,
            None => {
                if !g.has_node(prefix) {
                    self.next_suffix.insert(prefix, 1);
                    return prefix.to_string();
                }
                self.next_suffix.insert(prefix, 1);
                1
            }
        };

        let mut next = suffix;
        loop {
            let id = format!("{prefix}{next}");
            if !g.has_node(&id) {
                self.next_suffix.insert(prefix, next + 1);
                return id;
            }
            next += 1;
        }
    }
}

fn add_dummy_node(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    ids: &mut DummyNodeIdGen,
    dummy: DummyKind,
    mut label: NodeLabel,
    name: &'static str,
) -> String {
    let id = ids.unique_id(g, name);
    label.dummy = Some(dummy);
    g.set_node(id.clone(), label);
    id
}

fn add_border_node(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, ids: &mut DummyNodeIdGen, prefix: &'static str) -> String {
    add_dummy_node(
        g,
        ids,
        DummyKind::Border,
        NodeLabel {
            width: 0.0,
            height: 0.0,
            ..Default::default()
        },
        prefix,
    )
}

fn tree_depths(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> BTreeMap<String, usize> {
    fn dfs(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str, depth: usize, out: &mut BTreeMap<String, usize>) {
        for child in g.children(v) {
            dfs(g, child, depth + 1, out);
        }
        out.insert(v.to_string(), depth);
    }

    let mut out: BTreeMap<String, usize> = BTreeMap::new();
    for v in g.children_root() {
        dfs(g, v, 1, &mut out);
    }
    out
}

fn sum_weights(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> f64 {
    let mut out = 0.0;
    for e in g.edge_keys() {
        if let Some(lbl) = g.edge_by_key(&e) {
            out += lbl.weight;
        }
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    root: &str,
    node_sep: usize,
    weight: f64,
    height: usize,
    depths: &BTreeMap<String, usize>,
    ids: &mut DummyNodeIdGen,
    v: &str,
) {
    let children: Vec<String> = g.children(v).into_iter().map(String::from).collect();
    if children.is_empty() {
        if v != root {
            g.set_edge_with_label(
                root,
                v,
                EdgeLabel {
                    weight: 0.0,
                    minlen: node_sep,
                    ..Default::default()
                },
            );
        }
        return;
    }

    let top = add_border_node(g, ids, "_bt");
    let bottom = add_border_node(g, ids, "_bb");

    g.set_parent(top.as_str(), Some(v));
    if let Some(lbl) = g.node_mut(v) {
        lbl.border_top = Some(top.clone());
    }
    g.set_parent(bottom.as_str(), Some(v));
    if let Some(lbl) = g.node_mut(v) {
        lbl.border_bottom = Some(bottom.clone());
    }

    for child in children {
        dfs(g, root, node_sep, weight, height, depths, ids, &child);

        let child_node = g.node(&child).cloned().unwrap_or_default();
        let child_top = child_node.border_top.as_deref().unwrap_or(&child).to_string();
        let child_bottom = child_node.border_bottom.as_deref().unwrap_or(&child).to_string();
        let this_weight = if child_node.border_top.is_some() { weight } else { 2.0 * weight };
        let minlen = if child_top != child_bottom {
            1usize
        } else {
            let dv = depths.get(v).copied().unwrap_or(1);
            height.saturating_sub(dv).saturating_add(1)
        };

        g.set_edge_with_label(
            top.clone(),
            child_top.clone(),
            EdgeLabel {
                weight: this_weight,
                minlen,
                nesting_edge: true,
                ..Default::default()
            },
        );
        g.set_edge_with_label(
            child_bottom.clone(),
            bottom.clone(),
            EdgeLabel {
                weight: this_weight,
                minlen,
                nesting_edge: true,
                ..Default::default()
            },
        );
    }

    if g.parent(v).is_none() {
        let dv = depths.get(v).copied().unwrap_or(1);
        g.set_edge_with_label(
            root,
            top,
            EdgeLabel {
                weight: 0.0,
                minlen: height + dv,
                nesting_edge: true,
                ..Default::default()
            },
        );
    }
}

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let mut ids = DummyNodeIdGen::default();
    let root = add_dummy_node(g, &mut ids, DummyKind::NestingRoot, NodeLabel::default(), "_root");

    let depths = tree_depths(g);
    let height = depths.values().copied().max().unwrap_or(1).saturating_sub(1);
    let node_sep = 2 * height + 1;

    g.graph_mut().nesting_root = Some(root.clone());

    for e in g.edge_keys() {
        if let Some(lbl) = g.edge_mut_by_key(&e) {
            lbl.minlen *= node_sep.max(1);
        }
    }

    let weight = sum_weights(g) + 1.0;

    let children: Vec<String> = g.children_root().into_iter().map(String::from).collect();
    for child in children {
        dfs(g, &root, node_sep, weight, height, &depths, &mut ids, &child);
    }

    g.graph_mut().node_rank_factor = Some(node_sep);

    // The ranker requires a connected graph; nesting edges alone may not connect every
    // component (e.g. nodes with no compound ancestry and no path to one that does), so tie
    // any stragglers back to the root.
    let comps = alg::components(g);
    if comps.len() > 1 {
        for comp in comps {
            if comp.iter().any(|v| v == &root) {
                continue;
            }
            let Some(v) = comp.first() else { continue };
            if g.edge(&root, v, None).is_some() {
                continue;
            }
            g.set_edge_with_label(
                root.clone(),
                v.clone(),
                EdgeLabel {
                    weight: 0.0,
                    minlen: node_sep.max(1),
                    nesting_edge: true,
                    ..Default::default()
                },
            );
        }
    }
}

pub fn cleanup(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    if let Some(root) = g.graph().nesting_root.clone() {
        g.remove_node(&root);
        g.graph_mut().nesting_root = None;
    }

    let mut to_remove: Vec<EdgeKey> = Vec::new();
    for e in g.edge_keys() {
        if g.edge_by_key(&e).is_some_and(|lbl| lbl.nesting_edge) {
            to_remove.push(e);
        }
    }
    for e in to_remove {
        g.remove_edge(&e.v, &e.w, e.name.as_deref());
    }
}
