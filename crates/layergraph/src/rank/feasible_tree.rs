//! Constructs a feasible (tight enough) spanning tree over a ranked graph: a tree where every
//! tree edge has zero slack. Network simplex needs this as its starting basis.

use graphlib::{Graph, GraphOptions};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use super::tree::{TreeEdgeLabel, TreeNodeLabel};
use super::util::slack;
use crate::model::{EdgeLabel, GraphLabel, NodeLabel};

type TreeGraph = Graph<TreeNodeLabel, TreeEdgeLabel, ()>;

/// Builds a spanning tree over `g`'s nodes whose every edge has zero slack, adjusting ranks
/// along the way when a disconnected component forces a fresh, looser starting point.
pub fn feasible_tree(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> TreeGraph {
    let mut t: TreeGraph = Graph::new(GraphOptions { multigraph: false, compound: false, directed: false });

    let node_count = g.node_count();
    if node_count == 0 {
        return t;
    }

    let Some(start) = g.node_ids().into_iter().next() else { return t };
    t.set_node(&start, TreeNodeLabel::default());

    while t.node_count() < node_count {
        if tight_tree(g, &mut t).is_some() {
            continue;
        }
        if let Some((edge, delta)) = find_min_slack_edge(g, &t) {
            shift_ranks(g, &t, &edge.v, delta);
            continue;
        }
        // Disconnected component: seed a new root among the untouched nodes.
        if let Some(next) = g.node_ids().into_iter().find(|v| !t.has_node(v)) {
            t.set_node(&next, TreeNodeLabel::default());
        } else {
            break;
        }
    }

    t
}

/// Extends `t` by repeatedly adding zero-slack edges incident to it, until no more such edges
/// remain. Returns `Some(())` if at least one edge was added.
fn tight_tree(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, t: &mut TreeGraph) -> Option<()> {
    let mut added = false;

    loop {
        let in_tree: HashSet<String> = t.node_ids().into_iter().collect();
        let mut frontier: Vec<(String, String)> = Vec::new();

        for v in &in_tree {
            for e in g.out_edges(v, None) {
                if !in_tree.contains(&e.w) && slack(g, &e) == 0 {
                    frontier.push((v.clone(), e.w));
                }
            }
            for e in g.in_edges(v, None) {
                if !in_tree.contains(&e.v) && slack(g, &e) == 0 {
                    frontier.push((v.clone(), e.v));
                }
            }
        }

        if frontier.is_empty() {
            break;
        }

        for (existing, newcomer) in frontier {
            if t.has_node(&newcomer) {
                continue;
            }
            t.set_node(&newcomer, TreeNodeLabel::default());
            t.set_edge_with_label(&existing, &newcomer, TreeEdgeLabel::default());
            added = true;
        }
    }

    added.then_some(())
}

/// Finds the edge with minimum slack that crosses the boundary of the tree, along with the
/// rank delta that would make it tight (negated if it points into the tree).
fn find_min_slack_edge(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, t: &TreeGraph) -> Option<(graphlib::EdgeKey, i32)> {
    let mut best: Option<(graphlib::EdgeKey, i32)> = None;

    for e in g.edge_keys() {
        let v_in = t.has_node(&e.v);
        let w_in = t.has_node(&e.w);
        if v_in == w_in {
            continue;
        }

        let s = slack(g, &e);
        let delta = if v_in { s } else { -s };

        let candidate_better = best.as_ref().map(|(_, d)| s < d.abs()).unwrap_or(true);
        if candidate_better {
            best = Some((e, delta));
        }
    }

    best
}

/// Shifts every node's rank in `g` so that the tree stays fixed but the chosen boundary edge
/// becomes tight; `delta` is applied to every node currently in the tree.
fn shift_ranks(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, t: &TreeGraph, _pivot: &str, delta: i32) {
    if delta == 0 {
        return;
    }
    let mut ranks: HashMap<String, i32> = HashMap::default();
    for v in t.node_ids() {
        if let Some(n) = g.node(&v) {
            ranks.insert(v, n.rank.unwrap_or(0) + delta);
        }
    }
    for (v, rank) in ranks {
        if let Some(n) = g.node_mut(&v) {
            n.rank = Some(rank);
        }
    }
}
