//! Shared ranking helpers: longest-path assignment and edge slack.

use graphlib::{EdgeKey, Graph};
use rustc_hash::FxHashMap as HashMap;

use crate::model::{EdgeLabel, GraphLabel, NodeLabel};

/// Assigns every node the rank furthest from its sinks: `rank(v) = min over out-edges of
/// (rank(w) - minlen)`, with sinks at rank 0. Cheap, but tends to stack nodes near sinks instead
/// of spreading them evenly.
pub fn longest_path(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    fn dfs(v: &str, g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, visited: &mut HashMap<String, i32>) -> i32 {
        if let Some(&rank) = visited.get(v) {
            return rank;
        }

        let mut rank: Option<i32> = None;
        for e in g.out_edges(v, None) {
            let minlen: i32 = g.edge_by_key(&e).map(|lbl| lbl.minlen as i32).unwrap_or(1);
            let candidate = dfs(&e.w, g, visited) - minlen;
            rank = Some(match rank {
                Some(current) => current.min(candidate),
                None => candidate,
            });
        }

        let rank = rank.unwrap_or(0);
        if let Some(label) = g.node_mut(v) {
            label.rank = Some(rank);
        }
        visited.insert(v.to_string(), rank);
        rank
    }

    let sources: Vec<String> = g.sources().into_iter().map(String::from).collect();
    let mut visited: HashMap<String, i32> = HashMap::default();
    for v in sources {
        dfs(&v, g, &mut visited);
    }
}

/// How much slack an edge has: how far its current rank assignment is from being tight
/// (`slack == 0` means the edge is as short as `minlen` allows).
pub fn slack(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, e: &EdgeKey) -> i32 {
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let minlen: i32 = g.edge_by_key(e).map(|lbl| lbl.minlen as i32).unwrap_or(1);
    w_rank - v_rank - minlen
}
