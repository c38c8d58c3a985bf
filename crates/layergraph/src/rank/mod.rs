//! Ranking: assigns every node a layer (`rank`) such that every edge points from a lower rank to
//! a strictly higher one, at least `minlen` ranks apart.
//!
//! Three algorithms are available via [`crate::model::Ranker`]: plain longest-path (fast, but
//! tends to bunch nodes near the sinks), a tight-tree variant (longest-path refined toward a
//! tight spanning tree), and network simplex (slower, but minimizes the total weighted edge
//! length, which is what produces visually balanced layouts).

pub mod feasible_tree;
pub mod network_simplex;
pub mod tree;
pub mod util;

use crate::model::{EdgeLabel, GraphLabel, NodeLabel, Ranker};
use graphlib::Graph;

pub fn rank(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    crate::util::time("rank", || match g.graph().ranker {
        Ranker::NetworkSimplex => network_simplex::network_simplex(g),
        Ranker::TightTree => {
            util::longest_path(g);
            let _ = feasible_tree::feasible_tree(g);
        }
        Ranker::LongestPath => util::longest_path(g),
    })
}
