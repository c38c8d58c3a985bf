//! Propagates ordering decisions made inside one subgraph up to a constraint on its ancestors.
//!
//! Once a rank of a compound graph is sorted, two subgraphs that end up adjacent should stay
//! adjacent in the constraint graph `cg`, so later sweeps of sibling ranks keep them in the same
//! relative order.

use super::types::{LayerGraphLabel, LayerNodeLabel, WeightLabel};
use graphlib::Graph;
use rustc_hash::FxHashMap as HashMap;

pub fn add_subgraph_constraints(
    g: &Graph<LayerNodeLabel, WeightLabel, LayerGraphLabel>,
    cg: &mut Graph<(), (), ()>,
    vs: &[String],
) {
    let mut prev: HashMap<&str, &str> = HashMap::default();
    let mut root_prev: Option<&str> = None;

    for v in vs {
        let mut child = g.parent(v.as_str());
        while let Some(c) = child {
            let parent = g.parent(c);

            let prev_child = if let Some(p) = parent { prev.insert(p, c) } else { root_prev.replace(c) };

            if let Some(prev_child) = prev_child {
                if prev_child != c {
                    cg.set_edge(prev_child, c);
                    break;
                }
            }

            child = parent;
        }
    }
}
