//! Builds the rank-local graph a sweep direction sorts.
//!
//! Every node at `rank` (or a compound node spanning it) gets a copy in the result, with its
//! in- or out-neighbors from the real graph folded in as weighted edges so [`super::barycenter`]
//! never has to look past this rank.

use graphlib::{Graph, GraphOptions};

use super::types::{LayerGraphLabel, LayerNodeLabel, Relationship, WeightLabel};
use crate::model::{EdgeLabel, GraphLabel, NodeLabel};

pub fn create_root_node(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> String {
    loop {
        let v = crate::util::unique_id("_root");
        if !g.has_node(&v) {
            return v;
        }
    }
}

pub fn build_layer_graph(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    rank: i32,
    relationship: Relationship,
) -> Graph<LayerNodeLabel, WeightLabel, LayerGraphLabel> {
    let root = create_root_node(g);
    build_layer_graph_with_root(g, rank, relationship, &root)
}

pub fn build_layer_graph_with_root(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    rank: i32,
    relationship: Relationship,
    root: &str,
) -> Graph<LayerNodeLabel, WeightLabel, LayerGraphLabel> {
    let mut result: Graph<LayerNodeLabel, WeightLabel, LayerGraphLabel> = Graph::new(GraphOptions {
        compound: true,
        multigraph: false,
        directed: true,
    });
    result.set_graph(LayerGraphLabel { root: root.to_string() });
    result.set_node(root, LayerNodeLabel::default());

    let node_ids: Vec<String> = g.node_ids();
    for v in node_ids {
        let Some(node) = g.node(&v) else { continue };

        let in_range = node.rank == Some(rank)
            || (node.min_rank.is_some()
                && node.max_rank.is_some()
                && node.min_rank.unwrap() <= rank
                && rank <= node.max_rank.unwrap());
        if !in_range {
            continue;
        }

        result.set_node(v.clone(), LayerNodeLabel::default());
        let parent = g.parent(&v).map(str::to_string).unwrap_or_else(|| root.to_string());
        result.set_parent(&v, Some(&parent));

        match relationship {
            Relationship::InEdges => {
                for ek in g.in_edges(&v, None) {
                    let u = ek.v.clone();
                    if !result.has_node(&u) {
                        result.set_node(u.clone(), LayerNodeLabel::default());
                    }
                    let weight = g.edge_by_key(&ek).map(|e| e.weight).unwrap_or(0.0);
                    let existing = result.edge(&u, &v, None).map(|e| e.weight).unwrap_or(0.0);
                    result.set_edge_with_label(u, v.clone(), WeightLabel { weight: weight + existing });
                }
            }
            Relationship::OutEdges => {
                // Reverse out-edges so barycenter can always read in-edges.
                for ek in g.out_edges(&v, None) {
                    let u = ek.w.clone();
                    if !result.has_node(&u) {
                        result.set_node(u.clone(), LayerNodeLabel::default());
                    }
                    let weight = g.edge_by_key(&ek).map(|e| e.weight).unwrap_or(0.0);
                    let existing = result.edge(&u, &v, None).map(|e| e.weight).unwrap_or(0.0);
                    result.set_edge_with_label(u, v.clone(), WeightLabel { weight: weight + existing });
                }
            }
        }

        if node.min_rank.is_some() {
            let idx = rank.max(0) as usize;
            let bl = node.border_left.get(idx).cloned().flatten();
            let br = node.border_right.get(idx).cloned().flatten();
            result.set_node(v.clone(), LayerNodeLabel { border_left: bl, border_right: br, order: None });
        }
    }

    result
}
