//! The sweep loop: alternates in-edge and out-edge barycenter sorts, alternating tie-break bias
//! every other pass, and keeps the best-by-crossing-count layering seen across four unimproved
//! rounds.

use std::collections::BTreeMap;

use graphlib::{Graph, GraphOptions};

use super::barycenter::sort_subgraph;
use super::constraints::add_subgraph_constraints;
use super::cross_count::cross_count;
use super::init_order::init_order;
use super::layer_graph::{build_layer_graph_with_root, create_root_node};
use super::types::{LayerGraphLabel, LayerNodeLabel, Relationship, WeightLabel};
use crate::model::{EdgeLabel, GraphLabel, NodeLabel};

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderOptions {
    pub disable_optimal_order_heuristic: bool,
}

type LayerGraph = Graph<LayerNodeLabel, WeightLabel, LayerGraphLabel>;

pub fn order(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, opts: OrderOptions) {
    crate::util::time("order", || order_inner(g, opts))
}

fn order_inner(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, opts: OrderOptions) {
    let Some(max_rank) = g.node_ids().iter().filter_map(|v| g.node(v).and_then(|n| n.rank)).max() else {
        return;
    };

    let layering = init_order(g);
    assign_order(g, &layering);

    if opts.disable_optimal_order_heuristic {
        return;
    }

    let root = create_root_node(g);
    let down_ranks: Vec<i32> = (1..=max_rank).collect();
    let up_ranks: Vec<i32> = if max_rank >= 1 { (0..=(max_rank - 1)).rev().collect() } else { Vec::new() };

    let mut down_graphs: BTreeMap<i32, LayerGraph> = down_ranks
        .iter()
        .map(|&rank| (rank, build_layer_graph_with_root(g, rank, Relationship::InEdges, &root)))
        .collect();
    let mut up_graphs: BTreeMap<i32, LayerGraph> = up_ranks
        .iter()
        .map(|&rank| (rank, build_layer_graph_with_root(g, rank, Relationship::OutEdges, &root)))
        .collect();

    let mut best_cc = f64::INFINITY;
    let mut best_layering: Option<Vec<Vec<String>>> = None;

    let mut i: usize = 0;
    let mut last_best: usize = 0;
    while last_best < 4 {
        let bias_right = i % 4 >= 2;
        if i % 2 == 1 {
            sweep(g, &down_ranks, &mut down_graphs, bias_right);
        } else {
            sweep(g, &up_ranks, &mut up_graphs, bias_right);
        }

        let layering_now = crate::util::build_layer_matrix(g);
        let cc = cross_count(g, &layering_now);
        if cc < best_cc {
            last_best = 0;
            best_cc = cc;
            best_layering = Some(layering_now);
        }

        i += 1;
        last_best += 1;
    }

    if let Some(best) = best_layering {
        assign_order(g, &best);
    }
}

fn assign_order(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, layering: &[Vec<String>]) {
    for layer in layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(n) = g.node_mut(v) {
                n.order = Some(i);
            }
        }
    }
}

fn sweep(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    ranks: &[i32],
    layer_graphs: &mut BTreeMap<i32, LayerGraph>,
    bias_right: bool,
) {
    let mut cg: Graph<(), (), ()> = Graph::new(GraphOptions::default());

    for &rank in ranks {
        let Some(lg) = layer_graphs.get_mut(&rank) else { continue };
        let root = lg.graph().root.clone();
        sync_layer_graph_orders(g, lg, &root);

        let sorted = sort_subgraph(lg, &root, &cg, bias_right);
        for (i, v) in sorted.vs.iter().enumerate() {
            if let Some(n) = lg.node_mut(v) {
                n.order = Some(i);
            }
            if let Some(n) = g.node_mut(v) {
                n.order = Some(i);
            }
        }

        add_subgraph_constraints(lg, &mut cg, &sorted.vs);
    }
}

/// Layer graphs are built once and reused across sweeps, but a node's order keeps changing on
/// the real graph as other ranks sort; pull the current value in before sorting this rank again.
fn sync_layer_graph_orders(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, lg: &mut LayerGraph, root: &str) {
    for v in lg.node_ids() {
        if v == root {
            continue;
        }
        let order = g.node(&v).and_then(|n| n.order);
        if let Some(n) = lg.node_mut(&v) {
            n.order = order;
        }
    }
}
