//! Miscellaneous helpers shared across pipeline stages.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use graphlib::{Graph, GraphOptions};

use crate::model::{EdgeLabel, GraphLabel, NodeLabel, Point, Rect};

/// Collapses parallel edges into a single edge whose weight is the sum of the originals and
/// whose minlen is the max, and drops the multigraph/compound flags. Ranking only cares about
/// the aggregate constraint between a pair of nodes, not which original edge contributed it.
pub fn simplify(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut simplified: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: false,
        compound: false,
        directed: true,
    });
    simplified.set_graph(g.graph().clone());

    for v in g.node_ids() {
        if let Some(lbl) = g.node(&v) {
            simplified.set_node(v, lbl.clone());
        }
    }

    let mut merged: BTreeMap<(String, String), (f64, usize)> = BTreeMap::new();
    for e in g.edges() {
        let Some(lbl) = g.edge_by_key(e) else { continue };
        let entry = merged.entry((e.v.clone(), e.w.clone())).or_insert((0.0, 1));
        entry.0 += lbl.weight;
        entry.1 = entry.1.max(lbl.minlen.max(1));
    }

    for ((v, w), (weight, minlen)) in merged {
        simplified.set_edge_with_label(
            v,
            w,
            EdgeLabel {
                weight,
                minlen,
                ..Default::default()
            },
        );
    }

    simplified
}

/// A view of `g` containing only leaf (non-parent) nodes, with compound structure dropped.
/// Ranking runs over this view so cluster nodes never get a rank of their own.
pub fn as_non_compound_graph(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut simplified: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: g.options().multigraph,
        compound: false,
        directed: true,
    });
    simplified.set_graph(g.graph().clone());

    for v in g.node_ids() {
        if g.children(&v).is_empty() {
            if let Some(lbl) = g.node(&v) {
                simplified.set_node(v, lbl.clone());
            }
        }
    }

    for e in g.edges() {
        if let Some(lbl) = g.edge_by_key(e) {
            simplified.set_edge_key(e.clone(), lbl.clone());
        }
    }

    simplified
}

pub fn successor_weights(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut out: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for v in g.node_ids() {
        let mut map: BTreeMap<String, f64> = BTreeMap::new();
        for e in g.out_edges(&v, None) {
            let weight = g.edge_by_key(&e).map(|lbl| lbl.weight).unwrap_or(0.0);
            *map.entry(e.w.clone()).or_insert(0.0) += weight;
        }
        out.insert(v, map);
    }
    out
}

pub fn predecessor_weights(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut out: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for v in g.node_ids() {
        let mut map: BTreeMap<String, f64> = BTreeMap::new();
        for e in g.in_edges(&v, None) {
            let weight = g.edge_by_key(&e).map(|lbl| lbl.weight).unwrap_or(0.0);
            *map.entry(e.v.clone()).or_insert(0.0) += weight;
        }
        out.insert(v, map);
    }
    out
}

/// Finds where the line from `rect`'s center to `point` crosses `rect`'s boundary.
pub fn intersect_rect(rect: Rect, point: Point) -> Point {
    let x = rect.x;
    let y = rect.y;

    let dx = point.x - x;
    let dy = point.y - y;
    let mut w = rect.width / 2.0;
    let mut h = rect.height / 2.0;

    if dx == 0.0 && dy == 0.0 {
        // Degenerate case: point coincides with the rectangle's center. Upstream Dagre throws;
        // we instead return a deterministic point on the right edge so headless callers never
        // have to special-case this.
        return Point { x: x + w, y };
    }

    let (sx, sy) = if dy.abs() * w > dx.abs() * h {
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        if dx < 0.0 {
            w = -w;
        }
        (w, w * dy / dx)
    };

    Point { x: x + sx, y: y + sy }
}

/// Groups nodes by rank, each layer ordered by its `order` field.
pub fn build_layer_matrix(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Vec<Vec<String>> {
    let mut min_rank: i32 = i32::MAX;
    let mut max_rank: i32 = i32::MIN;
    let mut entries: Vec<(i32, usize, String)> = Vec::new();

    for id in g.nodes() {
        let Some(node) = g.node(id) else { continue };
        let Some(rank) = node.rank else { continue };
        min_rank = min_rank.min(rank);
        max_rank = max_rank.max(rank);
        entries.push((rank, node.order.unwrap_or(0), id.to_string()));
    }

    if max_rank == i32::MIN {
        return Vec::new();
    }

    let shift = if min_rank < 0 { -min_rank } else { 0 };
    let len = (max_rank + shift + 1).max(0) as usize;
    let mut layers: Vec<Vec<(usize, String)>> = vec![Vec::new(); len];

    for (rank, order, id) in entries {
        let idx = (rank + shift).max(0) as usize;
        if idx < layers.len() {
            layers[idx].push((order, id));
        }
    }

    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|(o, _)| *o);
            layer.into_iter().map(|(_, id)| id).collect()
        })
        .collect()
}

pub fn time_to_writer<T>(name: &str, writer: &mut dyn std::io::Write, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let ms = start.elapsed().as_millis();
    let _ = writeln!(writer, "{name} time: {ms}ms");
    let _ = writer.flush();
    out
}

pub fn time<T>(name: &str, f: impl FnOnce() -> T) -> T {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let start = Instant::now();
        let out = f();
        tracing::debug!(stage = name, elapsed_ms = start.elapsed().as_millis() as u64, "pipeline stage");
        out
    } else {
        f()
    }
}

/// Shifts every rank down so the minimum rank present in the graph is zero.
pub fn normalize_ranks(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let mut min_rank: i32 = i32::MAX;
    for v in g.node_ids() {
        if let Some(rank) = g.node(&v).and_then(|n| n.rank) {
            min_rank = min_rank.min(rank);
        }
    }
    if min_rank == i32::MAX || min_rank == 0 {
        return;
    }
    for v in g.node_ids() {
        if let Some(n) = g.node_mut(&v) {
            if let Some(rank) = n.rank {
                n.rank = Some(rank - min_rank);
            }
        }
    }
}

/// Removes ranks that contain no "real" work, undoing the rank-doubling that
/// [`crate::nesting_graph`] applies to make room for border segments.
///
/// A rank is empty if no node occupies it; such a rank is only kept if it's needed to preserve
/// spacing (every `node_rank_factor`-th rank), otherwise every rank above it collapses down by
/// one.
pub fn remove_empty_ranks(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let Some(factor) = g.graph().node_rank_factor.filter(|&f| f > 0) else {
        return;
    };

    let mut offset: i32 = i32::MAX;
    for v in g.node_ids() {
        if let Some(rank) = g.node(&v).and_then(|n| n.rank) {
            offset = offset.min(rank);
        }
    }
    if offset == i32::MAX {
        return;
    }

    let mut max_idx: usize = 0;
    let mut layers: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for v in g.node_ids() {
        let Some(rank) = g.node(&v).and_then(|n| n.rank) else { continue };
        let idx = (rank - offset).max(0) as usize;
        max_idx = max_idx.max(idx);
        layers.entry(idx).or_default().push(v);
    }

    let mut delta: i32 = 0;
    for i in 0..=max_idx {
        if !layers.contains_key(&i) && i % factor != 0 {
            delta -= 1;
            continue;
        }
        if delta == 0 {
            continue;
        }
        if let Some(vs) = layers.get(&i) {
            for v in vs {
                if let Some(n) = g.node_mut(v) {
                    if let Some(rank) = n.rank {
                        n.rank = Some(rank + delta);
                    }
                }
            }
        }
    }
}

static UNIQUE_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A process-wide unique identifier with the given prefix. Dummy nodes use this so repeated
/// layout calls within one process never collide, even across graphs.
pub fn unique_id(prefix: impl std::fmt::Display) -> String {
    let id = UNIQUE_ID_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    format!("{prefix}{id}")
}

pub fn range(limit: i32) -> Vec<i32> {
    range_with(0, limit, 1)
}

pub fn range_with(start: i32, limit: i32, step: i32) -> Vec<i32> {
    if step == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut i = start;
    if step > 0 {
        while i < limit {
            out.push(i);
            i += step;
        }
    } else {
        while limit < i {
            out.push(i);
            i += step;
        }
    }
    out
}
