//! The public entrypoint: runs every stage of the layout pipeline over a caller-built graph.

use graphlib::{EdgeKey, Graph};

use crate::error::{self, Error};
use crate::model::{
    BorderSide, DummyKind, EdgeLabel, GraphLabel, LabelPos, NodeLabel, Point, RankDir,
};
use crate::{
    acyclic, add_border_segments, coordinate_system, nesting_graph, normalize, order,
    parent_dummy_chains, position, rank, self_edges, util,
};

/// Runs the full layout pipeline over `g` in place: assigns every node an `(x, y)` and every
/// edge a polyline of `points`, mutating the graph's labels directly.
///
/// Returns an error without touching `g` if the input isn't something layout can reason about:
/// an undirected graph, a node with a non-finite size, or an edge with a `minlen` of zero.
pub fn layout(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> error::Result<()> {
    validate(g)?;
    crate::util::time("layout", || layout_inner(g));
    Ok(())
}

fn validate(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> error::Result<()> {
    if !g.options().directed {
        return Err(Error::NotDirected);
    }

    for id in g.node_ids() {
        let Some(n) = g.node(&id) else { continue };
        if !n.width.is_finite() || !n.height.is_finite() {
            return Err(Error::InvalidNodeSize { id, width: n.width, height: n.height });
        }
    }

    for ek in g.edge_keys() {
        if let Some(lbl) = g.edge_by_key(&ek) {
            if lbl.minlen == 0 {
                return Err(Error::InvalidMinlen { v: ek.v, w: ek.w });
            }
        }
    }

    Ok(())
}

fn layout_inner(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    // Self-loops don't constrain ranking and reversing one wouldn't make the graph acyclic, so
    // they're pulled out before cycle-breaking and rank assignment, then reinserted once
    // positioning knows where their owning node ended up.
    self_edges::remove_self_edges(g);
    acyclic::run(g);

    make_space_for_edge_labels(g);

    // Network simplex expects a connected graph; the nesting graph ties every subgraph (and,
    // incidentally, every otherwise-disconnected component) together before ranking.
    if g.options().compound {
        nesting_graph::run(g);
    }

    run_ranker(g);
    inject_edge_label_proxies(g);

    util::remove_empty_ranks(g);
    if g.options().compound {
        nesting_graph::cleanup(g);
    }
    util::normalize_ranks(g);

    remove_edge_label_proxies(g);
    assign_rank_min_max(g);

    normalize::run(g);
    if g.options().compound {
        parent_dummy_chains::run(g);
        add_border_segments::run(g);
    }

    order::order(g, order::OrderOptions::default());

    // Positioning always runs in top-to-bottom coordinates; `coordinate_system::adjust` maps the
    // other three `rankdir`s into that space and `undo` maps the result back at the end.
    coordinate_system::adjust(g);
    self_edges::insert_self_edges(g);
    position::position(g);
    self_edges::position_self_edges(g);

    if g.options().compound {
        remove_border_nodes(g);
    }

    normalize::undo(g);
    coordinate_system::undo(g);

    translate_graph(g);
    assign_node_intersects(g);
    fixup_edge_label_coords(g);

    acyclic::undo(g);
}

/// Mirrors Dagre's `makeSpaceForEdgeLabels`: doubles every edge's `minlen` so there's always an
/// integral rank between two ranked nodes to host that edge's label dummy, and halves `ranksep`
/// to compensate for the doubled rank count.
fn make_space_for_edge_labels(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    g.graph_mut().ranksep /= 2.0;
    let rankdir = g.graph().rankdir;
    for ek in g.edge_keys() {
        if let Some(e) = g.edge_mut_by_key(&ek) {
            e.minlen = e.minlen.max(1) * 2;
            if !matches!(e.labelpos, LabelPos::C) {
                match rankdir {
                    RankDir::TB | RankDir::BT => e.width += e.labeloffset,
                    RankDir::LR | RankDir::RL => e.height += e.labeloffset,
                }
            }
        }
    }
}

/// Ranking runs on a non-compound view: cluster nodes don't rank themselves, only their leaves
/// do, and the nesting graph's border nodes supply the constraints that keep each subgraph
/// together. Ranks are copied back onto the leaf nodes of the real graph afterward.
fn run_ranker(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let mut rank_graph = util::as_non_compound_graph(g);
    rank::rank(&mut rank_graph);

    for v in g.node_ids() {
        if !g.children(&v).is_empty() {
            continue;
        }
        if let Some(r) = rank_graph.node(&v).and_then(|n| n.rank) {
            if let Some(n) = g.node_mut(&v) {
                n.rank = Some(r);
            }
        }
    }
}

/// Reserves a rank for every edge label wide/tall enough to need one, via a throwaway proxy node
/// sitting halfway between the edge's endpoints. [`remove_edge_label_proxies`] later reads the
/// proxy's assigned rank back onto the edge and deletes it.
fn inject_edge_label_proxies(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for ek in g.edge_keys() {
        let Some(edge) = g.edge_by_key(&ek) else { continue };
        if edge.width <= 0.0 || edge.height <= 0.0 {
            continue;
        }
        let Some(v_rank) = g.node(&ek.v).and_then(|n| n.rank) else { continue };
        let Some(w_rank) = g.node(&ek.w).and_then(|n| n.rank) else { continue };
        let rank = (w_rank - v_rank) / 2 + v_rank;
        g.set_node(
            util::unique_id("_ep"),
            NodeLabel { rank: Some(rank), dummy: Some(DummyKind::EdgeProxy), edge_obj: Some(ek.clone()), ..Default::default() },
        );
    }
}

fn remove_edge_label_proxies(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for v in g.node_ids() {
        let Some(node) = g.node(&v).cloned() else { continue };
        if node.dummy != Some(DummyKind::EdgeProxy) {
            continue;
        }
        if let Some(edge_obj) = node.edge_obj.clone() {
            if let Some(lbl) = g.edge_mut_by_key(&edge_obj) {
                lbl.label_rank = node.rank;
            }
        }
        g.remove_node(&v);
    }
}

/// Annotates every compound node with the rank span of its subtree, read off the nesting
/// graph's top/bottom border nodes, and records the global maximum rank onto `graph.max_rank`.
fn assign_rank_min_max(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let mut global_max_rank: Option<i32> = None;

    for v in g.node_ids() {
        let Some(node) = g.node(&v).cloned() else { continue };
        if let Some(rank) = node.rank {
            global_max_rank = Some(global_max_rank.map_or(rank, |m| m.max(rank)));
        }

        let (Some(bt), Some(bb)) = (node.border_top.clone(), node.border_bottom.clone()) else { continue };
        let (Some(min_rank), Some(max_rank)) = (g.node(&bt).and_then(|n| n.rank), g.node(&bb).and_then(|n| n.rank)) else {
            continue;
        };
        if let Some(n) = g.node_mut(&v) {
            n.min_rank = Some(min_rank);
            n.max_rank = Some(max_rank);
        }
    }

    g.graph_mut().max_rank = global_max_rank;
}

/// Reads every compound node's final geometry off its border nodes, then deletes the border
/// nodes: they've done their job of constraining ordering and positioning around the cluster.
fn remove_border_nodes(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let node_ids = g.node_ids();
    for v in &node_ids {
        if g.children(v).is_empty() {
            continue;
        }
        let Some(node) = g.node(v).cloned() else { continue };
        let (Some(bt), Some(bb)) = (node.border_top.clone(), node.border_bottom.clone()) else { continue };
        let bl = node.border_left.last().and_then(|v| v.clone());
        let br = node.border_right.last().and_then(|v| v.clone());
        let (Some(bl), Some(br)) = (bl, br) else { continue };

        let (Some(t), Some(b), Some(l), Some(r)) = (g.node(&bt), g.node(&bb), g.node(&bl), g.node(&br)) else { continue };
        let (Some(ty), Some(by)) = (t.y, b.y) else { continue };
        let (Some(lx), Some(rx)) = (l.x, r.x) else { continue };

        let width = (rx - lx).abs();
        let height = (by - ty).abs();
        if let Some(n) = g.node_mut(v) {
            n.width = width;
            n.height = height;
            n.x = Some(lx + width / 2.0);
            n.y = Some(ty + height / 2.0);
        }
    }

    let to_remove: Vec<String> = g.node_ids().into_iter().filter(|v| g.node(v).map(|n| n.dummy == Some(DummyKind::Border)).unwrap_or(false)).collect();
    for v in to_remove {
        g.remove_node(&v);
    }
}

/// Shifts every node and edge so the smallest top-left corner (nodes and edge-label boxes, not
/// intermediate spline points) lands at `(marginx, marginy)`, and records the resulting bounding
/// size onto `graph.width`/`graph.height`.
fn translate_graph(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let mut min_x: f64 = f64::INFINITY;
    let mut max_x: f64 = f64::NEG_INFINITY;
    let mut min_y: f64 = f64::INFINITY;
    let mut max_y: f64 = f64::NEG_INFINITY;

    for id in g.node_ids() {
        let Some(n) = g.node(&id) else { continue };
        let (Some(x), Some(y)) = (n.x, n.y) else { continue };
        min_x = min_x.min(x - n.width / 2.0);
        max_x = max_x.max(x + n.width / 2.0);
        min_y = min_y.min(y - n.height / 2.0);
        max_y = max_y.max(y + n.height / 2.0);
    }
    for ek in g.edge_keys() {
        let Some(lbl) = g.edge_by_key(&ek) else { continue };
        if let (Some(x), Some(y)) = (lbl.x, lbl.y) {
            min_x = min_x.min(x - lbl.width / 2.0);
            max_x = max_x.max(x + lbl.width / 2.0);
            min_y = min_y.min(y - lbl.height / 2.0);
            max_y = max_y.max(y + lbl.height / 2.0);
        }
    }

    let marginx = g.graph().marginx;
    let marginy = g.graph().marginy;

    if !min_x.is_finite() || !min_y.is_finite() {
        g.graph_mut().width = Some(2.0 * marginx);
        g.graph_mut().height = Some(2.0 * marginy);
        return;
    }

    g.graph_mut().width = Some(max_x - min_x + 2.0 * marginx);
    g.graph_mut().height = Some(max_y - min_y + 2.0 * marginy);

    let dx = marginx - min_x;
    let dy = marginy - min_y;

    for id in g.node_ids() {
        if let Some(n) = g.node_mut(&id) {
            if let Some(x) = n.x {
                n.x = Some(x + dx);
            }
            if let Some(y) = n.y {
                n.y = Some(y + dy);
            }
        }
    }
    for ek in g.edge_keys() {
        if let Some(lbl) = g.edge_mut_by_key(&ek) {
            for p in &mut lbl.points {
                p.x += dx;
                p.y += dy;
            }
            if let Some(x) = lbl.x {
                lbl.x = Some(x + dx);
            }
            if let Some(y) = lbl.y {
                lbl.y = Some(y + dy);
            }
        }
    }
}

/// Clips every edge's polyline to the boundary of its endpoint nodes (so edges start/end on a
/// node's border, not its center) and derives a default label position for edges wide/tall
/// enough to have one.
fn assign_node_intersects(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let edge_keys: Vec<EdgeKey> = g.edges().cloned().collect();
    for e in edge_keys {
        let Some((sx, sy, sw, sh)) = g.node(&e.v).map(|n| (n.x.unwrap_or(0.0), n.y.unwrap_or(0.0), n.width, n.height)) else { continue };
        let Some((tx, ty, tw, th)) = g.node(&e.w).map(|n| (n.x.unwrap_or(0.0), n.y.unwrap_or(0.0), n.width, n.height)) else { continue };
        let Some(lbl) = g.edge_mut(&e.v, &e.w, e.name.as_deref()) else { continue };

        let mut internal: Vec<Point> = lbl.points.clone();
        if internal.is_empty() {
            internal.push(Point { x: (sx + tx) / 2.0, y: (sy + ty) / 2.0 });
        }

        let first = *internal.first().unwrap();
        let last = *internal.last().unwrap();

        let mut pts: Vec<Point> = Vec::with_capacity(internal.len() + 2);
        pts.push(util::intersect_rect(util::Rect { x: sx, y: sy, width: sw, height: sh }, first));
        pts.extend(internal.drain(..));
        pts.push(util::intersect_rect(util::Rect { x: tx, y: ty, width: tw, height: th }, last));
        lbl.points = pts;

        if (lbl.width > 0.0 || lbl.height > 0.0) && lbl.x.is_none() && lbl.y.is_none() {
            if let Some(mid) = lbl.points.get(lbl.points.len() / 2).copied() {
                let mut ex = mid.x;
                let ey = mid.y;
                match lbl.labelpos {
                    LabelPos::C => {}
                    LabelPos::L => ex -= lbl.labeloffset + lbl.width / 2.0,
                    LabelPos::R => ex += lbl.labeloffset + lbl.width / 2.0,
                }
                lbl.x = Some(ex);
                lbl.y = Some(ey);
            }
        }
    }
}

/// Undoes the `width` padding [`make_space_for_edge_labels`] added for left/right-positioned
/// labels, then shifts the label off to the requested side by half its (unpadded) width plus
/// the offset. Centered labels are untouched: they were never padded.
fn fixup_edge_label_coords(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for ek in g.edge_keys() {
        let Some(lbl) = g.edge_mut_by_key(&ek) else { continue };
        if lbl.x.is_none() {
            continue;
        }
        if matches!(lbl.labelpos, LabelPos::L | LabelPos::R) {
            lbl.width -= lbl.labeloffset;
        }
        match lbl.labelpos {
            LabelPos::L => lbl.x = lbl.x.map(|x| x - (lbl.width / 2.0 + lbl.labeloffset)),
            LabelPos::R => lbl.x = lbl.x.map(|x| x + (lbl.width / 2.0 + lbl.labeloffset)),
            LabelPos::C => {}
        }
    }
}
