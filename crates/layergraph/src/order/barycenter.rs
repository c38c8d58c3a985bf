//! Barycenter computation, conflict resolution, and the transpose-free sort they feed.
//!
//! A node's barycenter is the weighted-average order of its already-placed neighbors on the
//! previous sweep direction; sorting by barycenter is the classic median heuristic for reducing
//! crossings between two adjacent ranks.

use rustc_hash::FxHashMap as HashMap;

use super::types::{LayerGraphLabel, LayerNodeLabel, WeightLabel};
use graphlib::Graph;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

pub fn barycenter(
    g: &Graph<LayerNodeLabel, WeightLabel, LayerGraphLabel>,
    movable: &[String],
) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|v| {
            let in_edges = g.in_edges(v, None);
            if in_edges.is_empty() {
                return BarycenterEntry { v: v.clone(), barycenter: None, weight: None };
            }

            let mut sum: f64 = 0.0;
            let mut weight: f64 = 0.0;
            for ek in in_edges {
                let edge_weight = g.edge_by_key(&ek).map(|e| e.weight).unwrap_or(0.0);
                let order = g.node(&ek.v).and_then(|n| n.order).map(|o| o as f64).unwrap_or(0.0);
                sum += edge_weight * order;
                weight += edge_weight;
            }

            BarycenterEntry { v: v.clone(), barycenter: Some(sum / weight), weight: Some(weight) }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    pub vs: Vec<String>,
    pub i: usize,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone)]
struct ConflictEntry {
    indegree: usize,
    ins: Vec<usize>,
    outs: Vec<usize>,
    vs: Vec<usize>,
    i: usize,
    barycenter: Option<f64>,
    weight: Option<f64>,
    merged: bool,
}

/// Resolves barycenter ties that would otherwise break a same-ancestor constraint (`cg`) by
/// merging the conflicting entries into one, keeping their combined order fixed relative to
/// everything else.
pub fn resolve_conflicts(entries: &[BarycenterEntry], cg: &Graph<(), (), ()>) -> Vec<SortEntry> {
    let mut id_to_ix: HashMap<&str, usize> = HashMap::default();
    let mut conflicts: Vec<ConflictEntry> = Vec::with_capacity(entries.len());
    for (ix, entry) in entries.iter().enumerate() {
        id_to_ix.insert(entry.v.as_str(), ix);
        conflicts.push(ConflictEntry {
            indegree: 0,
            ins: Vec::new(),
            outs: Vec::new(),
            vs: vec![ix],
            i: ix,
            barycenter: entry.barycenter,
            weight: entry.weight,
            merged: false,
        });
    }

    for e in cg.edges() {
        let Some(&v_ix) = id_to_ix.get(e.v.as_str()) else { continue };
        let Some(&w_ix) = id_to_ix.get(e.w.as_str()) else { continue };

        conflicts[w_ix].indegree += 1;
        conflicts[v_ix].outs.push(w_ix);
    }

    let mut source_set: Vec<usize> = id_to_ix
        .iter()
        .filter_map(|(_, &ix)| if conflicts[ix].indegree == 0 { Some(ix) } else { None })
        .collect();

    let mut processed: Vec<usize> = Vec::new();
    while let Some(v_ix) = source_set.pop() {
        processed.push(v_ix);

        let ins = std::mem::take(&mut conflicts[v_ix].ins);
        for u in ins.into_iter().rev() {
            if conflicts[u].merged {
                continue;
            }
            let should_merge = match (conflicts[u].barycenter, conflicts[v_ix].barycenter) {
                (None, _) | (_, None) => true,
                (Some(ub), Some(vb)) => ub >= vb,
            };
            if should_merge {
                merge_conflict_entries(&mut conflicts, v_ix, u);
            }
        }

        let outs = std::mem::take(&mut conflicts[v_ix].outs);
        for w_ix in outs {
            conflicts[w_ix].ins.push(v_ix);
            conflicts[w_ix].indegree = conflicts[w_ix].indegree.saturating_sub(1);
            if conflicts[w_ix].indegree == 0 {
                source_set.push(w_ix);
            }
        }
    }

    let mut out: Vec<SortEntry> = Vec::new();
    for id in processed {
        let entry = &conflicts[id];
        if entry.merged {
            continue;
        }
        let vs: Vec<String> = entry.vs.iter().map(|&ix| entries[ix].v.clone()).collect();
        out.push(SortEntry { vs, i: entry.i, barycenter: entry.barycenter, weight: entry.weight });
    }
    out
}

fn merge_conflict_entries(mapped: &mut [ConflictEntry], target: usize, source: usize) {
    if target == source {
        return;
    }

    let (t, s) = if target < source {
        let (left, right) = mapped.split_at_mut(source);
        (&mut left[target], &mut right[0])
    } else {
        let (left, right) = mapped.split_at_mut(target);
        (&mut right[0], &mut left[source])
    };

    let mut sum: f64 = 0.0;
    let mut weight: f64 = 0.0;
    if let (Some(b), Some(w)) = (t.barycenter, t.weight) {
        if w != 0.0 {
            sum += b * w;
            weight += w;
        }
    }
    if let (Some(b), Some(w)) = (s.barycenter, s.weight) {
        if w != 0.0 {
            sum += b * w;
            weight += w;
        }
    }

    let source_vs = std::mem::take(&mut s.vs);
    let target_vs = std::mem::take(&mut t.vs);
    let mut merged_vs: Vec<usize> = Vec::with_capacity(source_vs.len() + target_vs.len());
    merged_vs.extend(source_vs);
    merged_vs.extend(target_vs);
    t.vs = merged_vs;

    if weight != 0.0 {
        t.barycenter = Some(sum / weight);
        t.weight = Some(weight);
    }
    t.i = t.i.min(s.i);
    s.merged = true;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortResult {
    pub vs: Vec<String>,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Interleaves the barycenter-sorted entries with the unsortable ones (no barycenter: no
/// in-edges at all), keeping each unsortable entry pinned at its original index.
pub fn sort(entries: &[SortEntry], bias_right: bool) -> SortResult {
    let mut total_len: usize = 0;
    let mut sortable: Vec<usize> = Vec::new();
    let mut unsortable: Vec<usize> = Vec::new();

    for (ix, entry) in entries.iter().enumerate() {
        total_len += entry.vs.len();
        if entry.barycenter.is_some() {
            sortable.push(ix);
        } else {
            unsortable.push(ix);
        }
    }

    unsortable.sort_by(|&a, &b| entries[b].i.cmp(&entries[a].i));

    sortable.sort_by(|&a, &b| {
        let a_entry = &entries[a];
        let b_entry = &entries[b];
        let a_bc = a_entry.barycenter.unwrap_or(0.0);
        let b_bc = b_entry.barycenter.unwrap_or(0.0);
        if a_bc < b_bc {
            std::cmp::Ordering::Less
        } else if a_bc > b_bc {
            std::cmp::Ordering::Greater
        } else if !bias_right {
            a_entry.i.cmp(&b_entry.i)
        } else {
            b_entry.i.cmp(&a_entry.i)
        }
    });

    let mut out: Vec<String> = Vec::with_capacity(total_len);
    let mut sum: f64 = 0.0;
    let mut weight: f64 = 0.0;

    fn consume_unsortable(
        out: &mut Vec<String>,
        entries: &[SortEntry],
        unsortable: &mut Vec<usize>,
        mut index: usize,
    ) -> usize {
        while let Some(&last_ix) = unsortable.last() {
            let last = &entries[last_ix];
            if last.i > index {
                break;
            }
            unsortable.pop();
            out.extend(entries[last_ix].vs.iter().cloned());
            index += 1;
        }
        index
    }

    let mut vs_index = consume_unsortable(&mut out, entries, &mut unsortable, 0);

    for entry_ix in sortable {
        let entry = &entries[entry_ix];
        vs_index += entry.vs.len();
        out.extend(entry.vs.iter().cloned());
        if let (Some(bc), Some(w)) = (entry.barycenter, entry.weight) {
            sum += bc * w;
            weight += w;
        }
        vs_index = consume_unsortable(&mut out, entries, &mut unsortable, vs_index);
    }

    if weight != 0.0 {
        SortResult { vs: out, barycenter: Some(sum / weight), weight: Some(weight) }
    } else {
        SortResult { vs: out, barycenter: None, weight: None }
    }
}

fn expand_subgraphs(entries: &mut [SortEntry], subgraphs: &HashMap<String, SortResult>) {
    for entry in entries {
        let mut out: Vec<String> = Vec::new();
        for v in &entry.vs {
            if let Some(sg) = subgraphs.get(v) {
                out.extend(sg.vs.iter().cloned());
            } else {
                out.push(v.clone());
            }
        }
        entry.vs = out;
    }
}

fn merge_barycenters(target: &mut BarycenterEntry, other: &SortResult) {
    let Some(other_bc) = other.barycenter else { return };
    let other_w = other.weight.unwrap_or(0.0);

    if let (Some(bc), Some(w)) = (target.barycenter, target.weight) {
        let denom = w + other_w;
        target.barycenter = Some((bc * w + other_bc * other_w) / denom);
        target.weight = Some(denom);
    } else {
        target.barycenter = Some(other_bc);
        target.weight = Some(other_w);
    }
}

/// Sorts the children of `v` (or the whole layer graph, for the synthetic root) by barycenter,
/// recursing into any child that is itself a subgraph before folding its result back in.
pub fn sort_subgraph(
    g: &Graph<LayerNodeLabel, WeightLabel, LayerGraphLabel>,
    v: &str,
    cg: &Graph<(), (), ()>,
    bias_right: bool,
) -> SortResult {
    let mut movable: Vec<String> = g.children(v).into_iter().map(String::from).collect();

    let (border_left, border_right) = g
        .node(v)
        .map_or((None, None), |node| (node.border_left.clone(), node.border_right.clone()));

    if let (Some(bl), Some(br)) = (border_left.as_deref(), border_right.as_deref()) {
        movable.retain(|w| w != bl && w != br);
    }

    let mut subgraphs: HashMap<String, SortResult> = HashMap::default();
    let mut barycenters = barycenter(g, &movable);

    for entry in &mut barycenters {
        if !g.children(&entry.v).is_empty() {
            let subgraph_result = sort_subgraph(g, &entry.v, cg, bias_right);
            if subgraph_result.barycenter.is_some() {
                merge_barycenters(entry, &subgraph_result);
            }
            subgraphs.insert(entry.v.clone(), subgraph_result);
        }
    }

    let mut entries = resolve_conflicts(&barycenters, cg);
    expand_subgraphs(&mut entries, &subgraphs);

    let mut result = sort(&entries, bias_right);

    if let (Some(bl), Some(br)) = (border_left, border_right) {
        let mut out: Vec<String> = Vec::with_capacity(result.vs.len() + 2);
        out.push(bl.clone());
        out.extend(result.vs);
        out.push(br.clone());
        result.vs = out;

        let (Some(bl_pred), Some(br_pred)) = (g.first_predecessor(&bl), g.first_predecessor(&br)) else {
            return result;
        };

        let bl_order = g.node(bl_pred).and_then(|n| n.order).unwrap_or(0) as f64;
        let br_order = g.node(br_pred).and_then(|n| n.order).unwrap_or(0) as f64;

        let bc = result.barycenter.unwrap_or(0.0);
        let w = result.weight.unwrap_or(0.0);
        let denom = w + 2.0;
        result.barycenter = Some((bc * w + bl_order + br_order) / denom);
        result.weight = Some(denom);
    }

    result
}
