//! Add left/right border segments to every compound parent.
//!
//! One dummy node per rank in `[min_rank, max_rank]` on each side, chained together by rank so
//! ordering and positioning have something to route edges around and something to derive the
//! cluster's final rectangle from.

use graphlib::Graph;

use crate::model::{BorderSide, DummyKind, EdgeLabel, GraphLabel, NodeLabel};

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    if !g.options().compound {
        return;
    }

    fn dfs(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str) {
        let children: Vec<String> = g.children(v).into_iter().map(String::from).collect();
        for c in children {
            dfs(g, &c);
        }

        let Some((min_rank, max_rank)) = g.node(v).and_then(|n| Some((n.min_rank?, n.max_rank?))) else {
            return;
        };

        let max_rank_usize = max_rank.max(0) as usize;
        if let Some(n) = g.node_mut(v) {
            n.border_left = vec![None; max_rank_usize + 1];
            n.border_right = vec![None; max_rank_usize + 1];
        }

        for rank in min_rank..=max_rank {
            add_border_node(g, BorderSide::Left, "_bl", v, rank);
            add_border_node(g, BorderSide::Right, "_br", v, rank);
        }
    }

    let roots: Vec<String> = g.children_root().into_iter().map(String::from).collect();
    for v in roots {
        dfs(g, &v);
    }
}

fn add_border_node(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, side: BorderSide, prefix: &str, sg: &str, rank: i32) {
    let prev = g
        .node(sg)
        .and_then(|n| {
            let idx = (rank - 1) as usize;
            match side {
                BorderSide::Left => n.border_left.get(idx).and_then(|v| v.clone()),
                BorderSide::Right => n.border_right.get(idx).and_then(|v| v.clone()),
            }
        })
        .unwrap_or_default();

    let curr = add_dummy_node(
        g,
        NodeLabel {
            width: 0.0,
            height: 0.0,
            rank: Some(rank),
            dummy: Some(DummyKind::Border),
            border_type: Some(side),
            ..Default::default()
        },
        prefix,
    );

    if let Some(n) = g.node_mut(sg) {
        let idx = rank.max(0) as usize;
        let list = match side {
            BorderSide::Left => &mut n.border_left,
            BorderSide::Right => &mut n.border_right,
        };
        if idx >= list.len() {
            list.resize(idx + 1, None);
        }
        list[idx] = Some(curr.clone());
    }

    g.set_parent(&curr, Some(sg));
    if !prev.is_empty() {
        g.set_edge_with_label(prev, curr, EdgeLabel { weight: 1.0, ..Default::default() });
    }
}

fn add_dummy_node(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, label: NodeLabel, prefix: &str) -> String {
    if !g.has_node(prefix) {
        g.set_node(prefix, label);
        return prefix.to_string();
    }
    for i in 1usize.. {
        let v = format!("{prefix}{i}");
        if !g.has_node(&v) {
            g.set_node(&v, label);
            return v;
        }
    }
    unreachable!()
}
