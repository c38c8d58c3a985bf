//! Node and edge labels for the feasible spanning tree built during ranking.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNodeLabel {
    pub low: i32,
    pub lim: i32,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TreeEdgeLabel {
    pub cutvalue: f64,
}
