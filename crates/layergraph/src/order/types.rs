//! Shared types for the ordering sweep: a lightweight layer-graph node label and the
//! in/out-edge relationship a sweep direction reads.

/// Which direction a layer graph should read neighbor orders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    InEdges,
    OutEdges,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerGraphLabel {
    pub root: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightLabel {
    pub weight: f64,
}

/// A rank-local stand-in for [`crate::model::NodeLabel`]. Barycenter sorting only ever needs a
/// node's current order and, for subgraph nodes, the border segment bounding it at this rank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerNodeLabel {
    pub order: Option<usize>,
    pub border_left: Option<String>,
    pub border_right: Option<String>,
}
