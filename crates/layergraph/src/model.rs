//! Node, edge, and graph label types shared by every stage of the layout pipeline.
//!
//! These are intentionally lightweight and `Clone`-friendly: the pipeline reads and writes them
//! through many passes, and several passes (e.g. [`crate::normalize`]) stash a whole label inside
//! another node's label while a long edge is split into a dummy chain.

use graphlib::EdgeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPos {
    #[default]
    C,
    L,
    R,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The graph-level label: layout knobs plus bookkeeping the pipeline threads between stages.
#[derive(Debug, Clone)]
pub struct GraphLabel {
    pub rankdir: RankDir,
    pub nodesep: f64,
    pub ranksep: f64,
    pub edgesep: f64,
    pub marginx: f64,
    pub marginy: f64,
    pub align: Option<Alignment4>,
    pub ranker: Ranker,
    pub acyclicer: Acyclicer,

    // Bookkeeping threaded between pipeline stages; not meant for callers to set.
    pub dummy_chains: Vec<String>,
    pub nesting_root: Option<String>,
    pub node_rank_factor: Option<usize>,

    // Output, populated once `layout` returns.
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub max_rank: Option<i32>,
}

impl Default for GraphLabel {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            ranksep: 50.0,
            edgesep: 20.0,
            marginx: 0.0,
            marginy: 0.0,
            align: None,
            ranker: Ranker::NetworkSimplex,
            acyclicer: Acyclicer::Dfs,
            dummy_chains: Vec::new(),
            nesting_root: None,
            node_rank_factor: None,
            width: None,
            height: None,
            max_rank: None,
        }
    }
}

/// Which ranking algorithm assigns nodes to layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ranker {
    #[default]
    NetworkSimplex,
    TightTree,
    LongestPath,
}

/// Which acyclic-reduction strategy turns the input digraph into a DAG before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acyclicer {
    #[default]
    Dfs,
    Greedy,
}

/// Which corner the Brandes-Köpke x-coordinate balance should prefer, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment4 {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rank: Option<i32>,
    pub order: Option<usize>,
    pub dummy: Option<DummyKind>,
    pub labelpos: Option<LabelPos>,
    pub edge_label: Option<Box<EdgeLabel>>,
    pub edge_obj: Option<EdgeKey>,

    // Compound-node bookkeeping (only set on parents / border dummies).
    pub min_rank: Option<i32>,
    pub max_rank: Option<i32>,
    pub border_type: Option<BorderSide>,
    pub border_left: Vec<Option<String>>,
    pub border_right: Vec<Option<String>>,
    pub border_top: Option<String>,
    pub border_bottom: Option<String>,

    pub self_edges: Vec<SelfEdge>,
}

/// What kind of synthetic node this is, if it's not one the caller added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DummyKind {
    /// One segment of a long edge's dummy chain.
    Edge,
    /// The segment of an edge's dummy chain that carries the edge label's box.
    EdgeLabel,
    /// A proxy node used to reserve rank-space for an edge label before ranking.
    EdgeProxy,
    /// A synthetic self-loop placeholder, later folded back into the owning node's position.
    SelfEdge,
    /// A left/right/top/bottom border segment of a compound node's rectangle.
    Border,
    /// The synthetic root of the nesting graph used to keep each subgraph's ranks contiguous.
    NestingRoot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub width: f64,
    pub height: f64,
    pub labelpos: LabelPos,
    pub labeloffset: f64,
    pub label_rank: Option<i32>,
    pub minlen: usize,
    pub weight: f64,
    pub nesting_edge: bool,
    pub reversed: bool,
    pub forward_name: Option<String>,

    pub x: Option<f64>,
    pub y: Option<f64>,
    pub points: Vec<Point>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            labelpos: LabelPos::R,
            labeloffset: 10.0,
            label_rank: None,
            minlen: 1,
            weight: 1.0,
            nesting_edge: false,
            reversed: false,
            forward_name: None,
            x: None,
            y: None,
            points: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelfEdge {
    pub edge_obj: EdgeKey,
    pub label: EdgeLabel,
}
