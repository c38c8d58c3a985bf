//! Layered directed-graph layout.
//!
//! This crate assigns every node of a directed graph an `(x, y)` position and every edge a
//! polyline, arranging nodes into horizontal (or, with `rankdir`, vertical) layers such that
//! edges mostly point the same direction and cross each other as little as a handful of
//! heuristic passes can manage. It is a Rust-native pipeline in the tradition of Graphviz's
//! `dot` and the `dagre` JS library: acyclic reduction, longest-path/network-simplex ranking,
//! dummy-node normalization of edges that span multiple ranks, median/barycenter-sweep crossing
//! minimization, and a four-pass Brandes-Köpke x-coordinate assignment.
//!
//! Compound graphs (nodes nested inside other nodes, forming clusters) are supported throughout:
//! a nested subgraph gets its own contiguous rank range and a bounding rectangle derived from
//! synthetic border nodes.
//!
//! The entry point is [`layout`], which runs the whole pipeline over a [`graphlib::Graph`]
//! carrying this crate's [`model::NodeLabel`] / [`model::EdgeLabel`] / [`model::GraphLabel`]
//! label types, in place.

pub mod model;
pub mod error;
pub mod util;

pub mod acyclic;
pub mod add_border_segments;
pub mod coordinate_system;
pub mod greedy_fas;
pub mod nesting_graph;
pub mod normalize;
pub mod order;
pub mod parent_dummy_chains;
mod pipeline;
pub mod position;
pub mod rank;
pub mod self_edges;

pub use error::Error;
pub use model::{
    Acyclicer, Alignment4, BorderSide, DummyKind, EdgeLabel, GraphLabel, LabelPos, NodeLabel,
    Point, Ranker, Rect, SelfEdge,
};
pub use pipeline::layout;

/// Re-exported so downstream crates don't need a direct dependency just to name `Graph`/`EdgeKey`.
pub use graphlib;
