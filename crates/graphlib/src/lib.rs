//! A small directed multigraph container with compound (nested subgraph) support.
//!
//! This crate plays the same role Dagre's `graphlib` plays for Dagre: it is the graph
//! abstraction that a layered layout engine is built on top of, but it knows nothing about
//! layout itself. Nodes, edges, and the graph as a whole each carry a caller-supplied label
//! type; this crate only manages identity, adjacency, and parent/child structure.

mod graph;

pub use graph::alg;
pub use graph::{EdgeKey, Graph, GraphOptions};
