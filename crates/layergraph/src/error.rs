//! Error types returned by fallible entry points.
//!
//! Most of the pipeline is infallible by construction (it degrades gracefully on odd input, the
//! way upstream Dagre's JS does), but a few entry points accept caller-supplied knobs or graphs
//! that can be invalid on their face, and those report a proper error instead of panicking.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph must be directed for layout (got an undirected graph)")]
    NotDirected,

    #[error("node `{id}` has a non-finite width or height ({width}x{height})")]
    InvalidNodeSize { id: String, width: f64, height: f64 },

    #[error("edge `{v}` -> `{w}` has a minlen of 0, which cannot be satisfied")]
    InvalidMinlen { v: String, w: String },

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}
