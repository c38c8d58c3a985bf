//! Graph construction options.

/// Structural capabilities a [`Graph`](super::Graph) is constructed with.
///
/// These mirror the three flags graphlib-style containers are conventionally built with:
/// whether more than one edge may connect the same ordered pair of nodes (`multigraph`),
/// whether nodes may nest inside other nodes (`compound`), and whether edges are directed.
/// Layout engines built on top of this container generally require `directed: true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    pub multigraph: bool,
    pub compound: bool,
    pub directed: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            multigraph: false,
            compound: false,
            directed: true,
        }
    }
}
