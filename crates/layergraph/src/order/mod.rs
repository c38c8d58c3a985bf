//! Node ordering / crossing minimization.
//!
//! Assigns every node an `order` within its rank, minimizing crossings between adjacent ranks via
//! repeated median/barycenter sweeps (alternating sweep direction and left/right tie-break bias)
//! until four rounds pass without improving the crossing count.

mod types;
pub use types::{LayerGraphLabel, LayerNodeLabel, Relationship, WeightLabel};

mod layer_graph;
pub use layer_graph::{build_layer_graph, build_layer_graph_with_root, create_root_node};

mod barycenter;
pub use barycenter::{barycenter, resolve_conflicts, sort, sort_subgraph, BarycenterEntry, SortEntry, SortResult};

mod constraints;
pub use constraints::add_subgraph_constraints;

mod init_order;
pub use init_order::init_order;

mod cross_count;
pub use cross_count::cross_count;

mod ordering;
pub use ordering::{order, OrderOptions};
