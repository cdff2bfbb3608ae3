//! Tessel Mesh Growth
//!
//! Incremental construction of an undirected, degree-bounded mesh graph, one
//! vertex per growth tick.
//!
//! # Growth Rule
//!
//! Every edge weighs the sum of its endpoint ids. Each tick splits the
//! weakest open edge `A-B` with a new vertex `V`, closing `A-B` and opening
//! `A-V` and `V-B`. Closed edges are never deleted: they stay in the graph and
//! in both incident lists, and only stop being selectable.
//!
//! # Saturation Repair
//!
//! A vertex with `MAX_DEGREE` incident edges is saturated. After each split,
//! while the weakest open edge touches a saturated vertex, that vertex's
//! strongest other open edge is rotated onto the trigger edge's far end. Every
//! rotation removes one open edge from the pool, which bounds the loop.
//!
//! # Snapshots
//!
//! Graphs are values. [`grow`] takes `&Graph` and returns a new graph; the
//! input is never modified, so a caller holding an earlier snapshot never
//! observes a partial tick.
//!
//! # Usage
//!
//! ```
//! use tessel_mesh::{grow, find_loose_edges, Graph, MAX_DEGREE};
//!
//! let mut graph: Graph<&str> = Graph::triangle()?;
//! for _ in 0..3 {
//!     graph = grow(&graph, Some("seed"))?.graph;
//! }
//! for _ in 0..100 {
//!     graph = grow(&graph, None)?.graph;
//! }
//!
//! assert_eq!(graph.vertex_count(), 103);
//! assert!(graph.vertices().all(|v| v.degree() <= MAX_DEGREE));
//! assert!(find_loose_edges(&graph)?.is_empty());
//! # Ok::<(), tessel_mesh::Error>(())
//! ```

mod diagnostics;
mod entity;
mod error;
mod graph;
mod grow;
mod ids;
mod repair;
mod seed;
mod select;
mod snapshot;

pub use diagnostics::{check_invariants, find_loose_edges, InvariantViolation};
pub use entity::{Edge, EdgeId, Vertex, VertexId, Weight};
pub use error::{Error, Result};
pub use graph::Graph;
pub use grow::{add_new_vertex, grow, Growth, GrowthKind, Tick, BOOTSTRAP_VERTICES};
pub use ids::IdAllocator;
pub use repair::{sanitize, Repaired, Rotation};
pub use seed::{SeedData, SeedEdge, SeedVertex};
pub use select::{find_strongest_incident_edge, find_weakest_open_edge};
pub use snapshot::{EdgeView, GraphSnapshot, VertexView};

/// Maximum incident edges per vertex, counting closed edges.
pub const MAX_DEGREE: usize = 6;

// A saturated vertex must keep an edge to rotate besides the trigger.
const _: () = assert!(MAX_DEGREE > 1);

