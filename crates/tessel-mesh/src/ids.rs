//! Monotonic id allocation.

use crate::{EdgeId, VertexId};

/// Independent vertex and edge id counters.
///
/// Seeded from the largest ids present in the seed data; every id handed out
/// afterwards is strictly greater than anything seen before. The allocator is
/// owned by a [`Graph`](crate::Graph) and copied with it, so two snapshots
/// never share counter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdAllocator {
    last_vertex: u64,
    last_edge: u64,
}

impl IdAllocator {
    /// Create an allocator whose next ids follow `max_vertex` and `max_edge`.
    pub const fn seeded(max_vertex: VertexId, max_edge: EdgeId) -> Self {
        Self {
            last_vertex: max_vertex.0,
            last_edge: max_edge.0,
        }
    }

    /// Allocate the next vertex id.
    pub fn next_vertex_id(&mut self) -> VertexId {
        self.last_vertex += 1;
        VertexId(self.last_vertex)
    }

    /// Allocate the next edge id.
    pub fn next_edge_id(&mut self) -> EdgeId {
        self.last_edge += 1;
        EdgeId(self.last_edge)
    }

    /// Largest vertex id allocated or seeded so far.
    pub const fn last_vertex_id(&self) -> VertexId {
        VertexId(self.last_vertex)
    }

    /// Largest edge id allocated or seeded so far.
    pub const fn last_edge_id(&self) -> EdgeId {
        EdgeId(self.last_edge)
    }
}
