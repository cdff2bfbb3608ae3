//! Error types for tessel-mesh.

use thiserror::Error;

use crate::{EdgeId, VertexId};

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while growing or repairing a mesh.
///
/// None of these are transient. A structural or lookup error means the graph
/// the caller holds is corrupt; the growth sequence should stop there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Growth needed an open edge to split but every edge is closed.
    #[error("no open edge left to split")]
    NoOpenEdge,

    /// A saturated vertex has no open incident edge to rotate away.
    #[error("saturated vertex {vertex} has no closable incident edge")]
    NoClosableEdge { vertex: VertexId },

    /// The repair loop ran more rotations than there were open edges.
    #[error("repair exceeded its bound of {bound} rotations")]
    RepairBoundExceeded { bound: usize },

    /// A vertex lists an edge that does not touch it.
    #[error("edge {edge} is listed on vertex {vertex} but does not touch it")]
    DetachedEdge { edge: EdgeId, vertex: VertexId },

    /// An edge would connect a vertex to itself. Repair hits this when a
    /// saturated vertex has two open edges to the trigger's far end.
    #[error("edge endpoints must differ, got {vertex} twice")]
    SelfLoop { vertex: VertexId },

    /// A referenced vertex does not exist.
    #[error("vertex {0} not found")]
    VertexNotFound(VertexId),

    /// A referenced edge does not exist.
    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),

    /// Seed data failed validation.
    #[error("invalid seed: {reason}")]
    InvalidSeed { reason: String },
}

impl Error {
    /// Whether this is an unresolvable structural invariant breach.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::NoOpenEdge
                | Error::NoClosableEdge { .. }
                | Error::RepairBoundExceeded { .. }
                | Error::DetachedEdge { .. }
                | Error::SelfLoop { .. }
        )
    }

    /// Whether this is a dangling id reference.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Error::VertexNotFound(_) | Error::EdgeNotFound(_))
    }
}
