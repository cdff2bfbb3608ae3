//! Vertices and edges of the mesh.
//!
//! Both entities are identified by monotonically allocated integer ids. An
//! edge's weight is the sum of its endpoint ids and never changes, which makes
//! every selection rule in the engine a pure function of ids.

use std::fmt;

use crate::MAX_DEGREE;

/// Unique vertex identifier. Allocated in increasing order, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VertexId(pub u64);

impl VertexId {
    /// Create from raw id.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VertexId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique edge identifier. Allocated independently of vertex ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EdgeId(pub u64);

impl EdgeId {
    /// Create from raw id.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Edge weight: `source + target`.
pub type Weight = u64;

/// A mesh vertex with its ordered incident edge list.
///
/// The incident list keeps closed edges too, so `degree()` counts every
/// connection the vertex has ever taken part in.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<P> {
    id: VertexId,
    incident: Vec<EdgeId>,
    payload: Option<P>,
}

impl<P> Vertex<P> {
    pub(crate) fn new(id: VertexId, payload: Option<P>) -> Self {
        Self {
            id,
            incident: Vec::new(),
            payload,
        }
    }

    /// Vertex id.
    pub const fn id(&self) -> VertexId {
        self.id
    }

    /// Incident edge ids in attachment order.
    pub fn incident_edges(&self) -> &[EdgeId] {
        &self.incident
    }

    /// Number of incident edges, open or closed.
    pub fn degree(&self) -> usize {
        self.incident.len()
    }

    /// Whether the vertex has exactly `MAX_DEGREE` incident edges.
    ///
    /// A vertex past the bound is not saturated; repair leaves it alone and
    /// [`check_invariants`](crate::check_invariants) reports it instead.
    pub fn is_saturated(&self) -> bool {
        self.degree() == MAX_DEGREE
    }

    /// Caller-supplied payload, if any.
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Whether a payload is attached.
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    pub(crate) fn attach(&mut self, edge: EdgeId) {
        self.incident.push(edge);
    }

    pub(crate) fn set_payload(&mut self, payload: P) {
        self.payload = Some(payload);
    }
}

/// A logically undirected edge between two distinct vertices.
///
/// Source and target are kept as given so id-based tie-breaks stay stable.
/// Closing is one-way: a closed edge stays in the graph and in both incident
/// lists but is never selected again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    id: EdgeId,
    source: VertexId,
    target: VertexId,
    weight: Weight,
    closed: bool,
}

impl Edge {
    /// Create an open edge. The weight is fixed here.
    pub const fn new(id: EdgeId, source: VertexId, target: VertexId) -> Self {
        Self {
            id,
            source,
            target,
            weight: source.0 + target.0,
            closed: false,
        }
    }

    /// Edge id.
    pub const fn id(&self) -> EdgeId {
        self.id
    }

    /// Nominal source vertex.
    pub const fn source(&self) -> VertexId {
        self.source
    }

    /// Nominal target vertex.
    pub const fn target(&self) -> VertexId {
        self.target
    }

    /// Combined endpoint id.
    pub const fn weight(&self) -> Weight {
        self.weight
    }

    /// Whether the edge has been retired.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the edge is still eligible for selection.
    pub const fn is_open(&self) -> bool {
        !self.closed
    }

    /// The smaller of the two endpoint ids (weakest-edge tie-break).
    pub fn min_endpoint(&self) -> VertexId {
        self.source.min(self.target)
    }

    /// Whether `vertex` is one of the endpoints.
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.source == vertex || self.target == vertex
    }

    /// The endpoint that is not `vertex`, or `None` if the edge does not
    /// touch it.
    pub fn other_endpoint(&self, vertex: VertexId) -> Option<VertexId> {
        if self.source == vertex {
            Some(self.target)
        } else if self.target == vertex {
            Some(self.source)
        } else {
            None
        }
    }

    /// Retire the edge. Idempotent.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({}-{})", self.id, self.source, self.target)
    }
}
