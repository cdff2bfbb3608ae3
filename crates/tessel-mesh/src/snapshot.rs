//! Plain-data view of a graph for renderers.
//!
//! Renderers only need `id`, `source` and `target`; `weight` and `closed` are
//! kept so a snapshot can be checked without the engine.

use crate::{EdgeId, Graph, VertexId, Weight};

/// A vertex as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexView {
    pub id: VertexId,
    pub degree: usize,
    pub has_payload: bool,
}

/// An edge as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeView {
    pub id: EdgeId,
    pub source: VertexId,
    pub target: VertexId,
    pub weight: Weight,
    pub closed: bool,
}

/// Every vertex and edge of a graph, in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSnapshot {
    pub vertices: Vec<VertexView>,
    pub edges: Vec<EdgeView>,
}

impl GraphSnapshot {
    /// Edges a renderer should draw.
    pub fn open_edges(&self) -> impl Iterator<Item = &EdgeView> + '_ {
        self.edges.iter().filter(|e| !e.closed)
    }
}

impl<P> Graph<P> {
    /// Capture the renderer view of this graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        let vertices = self
            .vertices()
            .map(|v| VertexView {
                id: v.id(),
                degree: v.degree(),
                has_payload: v.has_payload(),
            })
            .collect();
        let edges = self
            .edges()
            .map(|e| EdgeView {
                id: e.id(),
                source: e.source(),
                target: e.target(),
                weight: e.weight(),
                closed: e.is_closed(),
            })
            .collect();
        GraphSnapshot { vertices, edges }
    }
}
