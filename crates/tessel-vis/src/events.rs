//! Mesh events for the growth timeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tessel_mesh::{EdgeId, EdgeView, Graph, GraphSnapshot, Rotation, VertexId, VertexView, Weight};

/// Events recorded while a mesh grows.
///
/// Frame 0 holds the seed graph; tick `n` records its events under frame `n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MeshEvent {
    /// A seed vertex received its bootstrap payload
    PayloadAttached { vertex: VertexId, frame: u64 },

    /// A vertex entered the graph, by seeding or by splitting `split_edge`
    VertexAdded {
        vertex: VertexId,
        split_edge: Option<EdgeId>,
        has_payload: bool,
        frame: u64,
    },

    /// An edge was created
    EdgeOpened {
        edge: EdgeId,
        source: VertexId,
        target: VertexId,
        weight: Weight,
        frame: u64,
    },

    /// Both endpoints of a seed edge now carry payloads
    EdgeRevealed { edge: EdgeId, frame: u64 },

    /// An edge was retired from selection
    EdgeClosed { edge: EdgeId, frame: u64 },

    /// A saturated vertex was relieved by rotating its strongest edge
    Rotated { rotation: Rotation, frame: u64 },
}

impl MeshEvent {
    /// Get the frame number for this event.
    pub fn frame(&self) -> u64 {
        match self {
            MeshEvent::PayloadAttached { frame, .. } => *frame,
            MeshEvent::VertexAdded { frame, .. } => *frame,
            MeshEvent::EdgeOpened { frame, .. } => *frame,
            MeshEvent::EdgeRevealed { frame, .. } => *frame,
            MeshEvent::EdgeClosed { frame, .. } => *frame,
            MeshEvent::Rotated { frame, .. } => *frame,
        }
    }
}

/// A snapshot of the mesh at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub frame: u64,
    pub graph: GraphSnapshot,
    pub vertex_count: usize,
    pub open_edge_count: usize,
    pub closed_edge_count: usize,
}

impl MeshSnapshot {
    /// Capture a graph as it stands at `frame`.
    pub fn from_graph<P>(frame: u64, graph: &Graph<P>) -> Self {
        Self::from_parts(frame, graph.snapshot())
    }

    fn from_parts(frame: u64, graph: GraphSnapshot) -> Self {
        let open_edge_count = graph.open_edges().count();
        Self {
            frame,
            vertex_count: graph.vertices.len(),
            closed_edge_count: graph.edges.len() - open_edge_count,
            open_edge_count,
            graph,
        }
    }

    /// Rebuild mesh state from events up to (but not including) the given event index.
    pub fn from_events(events: &[MeshEvent], up_to_event: usize) -> Self {
        let mut vertices: BTreeMap<VertexId, VertexView> = BTreeMap::new();
        let mut edges: BTreeMap<EdgeId, EdgeView> = BTreeMap::new();
        let mut frame = 0u64;

        for event in events.iter().take(up_to_event) {
            frame = event.frame();
            match event {
                MeshEvent::PayloadAttached { vertex, .. } => {
                    if let Some(view) = vertices.get_mut(vertex) {
                        view.has_payload = true;
                    }
                }
                MeshEvent::VertexAdded {
                    vertex,
                    has_payload,
                    ..
                } => {
                    vertices.insert(
                        *vertex,
                        VertexView {
                            id: *vertex,
                            degree: 0,
                            has_payload: *has_payload,
                        },
                    );
                }
                MeshEvent::EdgeOpened {
                    edge,
                    source,
                    target,
                    weight,
                    ..
                } => {
                    edges.insert(
                        *edge,
                        EdgeView {
                            id: *edge,
                            source: *source,
                            target: *target,
                            weight: *weight,
                            closed: false,
                        },
                    );
                    for end in [source, target] {
                        if let Some(view) = vertices.get_mut(end) {
                            view.degree += 1;
                        }
                    }
                }
                MeshEvent::EdgeClosed { edge, .. } => {
                    if let Some(view) = edges.get_mut(edge) {
                        view.closed = true;
                    }
                }
                // Informational; the edges they name are already recorded
                MeshEvent::EdgeRevealed { .. } | MeshEvent::Rotated { .. } => {}
            }
        }

        Self::from_parts(
            frame,
            GraphSnapshot {
                vertices: vertices.into_values().collect(),
                edges: edges.into_values().collect(),
            },
        )
    }
}
