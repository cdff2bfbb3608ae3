//! Seed data: the starting graph handed to the engine by its driver.

use std::collections::BTreeSet;

use crate::{Edge, EdgeId, Error, Graph, IdAllocator, Result, Vertex, VertexId};

/// A vertex in the seed data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedVertex<P> {
    pub id: VertexId,
    /// Absent in JSON means no payload.
    pub payload: Option<P>,
}

/// An edge in the seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedEdge {
    pub id: EdgeId,
    pub source: VertexId,
    pub target: VertexId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub closed: bool,
}

/// The initial vertices and edges of a mesh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedData<P> {
    pub vertices: Vec<SeedVertex<P>>,
    pub edges: Vec<SeedEdge>,
}

impl<P> SeedData<P> {
    /// The canonical bootstrap triangle: `1-2`, `2-3`, `3-1` with no payloads.
    pub fn triangle() -> Self {
        let vertices = (1..=3)
            .map(|id| SeedVertex {
                id: VertexId(id),
                payload: None,
            })
            .collect();
        let edges = [(1, 1, 2), (2, 2, 3), (3, 3, 1)]
            .into_iter()
            .map(|(id, source, target)| SeedEdge {
                id: EdgeId(id),
                source: VertexId(source),
                target: VertexId(target),
                closed: false,
            })
            .collect();
        Self { vertices, edges }
    }
}

fn invalid(reason: impl Into<String>) -> Error {
    Error::InvalidSeed {
        reason: reason.into(),
    }
}

impl<P: Clone> Graph<P> {
    /// Build a graph from seed data.
    ///
    /// Ids must be positive and unique, and every edge must join two distinct
    /// seeded vertices. Incident lists are derived from the edges in id order.
    /// The id allocator starts above the largest seeded ids.
    pub fn from_seed(seed: SeedData<P>) -> Result<Self> {
        let SeedData { vertices, mut edges } = seed;

        let mut vertex_ids = BTreeSet::new();
        for vertex in &vertices {
            if vertex.id.0 == 0 {
                return Err(invalid("vertex id 0 is reserved"));
            }
            if !vertex_ids.insert(vertex.id) {
                return Err(invalid(format!("duplicate vertex id {}", vertex.id)));
            }
        }

        let mut edge_ids = BTreeSet::new();
        for edge in &edges {
            if edge.id.0 == 0 {
                return Err(invalid("edge id 0 is reserved"));
            }
            if !edge_ids.insert(edge.id) {
                return Err(invalid(format!("duplicate edge id {}", edge.id)));
            }
            if edge.source == edge.target {
                return Err(invalid(format!("edge {} is a self-loop on {}", edge.id, edge.source)));
            }
            for endpoint in [edge.source, edge.target] {
                if !vertex_ids.contains(&endpoint) {
                    return Err(invalid(format!(
                        "edge {} references missing vertex {}",
                        edge.id, endpoint
                    )));
                }
            }
        }

        let max_vertex = vertex_ids.last().copied().unwrap_or_default();
        let max_edge = edge_ids.last().copied().unwrap_or_default();
        let mut graph = Graph::empty(IdAllocator::seeded(max_vertex, max_edge));

        for seed_vertex in vertices {
            graph.insert_vertex(Vertex::new(seed_vertex.id, seed_vertex.payload));
        }

        edges.sort_by_key(|edge| edge.id);
        for seed_edge in edges {
            let mut edge = Edge::new(seed_edge.id, seed_edge.source, seed_edge.target);
            if seed_edge.closed {
                edge.close();
            }
            graph.insert_edge(edge);
            graph.vertex_mut(seed_edge.source)?.attach(seed_edge.id);
            graph.vertex_mut(seed_edge.target)?.attach(seed_edge.id);
        }

        Ok(graph)
    }

    /// The bootstrap triangle as a graph.
    pub fn triangle() -> Result<Self> {
        Self::from_seed(SeedData::triangle())
    }
}
