//! The graph store.
//!
//! A `Graph` is a value. Vertices sit behind `Arc` and are written with
//! `Arc::make_mut`, so cloning a graph is cheap and mutating the clone never
//! touches an entity still referenced by the original snapshot. Every engine
//! operation takes `&Graph` and returns a new one.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::select::{find_strongest_incident_edge, find_weakest_open_edge};
use crate::{Edge, EdgeId, Error, IdAllocator, Result, Vertex, VertexId};

/// Vertices and edges indexed by id, plus the id allocator that extends them.
#[derive(Debug)]
pub struct Graph<P> {
    vertices: BTreeMap<VertexId, Arc<Vertex<P>>>,
    edges: BTreeMap<EdgeId, Edge>,
    ids: IdAllocator,
}

impl<P> Clone for Graph<P> {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
            ids: self.ids,
        }
    }
}

impl<P> Graph<P> {
    pub(crate) fn empty(ids: IdAllocator) -> Self {
        Self {
            vertices: BTreeMap::new(),
            edges: BTreeMap::new(),
            ids,
        }
    }

    /// Look up a vertex.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex<P>> {
        self.vertices
            .get(&id)
            .map(Arc::as_ref)
            .ok_or(Error::VertexNotFound(id))
    }

    /// Look up an edge.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edges.get(&id).ok_or(Error::EdgeNotFound(id))
    }

    /// Whether a vertex with this id exists.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Whether an edge with this id exists.
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// All vertices in id order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<P>> + '_ {
        self.vertices.values().map(Arc::as_ref)
    }

    /// All edges in id order, open and closed.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Open edges in id order.
    pub fn open_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values().filter(|edge| edge.is_open())
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges, open and closed.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of open edges.
    pub fn open_edge_count(&self) -> usize {
        self.open_edges().count()
    }

    /// Number of vertices carrying a payload.
    pub fn payload_count(&self) -> usize {
        self.vertices().filter(|v| v.has_payload()).count()
    }

    /// The id allocator that will name the next vertex and edge.
    pub fn allocator(&self) -> &IdAllocator {
        &self.ids
    }

    /// The weakest open edge in the whole graph.
    pub fn weakest_open_edge(&self) -> Option<&Edge> {
        find_weakest_open_edge(self.edges.values(), &HashSet::new())
    }

    /// The weakest open edge outside `excluded`.
    pub fn weakest_open_edge_excluding(&self, excluded: &HashSet<EdgeId>) -> Option<&Edge> {
        find_weakest_open_edge(self.edges.values(), excluded)
    }

    /// The strongest open edge incident to `vertex`, skipping `exclude`.
    ///
    /// Fails if the vertex or any of its incident ids does not resolve.
    pub fn strongest_incident_edge(
        &self,
        vertex: VertexId,
        exclude: EdgeId,
    ) -> Result<Option<&Edge>> {
        let incident = self
            .vertex(vertex)?
            .incident_edges()
            .iter()
            .map(|&id| self.edge(id))
            .collect::<Result<Vec<_>>>()?;
        Ok(find_strongest_incident_edge(incident, exclude))
    }

    pub(crate) fn insert_vertex(&mut self, vertex: Vertex<P>) {
        self.vertices.insert(vertex.id(), Arc::new(vertex));
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge) {
        self.edges.insert(edge.id(), edge);
    }

    pub(crate) fn close_edge(&mut self, id: EdgeId) -> Result<()> {
        self.edges
            .get_mut(&id)
            .ok_or(Error::EdgeNotFound(id))?
            .close();
        Ok(())
    }
}

impl<P: Clone> Graph<P> {
    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex<P>> {
        self.vertices
            .get_mut(&id)
            .map(Arc::make_mut)
            .ok_or(Error::VertexNotFound(id))
    }

    /// Create a vertex with a freshly allocated id.
    pub(crate) fn add_vertex(&mut self, payload: Option<P>) -> VertexId {
        let id = self.ids.next_vertex_id();
        self.insert_vertex(Vertex::new(id, payload));
        id
    }

    /// Create an open edge and append it to both endpoints' incident lists.
    pub(crate) fn connect(&mut self, source: VertexId, target: VertexId) -> Result<EdgeId> {
        if source == target {
            return Err(Error::SelfLoop { vertex: source });
        }
        if !self.contains_vertex(source) {
            return Err(Error::VertexNotFound(source));
        }
        if !self.contains_vertex(target) {
            return Err(Error::VertexNotFound(target));
        }

        let id = self.ids.next_edge_id();
        self.insert_edge(Edge::new(id, source, target));
        self.vertex_mut(source)?.attach(id);
        self.vertex_mut(target)?.attach(id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeedData;

    fn triangle() -> Graph<&'static str> {
        Graph::from_seed(SeedData::triangle()).unwrap()
    }

    #[test]
    fn lookup_misses_are_lookup_errors() {
        let graph = triangle();
        assert_eq!(graph.vertex(VertexId(99)).unwrap_err(), Error::VertexNotFound(VertexId(99)));
        assert_eq!(graph.edge(EdgeId(99)).unwrap_err(), Error::EdgeNotFound(EdgeId(99)));
    }

    #[test]
    fn connect_appends_to_both_endpoints() {
        let mut graph = triangle();
        let id = graph.connect(VertexId(1), VertexId(3)).unwrap();

        assert_eq!(id, EdgeId(4));
        assert_eq!(graph.edge(id).unwrap().weight(), 4);
        assert_eq!(graph.vertex(VertexId(1)).unwrap().incident_edges().last(), Some(&id));
        assert_eq!(graph.vertex(VertexId(3)).unwrap().incident_edges().last(), Some(&id));
        assert!(graph.vertex(VertexId(2)).unwrap().incident_edges().iter().all(|&e| e != id));
    }

    #[test]
    fn connect_rejects_self_loops_and_missing_vertices() {
        let mut graph = triangle();
        assert_eq!(
            graph.connect(VertexId(2), VertexId(2)).unwrap_err(),
            Error::SelfLoop { vertex: VertexId(2) }
        );
        assert_eq!(
            graph.connect(VertexId(2), VertexId(8)).unwrap_err(),
            Error::VertexNotFound(VertexId(8))
        );
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn clone_is_isolated_from_mutation() {
        let original = triangle();
        let mut next = original.clone();

        next.connect(VertexId(1), VertexId(2)).unwrap();
        next.close_edge(EdgeId(1)).unwrap();
        next.vertex_mut(VertexId(3)).unwrap().set_payload("late");

        assert_eq!(original.edge_count(), 3);
        assert!(original.edge(EdgeId(1)).unwrap().is_open());
        assert_eq!(original.vertex(VertexId(1)).unwrap().degree(), 2);
        assert!(original.vertex(VertexId(3)).unwrap().payload().is_none());
        assert_eq!(next.vertex(VertexId(1)).unwrap().degree(), 3);
    }

    #[test]
    fn weakest_and_strongest_queries() {
        let graph = triangle();
        assert_eq!(graph.weakest_open_edge().unwrap().id(), EdgeId(1));

        // Vertex 3 touches edges 2 (w5) and 3 (w4).
        let strongest = graph.strongest_incident_edge(VertexId(3), EdgeId(3)).unwrap();
        assert_eq!(strongest.unwrap().id(), EdgeId(2));
        let strongest = graph.strongest_incident_edge(VertexId(3), EdgeId(2)).unwrap();
        assert_eq!(strongest.unwrap().id(), EdgeId(3));

        let excluded: HashSet<_> = [EdgeId(1)].into_iter().collect();
        assert_eq!(graph.weakest_open_edge_excluding(&excluded).unwrap().id(), EdgeId(3));
    }

    #[test]
    fn counts() {
        let mut graph = triangle();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.open_edge_count(), 3);
        assert_eq!(graph.payload_count(), 0);

        graph.close_edge(EdgeId(2)).unwrap();
        assert_eq!(graph.open_edge_count(), 2);
        assert_eq!(graph.edge_count(), 3);
    }
}
