//! The growth step: one new vertex per tick.
//!
//! # Bootstrap
//!
//! While the graph is the three-vertex seed and not every seed vertex carries
//! a payload, a tick attaches the payload to the lowest-id vertex without one
//! and creates no topology.
//!
//! # Split
//!
//! Afterwards each tick splits the weakest open edge `A-B`: a new vertex `V`
//! is joined by `A-V` and `V-B`, and `A-B` is closed. This can push `A` or `B`
//! past `MAX_DEGREE`; [`grow`] always follows the split with
//! [`sanitize`](crate::sanitize) to restore the bound.

use tracing::{debug, trace};

use crate::repair::{sanitize, Rotation};
use crate::{EdgeId, Error, Graph, Result, VertexId};

/// Number of seed vertices that receive payloads before topology grows.
pub const BOOTSTRAP_VERTICES: usize = 3;

/// What a growth step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthKind {
    /// A payload was attached to a seed vertex.
    Bootstrap { vertex: VertexId },
    /// `split_edge` was closed and replaced by a path through `vertex`.
    Split { split_edge: EdgeId, vertex: VertexId },
}

/// Result of [`add_new_vertex`].
#[derive(Debug, Clone)]
pub struct Growth<P> {
    pub graph: Graph<P>,
    pub kind: GrowthKind,
    /// Edges created by a split, or seed edges revealed during bootstrap.
    pub new_edges: Vec<EdgeId>,
    pub closed_edges: Vec<EdgeId>,
}

/// Result of [`grow`]: a growth step followed by repair.
#[derive(Debug, Clone)]
pub struct Tick<P> {
    pub graph: Graph<P>,
    pub kind: GrowthKind,
    /// Growth edges first, then edges opened by repair, in creation order.
    pub new_edges: Vec<EdgeId>,
    pub closed_edges: Vec<EdgeId>,
    pub rotations: Vec<Rotation>,
}

impl<P> Graph<P> {
    /// Whether the next tick attaches a bootstrap payload.
    pub fn in_bootstrap(&self) -> bool {
        self.bootstrap_vertex().is_some()
    }

    /// The seed vertex the next bootstrap tick fills, lowest id first.
    fn bootstrap_vertex(&self) -> Option<VertexId> {
        if self.vertex_count() != BOOTSTRAP_VERTICES {
            return None;
        }
        self.vertices().find(|v| !v.has_payload()).map(|v| v.id())
    }
}

/// One growth tick: grow, then repair.
///
/// The input graph is left untouched. Any error means the input was corrupt
/// and the growth sequence should stop.
pub fn grow<P: Clone + Default>(graph: &Graph<P>, payload: Option<P>) -> Result<Tick<P>> {
    let growth = add_new_vertex(graph, payload)?;
    let repaired = sanitize(&growth.graph)?;

    let mut new_edges = growth.new_edges;
    let mut closed_edges = growth.closed_edges;
    for rotation in &repaired.rotations {
        new_edges.push(rotation.opened);
        closed_edges.extend([rotation.trigger, rotation.strongest]);
    }

    Ok(Tick {
        graph: repaired.graph,
        kind: growth.kind,
        new_edges,
        closed_edges,
        rotations: repaired.rotations,
    })
}

/// Add one vertex by splitting the weakest open edge, or attach a bootstrap
/// payload while the seed is still filling.
///
/// New vertices carry `payload` as given. A bootstrap tick without a payload
/// attaches `P::default()`, so the seed always fills in three ticks.
pub fn add_new_vertex<P: Clone + Default>(
    graph: &Graph<P>,
    payload: Option<P>,
) -> Result<Growth<P>> {
    if let Some(vertex) = graph.bootstrap_vertex() {
        return attach_bootstrap_payload(graph, vertex, payload.unwrap_or_default());
    }

    let split = *graph.weakest_open_edge().ok_or(Error::NoOpenEdge)?;
    let (a, b) = (split.source(), split.target());

    let mut next = graph.clone();
    let vertex = next.add_vertex(payload);
    let edge_a = next.connect(a, vertex)?;
    let edge_b = next.connect(vertex, b)?;
    next.close_edge(split.id())?;

    debug!(
        split = %split.id(),
        vertex = %vertex,
        a = %a,
        b = %b,
        "split weakest edge"
    );

    Ok(Growth {
        graph: next,
        kind: GrowthKind::Split {
            split_edge: split.id(),
            vertex,
        },
        new_edges: vec![edge_a, edge_b],
        closed_edges: vec![split.id()],
    })
}

fn attach_bootstrap_payload<P: Clone>(
    graph: &Graph<P>,
    vertex: VertexId,
    payload: P,
) -> Result<Growth<P>> {
    let mut next = graph.clone();
    next.vertex_mut(vertex)?.set_payload(payload);

    // Seed edges become visible once both endpoints carry a payload.
    let mut revealed = Vec::new();
    for &edge_id in next.vertex(vertex)?.incident_edges() {
        let edge = next.edge(edge_id)?;
        let other = edge.other_endpoint(vertex).ok_or(Error::DetachedEdge {
            edge: edge_id,
            vertex,
        })?;
        if next.vertex(other)?.has_payload() {
            revealed.push(edge_id);
        }
    }
    revealed.sort_unstable();

    trace!(vertex = %vertex, revealed = revealed.len(), "attached bootstrap payload");

    Ok(Growth {
        graph: next,
        kind: GrowthKind::Bootstrap { vertex },
        new_edges: revealed,
        closed_edges: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{find_loose_edges, MAX_DEGREE};

    fn bootstrapped() -> Graph<u32> {
        let mut graph = Graph::triangle().unwrap();
        for tick in 0..3 {
            graph = grow(&graph, Some(tick)).unwrap().graph;
        }
        graph
    }

    #[test]
    fn bootstrap_fills_seed_in_id_order() {
        let graph: Graph<u32> = Graph::triangle().unwrap();
        assert!(graph.in_bootstrap());

        let first = grow(&graph, Some(10)).unwrap();
        assert_eq!(first.kind, GrowthKind::Bootstrap { vertex: VertexId(1) });
        assert!(first.new_edges.is_empty());

        let second = grow(&first.graph, Some(20)).unwrap();
        assert_eq!(second.kind, GrowthKind::Bootstrap { vertex: VertexId(2) });
        assert_eq!(second.new_edges, vec![EdgeId(1)]);

        let third = grow(&second.graph, Some(30)).unwrap();
        assert_eq!(third.kind, GrowthKind::Bootstrap { vertex: VertexId(3) });
        assert_eq!(third.new_edges, vec![EdgeId(2), EdgeId(3)]);

        let graph = third.graph;
        assert!(!graph.in_bootstrap());
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.open_edge_count(), 3);
        assert_eq!(graph.vertex(VertexId(1)).unwrap().payload(), Some(&10));
        assert_eq!(graph.vertex(VertexId(2)).unwrap().payload(), Some(&20));
        assert_eq!(graph.vertex(VertexId(3)).unwrap().payload(), Some(&30));
    }

    #[test]
    fn bootstrap_without_payload_attaches_default() {
        let mut graph: Graph<u32> = Graph::triangle().unwrap();
        for expected in 1..=3 {
            let tick = grow(&graph, None).unwrap();
            assert_eq!(tick.kind, GrowthKind::Bootstrap { vertex: VertexId(expected) });
            graph = tick.graph;
        }

        assert!(!graph.in_bootstrap());
        assert_eq!(graph.vertex_count(), 3);
        assert!(graph.vertices().all(|v| v.payload() == Some(&0)));

        let split = grow(&graph, None).unwrap();
        assert!(matches!(split.kind, GrowthKind::Split { .. }));
    }

    #[test]
    fn first_split_takes_lightest_seed_edge() {
        let graph = bootstrapped();
        let tick = grow(&graph, None).unwrap();

        assert_eq!(
            tick.kind,
            GrowthKind::Split {
                split_edge: EdgeId(1),
                vertex: VertexId(4)
            }
        );
        assert_eq!(tick.new_edges, vec![EdgeId(4), EdgeId(5)]);
        assert_eq!(tick.closed_edges, vec![EdgeId(1)]);
        assert!(tick.rotations.is_empty());

        let next = &tick.graph;
        let a = next.edge(EdgeId(4)).unwrap();
        let b = next.edge(EdgeId(5)).unwrap();
        assert_eq!((a.source(), a.target()), (VertexId(1), VertexId(4)));
        assert_eq!((b.source(), b.target()), (VertexId(4), VertexId(2)));
        assert!(next.edge(EdgeId(1)).unwrap().is_closed());

        let v = next.vertex(VertexId(4)).unwrap();
        assert_eq!(v.incident_edges(), &[EdgeId(4), EdgeId(5)]);
        assert!(v.payload().is_none());
        assert_eq!(next.vertex(VertexId(1)).unwrap().incident_edges(), &[EdgeId(1), EdgeId(3), EdgeId(4)]);
        assert_eq!(next.vertex(VertexId(2)).unwrap().incident_edges(), &[EdgeId(1), EdgeId(2), EdgeId(5)]);

        // Input snapshot is untouched.
        assert_eq!(graph.vertex_count(), 3);
        assert!(graph.edge(EdgeId(1)).unwrap().is_open());
    }

    #[test]
    fn split_payload_lands_on_new_vertex() {
        let graph = bootstrapped();
        let tick = grow(&graph, Some(99)).unwrap();
        assert_eq!(tick.graph.vertex(VertexId(4)).unwrap().payload(), Some(&99));
    }

    #[test]
    fn growth_without_open_edges_is_structural() {
        let mut graph = bootstrapped();
        for id in 1..=3 {
            graph.close_edge(EdgeId(id)).unwrap();
        }
        let err = grow(&graph, None).unwrap_err();
        assert_eq!(err, Error::NoOpenEdge);
        assert!(err.is_structural());
    }

    #[test]
    fn sustained_growth_respects_degree_bound() {
        let mut graph = bootstrapped();
        for _ in 0..200 {
            let vertices = graph.vertex_count();
            let edges = graph.edge_count();
            let tick = grow(&graph, None).unwrap();

            assert_eq!(tick.graph.vertex_count(), vertices + 1);
            assert_eq!(tick.new_edges.len(), 2 + tick.rotations.len());
            assert_eq!(tick.graph.edge_count(), edges + tick.new_edges.len());
            assert!(tick.graph.vertices().all(|v| v.degree() <= MAX_DEGREE));
            assert!(find_loose_edges(&tick.graph).unwrap().is_empty());

            graph = tick.graph;
        }
    }
}
