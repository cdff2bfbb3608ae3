//! Read-only inspection of a graph.
//!
//! Nothing here mutates. [`find_loose_edges`] mirrors the repair loop's exit
//! test; [`check_invariants`] audits the full structure and reports every
//! violation it finds rather than stopping at the first.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use crate::{EdgeId, Graph, Result, VertexId, MAX_DEGREE};

/// Walk open edges from weakest upward, collecting those that touch a
/// saturated vertex, and stop at the first that does not.
///
/// Empty after [`sanitize`](crate::sanitize) for any graph it accepts.
pub fn find_loose_edges<P>(graph: &Graph<P>) -> Result<Vec<EdgeId>> {
    let mut loose = Vec::new();
    let mut seen = HashSet::new();

    while let Some(edge) = graph.weakest_open_edge_excluding(&seen) {
        let source = graph.vertex(edge.source())?;
        let target = graph.vertex(edge.target())?;
        if !(source.is_saturated() || target.is_saturated()) {
            break;
        }
        loose.push(edge.id());
        seen.insert(edge.id());
    }

    Ok(loose)
}

/// A structural problem found by [`check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A vertex has more incident edges than `MAX_DEGREE`.
    DegreeExceeded { vertex: VertexId, degree: usize },
    /// An edge references a vertex that does not exist.
    DanglingEndpoint { edge: EdgeId, vertex: VertexId },
    /// A vertex lists an edge that does not exist.
    DanglingIncident { vertex: VertexId, edge: EdgeId },
    /// A vertex lists an edge that does not touch it.
    ForeignIncident { vertex: VertexId, edge: EdgeId },
    /// An edge is missing from one of its endpoints' incident lists.
    UnlistedEdge { edge: EdgeId, vertex: VertexId },
    /// The graph of all edges, open and closed, does not reach every vertex.
    Disconnected { reachable: usize, total: usize },
    /// The open edges split the vertices that still have one into several
    /// components.
    FrontierDisconnected { components: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegreeExceeded { vertex, degree } => {
                write!(f, "vertex {vertex} has degree {degree} > {MAX_DEGREE}")
            }
            Self::DanglingEndpoint { edge, vertex } => {
                write!(f, "edge {edge} references missing vertex {vertex}")
            }
            Self::DanglingIncident { vertex, edge } => {
                write!(f, "vertex {vertex} lists missing edge {edge}")
            }
            Self::ForeignIncident { vertex, edge } => {
                write!(f, "vertex {vertex} lists edge {edge} which does not touch it")
            }
            Self::UnlistedEdge { edge, vertex } => {
                write!(f, "edge {edge} is not listed on endpoint {vertex}")
            }
            Self::Disconnected { reachable, total } => {
                write!(f, "only {reachable} of {total} vertices are connected")
            }
            Self::FrontierDisconnected { components } => {
                write!(f, "open edges form {components} components")
            }
        }
    }
}

/// Audit degree bounds, referential integrity and connectivity.
///
/// Connectivity is checked twice: every vertex must be reachable over all
/// edges, and the open edges must form a single component over the vertices
/// that still have an open edge. A vertex whose edges have all been closed by
/// repair is retired from the open frontier, so it is not required to be
/// reachable over open edges.
pub fn check_invariants<P>(graph: &Graph<P>) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for vertex in graph.vertices() {
        if vertex.degree() > MAX_DEGREE {
            violations.push(InvariantViolation::DegreeExceeded {
                vertex: vertex.id(),
                degree: vertex.degree(),
            });
        }
        for &edge_id in vertex.incident_edges() {
            match graph.edge(edge_id) {
                Err(_) => violations.push(InvariantViolation::DanglingIncident {
                    vertex: vertex.id(),
                    edge: edge_id,
                }),
                Ok(edge) if !edge.touches(vertex.id()) => {
                    violations.push(InvariantViolation::ForeignIncident {
                        vertex: vertex.id(),
                        edge: edge_id,
                    })
                }
                Ok(_) => {}
            }
        }
    }

    for edge in graph.edges() {
        for endpoint in [edge.source(), edge.target()] {
            match graph.vertex(endpoint) {
                Err(_) => violations.push(InvariantViolation::DanglingEndpoint {
                    edge: edge.id(),
                    vertex: endpoint,
                }),
                Ok(vertex) if !vertex.incident_edges().contains(&edge.id()) => {
                    violations.push(InvariantViolation::UnlistedEdge {
                        edge: edge.id(),
                        vertex: endpoint,
                    })
                }
                Ok(_) => {}
            }
        }
    }

    let total = graph.vertex_count();
    let all = components(graph, false);
    if total > 0 {
        let reachable = all.values().map(BTreeSet::len).max().unwrap_or(0);
        if all.len() > 1 {
            violations.push(InvariantViolation::Disconnected { reachable, total });
        }
    }

    let frontier = components(graph, true);
    if frontier.len() > 1 {
        violations.push(InvariantViolation::FrontierDisconnected {
            components: frontier.len(),
        });
    }

    violations
}

/// Connected components keyed by their smallest vertex.
///
/// With `open_only`, only open edges count and only vertices touching one are
/// included; otherwise every edge counts and isolated vertices form their own
/// components.
fn components<P>(graph: &Graph<P>, open_only: bool) -> BTreeMap<VertexId, BTreeSet<VertexId>> {
    let mut adjacency: BTreeMap<VertexId, Vec<VertexId>> = BTreeMap::new();

    if !open_only {
        for vertex in graph.vertices() {
            adjacency.entry(vertex.id()).or_default();
        }
    }
    for edge in graph.edges().filter(|e| !open_only || e.is_open()) {
        if !graph.contains_vertex(edge.source()) || !graph.contains_vertex(edge.target()) {
            continue;
        }
        adjacency.entry(edge.source()).or_default().push(edge.target());
        adjacency.entry(edge.target()).or_default().push(edge.source());
    }

    let mut visited = BTreeSet::new();
    let mut result = BTreeMap::new();
    for &start in adjacency.keys() {
        if visited.contains(&start) {
            continue;
        }
        let mut component = BTreeSet::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            component.insert(current);
            if let Some(neighbors) = adjacency.get(&current) {
                stack.extend(neighbors.iter().copied().filter(|n| !visited.contains(n)));
            }
        }
        result.insert(start, component);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grow, SeedData, SeedEdge, SeedVertex};

    fn grown(ticks: usize) -> Graph<u32> {
        let mut graph = Graph::triangle().unwrap();
        for tick in 0..ticks {
            graph = grow(&graph, Some(tick as u32)).unwrap().graph;
        }
        graph
    }

    #[test]
    fn triangle_is_healthy() {
        let graph: Graph<()> = Graph::triangle().unwrap();
        assert!(check_invariants(&graph).is_empty());
        assert!(find_loose_edges(&graph).unwrap().is_empty());
    }

    #[test]
    fn grown_graph_is_healthy() {
        let graph = grown(400);
        assert!(check_invariants(&graph).is_empty(), "{:?}", check_invariants(&graph));
    }

    #[test]
    fn loose_edges_are_reported_in_weight_order() {
        // Vertex 1 is saturated and edges 1 and 2 are the two lightest.
        // Edge 8 (`2-4`, w6) comes next and stops the walk.
        let seed = SeedData {
            vertices: [1, 2, 3, 4, 10, 11, 12, 13]
                .into_iter()
                .map(|id| SeedVertex {
                    id: VertexId(id),
                    payload: None::<()>,
                })
                .collect(),
            edges: [
                (1, 1, 2),
                (2, 1, 3),
                (3, 1, 10),
                (4, 1, 11),
                (5, 1, 12),
                (6, 1, 13),
                (8, 2, 4),
            ]
            .into_iter()
            .map(|(id, source, target)| SeedEdge {
                id: EdgeId(id),
                source: VertexId(source),
                target: VertexId(target),
                closed: false,
            })
            .collect(),
        };
        let graph = Graph::from_seed(seed).unwrap();
        assert_eq!(find_loose_edges(&graph).unwrap(), vec![EdgeId(1), EdgeId(2)]);
    }

    #[test]
    fn reports_disconnected_vertex() {
        let seed = SeedData {
            vertices: [1, 2, 3, 4]
                .into_iter()
                .map(|id| SeedVertex {
                    id: VertexId(id),
                    payload: None::<()>,
                })
                .collect(),
            edges: SeedData::<()>::triangle().edges,
        };
        let graph = Graph::from_seed(seed).unwrap();
        assert_eq!(
            check_invariants(&graph),
            vec![InvariantViolation::Disconnected {
                reachable: 3,
                total: 4
            }]
        );
    }

    #[test]
    fn reports_split_frontier() {
        let mut graph: Graph<()> = Graph::triangle().unwrap();
        let a = graph.add_vertex(None);
        let b = graph.add_vertex(None);
        graph.connect(VertexId(1), a).unwrap();
        graph.connect(a, b).unwrap();
        // Closing 1-a leaves {a, b} joined to the triangle only by a closed
        // edge.
        graph.close_edge(EdgeId(4)).unwrap();

        let violations = check_invariants(&graph);
        assert_eq!(
            violations,
            vec![InvariantViolation::FrontierDisconnected { components: 2 }]
        );
    }

    #[test]
    fn reports_degree_overflow() {
        let mut graph: Graph<()> = Graph::triangle().unwrap();
        let hub = VertexId(1);
        for _ in 0..MAX_DEGREE {
            let spoke = graph.add_vertex(None);
            graph.connect(hub, spoke).unwrap();
        }
        let violations = check_invariants(&graph);
        assert!(violations.contains(&InvariantViolation::DegreeExceeded {
            vertex: hub,
            degree: MAX_DEGREE + 2
        }));
    }

    #[test]
    fn violations_display() {
        let violation = InvariantViolation::DegreeExceeded {
            vertex: VertexId(5),
            degree: 7,
        };
        assert_eq!(violation.to_string(), "vertex 5 has degree 7 > 6");
    }
}
