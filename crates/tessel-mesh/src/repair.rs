//! Saturation repair.
//!
//! After a split, the weakest open edge may touch a vertex that has reached
//! `MAX_DEGREE`. Repair rotates that vertex's strongest connection onto the
//! trigger edge's far end:
//!
//! ```text
//!   S                S
//!   |                 \
//!   A ---- B    =>  A  B      (A-B and A-S closed, S-B opened)
//! ```
//!
//! The loop repeats until the weakest open edge touches no saturated vertex.
//!
//! # Termination
//!
//! Each rotation closes two open edges and opens one, so the open-edge count
//! drops by one per rotation and the loop cannot run more rotations than there
//! were open edges on entry. Exceeding that bound is reported as
//! [`Error::RepairBoundExceeded`].

use tracing::debug;

use crate::{Edge, EdgeId, Error, Graph, Result, VertexId};

/// One repair rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    /// The saturated vertex being relieved.
    pub saturated: VertexId,
    /// The weakest open edge that touched it; now closed.
    pub trigger: EdgeId,
    /// The saturated vertex's strongest other open edge; now closed.
    pub strongest: EdgeId,
    /// The far end of `strongest`.
    pub sibling: VertexId,
    /// The far end of `trigger`.
    pub far_end: VertexId,
    /// The new `sibling-far_end` edge.
    pub opened: EdgeId,
}

/// Result of [`sanitize`].
#[derive(Debug, Clone)]
pub struct Repaired<P> {
    pub graph: Graph<P>,
    pub rotations: Vec<Rotation>,
}

/// Rotate saturated vertices until the weakest open edge touches none.
///
/// When the source and target of the trigger edge are both saturated, the
/// source side is relieved first. A graph with no open edges has nothing to
/// repair and is returned as is.
///
/// Rotation assumes a simple graph. If a saturated vertex's strongest edge
/// runs parallel to the trigger, the new edge would be a loop and repair
/// fails with [`Error::SelfLoop`].
pub fn sanitize<P: Clone>(graph: &Graph<P>) -> Result<Repaired<P>> {
    let mut next = graph.clone();
    let mut rotations = Vec::new();
    let bound = next.open_edge_count();

    while let Some(&trigger) = next.weakest_open_edge() {
        let Some((saturated, far_end)) = saturated_side(&next, &trigger)? else {
            break;
        };
        if rotations.len() >= bound {
            return Err(Error::RepairBoundExceeded { bound });
        }

        let rotation = rotate(&mut next, trigger, saturated, far_end)?;
        debug!(
            saturated = %rotation.saturated,
            trigger = %rotation.trigger,
            strongest = %rotation.strongest,
            opened = %rotation.opened,
            "rotated saturated vertex"
        );
        rotations.push(rotation);
    }

    Ok(Repaired {
        graph: next,
        rotations,
    })
}

/// The `(saturated, far_end)` pair for `edge`, or `None` if neither endpoint
/// is saturated.
fn saturated_side<P>(graph: &Graph<P>, edge: &Edge) -> Result<Option<(VertexId, VertexId)>> {
    let source = graph.vertex(edge.source())?;
    let target = graph.vertex(edge.target())?;

    Ok(if source.is_saturated() {
        Some((edge.source(), edge.target()))
    } else if target.is_saturated() {
        Some((edge.target(), edge.source()))
    } else {
        None
    })
}

fn rotate<P: Clone>(
    graph: &mut Graph<P>,
    trigger: Edge,
    saturated: VertexId,
    far_end: VertexId,
) -> Result<Rotation> {
    let strongest = *graph
        .strongest_incident_edge(saturated, trigger.id())?
        .ok_or(Error::NoClosableEdge { vertex: saturated })?;
    let sibling = strongest
        .other_endpoint(saturated)
        .ok_or(Error::DetachedEdge {
            edge: strongest.id(),
            vertex: saturated,
        })?;

    graph.close_edge(trigger.id())?;
    graph.close_edge(strongest.id())?;
    let opened = graph.connect(sibling, far_end)?;

    Ok(Rotation {
        saturated,
        trigger: trigger.id(),
        strongest: strongest.id(),
        sibling,
        far_end,
        opened,
    })
}
