//! Edge selection rules.
//!
//! Both selectors are pure scans over a set of edges and ignore closed edges.
//!
//! - **Weakest**: minimum weight, then minimum endpoint id, then minimum edge id.
//! - **Strongest**: maximum weight, then minimum edge id.
//!
//! The trailing edge-id tie-breaks make both choices independent of the order
//! the edges are visited in.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::{Edge, EdgeId};

/// Find the weakest open edge not in `excluded`.
///
/// Returns `None` when no open edge remains. This is O(E) and dominates the
/// cost of a growth tick.
pub fn find_weakest_open_edge<'a, I>(edges: I, excluded: &HashSet<EdgeId>) -> Option<&'a Edge>
where
    I: IntoIterator<Item = &'a Edge>,
{
    edges
        .into_iter()
        .filter(|edge| edge.is_open() && !excluded.contains(&edge.id()))
        .min_by_key(|edge| (edge.weight(), edge.min_endpoint(), edge.id()))
}

/// Find the strongest open edge among a vertex's incident edges, skipping
/// `exclude`.
pub fn find_strongest_incident_edge<'a, I>(incident: I, exclude: EdgeId) -> Option<&'a Edge>
where
    I: IntoIterator<Item = &'a Edge>,
{
    incident
        .into_iter()
        .filter(|edge| edge.is_open() && edge.id() != exclude)
        .max_by_key(|edge| (edge.weight(), Reverse(edge.id())))
}
