//! Least-cost routing over the directed edge map.
//!
//! # Algorithm
//!
//! A Dijkstra variant that treats the start location as already settled:
//! tentative distances are seeded directly from the start's outgoing edges,
//! the end enters the table at infinity so it is always accounted for, and
//! the start itself is never a relaxation target. Two consequences follow
//! and are part of the contract:
//!
//! * routes never pass back through their start, and
//! * `shortest_path(x, x)` reports no route, because the start is excluded
//!   from relaxation rather than seeded at distance zero.
//!
//! # Cost units
//!
//! Costs are the frozen Euclidean edge weights, summed as `f64`. Ties in the
//! scan resolve to the lexicographically first label, so results are fully
//! deterministic.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{WorldError, WorldResult};

/// Adjacency shape the solver runs over: `edges[from][to]` = weight.
pub(crate) type EdgeTable = BTreeMap<String, BTreeMap<String, f64>>;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: stop labels in visiting order, start and
/// end inclusive, and the summed edge-weight distance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Total cost of the route.
    pub distance: f64,
    /// Every location visited, `[start, ..., end]`. Always at least two
    /// entries: a route from a location to itself does not exist.
    pub stops: Vec<String>,
}

impl Route {
    /// Number of edges traversed.
    #[inline]
    pub fn hops(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }
}

// ── Solver ────────────────────────────────────────────────────────────────────

pub(crate) fn shortest_path(edges: &EdgeTable, start: &str, end: &str) -> WorldResult<Route> {
    // Seed: the end at infinity so the final lookup always has an entry,
    // then the start's direct successors at their edge weights. A self-loop
    // on the start is skipped, as is any later relaxation into the start.
    let mut dist: BTreeMap<String, f64> = BTreeMap::new();
    let mut prev: BTreeMap<String, String> = BTreeMap::new();
    dist.insert(end.to_owned(), f64::INFINITY);
    if let Some(successors) = edges.get(start) {
        for (child, &weight) in successors {
            if child == start {
                continue;
            }
            dist.insert(child.clone(), weight);
            prev.insert(child.clone(), start.to_owned());
        }
    }

    let mut visited: BTreeSet<String> = BTreeSet::new();
    while let Some((node, node_dist)) = closest_unvisited(&dist, &visited) {
        if let Some(successors) = edges.get(&node) {
            for (child, &weight) in successors {
                if child == start {
                    continue;
                }
                let candidate = node_dist + weight;
                let improves = match dist.get(child) {
                    None => true,
                    Some(&current) => candidate < current,
                };
                if improves {
                    dist.insert(child.clone(), candidate);
                    prev.insert(child.clone(), node.clone());
                }
            }
        }
        visited.insert(node);
    }

    match dist.get(end) {
        Some(&total) if total.is_finite() => Ok(Route {
            distance: total,
            stops:    walk_back(&prev, end),
        }),
        _ => Err(WorldError::Unreachable {
            from: start.to_owned(),
            to:   end.to_owned(),
        }),
    }
}

/// The unvisited node with the smallest finite tentative distance. Scans in
/// label order and keeps the first strict minimum.
fn closest_unvisited(
    dist: &BTreeMap<String, f64>,
    visited: &BTreeSet<String>,
) -> Option<(String, f64)> {
    let mut best: Option<(&String, f64)> = None;
    for (label, &d) in dist {
        if !d.is_finite() || visited.contains(label) {
            continue;
        }
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((label, d));
        }
    }
    best.map(|(label, d)| (label.clone(), d))
}

/// Follow predecessor links from the end back to the start.
///
/// The start never appears as a key in `prev`, so the walk terminates there
/// naturally; the chain is acyclic because edge weights are positive, which
/// makes tentative distance strictly decrease link by link.
fn walk_back(prev: &BTreeMap<String, String>, end: &str) -> Vec<String> {
    let mut stops = vec![end.to_owned()];
    let mut cursor = end;
    while let Some(parent) = prev.get(cursor) {
        stops.push(parent.clone());
        cursor = parent;
    }
    stops.reverse();
    stops
}
