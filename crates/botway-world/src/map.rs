//! The world map: locations, directed edges, robots, and edge occupancy.
//!
//! # Data layout
//!
//! Every collection is a `BTreeMap` keyed by label or name.  Iteration order
//! is therefore deterministic, which matters in two places: the stepper
//! processes robots in name order each tick, and routing resolves ties in
//! label order.  A small R-tree (via `rstar`) mirrors the location set for
//! coordinate lookups, exact for removal-by-coordinates and nearest-neighbor
//! for snapping a robot's position onto the graph.
//!
//! # Snapshot semantics
//!
//! `WorldMap` is a value.  `Clone` produces a fully independent deep copy,
//! and every mutating operation either succeeds completely or returns an
//! error having changed nothing, so callers can treat any `WorldMap` they
//! hold as immutable history.
//!
//! # Edge occupancy
//!
//! An edge is a lane wide enough for one robot.  The `in_use` table maps a
//! directed [`EdgeKey`] to the name of the robot licensed to traverse it; a
//! robot claims its next edge one tick before moving, may only move while it
//! holds the forward key, and hands back everything it holds the moment it
//! finishes a segment.  The forward and reverse keys lock each other out, so
//! two robots can never meet head-on.

use std::collections::BTreeMap;
use std::fmt;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use botway_core::{Bounds, Point};

use crate::error::{LocationUse, WorldError, WorldResult};
use crate::robot::{Robot, Segment, ARRIVAL_THRESHOLD};
use crate::router::{self, EdgeTable, Route};

/// Distance a moving robot covers in one tick.
pub const STEP_DISTANCE: f64 = 0.1;

// ── Location ──────────────────────────────────────────────────────────────────

/// A named point on the map.  Label and coordinates never change once the
/// location exists; removal and re-adding is the only way to "move" one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub label: String,
    pub pos:   Point,
}

// ── EdgeKey ───────────────────────────────────────────────────────────────────

/// Identity of a directed edge: the ordered `(from, to)` label pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey {
    pub from: String,
    pub to:   String,
}

impl EdgeKey {
    pub fn new(from: &str, to: &str) -> Self {
        Self { from: from.to_owned(), to: to.to_owned() }
    }

    /// The same lane seen from the other end.
    pub fn reversed(&self) -> Self {
        Self { from: self.to.clone(), to: self.from.clone() }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

// ── R-tree location entry ─────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated location label.
#[derive(Clone)]
struct LocationEntry {
    point: [f64; 2],
    label: String,
}

impl RTreeObject for LocationEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for LocationEntry {
    /// Squared Euclidean distance; the map plane is flat so this is exact.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── EdgeView ──────────────────────────────────────────────────────────────────

/// Read-only edge projection for renderers: the label pair plus both endpoint
/// coordinates and the frozen weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a> {
    pub from:   &'a str,
    pub to:     &'a str,
    pub start:  Point,
    pub end:    Point,
    pub weight: f64,
}

// ── WorldMap ──────────────────────────────────────────────────────────────────

/// One complete snapshot of the simulated world.
///
/// See the module docs for the snapshot and occupancy contracts.
#[derive(Clone)]
pub struct WorldMap {
    bounds: Bounds,

    /// All locations, keyed by label.
    locations: BTreeMap<String, Location>,

    /// Directed adjacency: `edges[from][to]` = frozen Euclidean weight.
    /// Every location has an entry here for as long as it exists, possibly
    /// an empty one.
    edges: EdgeTable,

    /// All robots, keyed by name.
    robots: BTreeMap<String, Robot>,

    /// Directed edge -> name of the robot currently licensed to traverse it.
    in_use: BTreeMap<EdgeKey, String>,

    /// Spatial index mirroring `locations`.
    spatial_idx: RTree<LocationEntry>,
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldMap {
    /// An empty map with the standard 100 × 100 bounds.
    pub fn new() -> Self {
        Self {
            bounds:      Bounds::STANDARD,
            locations:   BTreeMap::new(),
            edges:       BTreeMap::new(),
            robots:      BTreeMap::new(),
            in_use:      BTreeMap::new(),
            spatial_idx: RTree::new(),
        }
    }

    // ── Location operations ───────────────────────────────────────────────

    /// Add a location at `(x, y)`.
    ///
    /// Fails if the point is out of bounds, or if either the label or the
    /// exact position is already taken.
    pub fn add_location(&mut self, label: &str, x: f64, y: f64) -> WorldResult<()> {
        let pos = Point::new(x, y);
        if !self.bounds.contains(pos) {
            return Err(WorldError::OutOfBounds { x, y });
        }
        if self.locations.contains_key(label) || self.spatial_idx.locate_at_point(&[x, y]).is_some()
        {
            return Err(WorldError::DuplicateLocation { label: label.to_owned() });
        }

        self.locations
            .insert(label.to_owned(), Location { label: label.to_owned(), pos });
        self.edges.entry(label.to_owned()).or_default();
        self.spatial_idx
            .insert(LocationEntry { point: [x, y], label: label.to_owned() });
        Ok(())
    }

    /// Remove a location by label.
    ///
    /// Refused while any edge touches the location or any robot sits at it
    /// or is steering toward it.
    pub fn remove_location(&mut self, label: &str) -> WorldResult<()> {
        let Some(loc) = self.locations.get(label) else {
            return Err(WorldError::LocationNotFound { label: label.to_owned() });
        };
        if self.edge_touches(label) {
            return Err(WorldError::LocationInUse {
                label: label.to_owned(),
                by:    LocationUse::Edge,
            });
        }
        if self.robot_blocks(loc.pos) {
            return Err(WorldError::LocationInUse {
                label: label.to_owned(),
                by:    LocationUse::Robot,
            });
        }

        let point = [loc.pos.x, loc.pos.y];
        self.locations.remove(label);
        self.edges.remove(label);
        self.spatial_idx.remove_at_point(&point);
        Ok(())
    }

    /// Remove the location sitting exactly at `(x, y)`.
    pub fn remove_location_at(&mut self, x: f64, y: f64) -> WorldResult<()> {
        let label = match self.spatial_idx.locate_at_point(&[x, y]) {
            Some(entry) => entry.label.clone(),
            None => return Err(WorldError::LocationNotFoundAt { x, y }),
        };
        self.remove_location(&label)
    }

    /// Whether any edge starts or ends at `label`.
    fn edge_touches(&self, label: &str) -> bool {
        self.edges.iter().any(|(from, successors)| {
            (from == label && !successors.is_empty()) || successors.contains_key(label)
        })
    }

    /// Whether any robot is parked at `pos` or currently steering toward it.
    ///
    /// Only the current segment counts as "steering toward"; later route
    /// segments do not pin their targets down.
    // TODO: decide whether the whole remaining route should pin its targets.
    fn robot_blocks(&self, pos: Point) -> bool {
        self.robots.values().any(|robot| {
            robot.position().distance(pos) <= ARRIVAL_THRESHOLD
                || robot.current_segment().is_some_and(|seg| seg.target == pos)
        })
    }

    // ── Edge operations ───────────────────────────────────────────────────

    /// Add a directed edge from `from` to `to`, weighted by the Euclidean
    /// distance between the endpoints at this moment.  Returns the weight.
    pub fn add_edge(&mut self, from: &str, to: &str) -> WorldResult<f64> {
        let Some(a) = self.locations.get(from) else {
            return Err(WorldError::EndpointMissing { label: from.to_owned() });
        };
        let Some(b) = self.locations.get(to) else {
            return Err(WorldError::EndpointMissing { label: to.to_owned() });
        };
        if self.edges.get(from).is_some_and(|successors| successors.contains_key(to)) {
            return Err(WorldError::DuplicateEdge {
                from: from.to_owned(),
                to:   to.to_owned(),
            });
        }

        let weight = a.pos.distance(b.pos);
        self.edges
            .entry(from.to_owned())
            .or_default()
            .insert(to.to_owned(), weight);
        Ok(weight)
    }

    /// Remove the directed edge from `from` to `to`.
    ///
    /// Refused while a robot holds the edge's forward occupancy claim.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> WorldResult<()> {
        if self.in_use.contains_key(&EdgeKey::new(from, to)) {
            return Err(WorldError::EdgeInUse { from: from.to_owned(), to: to.to_owned() });
        }
        match self.edges.get_mut(from).and_then(|successors| successors.remove(to)) {
            Some(_) => Ok(()),
            None => Err(WorldError::EdgeNotFound { from: from.to_owned(), to: to.to_owned() }),
        }
    }

    // ── Robot operations ──────────────────────────────────────────────────

    /// Create a robot at the location labelled `start`.  The robot's color
    /// derives from its name and is stable across runs.
    pub fn add_robot(&mut self, name: &str, start: &str) -> WorldResult<()> {
        let Some(loc) = self.locations.get(start) else {
            return Err(WorldError::LocationNotFound { label: start.to_owned() });
        };
        if self.robots.contains_key(name) {
            return Err(WorldError::RobotNameConflict { name: name.to_owned() });
        }
        let robot = Robot::new(name, loc.pos);
        self.robots.insert(name.to_owned(), robot);
        Ok(())
    }

    /// Remove an idle robot.  Robots mid-route cannot be removed.
    pub fn remove_robot(&mut self, name: &str) -> WorldResult<()> {
        let Some(robot) = self.robots.get(name) else {
            return Err(WorldError::RobotNotFound { name: name.to_owned() });
        };
        if !robot.pathing_complete() {
            return Err(WorldError::PathingIncomplete { name: name.to_owned() });
        }
        self.robots.remove(name);
        Ok(())
    }

    /// Plan a route for `name` to the location labelled `destination` and
    /// hand it to the robot, replacing any previous route.
    ///
    /// The route starts at the graph location nearest the robot's current
    /// position.  Any occupancy claims the robot still holds from an
    /// abandoned route are released.
    pub fn assign_destination(&mut self, name: &str, destination: &str) -> WorldResult<()> {
        if !self.locations.contains_key(destination) {
            return Err(WorldError::LocationNotFound { label: destination.to_owned() });
        }
        let pos = match self.robots.get(name) {
            Some(robot) => robot.position(),
            None => return Err(WorldError::RobotNotFound { name: name.to_owned() }),
        };

        // The destination exists, so the index has at least one entry and
        // the nearest query cannot actually miss.
        let start = match self.nearest_location(pos) {
            Some(loc) => loc.label.clone(),
            None => destination.to_owned(),
        };
        let route = self.shortest_path(&start, destination)?;
        let legs = self.route_segments(&route)?;

        self.release_claims(name);
        if let Some(robot) = self.robots.get_mut(name) {
            robot.assign_route(legs);
        }
        Ok(())
    }

    /// Decompose a route's stop sequence into traversal segments carrying
    /// their target coordinates.
    fn route_segments(&self, route: &Route) -> WorldResult<Vec<Segment>> {
        let mut legs = Vec::with_capacity(route.hops());
        for pair in route.stops.windows(2) {
            let [from, to] = pair else { continue };
            // Stops come from edges, and edges only reference locations that
            // exist; the error arm keeps the lookup total anyway.
            let Some(target) = self.locations.get(to) else {
                return Err(WorldError::Unreachable { from: from.clone(), to: to.clone() });
            };
            legs.push(Segment {
                from:   from.clone(),
                to:     to.clone(),
                target: target.pos,
            });
        }
        Ok(legs)
    }

    /// Drop every occupancy claim held by `name`.
    fn release_claims(&mut self, name: &str) {
        self.in_use.retain(|_, holder| holder != name);
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Least-cost directed route between two labels.
    ///
    /// See the [`router`](crate::router) docs for the exact contract,
    /// including why a location is never reachable from itself.
    pub fn shortest_path(&self, start: &str, end: &str) -> WorldResult<Route> {
        router::shortest_path(&self.edges, start, end)
    }

    /// The location nearest to `pos`, or `None` on an empty map.
    pub fn nearest_location(&self, pos: Point) -> Option<&Location> {
        let entry = self.spatial_idx.nearest_neighbor(&[pos.x, pos.y])?;
        self.locations.get(&entry.label)
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance the world one tick.
    ///
    /// Robots are processed in name order.  For each robot with a segment
    /// left to travel:
    ///
    /// 1. if neither direction of its current edge is claimed, the robot
    ///    claims the forward direction and stays put this tick;
    /// 2. if the robot itself holds the forward claim, it moves one
    ///    [`STEP_DISTANCE`] along the segment;
    /// 3. otherwise another robot holds the lane and this one waits.
    ///
    /// A robot that finishes a segment releases every claim it holds within
    /// the same tick, so a later-named robot can claim the freed edge before
    /// the tick ends.
    pub fn step(&mut self) {
        let names: Vec<String> = self.robots.keys().cloned().collect();
        for name in &names {
            let Some(robot) = self.robots.get_mut(name) else { continue };
            let Some(seg) = robot.current_segment() else { continue };

            let forward = EdgeKey::new(&seg.from, &seg.to);
            let reverse = forward.reversed();
            let leg_before = robot.leg();

            let lane_taken =
                self.in_use.contains_key(&forward) || self.in_use.contains_key(&reverse);
            if !lane_taken {
                self.in_use.insert(forward, name.clone());
            } else if self.in_use.get(&forward) == Some(name) {
                robot.advance(STEP_DISTANCE);
            }

            if robot.leg() != leg_before {
                self.in_use.retain(|_, holder| holder != name);
            }
        }
    }

    // ── Views ─────────────────────────────────────────────────────────────

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn location(&self, label: &str) -> Option<&Location> {
        self.locations.get(label)
    }

    /// All locations in label order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> + '_ {
        self.locations.values()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// The frozen weight of the directed edge `from -> to`, if it exists.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.edges.get(from)?.get(to).copied()
    }

    /// All edges with resolved endpoint coordinates, for rendering.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.edges.iter().flat_map(move |(from, successors)| {
            successors.iter().filter_map(move |(to, &weight)| {
                let a = self.locations.get(from)?;
                let b = self.locations.get(to)?;
                Some(EdgeView { from, to, start: a.pos, end: b.pos, weight })
            })
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|successors| successors.len()).sum()
    }

    pub fn robot(&self, name: &str) -> Option<&Robot> {
        self.robots.get(name)
    }

    /// All robots in name order.
    pub fn robots(&self) -> impl Iterator<Item = &Robot> + '_ {
        self.robots.values()
    }

    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    /// The name of the robot holding the claim on a directed edge.
    pub fn occupant(&self, key: &EdgeKey) -> Option<&str> {
        self.in_use.get(key).map(String::as_str)
    }

    /// Every live occupancy claim, in edge order.
    pub fn occupancy(&self) -> impl Iterator<Item = (&EdgeKey, &str)> + '_ {
        self.in_use.iter().map(|(key, holder)| (key, holder.as_str()))
    }
}

/// Logical equality: everything except the spatial index, which is derived
/// from `locations` and carries no state of its own.
impl PartialEq for WorldMap {
    fn eq(&self, other: &Self) -> bool {
        self.bounds == other.bounds
            && self.locations == other.locations
            && self.edges == other.edges
            && self.robots == other.robots
            && self.in_use == other.in_use
    }
}

impl fmt::Debug for WorldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldMap")
            .field("bounds", &self.bounds)
            .field("locations", &self.locations)
            .field("edges", &self.edges)
            .field("robots", &self.robots)
            .field("in_use", &self.in_use)
            .finish_non_exhaustive()
    }
}
