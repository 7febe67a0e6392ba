//! Robot state and path-following kinematics.
//!
//! A robot is a point that walks an assigned route one segment at a time.
//! It never looks at the map: the route it carries was planned against a
//! snapshot, and each segment stores the coordinates of its target, so
//! stepping needs nothing but the robot itself.

use botway_core::{Color, Point};

/// Distance at which a robot counts as having reached a segment target.
pub const ARRIVAL_THRESHOLD: f64 = 0.1;

/// One edge traversal within an assigned route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Label of the location this segment departs from.
    pub from: String,
    /// Label of the location this segment arrives at.
    pub to: String,
    /// Coordinates of `to`, captured when the route was planned.
    pub target: Point,
}

/// A mobile agent with a position, a display color, and an assigned route.
///
/// `leg` indexes the segment currently being traversed and only ever grows;
/// once it reaches `route.len()` the robot is idle and eligible for removal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Robot {
    name:  String,
    pos:   Point,
    color: Color,
    route: Vec<Segment>,
    leg:   usize,
}

impl Robot {
    pub(crate) fn new(name: &str, start: Point) -> Self {
        Self {
            name:  name.to_owned(),
            pos:   start,
            color: Color::for_name(name),
            route: Vec::new(),
            leg:   0,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The full assigned route, completed segments included.
    #[inline]
    pub fn route(&self) -> &[Segment] {
        &self.route
    }

    /// Index of the segment currently being traversed.
    #[inline]
    pub fn leg(&self) -> usize {
        self.leg
    }

    /// Whether the robot has finished (or never had) a route.
    #[inline]
    pub fn pathing_complete(&self) -> bool {
        self.leg >= self.route.len()
    }

    /// The segment currently being traversed, if any.
    #[inline]
    pub fn current_segment(&self) -> Option<&Segment> {
        self.route.get(self.leg)
    }

    /// Whether the robot is within [`ARRIVAL_THRESHOLD`] of its current
    /// segment target. Idle robots trivially count as arrived.
    pub fn at_segment_target(&self) -> bool {
        match self.current_segment() {
            None => true,
            Some(seg) => self.pos.distance(seg.target) <= ARRIVAL_THRESHOLD,
        }
    }

    /// Replace any previous route and start over from its first segment.
    pub(crate) fn assign_route(&mut self, route: Vec<Segment>) {
        self.route = route;
        self.leg = 0;
    }

    /// Advance one tick's worth of movement toward the current target.
    ///
    /// Arrival is checked first: a robot already within the threshold rolls
    /// over to the next segment and then spends this same tick moving toward
    /// the new target. The step is a straight line of length `step` with no
    /// clamping, so a robot close to its target overshoots slightly rather
    /// than snapping onto it; the arrival threshold absorbs the difference.
    pub(crate) fn advance(&mut self, step: f64) {
        if self.at_segment_target() {
            self.leg += 1;
        }
        let Some(seg) = self.current_segment() else {
            return;
        };
        let dx = seg.target.x - self.pos.x;
        let dy = seg.target.y - self.pos.y;
        let len = dx.hypot(dy);
        if len == 0.0 {
            return;
        }
        self.pos.x += dx / len * step;
        self.pos.y += dy / len * step;
    }
}
