//! World-subsystem error type.

use std::fmt;

use thiserror::Error;

/// What is still holding on to a location that removal was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationUse {
    /// At least one edge starts or ends at the location.
    Edge,
    /// A robot is sitting at the location or steering toward it.
    Robot,
}

impl fmt::Display for LocationUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationUse::Edge => write!(f, "an edge touches it"),
            LocationUse::Robot => write!(f, "a robot is at or heading to it"),
        }
    }
}

/// Errors produced by `botway-world`.
///
/// Every operation on a map either succeeds fully or fails with one of these
/// and leaves the map exactly as it was.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("location ({x}, {y}) is outside the map bounds")]
    OutOfBounds { x: f64, y: f64 },

    #[error("location `{label}` collides with an existing label or position")]
    DuplicateLocation { label: String },

    #[error("no location named `{label}`")]
    LocationNotFound { label: String },

    #[error("no location at ({x}, {y})")]
    LocationNotFoundAt { x: f64, y: f64 },

    #[error("location `{label}` is still in use: {by}")]
    LocationInUse { label: String, by: LocationUse },

    #[error("cannot attach an edge to unknown location `{label}`")]
    EndpointMissing { label: String },

    #[error("edge `{from}` -> `{to}` already exists")]
    DuplicateEdge { from: String, to: String },

    #[error("no edge `{from}` -> `{to}`")]
    EdgeNotFound { from: String, to: String },

    #[error("edge `{from}` -> `{to}` is in use")]
    EdgeInUse { from: String, to: String },

    #[error("a robot named `{name}` already exists")]
    RobotNameConflict { name: String },

    #[error("no robot named `{name}`")]
    RobotNotFound { name: String },

    #[error("robot `{name}` is still pathing")]
    PathingIncomplete { name: String },

    #[error("no route from `{from}` to `{to}`")]
    Unreachable { from: String, to: String },
}

pub type WorldResult<T> = Result<T, WorldError>;
