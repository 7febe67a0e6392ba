//! Clone-then-apply command dispatch.
//!
//! The pipeline never mutates the snapshot it is handed.  Every command runs
//! against a clone; on success the clone comes back inside
//! [`Outcome::Updated`] for the caller to adopt, and on failure the clone is
//! simply dropped, so a half-applied command cannot exist.  Queries follow
//! the same path and return their (unchanged) clone plus a report string.

use botway_world::WorldMap;
use serde_json::json;

use crate::command::{Command, ParsedCommand};
use crate::coords::parse_coords;
use crate::error::{CommandError, CommandResult};

/// Usage notes returned by [`Command::Help`].  This documents the textual
/// grammar the stock parsing collaborator accepts, not anything this crate
/// enforces.
pub const USAGE: &str = "\
Usage notes:

Adding locations
    add (location|point|waypoint) <label> <coords>
Removing locations
    remove (location|point|waypoint) <label>
Adding paths
    add (path|edge) from? <waypointA> (to|>) <waypointB>
Removing paths
    remove (path|edge) from? <waypointA> (to|>) <waypointB>
Shortest path printer
    sp from? <waypointA> (to|>) <waypointB>
Add robot
    add (robot|bot) <name> at <waypoint>
Add robot destination
    move (robot|bot)? <name> to <waypoint>
Remove robot
    remove (robot|bot) <name>
";

/// What a successfully handled command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The caller should adopt `map` as its current snapshot.
    Updated {
        map: WorldMap,
        /// Query output to print, if the command produced any.
        report: Option<String>,
    },
    /// Informational text only; the current snapshot stays in place.
    Info(String),
}

/// Apply one collaborator result to a snapshot.
pub fn apply(map: &WorldMap, parsed: &ParsedCommand) -> CommandResult<Outcome> {
    match parsed {
        ParsedCommand::Known(command) => apply_command(map, command),
        ParsedCommand::Unknown { kind } => {
            Err(CommandError::UnknownCommand { kind: kind.clone() })
        }
    }
}

/// Apply one structured command to a snapshot.
///
/// String parameters are trimmed here, in one place, so parsers are free to
/// pass through raw capture groups.
pub fn apply_command(map: &WorldMap, command: &Command) -> CommandResult<Outcome> {
    let mut next = map.clone();
    let mut report = None;

    match command {
        Command::Help => return Ok(Outcome::Info(USAGE.to_owned())),

        Command::AddLocation { label, coords } => {
            let point = parse_coords(coords)?;
            next.add_location(label.trim(), point.x, point.y)?;
        }
        Command::RemoveLocationByCoords { coords } => {
            let point = parse_coords(coords)?;
            next.remove_location_at(point.x, point.y)?;
        }
        Command::RemoveLocationByName { label } => {
            next.remove_location(label.trim())?;
        }
        Command::AddPath { from, to } => {
            next.add_edge(from.trim(), to.trim())?;
        }
        Command::RemovePath { from, to } => {
            next.remove_edge(from.trim(), to.trim())?;
        }
        Command::ShortestPath { from, to } => {
            let route = next.shortest_path(from.trim(), to.trim())?;
            report = Some(json!({ "distance": route.distance, "path": route.stops }).to_string());
        }
        Command::AddRobot { name, location } => {
            next.add_robot(name.trim(), location.trim())?;
        }
        Command::SendRobot { name, destination } => {
            next.assign_destination(name.trim(), destination.trim())?;
        }
        Command::RemoveRobot { name } => {
            next.remove_robot(name.trim())?;
        }
    }

    Ok(Outcome::Updated { map: next, report })
}
