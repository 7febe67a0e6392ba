//! Structured command values and the text-parsing seam.
//!
//! The engine never interprets free text itself.  An external collaborator
//! (an NLP service, a CLI grammar, a test script) implements
//! [`CommandParser`] and hands over [`ParsedCommand`] values; everything
//! downstream of that seam is typed.

/// One structured instruction for the mutation pipeline.
///
/// Coordinate parameters stay as raw text here and are only interpreted by
/// the pipeline, so a parser does not need to understand coordinate syntax
/// to produce a well-formed command.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Create a location named `label` at the spot described by `coords`.
    AddLocation { label: String, coords: String },
    /// Remove whichever location sits exactly at `coords`.
    RemoveLocationByCoords { coords: String },
    /// Remove the location named `label`.
    RemoveLocationByName { label: String },
    /// Create a directed edge.
    AddPath { from: String, to: String },
    /// Remove a directed edge.
    RemovePath { from: String, to: String },
    /// Query the least-cost route and report it as JSON.
    ShortestPath { from: String, to: String },
    /// Create a robot at the location named `location`.
    AddRobot { name: String, location: String },
    /// Route an existing robot to the location named `destination`.
    SendRobot { name: String, destination: String },
    /// Remove an idle robot.
    RemoveRobot { name: String },
    /// Print the usage notes.
    Help,
}

/// What the parsing collaborator produced for one input line.
///
/// `Unknown` covers the forward-compatibility gap: a collaborator may
/// recognize a command shape this engine has no handler for yet, and the
/// pipeline turns that into a typed error instead of guessing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParsedCommand {
    Known(Command),
    Unknown { kind: String },
}

/// The seam for external free-text parsing.
pub trait CommandParser {
    /// Translate one input line.  `None` means the text was not understood
    /// at all, as opposed to understood-but-unhandled.
    fn parse(&self, input: &str) -> Option<ParsedCommand>;
}

/// A parser that understands nothing.
///
/// For drivers that construct [`Command`] values directly and never feed
/// free text through the session.
pub struct NullParser;

impl CommandParser for NullParser {
    fn parse(&self, _input: &str) -> Option<ParsedCommand> {
        None
    }
}
