//! Command-subsystem error type.

use thiserror::Error;

use botway_world::WorldError;

/// Errors produced while interpreting a command.
///
/// World failures pass through transparently so callers see the underlying
/// error text unchanged; the variants here cover what can go wrong before
/// the world is ever touched.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("coordinate text `{text}` does not contain exactly two numbers")]
    MalformedCoordinateText { text: String },

    #[error("no handler for command kind `{kind}`")]
    UnknownCommand { kind: String },

    #[error("input not understood")]
    InputNotUnderstood,

    #[error(transparent)]
    World(#[from] WorldError),
}

pub type CommandResult<T> = Result<T, CommandError>;
