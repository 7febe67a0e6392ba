//! `botway-command` — structured commands and the mutation pipeline.
//!
//! This crate is the only writer the world ever sees in a command-driven
//! deployment.  Free text enters through the [`CommandParser`] seam, becomes
//! a [`ParsedCommand`], and [`pipeline::apply`] turns it into a fresh
//! [`WorldMap`](botway_world::WorldMap) snapshot or a typed
//! [`CommandError`]; the input snapshot is never touched either way.
//!
//! # What lives here
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`command`]  | `Command`, `ParsedCommand`, the parser seam       |
//! | [`coords`]   | coordinate-parameter text parsing                 |
//! | [`pipeline`] | `Outcome`, clone-then-apply dispatch, usage notes |
//! | [`error`]    | `CommandError`, `CommandResult`                   |

pub mod command;
pub mod coords;
pub mod error;
pub mod pipeline;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use command::{Command, CommandParser, NullParser, ParsedCommand};
pub use coords::parse_coords;
pub use error::{CommandError, CommandResult};
pub use pipeline::{apply, apply_command, Outcome, USAGE};
