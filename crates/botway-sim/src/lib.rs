//! `botway-sim` — the snapshot-owning driver loop.
//!
//! Ties the other crates together into something a frontend can hold: a
//! [`Session`] owns the current [`WorldMap`](botway_world::WorldMap), feeds
//! console lines through a [`CommandParser`](botway_command::CommandParser)
//! and the command pipeline, and advances simulation time tick by tick.
//! Every snapshot it ever exposes is immutable history.
//!
//! # Quick start
//!
//! ```
//! use botway_command::{Command, NullParser};
//! use botway_sim::Session;
//!
//! let mut session = Session::new(NullParser);
//! session.run_command(&Command::AddLocation {
//!     label:  "dock".into(),
//!     coords: "(10, 20)".into(),
//! })?;
//! session.tick();
//! assert_eq!(session.current().location_count(), 1);
//! # Ok::<(), botway_command::CommandError>(())
//! ```

pub mod session;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use session::{ConsoleEntry, Session};
