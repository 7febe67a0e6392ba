//! `botway-world` — the map graph, routing, and robot stepping.
//!
//! This crate owns the whole simulated world state.  One [`WorldMap`] value
//! is one snapshot: cloning it yields an independent deep copy, and every
//! operation on it is atomic, mutating nothing on failure.  Drivers that
//! want copy-on-write history clone first and swap on success; see
//! `botway-sim` for the stock driver.
//!
//! # What lives here
//!
//! | Module     | Contents                                             |
//! |------------|------------------------------------------------------|
//! | [`map`]    | `WorldMap`, `Location`, `EdgeKey`, the tick stepper  |
//! | [`robot`]  | `Robot`, `Segment`, arrival kinematics               |
//! | [`router`] | `Route` and the seeded least-cost solver             |
//! | [`error`]  | `WorldError`, `WorldResult`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the value types        |
//!           | (`Location`, `EdgeKey`, `Robot`, `Segment`, `Route`).    |

pub mod error;
pub mod map;
pub mod robot;
pub mod router;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{LocationUse, WorldError, WorldResult};
pub use map::{EdgeKey, EdgeView, Location, WorldMap, STEP_DISTANCE};
pub use robot::{Robot, Segment, ARRIVAL_THRESHOLD};
pub use router::Route;
