//! `botway-core` — foundational types for the `botway` robot-map simulation.
//!
//! This crate is a dependency of every other `botway-*` crate.  It
//! intentionally has no `botway-*` dependencies and minimal external ones
//! (only `rand` and `rustc-hash`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | [`geo`]   | `Point`, Euclidean distance, `Bounds`           |
//! | [`color`] | `Color`, stable per-name color generation       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod color;
pub mod geo;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use color::Color;
pub use geo::{Bounds, Point};
