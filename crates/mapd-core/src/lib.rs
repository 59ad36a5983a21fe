//! `mapd-core` — foundational types for the `mapd` warehouse simulator.
//!
//! This crate is a dependency of every other `mapd-*` crate.  It intentionally
//! has no `mapd-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                   |
//! |-----------|--------------------------------------------|
//! | [`ids`]   | `AgentId`, `TaskId`                        |
//! | [`coord`] | `Coord`, Manhattan distance                |
//! | [`rng`]   | `SimRng` — the run's single seeded stream  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod coord;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::Coord;
pub use ids::{AgentId, TaskId};
pub use rng::SimRng;
