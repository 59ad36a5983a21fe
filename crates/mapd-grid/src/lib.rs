//! `mapd-grid` — the warehouse floor and everything derived from it.
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`layout`] | `CellKind`, `Layout` — the annotated floor plan          |
//! | [`grid`]   | `Grid` — immutable traversability view, neighbor order   |
//! | [`io`]     | Layout text format (`"W H"` header + digit rows)         |
//! | [`dist`]   | `DistTable` (lazy BFS oracle), `DistTableCache` (LRU)    |
//! | [`error`]  | `GridError`, `GridResult`                                |
//!
//! The `Layout` is the authoring surface (cell kinds, storage/output
//! enumeration); the `Grid` is the planning surface (booleans only).  The
//! grid is derived once and never mutated afterwards, which is what lets
//! distance tables persist across ticks.

pub mod dist;
pub mod error;
pub mod grid;
pub mod io;
pub mod layout;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dist::{DistTable, DistTableCache};
pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use layout::{CellKind, Layout};
