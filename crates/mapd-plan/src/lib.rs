//! `mapd-plan` — the per-tick decision layer.
//!
//! Two stages run back to back every tick:
//!
//! 1. [`Assigner`] points each free agent at the nearest unclaimed pending
//!    pickup (greedy, distance-true via the BFS oracle).
//! 2. [`PibtPlanner`] turns the goals into one collision-free joint step:
//!    vertex-disjoint, swap-free, every move to an adjacent (or the same)
//!    traversable cell, every agent assigned something — worst case "stay".
//!
//! Both stages draw from the run's single [`SimRng`] stream, so a seed
//! fully determines the run.
//!
//! Neither stage can fail: an agent with no reachable task stays free, an
//! agent with no viable move stays put.  The simulator layer decides what
//! to report about either.
//!
//! [`SimRng`]: mapd_core::SimRng

pub mod assign;
pub mod pibt;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use assign::Assigner;
pub use pibt::PibtPlanner;
