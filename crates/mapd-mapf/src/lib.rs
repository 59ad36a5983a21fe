//! `mapd-mapf` — the batch MAPF seam.
//!
//! The online planner handles the task stream; for one-shot
//! start-to-goal problems the simulator can instead defer to a complete
//! batch solver (LaCAM or similar) living behind the [`BatchSolver`]
//! trait.  This crate owns that seam and the file formats around it:
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`solver`]   | `Configuration`, `BatchSolver`, `validate_solution`    |
//! | [`scenario`] | MovingAI-style `.scen` read/write                      |
//! | [`result`]   | Solver result-file parser (`key=value` + path lines)   |
//!
//! The solver itself is an external component; nothing here searches.

pub mod result;
pub mod scenario;
pub mod solver;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use result::{ResultError, SolveReport};
pub use scenario::{Scenario, ScenarioEntry, ScenarioError};
pub use solver::{BatchSolver, Configuration, SolutionError, validate_solution};
