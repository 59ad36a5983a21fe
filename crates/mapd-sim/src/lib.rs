//! `mapd-sim` — the per-tick orchestrator.
//!
//! # Four-phase tick loop
//!
//! ```text
//! for each step:
//!   ① Reveal — promote the next scheduled task to Pending.
//!   ② Assign — point free agents at unclaimed pending pickups.
//!   ③ Plan   — PIBT computes one collision-free joint move.
//!   ④ Act    — commit positions, update elapsed, run pickup/delivery
//!              transitions, fire observer hooks.
//! ```
//!
//! [`Simulator::step`] runs one loop iteration and never fails: per-tick
//! anomalies (an agent that could not move toward its goal) surface
//! through [`SimObserver::on_agent_stalled`], not through errors.
//! Everything fatal (bad coordinates, duplicate starts) is caught by
//! [`SimBuilder::build`] before the first tick.
//!
//! For one-shot MAPF problems the simulator steps through a precomputed
//! batch solution instead — see [`Playback`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mapd_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let mut sim = SimBuilder::new(&layout, starts, tasks)
//!     .config(SimConfig { seed: 42, ..SimConfig::default() })
//!     .build()?;
//! let steps = sim.run_until_complete(10_000, &mut NoopObserver);
//! assert!(sim.is_complete(), "finished in {steps} steps");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod playback;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, StepReport};
pub use playback::Playback;
pub use sim::Simulator;
