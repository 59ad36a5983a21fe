//! Simulation observer trait for progress reporting and data collection.

use mapd_core::{AgentId, TaskId};
use mapd_agent::AgentStore;
use mapd_task::{StatusCounts, TaskBoard};

// ── StepReport ────────────────────────────────────────────────────────────────

/// What one completed step looked like, as handed to
/// [`SimObserver::on_step_end`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub step: u64,
    /// Agents whose position changed this step.
    pub moved: usize,
    /// Task totals after the act phase.
    pub counts: StatusCounts,
}

// ── SimObserver ───────────────────────────────────────────────────────────────

/// Callbacks invoked by [`Simulator::step_with`][crate::Simulator::step_with]
/// at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — stall logger
///
/// ```rust,ignore
/// struct StallLogger;
///
/// impl SimObserver for StallLogger {
///     fn on_agent_stalled(&mut self, step: u64, agent: AgentId) {
///         eprintln!("step {step}: agent {agent} boxed in");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before the reveal phase.
    fn on_step_start(&mut self, _step: u64) {}

    /// A task moved from `NotRevealed` to `Pending` this step.
    fn on_task_revealed(&mut self, _step: u64, _task: TaskId) {}

    /// An agent that wanted to move could not claim any cell this step.
    ///
    /// Not an error: the agent stays put and retries next step.  This is
    /// the anomaly surface for hosts that want to log or count stalls.
    fn on_agent_stalled(&mut self, _step: u64, _agent: AgentId) {}

    /// Called at the end of each step, after the act phase.
    fn on_step_end(&mut self, _report: &StepReport) {}

    /// Called at snapshot intervals with read access to the full state,
    /// so output writers can record per-agent rows without the simulator
    /// knowing about any specific format.
    fn on_snapshot(&mut self, _step: u64, _agents: &AgentStore, _board: &TaskBoard) {}

    /// Called once by [`run_until_complete`] after the final step.
    ///
    /// [`run_until_complete`]: crate::Simulator::run_until_complete
    fn on_sim_end(&mut self, _final_step: u64) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call the
/// observer-taking entry points but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
