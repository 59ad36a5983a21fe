//! The `Simulator` struct and its tick loop.

use mapd_core::{AgentId, Coord, SimRng};
use mapd_grid::{DistTableCache, Grid, Layout};
use mapd_agent::AgentStore;
use mapd_plan::{Assigner, PibtPlanner};
use mapd_task::{Task, TaskBoard, TaskStatus};

use crate::{NoopObserver, SimBuilder, SimConfig, SimObserver, SimResult, StepReport};

/// The online MAPD simulator.
///
/// Holds all run state and drives the reveal → assign → plan → act loop.
/// Create via [`SimBuilder`] (or [`Simulator::new`] for the common case),
/// then call [`step`](Self::step) per tick or
/// [`run_until_complete`](Self::run_until_complete).
#[derive(Debug)]
pub struct Simulator {
    /// Run parameters (seed, reveal cadence, snapshot cadence).
    pub config: SimConfig,

    /// Immutable traversability map derived from the layout at build time.
    pub grid: Grid,

    /// SoA agent state.
    pub agents: AgentStore,

    /// Task arena, reveal cursor, and status counters.
    pub board: TaskBoard,

    /// Goal-keyed distance oracle, shared by assigner and planner.
    pub(crate) dist: DistTableCache,

    pub(crate) assigner: Assigner,
    pub(crate) planner: PibtPlanner,

    /// The run's single RNG stream.  Order of consumption is part of the
    /// reproducibility contract.
    pub(crate) rng: SimRng,

    pub(crate) step_index: u64,
}

impl Simulator {
    /// Build with the default reveal/snapshot cadence.  For custom
    /// cadences or cache sizing, go through [`SimBuilder`].
    pub fn new(layout: &Layout, starts: Vec<Coord>, tasks: Vec<Task>, seed: u64) -> SimResult<Self> {
        SimBuilder::new(layout, starts, tasks)
            .config(SimConfig { seed, ..SimConfig::default() })
            .build()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Steps executed so far.
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.step_index
    }

    /// `true` once every task in the arena is completed (vacuously true
    /// with no tasks).
    pub fn is_complete(&self) -> bool {
        self.board.all_completed()
    }

    /// Run one tick.  Returns the post-move position of every agent in id
    /// order.  Never fails; see [`SimObserver::on_agent_stalled`] for the
    /// per-tick anomaly surface.
    pub fn step(&mut self) -> Vec<Coord> {
        self.step_with(&mut NoopObserver)
    }

    /// [`step`](Self::step) with observer callbacks.
    pub fn step_with<O: SimObserver>(&mut self, observer: &mut O) -> Vec<Coord> {
        let step = self.step_index;
        observer.on_step_start(step);

        // ── Phase 1: reveal ───────────────────────────────────────────────
        let interval = self.config.reveal_interval_ticks;
        if interval > 0 && step.is_multiple_of(interval) {
            if let Some(task) = self.board.reveal_next() {
                observer.on_task_revealed(step, task);
            }
        }

        // ── Phase 2: assign ───────────────────────────────────────────────
        self.assigner.assign(
            &self.grid,
            &mut self.agents,
            &mut self.board,
            &mut self.dist,
            &mut self.rng,
        );

        // ── Phase 3: plan ─────────────────────────────────────────────────
        self.planner
            .plan(&self.grid, &self.agents, &mut self.dist, &mut self.rng);

        // ── Phase 4: act ──────────────────────────────────────────────────
        //
        // Stall detection reads the plan before it is committed: an agent
        // that wanted to move (goal elsewhere) but was planned to stay is
        // boxed in this tick.
        let mut moved = 0;
        for i in 0..self.agents.count {
            let planned = self.planner.next_positions()[i];
            if planned != self.agents.pos[i] {
                moved += 1;
            } else if self.agents.goal[i] != self.agents.pos[i] {
                observer.on_agent_stalled(step, AgentId(i as u32));
            }
        }

        self.planner.advance(&mut self.agents);
        self.resolve_task_transitions();

        let report = StepReport { step, moved, counts: self.board.counts() };
        observer.on_step_end(&report);

        let snap = self.config.snapshot_interval_ticks;
        if snap > 0 && step.is_multiple_of(snap) {
            observer.on_snapshot(step, &self.agents, &self.board);
        }

        self.step_index += 1;
        self.agents.pos.clone()
    }

    /// Step until [`is_complete`](Self::is_complete) or `max_steps` ticks,
    /// whichever comes first.  Returns the number of steps executed, and
    /// fires [`SimObserver::on_sim_end`] exactly once.
    pub fn run_until_complete<O: SimObserver>(&mut self, max_steps: u64, observer: &mut O) -> u64 {
        let start = self.step_index;
        while !self.is_complete() && self.step_index - start < max_steps {
            self.step_with(observer);
        }
        observer.on_sim_end(self.step_index);
        self.step_index - start
    }

    // ── Act-phase task transitions ────────────────────────────────────────

    /// Pickup and delivery hand-offs after the joint move is committed.
    ///
    /// A carrier standing on its delivery cell completes the task and goes
    /// free; a targeting agent standing on a still-pending pickup promotes
    /// to carrier and its goal flips to the delivery cell.
    fn resolve_task_transitions(&mut self) {
        for i in 0..self.agents.count {
            let a = AgentId(i as u32);
            let here = self.agents.pos[i];

            if let Some(task) = self.agents.carrying(a) {
                if here == self.board.delivery(task) {
                    self.board.complete(task);
                    self.agents.clear_carrying(a);
                }
            } else if let Some(task) = self.agents.targeting(a) {
                if here == self.board.pickup(task) && self.board.status(task) == TaskStatus::Pending
                {
                    self.agents.set_carrying(a, task);
                    self.board.start_delivery(task);
                    self.agents.goal[i] = self.board.delivery(task);
                }
            }
        }
    }
}
