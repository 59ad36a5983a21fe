//! Greedy task assignment: closest free agent takes the nearest pending
//! pickup.
//!
//! # Exclusivity
//!
//! Two guards keep a pending task from attracting two agents at once:
//! the `targeted` set (rebuilt from live `targeting` slots at the start of
//! every tick) keeps already-spoken-for tasks out of the pool, and the
//! pool itself shrinks as tasks are taken during the scan.  A task can
//! therefore be handed out at most once per tick, and a held target is
//! never offered again while it stays pending.
//!
//! The pool shuffle prevents starvation on symmetric layouts: without it,
//! arena order would always win distance ties and the same far-corner task
//! could wait forever.

use rustc_hash::FxHashSet;

use mapd_core::{AgentId, SimRng, TaskId};
use mapd_grid::{DistTableCache, Grid};
use mapd_agent::AgentStore;
use mapd_task::{TaskBoard, TaskStatus};

/// Per-tick goal setter.  Holds only reusable scratch buffers.
#[derive(Default, Debug)]
pub struct Assigner {
    /// Pending tasks up for grabs this tick, shuffled.
    pool: Vec<TaskId>,
    /// Tasks already held in some agent's `targeting` slot.
    targeted: FxHashSet<TaskId>,
}

impl Assigner {
    pub fn new() -> Self {
        Assigner::default()
    }

    /// Point every free agent at a pickup (or leave it idling in place).
    ///
    /// Runs before planning each tick.  Carriers and agents whose target
    /// is still pending are left alone; everyone else gets the reachable
    /// pending task with the smallest BFS distance, ties broken by pool
    /// order.  An agent standing on an unclaimed pickup takes the task
    /// outright, skipping the `targeting` stage.
    pub fn assign(
        &mut self,
        grid: &Grid,
        agents: &mut AgentStore,
        board: &mut TaskBoard,
        dist: &mut DistTableCache,
        rng: &mut SimRng,
    ) {
        self.targeted.clear();
        for a in agents.agent_ids() {
            if let Some(t) = agents.targeting(a) {
                self.targeted.insert(t);
            }
        }

        self.pool.clear();
        for (id, task) in board.iter() {
            if task.status == TaskStatus::Pending && !self.targeted.contains(&id) {
                self.pool.push(id);
            }
        }
        rng.shuffle(&mut self.pool);

        let unreachable = grid.area();

        for i in 0..agents.count {
            let a = AgentId(i as u32);

            // Carrier: goal is already the delivery cell.
            if agents.carrying(a).is_some() {
                continue;
            }
            // Target still pending: keep walking to it.
            if let Some(t) = agents.targeting(a) {
                if board.status(t) == TaskStatus::Pending {
                    continue;
                }
            }

            // Free agent: drop any stale target, idle here by default.
            agents.clear_targeting(a);
            agents.goal[i] = agents.pos[i];

            let mut best: Option<usize> = None;
            let mut best_d = unreachable;
            let mut took_one = false;

            let mut k = 0;
            while k < self.pool.len() {
                let t = self.pool[k];
                let d = dist.distance(grid, board.pickup(t), agents.pos[i]);

                if d == 0 {
                    // Standing on the pickup: claim the task outright.
                    self.pool.remove(k);
                    debug_assert_eq!(board.status(t), TaskStatus::Pending);
                    agents.set_carrying(a, t);
                    agents.goal[i] = board.delivery(t);
                    board.start_delivery(t);
                    took_one = true;
                    break;
                }
                // Strict `<` keeps the first-seen best on ties; anything at
                // the unreachable sentinel is never selected.
                if d < best_d {
                    best_d = d;
                    best = Some(k);
                }
                k += 1;
            }

            if took_one {
                continue;
            }
            if let Some(k) = best {
                let t = self.pool.remove(k);
                agents.set_targeting(a, t);
                agents.goal[i] = board.pickup(t);
            }
        }
    }
}
