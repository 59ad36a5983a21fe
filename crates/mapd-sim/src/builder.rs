//! Validating builder for [`Simulator`].

use mapd_core::{Coord, SimRng};
use mapd_grid::{DistTableCache, Layout};
use mapd_agent::AgentStore;
use mapd_plan::{Assigner, PibtPlanner};
use mapd_task::{Task, TaskBoard};

use crate::{SimConfig, SimError, SimResult, Simulator};

/// Builder for [`Simulator`].
///
/// Everything the planner later assumes about coordinates is checked
/// here: starts and task endpoints must be on traversable cells, and no
/// two agents may share a start.  A violation is fatal at build time —
/// the tick loop itself never validates.
pub struct SimBuilder<'a> {
    layout: &'a Layout,
    starts: Vec<Coord>,
    tasks: Vec<Task>,
    config: SimConfig,
}

impl<'a> SimBuilder<'a> {
    pub fn new(layout: &'a Layout, starts: Vec<Coord>, tasks: Vec<Task>) -> Self {
        SimBuilder { layout, starts, tasks, config: SimConfig::default() }
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the instance and assemble a ready-to-step [`Simulator`].
    pub fn build(self) -> SimResult<Simulator> {
        let grid = self.layout.to_grid();

        // ── Coordinate validation ─────────────────────────────────────────
        let check = |what: &'static str, at: Coord| -> SimResult<()> {
            if !grid.in_bounds(at) {
                return Err(SimError::OutOfBounds {
                    what,
                    at,
                    width: grid.width(),
                    height: grid.height(),
                });
            }
            if !grid.is_free(at) {
                return Err(SimError::Blocked { what, at });
            }
            Ok(())
        };

        for &s in &self.starts {
            check("agent start", s)?;
        }
        for t in &self.tasks {
            check("task pickup", t.pickup)?;
            check("task delivery", t.delivery)?;
        }
        for i in 0..self.starts.len() {
            for j in (i + 1)..self.starts.len() {
                if self.starts[i] == self.starts[j] {
                    return Err(SimError::StartCollision {
                        first: i,
                        second: j,
                        at: self.starts[i],
                    });
                }
            }
        }

        // ── Assembly ──────────────────────────────────────────────────────
        let agent_count = self.starts.len();
        let mut rng = SimRng::new(self.config.seed);
        let agents = AgentStore::new(self.starts, &mut rng);
        let planner = PibtPlanner::new(&grid, agent_count);
        let cache_cap = self
            .config
            .dist_cache_capacity
            .unwrap_or_else(|| (8 * agent_count).max(8));
        let dist = DistTableCache::new(cache_cap);

        let mut board = TaskBoard::new(self.tasks);
        if self.config.reveal_interval_ticks == 0 {
            board.reveal_all();
        }

        Ok(Simulator {
            config: self.config,
            grid,
            agents,
            board,
            dist,
            assigner: Assigner::new(),
            planner,
            rng,
            step_index: 0,
        })
    }
}
