//! Frame-by-frame playback of a batch MAPF solution.
//!
//! When the whole instance is known up front (one goal per agent, no task
//! stream), the simulator can defer to a complete batch solver and simply
//! replay its answer one configuration per tick.  `Playback` owns that
//! replay: it remembers whether the solver succeeded, hands out frames in
//! order, and can be rewound for re-runs.
//!
//! An empty solver answer (failure or timeout) yields `solved() == false`
//! and no frames; the caller decides whether to fall back to the online
//! planner.

use mapd_core::Coord;
use mapd_grid::Grid;
use mapd_mapf::{BatchSolver, Configuration};

/// A solved (or failed) batch run, consumed frame by frame.
pub struct Playback {
    solution: Vec<Configuration>,
    cursor: usize,
}

impl Playback {
    /// Run `solver` on the instance and wrap its answer.
    pub fn from_solver<S: BatchSolver>(
        solver: &S,
        grid: &Grid,
        starts: &[Coord],
        goals: &[Coord],
        time_limit_ms: u64,
        verbose: u8,
    ) -> Self {
        let solution = solver.solve(grid, starts, goals, time_limit_ms, verbose);
        Playback { solution, cursor: 0 }
    }

    /// Wrap an already-computed solution (e.g. parsed from a result file).
    pub fn from_solution(solution: Vec<Configuration>) -> Self {
        Playback { solution, cursor: 0 }
    }

    /// `false` when the solver returned the empty sequence (failure or
    /// timeout).
    pub fn solved(&self) -> bool {
        !self.solution.is_empty()
    }

    /// Total number of timesteps in the solution.
    pub fn len(&self) -> usize {
        self.solution.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solution.is_empty()
    }

    /// `true` while frames remain.
    pub fn has_more(&self) -> bool {
        self.cursor < self.solution.len()
    }

    /// The next configuration, or `None` when the replay is exhausted.
    pub fn advance(&mut self) -> Option<&Configuration> {
        let frame = self.solution.get(self.cursor)?;
        self.cursor += 1;
        Some(frame)
    }

    /// Restart the replay from the first frame.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}
