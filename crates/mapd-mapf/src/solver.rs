//! The batch solver contract and solution validation.

use rustc_hash::FxHashMap;
use thiserror::Error;

use mapd_core::Coord;
use mapd_grid::Grid;

/// One position per agent at a single timestep.
pub type Configuration = Vec<Coord>;

// ── BatchSolver ───────────────────────────────────────────────────────────────

/// A complete one-shot MAPF solver.
///
/// # Contract
///
/// The returned sequence is either empty (failure or `time_limit_ms`
/// exhausted) or a feasible path set: it starts at `starts`, ends at
/// `goals`, and every consecutive pair of configurations is vertex- and
/// edge-conflict-free with only stay/adjacent moves on free cells.
/// [`validate_solution`] checks exactly this.
///
/// Implementations must not panic on unsolvable inputs — return empty.
pub trait BatchSolver {
    fn solve(
        &self,
        grid: &Grid,
        starts: &[Coord],
        goals: &[Coord],
        time_limit_ms: u64,
        verbose: u8,
    ) -> Vec<Configuration>;
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Violations of the [`BatchSolver`] contract, first one found.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolutionError {
    #[error("solution is empty")]
    Empty,

    #[error("step {step}: configuration has {got} agents, expected {expected}")]
    WidthMismatch { step: usize, expected: usize, got: usize },

    #[error("agent {agent}: solution starts at {got}, instance starts at {expected}")]
    WrongStart { agent: usize, expected: Coord, got: Coord },

    #[error("agent {agent}: solution ends at {got}, goal is {expected}")]
    WrongGoal { agent: usize, expected: Coord, got: Coord },

    #[error("step {step}, agent {agent}: cell {at} is not traversable")]
    Untraversable { step: usize, agent: usize, at: Coord },

    #[error("step {step}, agent {agent}: illegal move {from} -> {to}")]
    IllegalMove { step: usize, agent: usize, from: Coord, to: Coord },

    #[error("step {step}: agents {first} and {second} collide at {at}")]
    VertexConflict { step: usize, first: usize, second: usize, at: Coord },

    #[error("step {step}: agents {first} and {second} cross the same edge")]
    EdgeConflict { step: usize, first: usize, second: usize },
}

/// Check a batch solution against the full feasibility contract.
///
/// Stops at the first violation; `Ok(())` means the sequence is a valid
/// plan for `(grid, starts, goals)`.
pub fn validate_solution(
    grid: &Grid,
    starts: &[Coord],
    goals: &[Coord],
    solution: &[Configuration],
) -> Result<(), SolutionError> {
    let n = starts.len();
    let first = solution.first().ok_or(SolutionError::Empty)?;

    for (step, config) in solution.iter().enumerate() {
        if config.len() != n {
            return Err(SolutionError::WidthMismatch { step, expected: n, got: config.len() });
        }
        for (agent, &at) in config.iter().enumerate() {
            if !grid.is_free(at) {
                return Err(SolutionError::Untraversable { step, agent, at });
            }
        }
        // Vertex conflicts within the configuration.
        let mut seen: FxHashMap<Coord, usize> = FxHashMap::default();
        for (agent, &at) in config.iter().enumerate() {
            if let Some(&other) = seen.get(&at) {
                return Err(SolutionError::VertexConflict { step, first: other, second: agent, at });
            }
            seen.insert(at, agent);
        }
    }

    for (agent, (&s, &got)) in starts.iter().zip(first).enumerate() {
        if s != got {
            return Err(SolutionError::WrongStart { agent, expected: s, got });
        }
    }
    if let Some(last) = solution.last() {
        for (agent, (&g, &got)) in goals.iter().zip(last).enumerate() {
            if g != got {
                return Err(SolutionError::WrongGoal { agent, expected: g, got });
            }
        }
    }

    for (step, window) in solution.windows(2).enumerate() {
        let (prev, next) = (&window[0], &window[1]);
        let step = step + 1; // the step being entered
        for agent in 0..n {
            let (from, to) = (prev[agent], next[agent]);
            if from != to && from.manhattan(to) != 1 {
                return Err(SolutionError::IllegalMove { step, agent, from, to });
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if next[i] == prev[j] && next[j] == prev[i] && prev[i] != prev[j] {
                    return Err(SolutionError::EdgeConflict { step, first: i, second: j });
                }
            }
        }
    }

    Ok(())
}
