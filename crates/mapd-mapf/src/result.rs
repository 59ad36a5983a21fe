//! Batch solver result files.
//!
//! ```text
//! agents=3
//! map_file=warehouse.map
//! solver=lacam
//! solved=1
//! soc=42
//! soc_lb=40
//! makespan=17
//! makespan_lb=17
//! sum_of_loss=42
//! sum_of_loss_lb=40
//! comp_time=118
//! seed=0
//! starts=(11,6),(29,9),(9,0),
//! goals=(7,18),(1,16),(13,21),
//! solution=
//! 0:(11,6),(29,9),(9,0),
//! 1:(11,7),(29,10),(10,0),
//! ```
//!
//! `key=value` header lines followed by one `t:(x,y),...` line per
//! timestep.  Coordinate lists tolerate a trailing comma (the reference
//! solver always emits one).

use thiserror::Error;

use mapd_core::{AgentId, Coord};

use crate::Configuration;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors from parsing a result file.
#[derive(Debug, Error)]
pub enum ResultError {
    #[error("missing header field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("malformed coordinate list: {0:?}")]
    MalformedCoordList(String),

    #[error("malformed solution line: {0:?}")]
    MalformedStep(String),
}

// ── SolveReport ───────────────────────────────────────────────────────────────

/// Everything a batch solver run reports: instance, metrics, and the
/// per-timestep solution.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub agents: usize,
    pub map_file: String,
    pub solver: String,
    pub solved: bool,

    /// Sum of costs, and its lower bound.
    pub soc: u64,
    pub soc_lb: u64,
    pub makespan: u64,
    pub makespan_lb: u64,
    pub sum_of_loss: u64,
    pub sum_of_loss_lb: u64,
    /// Wall-clock solve time in milliseconds.
    pub comp_time_ms: u64,
    pub seed: u64,

    pub starts: Vec<Coord>,
    pub goals: Vec<Coord>,
    /// One configuration per timestep; empty when `solved` is false.
    pub solution: Vec<Configuration>,
}

impl SolveReport {
    /// Parse a result file.
    pub fn parse(input: &str) -> Result<Self, ResultError> {
        let mut fields: Vec<(&str, &str)> = Vec::new();
        let mut solution: Vec<Configuration> = Vec::new();
        let mut in_solution = false;

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if in_solution {
                let (step, coords) = line
                    .split_once(':')
                    .ok_or_else(|| ResultError::MalformedStep(line.to_string()))?;
                step.trim()
                    .parse::<usize>()
                    .map_err(|_| ResultError::MalformedStep(line.to_string()))?;
                solution.push(parse_coord_list(coords)?);
                continue;
            }
            if line == "solution=" {
                in_solution = true;
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                fields.push((key, value));
            }
        }

        let lookup = |field: &'static str| -> Result<&str, ResultError> {
            fields
                .iter()
                .find(|(k, _)| *k == field)
                .map(|(_, v)| *v)
                .ok_or(ResultError::MissingField(field))
        };
        let int = |field: &'static str| -> Result<u64, ResultError> {
            let value = lookup(field)?;
            value.trim().parse().map_err(|_| ResultError::InvalidValue {
                field,
                value: value.to_string(),
            })
        };

        Ok(SolveReport {
            agents: int("agents")? as usize,
            map_file: lookup("map_file")?.to_string(),
            solver: lookup("solver")?.to_string(),
            solved: int("solved")? != 0,
            soc: int("soc")?,
            soc_lb: int("soc_lb")?,
            makespan: int("makespan")?,
            makespan_lb: int("makespan_lb")?,
            sum_of_loss: int("sum_of_loss")?,
            sum_of_loss_lb: int("sum_of_loss_lb")?,
            comp_time_ms: int("comp_time")?,
            seed: int("seed")?,
            starts: parse_coord_list(lookup("starts")?)?,
            goals: parse_coord_list(lookup("goals")?)?,
            solution,
        })
    }

    // ── Derived views ─────────────────────────────────────────────────────

    /// Number of timesteps in the solution (0 when unsolved).
    pub fn num_timesteps(&self) -> usize {
        self.solution.len()
    }

    /// `true` if the sum of costs matches its lower bound.
    pub fn is_optimal_soc(&self) -> bool {
        self.soc == self.soc_lb
    }

    /// `true` if the makespan matches its lower bound.
    pub fn is_optimal_makespan(&self) -> bool {
        self.makespan == self.makespan_lb
    }

    /// The full path of one agent, or `None` for an out-of-range id.
    pub fn agent_path(&self, agent: AgentId) -> Option<Vec<Coord>> {
        if agent.index() >= self.agents {
            return None;
        }
        Some(self.solution.iter().map(|c| c[agent.index()]).collect())
    }

    /// Moves until the agent first reaches its goal (wait-at-goal steps
    /// excluded), or `None` for an out-of-range id or empty solution.
    pub fn path_length(&self, agent: AgentId) -> Option<usize> {
        let path = self.agent_path(agent)?;
        let goal = *self.goals.get(agent.index())?;
        match path.iter().position(|&p| p == goal) {
            Some(t) => Some(t),
            None => Some(path.len().saturating_sub(1)),
        }
    }
}

// ── Coordinate lists ──────────────────────────────────────────────────────────

/// Parse `"(11,6),(29,9),(9,0),"` — the trailing comma is optional.
fn parse_coord_list(input: &str) -> Result<Vec<Coord>, ResultError> {
    let malformed = || ResultError::MalformedCoordList(input.to_string());
    let mut out = Vec::new();

    for chunk in input.trim().trim_end_matches(',').split("),(") {
        let clean = chunk.trim().trim_start_matches('(').trim_end_matches(')');
        if clean.is_empty() {
            continue;
        }
        let (x, y) = clean.split_once(',').ok_or_else(malformed)?;
        out.push(Coord::new(
            x.trim().parse().map_err(|_| malformed())?,
            y.trim().parse().map_err(|_| malformed())?,
        ));
    }

    Ok(out)
}
