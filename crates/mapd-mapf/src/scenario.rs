//! MovingAI-style `.scen` scenario files.
//!
//! ```text
//! version 1
//! 1	warehouse.map	32	32	11	6	7	18	14.87005769
//! ```
//!
//! Tab-separated columns: bucket, map name, map width, map height, start
//! x/y, goal x/y, optimal length.  Coordinates are 0-based `(x, y)`.  The
//! trailing optimal-length column is ignored on read and written as the
//! Euclidean start-goal distance.

use thiserror::Error;

use mapd_core::Coord;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors from parsing a `.scen` file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("missing version header")]
    MissingVersion,

    #[error("invalid version: {0}")]
    InvalidVersion(String),

    #[error("malformed entry on line {line}: {reason}")]
    MalformedEntry { line: usize, reason: String },
}

// ── ScenarioEntry ─────────────────────────────────────────────────────────────

/// One agent's start/goal pair in a scenario file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioEntry {
    /// Bucket index (grouping by difficulty in the MovingAI benchmarks).
    pub bucket: u32,
    /// Name of the map file this entry refers to.
    pub map_name: String,
    /// Map width, for validation against the loaded grid.
    pub map_width: u32,
    /// Map height, for validation against the loaded grid.
    pub map_height: u32,
    pub start: Coord,
    pub goal: Coord,
}

impl ScenarioEntry {
    /// Euclidean start-goal distance, written as the optimal-length column.
    fn euclidean(&self) -> f64 {
        let dx = self.start.x.abs_diff(self.goal.x) as f64;
        let dy = self.start.y.abs_diff(self.goal.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A parsed (or under-construction) scenario file.
#[derive(Debug, Clone)]
pub struct Scenario {
    version: u32,
    entries: Vec<ScenarioEntry>,
}

impl Scenario {
    /// An empty version-1 scenario ready for [`push`](Self::push).
    pub fn new() -> Self {
        Scenario { version: 1, entries: Vec::new() }
    }

    /// Parse `.scen` file content.
    pub fn parse(input: &str) -> Result<Self, ScenarioError> {
        let mut lines = input.lines().enumerate();

        // First non-empty line must be "version N".
        let version = loop {
            match lines.next() {
                None => return Err(ScenarioError::MissingVersion),
                Some((_, line)) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let Some(rest) = trimmed.strip_prefix("version ") else {
                        return Err(ScenarioError::MissingVersion);
                    };
                    break rest
                        .trim()
                        .parse::<u32>()
                        .map_err(|_| ScenarioError::InvalidVersion(rest.to_string()))?;
                }
            }
        };

        let mut entries = Vec::new();

        for (line_no, line) in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let parts: Vec<&str> = trimmed.split('\t').collect();
            if parts.len() < 8 {
                return Err(ScenarioError::MalformedEntry {
                    line: line_no + 1,
                    reason: format!("expected at least 8 columns, got {}", parts.len()),
                });
            }

            let parse_u32 = |idx: usize, name: &str| -> Result<u32, ScenarioError> {
                parts[idx].parse().map_err(|_| ScenarioError::MalformedEntry {
                    line: line_no + 1,
                    reason: format!("invalid {}: {}", name, parts[idx]),
                })
            };

            // Column 8 (optimal length) is deliberately ignored: it is
            // advisory, and this loader recomputes it on write.
            entries.push(ScenarioEntry {
                bucket: parse_u32(0, "bucket")?,
                map_name: parts[1].to_string(),
                map_width: parse_u32(2, "width")?,
                map_height: parse_u32(3, "height")?,
                start: Coord::new(parse_u32(4, "start_x")?, parse_u32(5, "start_y")?),
                goal: Coord::new(parse_u32(6, "goal_x")?, parse_u32(7, "goal_y")?),
            });
        }

        Ok(Scenario { version, entries })
    }

    /// Render to `.scen` file content.
    pub fn to_text(&self) -> String {
        let mut out = format!("version {}\n", self.version);
        for e in &self.entries {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.8}\n",
                e.bucket,
                e.map_name,
                e.map_width,
                e.map_height,
                e.start.x,
                e.start.y,
                e.goal.x,
                e.goal.y,
                e.euclidean(),
            ));
        }
        out
    }

    pub fn push(&mut self, entry: ScenarioEntry) {
        self.entries.push(entry);
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn entries(&self) -> &[ScenarioEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split into the `(starts, goals)` vectors a [`BatchSolver`] takes.
    ///
    /// [`BatchSolver`]: crate::BatchSolver
    pub fn agents(&self) -> (Vec<Coord>, Vec<Coord>) {
        let starts = self.entries.iter().map(|e| e.start).collect();
        let goals = self.entries.iter().map(|e| e.goal).collect();
        (starts, goals)
    }
}
