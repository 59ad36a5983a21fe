//! PIBT — priority inheritance with backtracking, one timestep at a time.
//!
//! # The algorithm
//!
//! Agents are planned in priority order (carriers first, then
//! longest-stuck, then a fixed random tie-breaker).  Each agent ranks the
//! five candidate cells `{stay} ∪ neighbors` by goal distance and walks
//! down the list; claiming a cell that another agent currently occupies
//! *inherits* priority to that agent, which must immediately find a cell of
//! its own.  If the whole chain below a claim fails, the claim is rolled
//! back and the next candidate is tried.  An agent with no viable candidate
//! stays in place.
//!
//! # Explicit stack
//!
//! Inheritance chains can grow to the full agent count (imagine a line of
//! agents all pushed one cell forward), so the engine keeps its own stack
//! of `(agent, candidates, cursor, committed)` frames instead of
//! recursing.  Termination: each frame's claim marks a distinct cell in
//! `occupied_next`, and a claimed cell is never claimed again within the
//! tick, so a chain can have at most one frame per agent.
//!
//! # Rollback / stay interaction
//!
//! A failing agent always commits a stay on its own cell, even though the
//! contesting ancestor still holds the claim on that cell at that moment;
//! the ancestor's rollback then releases the claim *only if it still owns
//! it* — which after a child failure it never does.  Both halves are load-
//! bearing: dropping either leaves a cell claimed by nobody or by two
//! agents.

use mapd_core::{AgentId, Coord, SimRng, TaskId};
use mapd_grid::{DistTableCache, Grid};
use mapd_agent::AgentStore;

// ── Frame ─────────────────────────────────────────────────────────────────────

/// One in-flight agent on the inheritance chain.
#[derive(Debug)]
struct Frame {
    agent: AgentId,
    /// Candidate cells, best first (goal distance, then unoccupied-now,
    /// then random tie-break).
    candidates: Vec<Coord>,
    /// Next candidate to try.
    cursor: usize,
    /// The cell claimed while waiting on an inherited child, if any.
    committed: Option<Coord>,
}

// ── PibtPlanner ───────────────────────────────────────────────────────────────

/// The single-timestep joint-move engine.
///
/// Owns the occupancy boards and the `next_pos` output buffer; both are
/// sized to the grid/agent count at construction and reused every tick.
#[derive(Debug)]
pub struct PibtPlanner {
    width: u32,
    /// Off-grid sentinel meaning "not planned yet this tick".
    nil_coord: Coord,
    /// Cell → occupant this tick, `AgentId::INVALID` if empty.
    occupied_now: Vec<AgentId>,
    /// Cell → claimant for the next tick.  Fully released during
    /// [`advance`](Self::advance); a stale entry here corrupts the next
    /// tick's vertex checks.
    occupied_next: Vec<AgentId>,
    /// Planned position per agent; `nil_coord` until planned.
    next_pos: Vec<Coord>,
    /// Priority-sorted agent ids (scratch, reused).
    order: Vec<AgentId>,
    /// Inheritance chain (scratch, reused).
    stack: Vec<Frame>,
}

impl PibtPlanner {
    pub fn new(grid: &Grid, agent_count: usize) -> Self {
        let cells = grid.area() as usize;
        PibtPlanner {
            width: grid.width(),
            nil_coord: grid.nil_coord(),
            occupied_now: vec![AgentId::INVALID; cells],
            occupied_next: vec![AgentId::INVALID; cells],
            next_pos: vec![grid.nil_coord(); agent_count],
            order: Vec::with_capacity(agent_count),
            stack: Vec::new(),
        }
    }

    /// The joint move computed by the last [`plan`](Self::plan) call, one
    /// entry per agent in id order.
    #[inline]
    pub fn next_positions(&self) -> &[Coord] {
        &self.next_pos
    }

    #[inline]
    fn cell(&self, c: Coord) -> usize {
        (c.y * self.width + c.x) as usize
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Compute a collision-free joint move for all agents.
    ///
    /// Postconditions: `next_positions()` is vertex-disjoint, swap-free,
    /// every entry is the agent's cell or a free neighbor of it, and no
    /// entry is left at the sentinel.
    pub fn plan(
        &mut self,
        grid: &Grid,
        agents: &AgentStore,
        dist: &mut DistTableCache,
        rng: &mut SimRng,
    ) -> &[Coord] {
        debug_assert_eq!(self.occupied_now.len(), grid.area() as usize);
        debug_assert!(
            self.occupied_next.iter().all(|&a| a == AgentId::INVALID),
            "occupied_next was not released by the previous act phase"
        );

        self.next_pos.clear();
        self.next_pos.resize(agents.count, self.nil_coord);

        // Assert current occupancy.  `advance` keeps the board current
        // between ticks; doing it here as well covers the first tick and
        // hosts that rebuild agents between steps.
        for a in agents.agent_ids() {
            let ci = self.cell(agents.pos[a.index()]);
            self.occupied_now[ci] = a;
        }

        // Priority order: carriers, then longest since last at goal, then
        // the fixed per-agent tie-breaker.  Stable sort keeps id order for
        // full ties.
        self.order.clear();
        self.order.extend(agents.agent_ids());
        self.order.sort_by(|&a, &b| {
            let free_a = agents.carrying[a.index()] == TaskId::INVALID;
            let free_b = agents.carrying[b.index()] == TaskId::INVALID;
            free_a
                .cmp(&free_b)
                .then_with(|| agents.elapsed[b.index()].cmp(&agents.elapsed[a.index()]))
                .then_with(|| {
                    agents.tie_breaker[b.index()].total_cmp(&agents.tie_breaker[a.index()])
                })
        });

        for k in 0..self.order.len() {
            let a = self.order[k];
            if self.next_pos[a.index()] == self.nil_coord {
                self.run_chain(grid, agents, dist, rng, a);
            }
        }

        &self.next_pos
    }

    /// Plan one agent, inheriting through blockers as needed.
    fn run_chain(
        &mut self,
        grid: &Grid,
        agents: &AgentStore,
        dist: &mut DistTableCache,
        rng: &mut SimRng,
        root: AgentId,
    ) {
        debug_assert!(self.stack.is_empty());
        let frame = self.make_frame(grid, agents, dist, rng, root);
        self.stack.push(frame);

        'chain: while let Some(mut top) = self.stack.pop() {
            let i = top.agent;
            let here = agents.pos[i.index()];

            while top.cursor < top.candidates.len() {
                let v = top.candidates[top.cursor];
                top.cursor += 1;
                let vi = self.cell(v);

                // Vertex conflict: already claimed for next tick.
                if self.occupied_next[vi] != AgentId::INVALID {
                    continue;
                }
                // Swap conflict: the occupant of v is moving into our cell.
                let j = self.occupied_now[vi];
                if j != AgentId::INVALID && j != i && self.next_pos[j.index()] == here {
                    continue;
                }

                // Claim v.
                self.next_pos[i.index()] = v;
                self.occupied_next[vi] = i;

                // Priority inheritance: v's occupant has not planned yet —
                // it must clear out (or fail) before this claim is final.
                if j != AgentId::INVALID && j != i && self.next_pos[j.index()] == self.nil_coord {
                    top.committed = Some(v);
                    self.stack.push(top);
                    let child = self.make_frame(grid, agents, dist, rng, j);
                    self.stack.push(child);
                    continue 'chain;
                }

                self.resolve(true);
                continue 'chain;
            }

            // Every candidate failed: stay put.  The own cell is always
            // claimable for a stay; the contesting ancestor (if any) rolls
            // its claim back in `resolve` without touching ours.
            self.next_pos[i.index()] = here;
            let hi = self.cell(here);
            self.occupied_next[hi] = i;
            self.resolve(false);
        }
    }

    /// Propagate a finished frame's outcome through the waiting chain.
    ///
    /// Success: every ancestor's tentative claim becomes final; the chain
    /// is done.  Failure: the immediate parent releases its contested
    /// claim (unless the failing child's stay already overwrote it) and
    /// resumes from its next candidate; grandparents keep waiting.
    fn resolve(&mut self, ok: bool) {
        if ok {
            self.stack.clear();
            return;
        }
        if let Some(mut parent) = self.stack.pop() {
            if let Some(v) = parent.committed.take() {
                let vi = self.cell(v);
                if self.occupied_next[vi] == parent.agent {
                    self.occupied_next[vi] = AgentId::INVALID;
                }
                self.next_pos[parent.agent.index()] = self.nil_coord;
            }
            self.stack.push(parent);
        }
    }

    /// Build a frame: candidates ranked by (goal distance, occupied-now
    /// tag, random tie-break) after a shuffle.  The shuffle plus the two
    /// random keys make tie behavior a pure function of the rng stream.
    fn make_frame(
        &self,
        grid: &Grid,
        agents: &AgentStore,
        dist: &mut DistTableCache,
        rng: &mut SimRng,
        agent: AgentId,
    ) -> Frame {
        let here = agents.pos[agent.index()];
        let goal = agents.goal[agent.index()];
        let table = dist.for_goal(grid, goal);

        let mut cells: Vec<Coord> = Vec::with_capacity(5);
        cells.push(here);
        grid.neighbors_into(here, &mut cells);
        rng.shuffle(&mut cells);

        let mut ranked: Vec<(u32, u8, f64, Coord)> = cells
            .into_iter()
            .map(|v| {
                let d = table.get(grid, v);
                let occupied = if self.occupied_now[self.cell(v)] == AgentId::INVALID {
                    0
                } else {
                    1
                };
                (d, occupied, rng.random::<f64>(), v)
            })
            .collect();
        ranked.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| a.2.total_cmp(&b.2))
        });

        Frame {
            agent,
            candidates: ranked.into_iter().map(|(_, _, _, v)| v).collect(),
            cursor: 0,
            committed: None,
        }
    }

    // ── Acting ────────────────────────────────────────────────────────────

    /// Apply the planned joint move: update positions and `elapsed`, hand
    /// over `occupied_now`, and release every `occupied_next` claim.
    ///
    /// Task transitions (pickup/delivery) belong to the simulator layer,
    /// which runs them right after this.
    pub fn advance(&mut self, agents: &mut AgentStore) {
        debug_assert_eq!(self.next_pos.len(), agents.count);
        for i in 0..agents.count {
            let id = AgentId(i as u32);
            let from = agents.pos[i];
            let to = self.next_pos[i];
            debug_assert_ne!(to, self.nil_coord, "agent {id} was never planned");

            let fi = self.cell(from);
            let ti = self.cell(to);

            // Guarded hand-over: an agent processed earlier in this loop
            // may already have moved onto `from`.
            if self.occupied_now[fi] == id {
                self.occupied_now[fi] = AgentId::INVALID;
            }
            self.occupied_next[ti] = AgentId::INVALID;
            self.occupied_now[ti] = id;

            agents.pos[i] = to;
            agents.elapsed[i] = if to == agents.goal[i] {
                0
            } else {
                agents.elapsed[i] + 1
            };
        }
    }
}
