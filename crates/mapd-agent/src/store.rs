//! Core agent storage.

use mapd_core::{AgentId, Coord, SimRng, TaskId};

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is
/// the index into all of them:
///
/// ```ignore
/// let here = store.pos[agent.index()];  // O(1), cache-friendly
/// ```
///
/// # Invariants
///
/// - At most one of `carrying[i]` / `targeting[i]` is a live id; the other
///   is `TaskId::INVALID`.  Use the setters — they clear the sibling slot.
/// - `goal[i]` follows the task slots: the delivery cell while carrying,
///   the pickup cell while targeting, `pos[i]` otherwise.  The assigner
///   and the simulator's act phase maintain this; the store only stores.
#[derive(Debug)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current cell.  Always traversable.
    pub pos: Vec<Coord>,

    /// Cell the planner steers toward this tick.
    pub goal: Vec<Coord>,

    /// Task being delivered, or `TaskId::INVALID`.
    pub carrying: Vec<TaskId>,

    /// Pending task this agent is walking to pick up, or `TaskId::INVALID`.
    pub targeting: Vec<TaskId>,

    /// Ticks since the agent last stood on its goal.  Raises priority so
    /// stuck agents eventually win conflicts.
    pub elapsed: Vec<u64>,

    /// Fixed random priority tie-breaker in `[0, 1)`, drawn once at init.
    pub tie_breaker: Vec<f64>,
}

impl AgentStore {
    /// Build a store with one agent per start cell.
    ///
    /// Goals start at the agent's own position ("idle"); tie-breakers are
    /// drawn from `rng` in agent-id order, so the store construction is
    /// part of the run's deterministic RNG schedule.
    pub fn new(starts: Vec<Coord>, rng: &mut SimRng) -> Self {
        let count = starts.len();
        let tie_breaker = (0..count).map(|_| rng.random::<f64>()).collect();
        AgentStore {
            count,
            goal: starts.clone(),
            pos: starts,
            carrying: vec![TaskId::INVALID; count],
            targeting: vec![TaskId::INVALID; count],
            elapsed: vec![0; count],
            tie_breaker,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    // ── Task-slot accessors ───────────────────────────────────────────────

    /// The task in delivery, if any.
    #[inline]
    pub fn carrying(&self, agent: AgentId) -> Option<TaskId> {
        let t = self.carrying[agent.index()];
        (t != TaskId::INVALID).then_some(t)
    }

    /// The pending task being walked to, if any.
    #[inline]
    pub fn targeting(&self, agent: AgentId) -> Option<TaskId> {
        let t = self.targeting[agent.index()];
        (t != TaskId::INVALID).then_some(t)
    }

    /// `true` if the agent has no task in either slot.
    #[inline]
    pub fn is_free(&self, agent: AgentId) -> bool {
        self.carrying[agent.index()] == TaskId::INVALID
            && self.targeting[agent.index()] == TaskId::INVALID
    }

    // ── Task-slot mutators (preserve the one-slot invariant) ──────────────

    /// Put `task` in the carrying slot, clearing any targeting.
    #[inline]
    pub fn set_carrying(&mut self, agent: AgentId, task: TaskId) {
        debug_assert_ne!(task, TaskId::INVALID);
        self.carrying[agent.index()] = task;
        self.targeting[agent.index()] = TaskId::INVALID;
    }

    /// Put `task` in the targeting slot.
    ///
    /// The agent must not be carrying — a carrier's goal is its delivery
    /// cell and re-targeting it would break the goal invariant.
    #[inline]
    pub fn set_targeting(&mut self, agent: AgentId, task: TaskId) {
        debug_assert_ne!(task, TaskId::INVALID);
        debug_assert_eq!(self.carrying[agent.index()], TaskId::INVALID);
        self.targeting[agent.index()] = task;
    }

    #[inline]
    pub fn clear_carrying(&mut self, agent: AgentId) {
        self.carrying[agent.index()] = TaskId::INVALID;
    }

    #[inline]
    pub fn clear_targeting(&mut self, agent: AgentId) {
        self.targeting[agent.index()] = TaskId::INVALID;
    }
}
