//! The task value type and its status enum.

use mapd_core::Coord;

// ── TaskStatus ────────────────────────────────────────────────────────────────

/// Lifecycle state of a task.  Transitions are strictly forward; the
/// variant order matches the lifecycle so `<` compares progress.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskStatus {
    /// Created but not yet visible to the assigner.
    #[default]
    NotRevealed,
    /// Visible; waiting for an agent to reach the pickup cell.
    Pending,
    /// Picked up; exactly one agent is carrying it to the delivery cell.
    Delivering,
    /// Dropped at the delivery cell.  Terminal.
    Completed,
}

impl TaskStatus {
    /// `true` once the task has been revealed to the assigner.
    #[inline]
    pub fn is_revealed(self) -> bool {
        self != TaskStatus::NotRevealed
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == TaskStatus::Completed
    }
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// One pickup/delivery job.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    /// Where the item sits (a storage cell in warehouse layouts).
    pub pickup: Coord,
    /// Where the item must go (an output cell in warehouse layouts).
    pub delivery: Coord,
    pub status: TaskStatus,
}

impl Task {
    /// A task awaiting reveal.
    pub fn new(pickup: Coord, delivery: Coord) -> Self {
        Task { pickup, delivery, status: TaskStatus::NotRevealed }
    }

    /// A task that is visible from the first tick.
    pub fn pending(pickup: Coord, delivery: Coord) -> Self {
        Task { pickup, delivery, status: TaskStatus::Pending }
    }
}
