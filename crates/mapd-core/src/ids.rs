//! Typed indices for the two arenas of a run.
//!
//! Agents and tasks are both addressed by dense `u32` indices into SoA
//! storage; wrapping them in distinct types keeps an agent index from ever
//! landing in a task slot (or vice versa) at zero runtime cost.
//!
//! Both carry an `INVALID` sentinel (`u32::MAX`): the occupancy boards
//! store `AgentId::INVALID` for an empty cell, and an agent's
//! carrying/targeting slots hold `TaskId::INVALID` when empty.  The
//! sentinel can never collide with a live index — stores are far below
//! `u32::MAX` entries, and `SimBuilder` sizes them up front.
//!
//! `Display` prints the bare number; call sites supply the noun
//! (`"agent {id}"`, `"task {id}"`).

use std::fmt;

// ── AgentId ───────────────────────────────────────────────────────────────────

/// Index of an agent in SoA storage and in the occupancy boards.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// The "no agent here" sentinel used by the occupancy boards.
    pub const INVALID: AgentId = AgentId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for AgentId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<AgentId, Self::Error> {
        u32::try_from(n).map(AgentId)
    }
}

// ── TaskId ────────────────────────────────────────────────────────────────────

/// Index of a task in the task arena.  Stable for the life of a run:
/// completed tasks are never removed from the arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskId(pub u32);

impl TaskId {
    /// The "no task attached" sentinel held in empty carrying/targeting
    /// slots.
    pub const INVALID: TaskId = TaskId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for TaskId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<TaskId, Self::Error> {
        u32::try_from(n).map(TaskId)
    }
}
