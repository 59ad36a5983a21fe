//! `TaskBoard` — the task arena with reveal cursor and status counters.
//!
//! # Why an arena
//!
//! Agents hold `TaskId`s in their `carrying`/`targeting` slots.  If tasks
//! were removed on completion those ids would dangle; keeping the arena
//! append-only makes every id stable and every status update an O(1)
//! indexed write.  Counters are maintained incrementally so per-tick
//! observability costs nothing.

use mapd_core::{Coord, TaskId};

use crate::{Task, TaskStatus};

// ── StatusCounts ──────────────────────────────────────────────────────────────

/// Per-status task totals at one instant.  Always sums to `board.len()`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusCounts {
    pub not_revealed: usize,
    pub pending: usize,
    pub delivering: usize,
    pub completed: usize,
}

impl StatusCounts {
    /// Tasks visible to the assigner or beyond (everything revealed).
    #[inline]
    pub fn revealed(&self) -> usize {
        self.pending + self.delivering + self.completed
    }

    fn slot(&mut self, status: TaskStatus) -> &mut usize {
        match status {
            TaskStatus::NotRevealed => &mut self.not_revealed,
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::Delivering => &mut self.delivering,
            TaskStatus::Completed => &mut self.completed,
        }
    }
}

// ── TaskBoard ─────────────────────────────────────────────────────────────────

/// Owns every task of a run.  `TaskId` = arena index, stable forever.
#[derive(Clone, Debug, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    /// Arena index at which the search for the next unrevealed task starts.
    /// Purely an optimisation: statuses never move backwards, so everything
    /// before the cursor stays revealed.
    reveal_cursor: usize,
    counts: StatusCounts,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut counts = StatusCounts::default();
        for t in &tasks {
            *counts.slot(t.status) += 1;
        }
        TaskBoard { tasks, reveal_cursor: 0, counts }
    }

    // ── Arena access ──────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a task mid-run (streaming task sources).  Returns its id.
    pub fn push(&mut self, task: Task) -> TaskId {
        let id = TaskId(self.tasks.len() as u32);
        *self.counts.slot(task.status) += 1;
        self.tasks.push(task);
        id
    }

    #[inline]
    pub fn get(&self, id: TaskId) -> &Task {
        &self.tasks[id.index()]
    }

    #[inline]
    pub fn status(&self, id: TaskId) -> TaskStatus {
        self.tasks[id.index()].status
    }

    #[inline]
    pub fn pickup(&self, id: TaskId) -> Coord {
        self.tasks[id.index()].pickup
    }

    #[inline]
    pub fn delivery(&self, id: TaskId) -> Coord {
        self.tasks[id.index()].delivery
    }

    /// Iterate `(id, task)` pairs in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (TaskId(i as u32), t))
    }

    /// Ids of all currently pending tasks, in arena order.
    pub fn pending_ids(&self) -> Vec<TaskId> {
        self.iter()
            .filter(|(_, t)| t.status == TaskStatus::Pending)
            .map(|(id, _)| id)
            .collect()
    }

    // ── Reveal ────────────────────────────────────────────────────────────

    /// Reveal the next unrevealed task (arena order).  Returns its id, or
    /// `None` when everything is already visible.
    pub fn reveal_next(&mut self) -> Option<TaskId> {
        while self.reveal_cursor < self.tasks.len() {
            let i = self.reveal_cursor;
            if self.tasks[i].status == TaskStatus::NotRevealed {
                self.transition(TaskId(i as u32), TaskStatus::NotRevealed, TaskStatus::Pending);
                return Some(TaskId(i as u32));
            }
            self.reveal_cursor += 1;
        }
        None
    }

    /// Reveal every remaining task at once (pure-MAPF style runs).
    pub fn reveal_all(&mut self) {
        while self.reveal_next().is_some() {}
    }

    // ── Lifecycle transitions ─────────────────────────────────────────────

    /// `Pending → Delivering`: an agent has the item in hand.
    pub fn start_delivery(&mut self, id: TaskId) {
        self.transition(id, TaskStatus::Pending, TaskStatus::Delivering);
    }

    /// `Delivering → Completed`: the item reached its output cell.
    pub fn complete(&mut self, id: TaskId) {
        self.transition(id, TaskStatus::Delivering, TaskStatus::Completed);
    }

    fn transition(&mut self, id: TaskId, from: TaskStatus, to: TaskStatus) {
        let task = &mut self.tasks[id.index()];
        debug_assert_eq!(
            task.status, from,
            "task {id}: illegal transition {:?} → {to:?}",
            task.status
        );
        if task.status == from {
            task.status = to;
            *self.counts.slot(from) -= 1;
            *self.counts.slot(to) += 1;
        }
    }

    // ── Observability ─────────────────────────────────────────────────────

    #[inline]
    pub fn counts(&self) -> StatusCounts {
        self.counts
    }

    /// `true` once every task in the arena is completed.  Vacuously true
    /// for an empty board.
    pub fn all_completed(&self) -> bool {
        self.counts.completed == self.tasks.len()
    }
}
