//! Unit tests for mapd-task.

use mapd_core::{Coord, TaskId};

use crate::{Task, TaskBoard, TaskStatus};

fn c(x: u32, y: u32) -> Coord {
    Coord::new(x, y)
}

fn three_hidden_tasks() -> TaskBoard {
    TaskBoard::new(vec![
        Task::new(c(0, 0), c(5, 0)),
        Task::new(c(1, 0), c(5, 1)),
        Task::new(c(2, 0), c(5, 2)),
    ])
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn status_order_matches_lifecycle() {
        assert!(TaskStatus::NotRevealed < TaskStatus::Pending);
        assert!(TaskStatus::Pending < TaskStatus::Delivering);
        assert!(TaskStatus::Delivering < TaskStatus::Completed);
    }

    #[test]
    fn full_forward_walk() {
        let mut board = TaskBoard::new(vec![Task::new(c(0, 0), c(1, 1))]);
        let id = TaskId(0);
        assert_eq!(board.status(id), TaskStatus::NotRevealed);

        assert_eq!(board.reveal_next(), Some(id));
        assert_eq!(board.status(id), TaskStatus::Pending);

        board.start_delivery(id);
        assert_eq!(board.status(id), TaskStatus::Delivering);

        board.complete(id);
        assert_eq!(board.status(id), TaskStatus::Completed);
        assert!(board.all_completed());
    }

    #[test]
    fn statuses_never_move_backwards() {
        // Drive one task through its whole life while recording each status;
        // the recorded sequence must be non-decreasing.
        let mut board = three_hidden_tasks();
        let id = TaskId(1);
        let mut seen = vec![board.status(id)];

        board.reveal_next();
        board.reveal_next();
        seen.push(board.status(id));
        board.start_delivery(id);
        seen.push(board.status(id));
        board.complete(id);
        seen.push(board.status(id));

        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{seen:?}");
        assert_eq!(*seen.last().unwrap(), TaskStatus::Completed);
    }

    #[test]
    fn pending_constructor_skips_reveal() {
        let mut board = TaskBoard::new(vec![Task::pending(c(0, 0), c(1, 0))]);
        assert_eq!(board.counts().pending, 1);
        assert_eq!(board.reveal_next(), None);
    }
}

// ── Reveal cursor ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod reveal_tests {
    use super::*;

    #[test]
    fn reveals_in_arena_order() {
        let mut board = three_hidden_tasks();
        assert_eq!(board.reveal_next(), Some(TaskId(0)));
        assert_eq!(board.reveal_next(), Some(TaskId(1)));
        assert_eq!(board.reveal_next(), Some(TaskId(2)));
        assert_eq!(board.reveal_next(), None);
    }

    #[test]
    fn reveal_skips_already_visible_tasks() {
        let mut board = TaskBoard::new(vec![
            Task::pending(c(0, 0), c(1, 0)),
            Task::new(c(2, 0), c(3, 0)),
        ]);
        assert_eq!(board.reveal_next(), Some(TaskId(1)));
        assert_eq!(board.reveal_next(), None);
    }

    #[test]
    fn reveal_all_drains_everything() {
        let mut board = three_hidden_tasks();
        board.reveal_all();
        assert_eq!(board.counts().pending, 3);
        assert_eq!(board.counts().not_revealed, 0);
    }

    #[test]
    fn pushed_task_becomes_revealable() {
        let mut board = TaskBoard::new(vec![]);
        assert_eq!(board.reveal_next(), None);
        let id = board.push(Task::new(c(1, 1), c(2, 2)));
        assert_eq!(board.reveal_next(), Some(id));
    }
}

// ── Counters & queries ────────────────────────────────────────────────────────

#[cfg(test)]
mod counter_tests {
    use super::*;

    #[test]
    fn counts_track_transitions() {
        let mut board = three_hidden_tasks();
        assert_eq!(board.counts().not_revealed, 3);

        board.reveal_next();
        board.reveal_next();
        let counts = board.counts();
        assert_eq!((counts.not_revealed, counts.pending), (1, 2));
        assert_eq!(counts.revealed(), 2);

        board.start_delivery(TaskId(0));
        board.complete(TaskId(0));
        let counts = board.counts();
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.completed, 1);
        assert_eq!(
            counts.not_revealed + counts.pending + counts.delivering + counts.completed,
            board.len()
        );
    }

    #[test]
    fn pending_ids_in_arena_order() {
        let mut board = three_hidden_tasks();
        board.reveal_all();
        board.start_delivery(TaskId(1));
        assert_eq!(board.pending_ids(), vec![TaskId(0), TaskId(2)]);
    }

    #[test]
    fn empty_board_is_vacuously_complete() {
        let board = TaskBoard::new(vec![]);
        assert!(board.all_completed());
    }

    #[test]
    fn coordinates_accessible_by_id() {
        let board = three_hidden_tasks();
        assert_eq!(board.pickup(TaskId(2)), c(2, 0));
        assert_eq!(board.delivery(TaskId(2)), c(5, 2));
    }
}
