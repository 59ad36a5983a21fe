//! Unit tests for mapd-grid.

use std::collections::VecDeque;

use mapd_core::{Coord, SimRng};

use crate::{CellKind, DistTable, DistTableCache, Grid, GridError, Layout};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(x: u32, y: u32) -> Coord {
    Coord::new(x, y)
}

/// Build a grid from ASCII art rows: `.` free, `#` blocked.
fn grid_from_art(rows: &[&str]) -> Grid {
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    let cells = rows
        .iter()
        .flat_map(|r| r.chars().map(|ch| ch != '#'))
        .collect();
    Grid::new(width, height, cells)
}

/// Plain full BFS used as the reference implementation for DistTable.
fn reference_bfs(grid: &Grid, goal: Coord) -> Vec<u32> {
    let sentinel = grid.area();
    let mut dist = vec![sentinel; grid.area() as usize];
    if !grid.is_free(goal) {
        return dist;
    }
    dist[grid.cell_index(goal)] = 0;
    let mut queue = VecDeque::from([goal]);
    while let Some(u) = queue.pop_front() {
        let du = dist[grid.cell_index(u)];
        for v in grid.neighbors(u) {
            let vi = grid.cell_index(v);
            if dist[vi] == sentinel {
                dist[vi] = du + 1;
                queue.push_back(v);
            }
        }
    }
    dist
}

/// Random grid with obstacle probability `p`; the returned grid may be
/// disconnected, which is part of what the tests exercise.
fn random_grid(rng: &mut SimRng, width: u32, height: u32, p: f64) -> Grid {
    let cells = (0..width * height).map(|_| !rng.gen_bool(p)).collect();
    Grid::new(width, height, cells)
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid_tests {
    use super::*;

    #[test]
    fn neighbor_order_is_left_right_up_down() {
        let grid = Grid::open(3, 3);
        let n: Vec<Coord> = grid.neighbors(c(1, 1)).collect();
        assert_eq!(n, vec![c(0, 1), c(2, 1), c(1, 0), c(1, 2)]);
    }

    #[test]
    fn neighbors_clip_at_borders() {
        let grid = Grid::open(3, 3);
        let n: Vec<Coord> = grid.neighbors(c(0, 0)).collect();
        assert_eq!(n, vec![c(1, 0), c(0, 1)]);
        let n: Vec<Coord> = grid.neighbors(c(2, 2)).collect();
        assert_eq!(n, vec![c(1, 2), c(2, 1)]);
    }

    #[test]
    fn neighbors_skip_blocked_cells() {
        let grid = grid_from_art(&[
            ".#.", //
            "...", //
            ".#.",
        ]);
        let n: Vec<Coord> = grid.neighbors(c(1, 1)).collect();
        assert_eq!(n, vec![c(0, 1), c(2, 1)]);
    }

    #[test]
    fn neighbors_into_appends() {
        let grid = Grid::open(2, 2);
        let mut buf = vec![c(9, 9)];
        grid.neighbors_into(c(0, 0), &mut buf);
        assert_eq!(buf, vec![c(9, 9), c(1, 0), c(0, 1)]);
    }

    #[test]
    fn bounds_and_freedom() {
        let grid = grid_from_art(&[".#"]);
        assert!(grid.is_free(c(0, 0)));
        assert!(!grid.is_free(c(1, 0)));
        assert!(!grid.is_free(c(2, 0))); // out of bounds
        assert!(!grid.in_bounds(c(0, 1)));
    }

    #[test]
    fn nil_coord_is_off_grid() {
        let grid = Grid::open(4, 6);
        let nil = grid.nil_coord();
        assert_eq!(nil, c(4, 6));
        assert!(!grid.in_bounds(nil));
    }
}

// ── Layout & text format ──────────────────────────────────────────────────────

#[cfg(test)]
mod layout_tests {
    use super::*;

    #[test]
    fn kinds_map_to_traversability() {
        assert!(CellKind::Empty.is_traversable());
        assert!(CellKind::Storage.is_traversable());
        assert!(CellKind::Output.is_traversable());
        assert!(!CellKind::Obstacle.is_traversable());
    }

    #[test]
    fn parse_and_round_trip() {
        let text = "3 2\n013\n220\n";
        let layout = Layout::parse(text).unwrap();
        assert_eq!(layout.width(), 3);
        assert_eq!(layout.height(), 2);
        assert_eq!(layout.get(c(1, 0)), CellKind::Storage);
        assert_eq!(layout.get(c(2, 0)), CellKind::Output);
        assert_eq!(layout.get(c(0, 1)), CellKind::Obstacle);
        assert_eq!(layout.to_text(), text);
        assert_eq!(Layout::parse(&layout.to_text()).unwrap(), layout);
    }

    #[test]
    fn storage_and_output_enumeration_row_major() {
        let layout = Layout::parse("3 2\n113\n003\n").unwrap();
        assert_eq!(layout.storage_cells(), vec![c(0, 0), c(1, 0)]);
        assert_eq!(layout.output_cells(), vec![c(2, 0), c(2, 1)]);
    }

    #[test]
    fn bad_header_rejected() {
        assert!(matches!(Layout::parse(""), Err(GridError::InvalidHeader(_))));
        assert!(matches!(Layout::parse("3\n000\n"), Err(GridError::InvalidHeader(_))));
        assert!(matches!(Layout::parse("x y\n"), Err(GridError::InvalidHeader(_))));
        assert!(matches!(Layout::parse("0 3\n"), Err(GridError::EmptyLayout)));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Layout::parse("3 2\n00\n000\n").unwrap_err();
        assert!(matches!(err, GridError::RowWidthMismatch { row: 0, expected: 3, got: 2 }));
    }

    #[test]
    fn missing_rows_rejected() {
        let err = Layout::parse("3 2\n000\n").unwrap_err();
        assert!(matches!(err, GridError::RowCountMismatch { expected: 2, got: 1 }));
    }

    #[test]
    fn extra_rows_rejected() {
        let err = Layout::parse("3 1\n000\n000\n").unwrap_err();
        assert!(matches!(err, GridError::RowCountMismatch { .. }));
    }

    #[test]
    fn bad_cell_code_rejected() {
        let err = Layout::parse("3 1\n047\n").unwrap_err();
        assert!(matches!(err, GridError::BadCellCode { row: 0, col: 1, code: '4' }));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floor.layout");
        let layout = Layout::parse("4 3\n0123\n0000\n3210\n").unwrap();
        crate::io::write_layout_file(&path, &layout).unwrap();
        let back = crate::io::read_layout_file(&path).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn grid_derivation_blocks_only_obstacles() {
        let layout = Layout::parse("4 1\n0123\n").unwrap();
        let grid = layout.to_grid();
        assert!(grid.is_free(c(0, 0)));
        assert!(grid.is_free(c(1, 0)));
        assert!(!grid.is_free(c(2, 0)));
        assert!(grid.is_free(c(3, 0)));
    }
}

// ── DistTable ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dist_tests {
    use super::*;

    #[test]
    fn matches_reference_bfs_on_open_grid() {
        let grid = Grid::open(6, 4);
        let goal = c(2, 1);
        let reference = reference_bfs(&grid, goal);
        let mut table = DistTable::new(&grid, goal);
        for y in 0..4 {
            for x in 0..6 {
                let t = c(x, y);
                assert_eq!(table.get(&grid, t), reference[grid.cell_index(t)], "at {t}");
            }
        }
    }

    #[test]
    fn matches_reference_bfs_on_random_grids() {
        let mut rng = SimRng::new(2024);
        for trial in 0..20 {
            let grid = random_grid(&mut rng, 12, 9, 0.3);
            let free: Vec<Coord> = (0..9)
                .flat_map(|y| (0..12).map(move |x| c(x, y)))
                .filter(|&v| grid.is_free(v))
                .collect();
            if free.is_empty() {
                continue;
            }
            let goal = *rng.choose(&free).unwrap();
            let reference = reference_bfs(&grid, goal);

            // Query in shuffled order to stress the resume logic.
            let mut targets = free.clone();
            rng.shuffle(&mut targets);
            let mut table = DistTable::new(&grid, goal);
            for &t in &targets {
                assert_eq!(
                    table.get(&grid, t),
                    reference[grid.cell_index(t)],
                    "trial {trial}, goal {goal}, target {t}"
                );
            }
        }
    }

    #[test]
    fn repeated_queries_are_idempotent() {
        let grid = grid_from_art(&[
            "....", //
            ".##.", //
            "....",
        ]);
        let mut table = DistTable::new(&grid, c(0, 0));
        let first = table.get(&grid, c(3, 2));
        for _ in 0..5 {
            assert_eq!(table.get(&grid, c(3, 2)), first);
        }
        assert_eq!(first, 5);
    }

    #[test]
    fn blocked_goal_answers_unreachable_everywhere() {
        let grid = grid_from_art(&[".#."]);
        let mut table = DistTable::new(&grid, c(1, 0));
        assert_eq!(table.get(&grid, c(0, 0)), grid.area());
        assert_eq!(table.get(&grid, c(2, 0)), grid.area());
        assert_eq!(table.known_cells(), 0);
    }

    #[test]
    fn separated_component_is_unreachable() {
        let grid = grid_from_art(&[
            "..#..", //
            "..#..",
        ]);
        let mut table = DistTable::new(&grid, c(0, 0));
        assert_eq!(table.get(&grid, c(4, 0)), grid.area());
        assert_eq!(table.get(&grid, c(1, 1)), 2);
    }

    #[test]
    fn out_of_bounds_target_is_unreachable() {
        let grid = Grid::open(3, 3);
        let mut table = DistTable::new(&grid, c(0, 0));
        assert_eq!(table.get(&grid, c(7, 7)), grid.area());
    }

    #[test]
    fn near_goal_queries_leave_far_cells_unsettled() {
        // Corner goal on a 100x100 floor: resolving everything within
        // radius 10 must settle only a sliver of the table.
        let grid = Grid::open(100, 100);
        let goal = c(0, 0);
        let mut table = DistTable::new(&grid, goal);
        for y in 0..100 {
            for x in 0..100 {
                let t = c(x, y);
                if goal.manhattan(t) <= 10 {
                    assert_eq!(table.get(&grid, t), goal.manhattan(t));
                }
            }
        }
        let settled = table.known_cells();
        let total = grid.area() as usize;
        assert!(
            settled * 10 < total,
            "expected > 90% unsettled, got {settled}/{total} settled"
        );
    }
}

// ── DistTableCache ────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache_tests {
    use super::*;

    #[test]
    fn tables_are_reused() {
        let grid = Grid::open(5, 5);
        let mut cache = DistTableCache::new(4);
        cache.distance(&grid, c(0, 0), c(4, 4));
        cache.distance(&grid, c(0, 0), c(2, 2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distances_via_cache_are_correct() {
        let grid = grid_from_art(&[
            ".....", //
            "####.", //
            ".....",
        ]);
        let mut cache = DistTableCache::new(4);
        assert_eq!(cache.distance(&grid, c(0, 2), c(0, 0)), 10);
        assert_eq!(cache.distance(&grid, c(0, 0), c(0, 2)), 10);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn lru_eviction_drops_least_recent_goal() {
        let grid = Grid::open(4, 4);
        let mut cache = DistTableCache::new(2);
        cache.distance(&grid, c(0, 0), c(3, 3));
        cache.distance(&grid, c(1, 1), c(3, 3));
        // Touch (0,0) so (1,1) becomes the LRU entry.
        cache.distance(&grid, c(0, 0), c(1, 0));
        cache.distance(&grid, c(2, 2), c(3, 3));
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(c(0, 0)));
        assert!(!cache.contains(c(1, 1)));
        assert!(cache.contains(c(2, 2)));
    }

    #[test]
    fn rebuilt_table_gives_same_answers() {
        let grid = grid_from_art(&[
            "...#.", //
            ".#.#.", //
            ".#...",
        ]);
        let mut cache = DistTableCache::new(1);
        let before = cache.distance(&grid, c(0, 0), c(4, 2));
        // Force eviction, then rebuild.
        cache.distance(&grid, c(4, 0), c(0, 0));
        let after = cache.distance(&grid, c(0, 0), c(4, 2));
        assert_eq!(before, after);
    }

    #[test]
    fn capacity_clamped_to_one() {
        let cache = DistTableCache::new(0);
        assert_eq!(cache.capacity(), 1);
    }
}
