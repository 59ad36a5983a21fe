//! Immutable traversability grid.
//!
//! # Data layout
//!
//! Row-major `Vec<bool>`: cell `(x, y)` lives at index `y * width + x`,
//! `true` meaning an agent may stand there.  The grid is never mutated
//! after construction — distance tables borrow it freely across ticks.
//!
//! # Neighbor order
//!
//! [`Grid::neighbors`] enumerates left, right, up, down, filtered to free
//! cells.  The fixed order matters only for reproducibility; the planner
//! re-shuffles candidates anyway.

use mapd_core::Coord;

/// Immutable `W × H` traversability map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: u32,
    height: u32,
    /// Row-major; index = y * width + x.  `true` = free.
    cells: Vec<bool>,
}

impl Grid {
    /// Construct from raw row-major traversability flags.
    ///
    /// # Panics
    /// Panics in debug mode if `cells.len() != width * height`.
    pub fn new(width: u32, height: u32, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), (width * height) as usize);
        Grid { width, height, cells }
    }

    /// An obstacle-free grid of the given dimensions.
    pub fn open(width: u32, height: u32) -> Self {
        Grid::new(width, height, vec![true; (width * height) as usize])
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count.  Also serves as the "unreachable" distance
    /// sentinel: no simple path on the grid can be this long.
    #[inline]
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// The off-grid sentinel cell `(W, H)`, used by the planner to mean
    /// "no position assigned this tick".
    #[inline]
    pub fn nil_coord(&self) -> Coord {
        Coord::new(self.width, self.height)
    }

    // ── Cell queries ──────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x < self.width && c.y < self.height
    }

    /// `true` if `c` is in bounds and traversable.
    #[inline]
    pub fn is_free(&self, c: Coord) -> bool {
        self.in_bounds(c) && self.cells[(c.y * self.width + c.x) as usize]
    }

    /// Flat row-major index of an in-bounds cell.
    #[inline]
    pub fn cell_index(&self, c: Coord) -> usize {
        debug_assert!(self.in_bounds(c), "coordinate {c} out of bounds");
        (c.y * self.width + c.x) as usize
    }

    // ── Neighbor enumeration ──────────────────────────────────────────────

    /// Free 4-connected neighbors of `c` in fixed left/right/up/down order.
    ///
    /// No heap allocation; at most 4 items.
    #[inline]
    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        let candidates = [
            (c.x > 0).then(|| Coord::new(c.x - 1, c.y)),
            (c.x + 1 < self.width).then(|| Coord::new(c.x + 1, c.y)),
            (c.y > 0).then(|| Coord::new(c.x, c.y - 1)),
            (c.y + 1 < self.height).then(|| Coord::new(c.x, c.y + 1)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |&v| self.is_free(v))
    }

    /// Append the free neighbors of `c` to `out` (caller-owned buffer, not
    /// cleared).  Same order as [`neighbors`](Self::neighbors).
    #[inline]
    pub fn neighbors_into(&self, c: Coord, out: &mut Vec<Coord>) {
        out.extend(self.neighbors(c));
    }
}
