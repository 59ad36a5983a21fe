//! Floor-plan generator for the demo.

use mapd_core::Coord;
use mapd_grid::{CellKind, Layout};

/// A floor-box warehouse: the whole interior is storage racking, output
/// bays sit on every other column of the top and bottom walls, and the
/// remaining border cells form the travel aisle.
pub fn floor_boxes(width: u32, height: u32) -> Layout {
    let mut layout = Layout::new(width, height);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            layout.set(Coord::new(x, y), CellKind::Storage);
        }
    }

    for x in (0..width).step_by(2) {
        layout.set(Coord::new(x, 0), CellKind::Output);
        layout.set(Coord::new(x, height - 1), CellKind::Output);
    }

    layout
}
