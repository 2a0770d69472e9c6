//! Water leveling
//!
//! Water falls straight down until it lands on something solid, then spreads
//! sideways one fullness step shallower per cell. The fill is depth-first in
//! the order a recursive "fall, else right then left" walk would take, but
//! runs on an explicit stack with a visited set so it always terminates
//! within one placement per cell.

use std::collections::HashSet;

use super::grid::Grid;
use super::tile::TileKind;

/// A cell waiting to be filled. Its guard is re-checked when popped, because
/// siblings filled earlier may have reached it first.
#[derive(Debug, Clone, Copy)]
struct Pending {
    col: i32,
    row: i32,
    fullness: u8,
}

/// Pour water into `(col, row)` with the given fullness (0 falling .. 3 full)
/// and let it settle. Returns the filled cells in fill order.
///
/// A solid or out-of-range seed places nothing.
pub fn flow(grid: &mut Grid, col: i32, row: i32, fullness: u8) -> Vec<(i32, i32)> {
    let mut filled = Vec::new();
    if !grid.in_bounds(col, row) || grid.is_solid_at(col, row) {
        return filled;
    }

    let mut visited: HashSet<(i32, i32)> = HashSet::new();
    let mut stack = Vec::new();
    let mut next = Some(Pending { col, row, fullness });

    while let Some(cell) = next.take().or_else(|| stack.pop()) {
        // The seed may already be water; everything after it must not be
        if !filled.is_empty() && !accepts_water(grid, &visited, cell.col, cell.row) {
            continue;
        }

        grid.set(cell.col, cell.row, TileKind::water(cell.fullness));
        visited.insert((cell.col, cell.row));
        filled.push((cell.col, cell.row));

        let (c, r) = (cell.col, cell.row);
        if grid.in_bounds(c, r + 1) && !grid.is_solid_at(c, r + 1) {
            if grid.kind_at(c, r + 1).is_some_and(TileKind::is_water) {
                continue;
            }
            if let Some(fullness) = falling_fullness(grid, c, r) {
                next = Some(Pending {
                    col: c,
                    row: r + 1,
                    fullness,
                });
            }
        } else {
            let fullness = cell.fullness.saturating_sub(1).max(1);
            // Pushed left first so the right side is filled first
            for dc in [-1, 1] {
                stack.push(Pending {
                    col: c + dc,
                    row: r,
                    fullness,
                });
            }
        }
    }

    log::debug!(
        "water at ({col}, {row}) fullness {fullness}: filled {} cells",
        filled.len()
    );
    filled
}

/// Fullness for the cell below `(col, row)`, looking two rows down: still
/// falling over open space or off the bottom edge, full when landing on solid.
fn falling_fullness(grid: &Grid, col: i32, row: i32) -> Option<u8> {
    let two_below = row + 2;
    let height = grid.height() as i32;
    if two_below < height {
        Some(if grid.is_solid_at(col, two_below) { 3 } else { 0 })
    } else if two_below == height {
        Some(0)
    } else {
        None
    }
}

fn accepts_water(grid: &Grid, visited: &HashSet<(i32, i32)>, col: i32, row: i32) -> bool {
    !visited.contains(&(col, row))
        && grid
            .kind_at(col, row)
            .is_some_and(|kind| !kind.is_solid() && !kind.is_water())
}
