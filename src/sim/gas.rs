//! Gas cloud spreading
//!
//! A breadth-first fill from a seed cell that only ever steps sideways or
//! diagonally (never straight up or down), limited by a tile quota.

use std::collections::VecDeque;

use super::grid::Grid;
use super::tile::TileKind;

/// Row offsets tried for each popped cell, in order
const ROW_STEPS: [i32; 3] = [-1, 0, 1];
/// Column offsets tried per row offset, in order
const COL_STEPS: [i32; 2] = [-1, 1];

/// Place up to `quota` gas tiles starting at `(col, row)`.
///
/// The seed is always gassed and counts against the quota. Returns the number
/// of tiles placed, seed included (0 only when the seed is off the grid).
pub fn diffuse(grid: &mut Grid, col: i32, row: i32, quota: i32) -> usize {
    if !grid.set(col, row, TileKind::gas(0)) {
        return 0;
    }
    let mut placed = 1;
    let mut remaining = quota - 1;

    let mut queue = VecDeque::from([(col, row)]);
    while remaining > 0 {
        let Some((c, r)) = queue.pop_front() else {
            break;
        };
        for k in ROW_STEPS {
            for i in COL_STEPS {
                let (nc, nr) = (c + i, r + k);
                if remaining <= 0 || !accepts_gas(grid, nc, nr) {
                    continue;
                }
                grid.set(nc, nr, TileKind::gas(0));
                queue.push_back((nc, nr));
                placed += 1;
                remaining -= 1;
            }
        }
    }

    log::debug!("gas at ({col}, {row}): placed {placed} of quota {quota}");
    placed
}

/// In range, not solid, not already gas, not the goal flag
fn accepts_gas(grid: &Grid, col: i32, row: i32) -> bool {
    grid.kind_at(col, row)
        .is_some_and(|kind| !kind.is_solid() && !kind.is_gas() && !kind.is_flag())
}

/// Recompute every gas tile's intensity from how many of its eight neighbors
/// are gas: all eight gives 2, more than five gives 1, otherwise 0.
pub fn refresh_intensity(grid: &mut Grid) {
    let updates: Vec<(i32, i32, u8)> = grid
        .iter()
        .filter_map(|tile| match tile.kind {
            TileKind::Gas { intensity } => {
                let wanted = intensity_for(gas_neighbors(grid, tile.col, tile.row));
                (wanted != intensity).then_some((tile.col, tile.row, wanted))
            }
            _ => None,
        })
        .collect();

    for (col, row, intensity) in updates {
        grid.set(col, row, TileKind::gas(intensity));
    }
}

fn gas_neighbors(grid: &Grid, col: i32, row: i32) -> usize {
    let mut count = 0;
    for dc in -1..=1 {
        for dr in -1..=1 {
            if (dc, dr) == (0, 0) {
                continue;
            }
            if grid.kind_at(col + dc, row + dr).is_some_and(TileKind::is_gas) {
                count += 1;
            }
        }
    }
    count
}

fn intensity_for(neighbors: usize) -> u8 {
    match neighbors {
        8 => 2,
        6 | 7 => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tile::SolidStyle;

    fn gas_cells(grid: &Grid) -> Vec<(i32, i32)> {
        grid.iter()
            .filter(|t| t.kind.is_gas())
            .map(|t| (t.col, t.row))
            .collect()
    }

    #[test]
    fn test_quota_one_places_only_seed() {
        let mut grid = Grid::new(5, 5, 1.0);
        assert_eq!(diffuse(&mut grid, 2, 2, 1), 1);
        assert_eq!(gas_cells(&grid), vec![(2, 2)]);
    }

    #[test]
    fn test_non_positive_quota_still_places_seed() {
        let mut grid = Grid::new(3, 3, 1.0);
        assert_eq!(diffuse(&mut grid, 1, 1, 0), 1);
        assert_eq!(diffuse(&mut grid, 0, 0, -4), 1);
        assert_eq!(grid.count(TileKind::is_gas), 2);
    }

    #[test]
    fn test_never_steps_straight_up_or_down() {
        // One column wide: no lateral or diagonal neighbor ever exists
        let mut grid = Grid::new(1, 6, 1.0);
        assert_eq!(diffuse(&mut grid, 0, 3, 20), 1);
    }

    #[test]
    fn test_first_ring_order() {
        let mut grid = Grid::new(5, 5, 1.0);
        // quota 3: seed, then (col-1,row-1), then (col+1,row-1)
        diffuse(&mut grid, 2, 2, 3);
        assert_eq!(gas_cells(&grid), vec![(1, 1), (2, 2), (3, 1)]);
    }

    #[test]
    fn test_blocked_by_solid_and_flag() {
        let mut grid = Grid::new(3, 1, 1.0);
        grid.set(0, 0, TileKind::Solid(SolidStyle::Plain));
        grid.set(2, 0, TileKind::Flag);
        assert_eq!(diffuse(&mut grid, 1, 0, 20), 1);
        assert_eq!(grid.kind_at(2, 0), Some(TileKind::Flag));
    }

    #[test]
    fn test_fills_reachable_area_then_stops() {
        // Every step moves one column and at most one row, so with two or
        // more columns the whole open grid is reachable
        let mut grid = Grid::new(4, 4, 1.0);
        let placed = diffuse(&mut grid, 0, 0, 100);
        assert_eq!(placed, 16);
        assert_eq!(grid.count(TileKind::is_gas), 16);
    }

    #[test]
    fn test_refresh_intensity() {
        let mut grid = Grid::from_fn(3, 3, 1.0, |_, _| TileKind::gas(0));
        refresh_intensity(&mut grid);
        assert_eq!(grid.kind_at(1, 1), Some(TileKind::gas(2)));
        // Corners see three neighbors
        assert_eq!(grid.kind_at(0, 0), Some(TileKind::gas(0)));

        grid.set(0, 0, TileKind::Air);
        refresh_intensity(&mut grid);
        assert_eq!(grid.kind_at(1, 1), Some(TileKind::gas(1)));
    }
}
