//! Fixed-size tile grid
//!
//! Storage is column-major (`col * height + row`) so that iterating the
//! backing vector walks columns outer, rows inner. Collision tie-breaking
//! depends on that order.

use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileKind};

/// Rectangular grid of tiles. Every in-range cell always holds exactly one tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tile_size: f32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create an all-Air grid
    pub fn new(width: usize, height: usize, tile_size: f32) -> Self {
        Self::from_fn(width, height, tile_size, |_, _| TileKind::Air)
    }

    /// Create a grid, asking `kind_at(col, row)` for every cell
    pub fn from_fn(
        width: usize,
        height: usize,
        tile_size: f32,
        mut kind_at: impl FnMut(i32, i32) -> TileKind,
    ) -> Self {
        let mut tiles = Vec::with_capacity(width * height);
        for col in 0..width as i32 {
            for row in 0..height as i32 {
                tiles.push(Tile::new(col, row, tile_size, kind_at(col, row)));
            }
        }
        Self {
            width,
            height,
            tile_size,
            tiles,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Width in world units
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    /// Height in world units
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    #[inline]
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height
    }

    #[inline]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        self.in_bounds(col, row).then(|| col as usize * self.height + row as usize)
    }

    /// Bounds-checked lookup
    pub fn get(&self, col: i32, row: i32) -> Option<&Tile> {
        self.index(col, row).map(|i| &self.tiles[i])
    }

    /// Kind at a cell, `None` outside the grid
    pub fn kind_at(&self, col: i32, row: i32) -> Option<TileKind> {
        self.get(col, row).map(|t| t.kind)
    }

    /// Out-of-range cells count as non-solid
    pub fn is_solid_at(&self, col: i32, row: i32) -> bool {
        self.kind_at(col, row).is_some_and(TileKind::is_solid)
    }

    /// Replace the tile at a cell with a fresh one of `kind`.
    /// Returns false (and does nothing) when out of range.
    pub fn set(&mut self, col: i32, row: i32, kind: TileKind) -> bool {
        match self.index(col, row) {
            Some(i) => {
                self.tiles[i] = Tile::new(col, row, self.tile_size, kind);
                true
            }
            None => false,
        }
    }

    /// All tiles, columns outer and rows inner
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Number of tiles matching a predicate
    pub fn count(&self, mut pred: impl FnMut(TileKind) -> bool) -> usize {
        self.tiles.iter().filter(|t| pred(t.kind)).count()
    }
}
