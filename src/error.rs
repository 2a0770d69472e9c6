//! Errors raised at the edges of the simulation (level and config loading).
//! Ticking itself never fails.

use thiserror::Error;

/// Problems found while turning level data into a grid
#[derive(Debug, Error)]
pub enum LevelError {
    /// The code grid has no rows or no columns.
    #[error("level has no cells")]
    Empty,
    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell holds a code outside the tile table.
    #[error("unknown tile code {code} at column {col}, row {row}")]
    UnknownCode { col: usize, row: usize, code: u8 },
    /// The player spawn cell lies outside the grid.
    #[error("player spawn ({col}, {row}) is outside the level")]
    SpawnOutOfBounds { col: u32, row: u32 },
    /// The tile size must be a positive, finite number.
    #[error("invalid tile size {0}")]
    InvalidTileSize(f32),
    /// The level document could not be decoded.
    #[error("malformed level document: {0}")]
    Json(#[from] serde_json::Error),
    /// The settings handed to the level are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Problems loading a [`crate::SimConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}
