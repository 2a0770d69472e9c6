//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Stable iteration order (grid columns outer, rows inner)
//! - No rendering, input devices or asset loading

pub mod actor;
pub mod body;
pub mod collision;
pub mod gas;
pub mod grid;
pub mod levelgen;
pub mod rect;
pub mod state;
pub mod tick;
pub mod tile;
pub mod water;

pub use actor::{Actor, Drive, InputControl, Patrol};
pub use body::{ContactMatrix, Direction, Hitbox, KinematicBody};
pub use collision::{resolve, scan_closest, touching_kind, update_contact_matrices};
pub use grid::Grid;
pub use rect::Rect;
pub use state::{DeathCause, Flower, Level, LevelData, LevelEvent, LevelPhase, LevelSnapshot};
pub use tick::{TickInput, tick};
pub use tile::{CodeEntry, FlowerKind, SolidStyle, SpikeOrientation, Tile, TileKind};
