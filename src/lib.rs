//! Bloomfall - tile-grid platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, gas, water, level state, tick)
//! - `settings`: Tuning values handed to each level
//! - `error`: Level and config loading errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, LevelError};
pub use settings::SimConfig;

/// Simulation constants (defaults for `SimConfig`)
pub mod consts {
    /// Fixed timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default world units per tile
    pub const DEFAULT_TILE_SIZE: f32 = 32.0;

    /// Gravity constant (applied squared, see `sim::collision::resolve`)
    pub const GRAVITY: f32 = 70.0;
    /// Fall distance below the map that counts as death
    pub const FALL_MARGIN: f32 = 100.0;

    /// Player defaults
    pub const WALK_SPEED: f32 = 400.0;
    pub const JUMP_POWER: f32 = 1350.0;
    pub const WATER_SPEED_FACTOR: f32 = 1.75;
    pub const PLAYER_HITBOX_INSET: f32 = 0.1;

    /// Flower payloads
    pub const GAS_FLOWER_QUOTA: i32 = 20;
    pub const WATER_FLOWER_FULLNESS: u8 = 3;

    /// Enemy patrol speed
    pub const ENEMY_SPEED: f32 = 120.0;
}
