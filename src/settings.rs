//! Simulation tuning
//!
//! Everything that used to be a global constant in the game lives here and
//! is handed to the level explicitly.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Per-level simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Physics ===
    /// Gravity constant; bodies gain `gravity² · dt` downward speed per tick
    pub gravity: f32,
    /// How far below the bottom of the map the player may fall before dying
    pub fall_margin: f32,

    // === Player ===
    /// Horizontal speed, units/second
    pub walk_speed: f32,
    /// Upward speed given by a jump
    pub jump_power: f32,
    /// Walk speed multiplier while touching water
    pub water_speed_factor: f32,
    /// Hitbox inset as a fraction of the tile size (truncated to whole units)
    pub player_hitbox_inset: f32,

    // === Flowers ===
    /// Gas tiles released by a gas flower
    pub gas_flower_quota: i32,
    /// Fullness of the water released by a water flower
    pub water_flower_fullness: u8,

    // === Enemies ===
    /// Patrol speed, units/second
    pub enemy_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            fall_margin: FALL_MARGIN,

            walk_speed: WALK_SPEED,
            jump_power: JUMP_POWER,
            water_speed_factor: WATER_SPEED_FACTOR,
            player_hitbox_inset: PLAYER_HITBOX_INSET,

            gas_flower_quota: GAS_FLOWER_QUOTA,
            water_flower_fullness: WATER_FLOWER_FULLNESS,

            enemy_speed: ENEMY_SPEED,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.gravity,
            self.fall_margin,
            self.walk_speed,
            self.jump_power,
            self.water_speed_factor,
            self.player_hitbox_inset,
            self.enemy_speed,
        ];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::Invalid("values must be finite"));
        }
        if !(0.0..0.5).contains(&self.player_hitbox_inset) {
            return Err(ConfigError::Invalid("player_hitbox_inset must be in [0, 0.5)"));
        }
        if self.water_flower_fullness > 3 {
            return Err(ConfigError::Invalid("water_flower_fullness must be 0..=3"));
        }
        if self.walk_speed < 0.0 || self.jump_power < 0.0 || self.enemy_speed < 0.0 {
            return Err(ConfigError::Invalid("speeds must not be negative"));
        }
        Ok(())
    }
}
