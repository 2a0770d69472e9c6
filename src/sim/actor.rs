//! Actors: a kinematic body plus whatever steers it
//!
//! The player and enemies share the same body and the same collision
//! resolution. They differ only in their [`Drive`]: the player responds to
//! input, enemies follow a script.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Direction, Hitbox, KinematicBody};
use super::collision::{resolve, touching_kind};
use super::grid::Grid;
use super::tick::TickInput;
use super::tile::TileKind;
use crate::SimConfig;

/// Input-driven control state (the player)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputControl {
    /// Airborne; a new jump can't start until the body lands
    pub jumping: bool,
    /// Where the player was frozen by holding `down`
    pub frozen_at: Option<Vec2>,
    /// Hazards are ignored while frozen
    pub invincible: bool,
    /// Hitbox overlaps gas this tick (renderer draws at half opacity)
    pub in_gas: bool,
}

/// Scripted back-and-forth walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    /// -1.0 walking left, 1.0 walking right
    pub direction: f32,
}

impl Default for Patrol {
    fn default() -> Self {
        Self { direction: 1.0 }
    }
}

/// What steers an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Drive {
    Input(InputControl),
    Scripted(Patrol),
}

/// A body with a drive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub body: KinematicBody,
    pub drive: Drive,
}

impl Actor {
    /// One-tile player with a hitbox inset from the top-left corner
    pub fn player(pos: Vec2, tile_size: f32, config: &SimConfig) -> Self {
        let inset = (tile_size * config.player_hitbox_inset).trunc();
        let size = Vec2::splat(tile_size);
        let hitbox = Hitbox::new(Vec2::splat(inset), size - inset);
        Self {
            body: KinematicBody::new(pos, size, hitbox),
            drive: Drive::Input(InputControl::default()),
        }
    }

    /// One-tile patrolling enemy
    pub fn enemy(pos: Vec2, tile_size: f32) -> Self {
        let size = Vec2::splat(tile_size);
        Self {
            body: KinematicBody::new(pos, size, Hitbox::full(size)),
            drive: Drive::Scripted(Patrol::default()),
        }
    }

    pub fn is_invincible(&self) -> bool {
        matches!(&self.drive, Drive::Input(control) if control.invincible)
    }

    pub fn in_gas(&self) -> bool {
        matches!(&self.drive, Drive::Input(control) if control.in_gas)
    }

    /// Steer, then resolve against the grid
    pub fn update(&mut self, input: &TickInput, grid: &Grid, config: &SimConfig, dt: f32) {
        match &mut self.drive {
            Drive::Input(control) => steer_input(control, &mut self.body, input, grid, config, dt),
            Drive::Scripted(patrol) => steer_patrol(patrol, &mut self.body, grid, config, dt),
        }
    }
}

fn steer_input(
    control: &mut InputControl,
    body: &mut KinematicBody,
    input: &TickInput,
    grid: &Grid,
    config: &SimConfig,
    dt: f32,
) {
    // Holding down freezes the player in place as a shield
    if input.down {
        let frozen = *control.frozen_at.get_or_insert(body.pos);
        control.invincible = true;
        body.pos = frozen;
        body.vel = Vec2::ZERO;
        return;
    }
    control.frozen_at = None;
    control.invincible = false;

    let hitbox = body.hitbox_rect();
    let mut speed = config.walk_speed;
    if touching_kind(hitbox, grid, TileKind::is_water) {
        speed *= config.water_speed_factor;
    }

    body.vel.x = 0.0;
    if input.left {
        body.vel.x = -speed;
    }
    if input.right {
        body.vel.x = speed;
    }
    if input.jump && !control.jumping {
        body.vel.y = -config.jump_power;
        control.jumping = true;
    }

    control.in_gas = touching_kind(hitbox, grid, TileKind::is_gas);

    resolve(body, grid, config.gravity, dt);

    control.jumping = body.collision.get(Direction::Bottom).is_none();
}

fn steer_patrol(
    patrol: &mut Patrol,
    body: &mut KinematicBody,
    grid: &Grid,
    config: &SimConfig,
    dt: f32,
) {
    body.vel.x = patrol.direction * config.enemy_speed;

    resolve(body, grid, config.gravity, dt);

    if body.collision.get(Direction::Left).is_some() {
        patrol.direction = 1.0;
    } else if body.collision.get(Direction::Right).is_some() {
        patrol.direction = -1.0;
    }
}
