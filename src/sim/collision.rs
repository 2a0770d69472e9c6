//! Kinematic body vs. tile grid collision
//!
//! Each tick a body looks for the nearest solid tile in each of the four
//! directions (using where its hitbox was last tick), checks which of those
//! it would actually reach with this tick's movement, and snaps onto the
//! ones it does. The scan is a plain full-grid walk; grids are small.

use glam::Vec2;

use super::body::{ContactMatrix, Direction, KinematicBody};
use super::grid::Grid;
use super::rect::Rect;
use super::tile::{Tile, TileKind};

/// Nearest-candidate tracker for one direction
#[derive(Debug, Clone, Copy)]
struct Nearest {
    tile: Option<Tile>,
    distance: f32,
}

impl Nearest {
    const NONE: Self = Self {
        tile: None,
        distance: f32::MAX,
    };

    /// Strictly smaller wins, so ties keep the first tile in scan order
    #[inline]
    fn offer(&mut self, tile: &Tile, distance: f32) {
        if distance < self.distance {
            self.tile = Some(*tile);
            self.distance = distance;
        }
    }
}

/// Find the nearest solid tile on each side of `hitbox`.
///
/// Tiles are visited columns outer, rows inner. A tile is a Bottom candidate
/// when it overlaps the hitbox horizontally and its top edge is at or below the
/// hitbox's bottom edge; the other three directions are symmetric.
pub fn scan_closest(hitbox: Rect, grid: &Grid) -> ContactMatrix {
    let mut bot = Nearest::NONE;
    let mut top = Nearest::NONE;
    let mut lef = Nearest::NONE;
    let mut rig = Nearest::NONE;

    for tile in grid.iter() {
        if !tile.is_solid() {
            continue;
        }
        let Some(obstacle) = tile.hitbox else {
            continue;
        };

        if hitbox.overlaps_x(&obstacle) {
            if hitbox.bottom() <= obstacle.top() {
                bot.offer(tile, obstacle.top() - hitbox.bottom());
            }
            if hitbox.top() >= obstacle.bottom() {
                top.offer(tile, hitbox.top() - obstacle.bottom());
            }
        }
        if hitbox.overlaps_y(&obstacle) {
            if hitbox.right() <= obstacle.left() {
                rig.offer(tile, obstacle.left() - hitbox.right());
            }
            if hitbox.left() >= obstacle.right() {
                lef.offer(tile, hitbox.left() - obstacle.right());
            }
        }
    }

    let mut closest = ContactMatrix::default();
    closest.set(Direction::Bottom, bot.tile);
    closest.set(Direction::Top, top.tile);
    closest.set(Direction::Left, lef.tile);
    closest.set(Direction::Right, rig.tile);
    closest
}

/// Keep only the candidates the body would reach at `new_pos`
pub fn confirm_contacts(
    body: &KinematicBody,
    closest: &ContactMatrix,
    new_pos: Vec2,
) -> ContactMatrix {
    let offset = body.hitbox.offset;
    let size = body.hitbox.size;
    let mut contacts = ContactMatrix::default();

    for (dir, tile) in closest.iter() {
        let Some(obstacle) = tile.hitbox else {
            continue;
        };
        let reached = match dir {
            Direction::Bottom => new_pos.y + offset.y + size.y > obstacle.top(),
            Direction::Top => new_pos.y + offset.y < obstacle.bottom(),
            Direction::Left => new_pos.x + offset.x < obstacle.right(),
            Direction::Right => new_pos.x + offset.x + size.x > obstacle.left(),
        };
        if reached {
            contacts.set(dir, Some(*tile));
        }
    }
    contacts
}

/// Recompute both contact matrices for the body's current movement.
///
/// Pure with respect to position and velocity: calling it twice without
/// changing the body or grid gives the same matrices.
pub fn update_contact_matrices(body: &mut KinematicBody, grid: &Grid, dt: f32) {
    let new_pos = body.pos + body.vel * dt;
    let closest = scan_closest(body.hitbox_rect(), grid);
    let collision = confirm_contacts(body, &closest, new_pos);

    if collision != body.collision {
        log::trace!(
            "contacts at ({:.1}, {:.1}): {:?}",
            body.pos.x,
            body.pos.y,
            collision
                .iter()
                .map(|(dir, t)| (dir, t.col, t.row))
                .collect::<Vec<_>>()
        );
    }

    body.closest = closest;
    body.collision = collision;
}

/// Push the body out of every tile in its collision matrix and cancel the
/// velocity component on that axis. Later slots overwrite earlier ones on the
/// same axis.
pub fn snap_to_contacts(body: &mut KinematicBody) {
    let offset = body.hitbox.offset;
    let size = body.hitbox.size;
    let contacts = body.collision;
    for (dir, tile) in contacts.iter() {
        let Some(obstacle) = tile.hitbox else {
            continue;
        };
        match dir {
            Direction::Bottom => {
                body.pos.y = obstacle.top() - (offset.y + size.y);
                body.vel.y = 0.0;
            }
            Direction::Top => {
                body.pos.y = obstacle.bottom() - offset.y;
                body.vel.y = 0.0;
            }
            Direction::Left => {
                body.pos.x = obstacle.right() - offset.x;
                body.vel.x = 0.0;
            }
            Direction::Right => {
                body.pos.x = obstacle.left() - (offset.x + size.x);
                body.vel.x = 0.0;
            }
        }
    }
}

/// Advance one body by `dt`: gravity, contact detection, snapping, movement.
///
/// Gravity is applied as `gravity² · dt`. Snapping runs Bottom, Top, Left,
/// Right; if Bottom and Top both trigger, Top's correction is the one that
/// sticks.
pub fn resolve(body: &mut KinematicBody, grid: &Grid, gravity: f32, dt: f32) {
    body.vel.y += gravity * gravity * dt;

    update_contact_matrices(body, grid, dt);
    snap_to_contacts(body);

    body.pos += body.vel * dt;
    body.sync_hitbox();
}

/// Whether any tile of a matching kind intersects `hitbox`
pub fn touching_kind(hitbox: Rect, grid: &Grid, mut pred: impl FnMut(TileKind) -> bool) -> bool {
    grid.iter().any(|tile| {
        pred(tile.kind) && tile.hitbox.is_some_and(|hb| hb.intersects(&hitbox))
    })
}
