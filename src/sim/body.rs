//! Kinematic bodies and their per-direction contact records

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::tile::Tile;

/// Contact direction, in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Bottom = 0,
    Top = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// Fixed resolution order: vertical first, then horizontal
    pub const ALL: [Direction; 4] = [
        Direction::Bottom,
        Direction::Top,
        Direction::Left,
        Direction::Right,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One optional tile per direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactMatrix {
    slots: [Option<Tile>; 4],
}

impl ContactMatrix {
    pub fn get(&self, dir: Direction) -> Option<&Tile> {
        self.slots[dir.index()].as_ref()
    }

    pub fn set(&mut self, dir: Direction, tile: Option<Tile>) {
        self.slots[dir.index()] = tile;
    }

    /// Populated slots in Bottom, Top, Left, Right order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &Tile)> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.get(dir).map(|t| (dir, t)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.slots = [None; 4];
    }
}

/// Hitbox placement relative to the body's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub offset: Vec2,
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(offset: Vec2, size: Vec2) -> Self {
        Self { offset, size }
    }

    /// Hitbox covering the whole body
    pub fn full(size: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            size,
        }
    }
}

/// A body that moves under gravity and is pushed out of solid tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Top-left of the nominal bounding box (world units)
    pub pos: Vec2,
    /// Nominal bounding box size
    pub size: Vec2,
    /// Movement vector, units/second
    pub vel: Vec2,
    pub hitbox: Hitbox,
    /// Hitbox origin as of the end of the last resolution
    hitbox_origin: Vec2,
    /// Tiles in confirmed contact this tick
    pub collision: ContactMatrix,
    /// Nearest candidate per direction, contact or not (debug overlay)
    pub closest: ContactMatrix,
}

impl KinematicBody {
    pub fn new(pos: Vec2, size: Vec2, hitbox: Hitbox) -> Self {
        debug_assert!(
            Rect::from_pos_size(Vec2::ZERO, size)
                .contains_rect(&Rect::from_pos_size(hitbox.offset, hitbox.size)),
            "hitbox must stay inside the body's bounding box"
        );
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            hitbox,
            hitbox_origin: pos + hitbox.offset,
            collision: ContactMatrix::default(),
            closest: ContactMatrix::default(),
        }
    }

    /// Hitbox as last recorded (the "old" position used for candidate scans)
    pub fn hitbox_rect(&self) -> Rect {
        Rect::from_pos_size(self.hitbox_origin, self.hitbox.size)
    }

    /// Record the current hitbox position for the next tick's scan
    pub fn sync_hitbox(&mut self) {
        self.hitbox_origin = self.pos + self.hitbox.offset;
    }

    /// Teleport, keeping the hitbox in step
    pub fn place_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.sync_hitbox();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tile::TileKind;

    #[test]
    fn test_hitbox_follows_sync_only() {
        let mut body = KinematicBody::new(
            Vec2::new(10.0, 10.0),
            Vec2::splat(32.0),
            Hitbox::new(Vec2::splat(3.0), Vec2::splat(29.0)),
        );
        assert_eq!(body.hitbox_rect(), Rect::new(13.0, 13.0, 29.0, 29.0));

        body.pos = Vec2::new(50.0, 10.0);
        assert_eq!(body.hitbox_rect().left(), 13.0);
        body.sync_hitbox();
        assert_eq!(body.hitbox_rect().left(), 53.0);
    }

    #[test]
    fn test_contact_matrix_iter_order() {
        let mut m = ContactMatrix::default();
        assert!(m.is_empty());
        m.set(Direction::Right, Some(Tile::new(2, 0, 1.0, TileKind::Flag)));
        m.set(Direction::Bottom, Some(Tile::new(0, 2, 1.0, TileKind::Flag)));
        let dirs: Vec<Direction> = m.iter().map(|(d, _)| d).collect();
        assert_eq!(dirs, vec![Direction::Bottom, Direction::Right]);
        m.clear();
        assert!(m.is_empty());
    }
}
