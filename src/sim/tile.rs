//! Tile kinds, the level code table and the per-kind behavior table
//!
//! A tile is passive data. Everything the simulation needs to know about a
//! kind (solidity, whether it kills, whether it has collision geometry) comes
//! from [`TileKind::traits`], never from inspecting what "type" a tile is.

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Highest gas intensity (GasThree sprite)
pub const MAX_GAS_INTENSITY: u8 = 2;
/// Highest water fullness (full tile)
pub const MAX_WATER_FULLNESS: u8 = 3;

/// Which way a spike points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpikeOrientation {
    Down,
    Up,
    Left,
    Right,
}

/// Flower pickups: what they release when collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowerKind {
    /// Releases a full water source (level code 10)
    Water,
    /// Releases a gas cloud (level code 11)
    Gas,
}

/// Visual variants of solid ground. Collision-wise they are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolidStyle {
    #[default]
    Plain,
    Dirt,
    Grass,
    Down,
    Up,
    Middle,
}

/// Tile kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Air,
    Solid(SolidStyle),
    Spike(SpikeOrientation),
    Flag,
    Flower(FlowerKind),
    /// Intensity 0..=2, visual only
    Gas { intensity: u8 },
    /// Fullness 0 (falling) ..= 3 (full)
    Water { fullness: u8 },
}

/// Static behavior flags for a tile kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTraits {
    /// Blocks kinematic bodies
    pub solid: bool,
    /// Kills the player on contact through the collision matrix
    pub hazard: bool,
    /// Carries an axis-aligned hitbox
    pub has_hitbox: bool,
}

impl TileKind {
    /// Gas tile with clamped intensity
    pub fn gas(intensity: u8) -> Self {
        TileKind::Gas {
            intensity: intensity.min(MAX_GAS_INTENSITY),
        }
    }

    /// Water tile with clamped fullness
    pub fn water(fullness: u8) -> Self {
        TileKind::Water {
            fullness: fullness.min(MAX_WATER_FULLNESS),
        }
    }

    /// Behavior lookup table
    pub const fn traits(self) -> KindTraits {
        match self {
            TileKind::Air => KindTraits {
                solid: false,
                hazard: false,
                has_hitbox: false,
            },
            TileKind::Solid(_) => KindTraits {
                solid: true,
                hazard: false,
                has_hitbox: true,
            },
            TileKind::Spike(_) => KindTraits {
                solid: true,
                hazard: true,
                has_hitbox: true,
            },
            TileKind::Flag
            | TileKind::Flower(_)
            | TileKind::Gas { .. }
            | TileKind::Water { .. } => KindTraits {
                solid: false,
                hazard: false,
                has_hitbox: true,
            },
        }
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.traits().solid
    }

    #[inline]
    pub fn is_hazard(self) -> bool {
        self.traits().hazard
    }

    #[inline]
    pub fn is_gas(self) -> bool {
        matches!(self, TileKind::Gas { .. })
    }

    #[inline]
    pub fn is_water(self) -> bool {
        matches!(self, TileKind::Water { .. })
    }

    #[inline]
    pub fn is_flag(self) -> bool {
        matches!(self, TileKind::Flag)
    }

    /// Name of the tileset image the renderer should draw for this kind
    pub fn sprite(self) -> Option<&'static str> {
        let name = match self {
            TileKind::Air => return None,
            TileKind::Solid(style) => match style {
                SolidStyle::Plain => "Solid",
                SolidStyle::Dirt => "Dirt",
                SolidStyle::Grass => "Grass",
                SolidStyle::Down => "Solid_down",
                SolidStyle::Up => "Solid_up",
                SolidStyle::Middle => "Solid_middle",
            },
            TileKind::Spike(orientation) => match orientation {
                SpikeOrientation::Down => "Spikes_down",
                SpikeOrientation::Up => "Spikes_up",
                SpikeOrientation::Left => "Spikes_left",
                SpikeOrientation::Right => "Spikes_right",
            },
            TileKind::Flag => "Flag",
            TileKind::Flower(FlowerKind::Water) => "Flower1",
            TileKind::Flower(FlowerKind::Gas) => "Flower2",
            TileKind::Gas { intensity } => match intensity {
                0 => "GasOne",
                1 => "GasTwo",
                _ => "GasThree",
            },
            TileKind::Water { fullness } => match fullness {
                0 => "Falling_water",
                1 => "Quarter_water",
                2 => "Half_water",
                _ => "Full_water",
            },
        };
        Some(name)
    }
}

/// What a level code turns into when the grid is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeEntry {
    Tile(TileKind),
    /// Air cell with an enemy spawned on it
    EnemySpawn,
}

impl CodeEntry {
    /// Decode a level file cell. Returns `None` for codes outside the table.
    pub fn from_code(code: u8) -> Option<Self> {
        use TileKind as K;
        let kind = match code {
            0 => K::Air,
            1 => K::Solid(SolidStyle::Plain),
            2 => K::Spike(SpikeOrientation::Down),
            3 => K::Spike(SpikeOrientation::Up),
            4 => K::Spike(SpikeOrientation::Left),
            5 => K::Spike(SpikeOrientation::Right),
            6 => K::Solid(SolidStyle::Dirt),
            7 => K::Solid(SolidStyle::Grass),
            8 => return Some(CodeEntry::EnemySpawn),
            9 => K::Flag,
            10 => K::Flower(FlowerKind::Water),
            11 => K::Flower(FlowerKind::Gas),
            12 => K::Solid(SolidStyle::Down),
            13 => K::Solid(SolidStyle::Up),
            14 => K::Solid(SolidStyle::Middle),
            15 => K::gas(0),
            16 => K::gas(1),
            17 => K::gas(2),
            18 => K::water(0),
            19 => K::water(3),
            20 => K::water(2),
            21 => K::water(1),
            _ => return None,
        };
        Some(CodeEntry::Tile(kind))
    }
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub col: i32,
    pub row: i32,
    pub kind: TileKind,
    /// Collision geometry in world units, present only when the kind has one
    pub hitbox: Option<Rect>,
}

impl Tile {
    /// Build a tile at a grid cell; the hitbox covers the whole cell
    pub fn new(col: i32, row: i32, tile_size: f32, kind: TileKind) -> Self {
        let hitbox = kind.traits().has_hitbox.then(|| {
            Rect::new(
                col as f32 * tile_size,
                row as f32 * tile_size,
                tile_size,
                tile_size,
            )
        });
        Self {
            col,
            row,
            kind,
            hitbox,
        }
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.kind.is_solid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_table_covers_all_codes() {
        for code in 0..=21u8 {
            assert!(CodeEntry::from_code(code).is_some(), "code {code}");
        }
        assert_eq!(CodeEntry::from_code(22), None);
        assert_eq!(CodeEntry::from_code(8), Some(CodeEntry::EnemySpawn));
    }

    #[test]
    fn test_code_table_water_states() {
        let fullness = |code| match CodeEntry::from_code(code) {
            Some(CodeEntry::Tile(TileKind::Water { fullness })) => fullness,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(fullness(18), 0);
        assert_eq!(fullness(19), 3);
        assert_eq!(fullness(20), 2);
        assert_eq!(fullness(21), 1);
    }

    #[test]
    fn test_traits() {
        assert!(!TileKind::Air.is_solid());
        assert!(TileKind::Solid(SolidStyle::Grass).is_solid());
        assert!(TileKind::Spike(SpikeOrientation::Up).is_solid());
        assert!(TileKind::Spike(SpikeOrientation::Up).is_hazard());
        assert!(!TileKind::Solid(SolidStyle::Plain).is_hazard());
        assert!(!TileKind::Flag.is_solid());
        assert!(!TileKind::water(3).is_solid());
        assert!(!TileKind::gas(0).is_solid());
    }

    #[test]
    fn test_hitbox_presence() {
        assert!(Tile::new(0, 0, 32.0, TileKind::Air).hitbox.is_none());
        let solid = Tile::new(2, 3, 32.0, TileKind::Solid(SolidStyle::Plain));
        assert_eq!(solid.hitbox, Some(Rect::new(64.0, 96.0, 32.0, 32.0)));
        assert!(Tile::new(0, 0, 32.0, TileKind::Flag).hitbox.is_some());
    }

    #[test]
    fn test_clamping() {
        assert_eq!(TileKind::gas(9), TileKind::Gas { intensity: 2 });
        assert_eq!(TileKind::water(7), TileKind::Water { fullness: 3 });
    }

    #[test]
    fn test_sprites() {
        assert_eq!(TileKind::Air.sprite(), None);
        assert_eq!(TileKind::water(0).sprite(), Some("Falling_water"));
        assert_eq!(TileKind::gas(1).sprite(), Some("GasTwo"));
        assert_eq!(TileKind::Flower(FlowerKind::Gas).sprite(), Some("Flower2"));
    }
}
