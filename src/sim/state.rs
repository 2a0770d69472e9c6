//! Level state: the grid, the actors on it, and the level's life cycle
//!
//! A `Level` is built once from `LevelData` and rebuilt wholesale on restart.
//! It is the only owner of the grid; nothing here is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::grid::Grid;
use super::rect::Rect;
use super::tile::{CodeEntry, FlowerKind, TileKind};
use crate::SimConfig;
use crate::error::LevelError;

/// Raw level description: a rectangular grid of tile codes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    /// World units per tile
    pub tile_size: f32,
    /// Player spawn cell as (column, row)
    pub player_spawn: (u32, u32),
    /// Tile codes, one inner vector per row, top row first
    pub rows: Vec<Vec<u8>>,
}

impl LevelData {
    /// Parse and validate a JSON level document
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Check the grid is non-empty, rectangular and uses only known codes
    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(LevelError::InvalidTileSize(self.tile_size));
        }
        let width = self.width();
        if width == 0 {
            return Err(LevelError::Empty);
        }
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != width {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            if let Some((col, &code)) = cells
                .iter()
                .enumerate()
                .find(|(_, code)| CodeEntry::from_code(**code).is_none())
            {
                return Err(LevelError::UnknownCode { col, row, code });
            }
        }
        let (col, row) = self.player_spawn;
        if col as usize >= width || row as usize >= self.height() {
            return Err(LevelError::SpawnOutOfBounds { col, row });
        }
        Ok(())
    }
}

/// Where the level stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    Active,
    /// Player died; waits for restart
    Dead,
    /// Player reached the flag; waits for restart
    Won,
}

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Fell past the bottom of the map
    Fell,
    /// Touched a spike through the collision matrix
    Spikes,
    /// Hitbox overlapped an enemy
    Enemy,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LevelEvent {
    PlayerDied(DeathCause),
    PlayerWon,
    FlowerCollected {
        col: i32,
        row: i32,
        kind: FlowerKind,
    },
    /// A water flower filled these many cells
    WaterReleased { cells: usize },
    /// A gas flower placed these many gas tiles
    GasReleased { cells: usize },
}

/// A flower waiting to be picked up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flower {
    pub col: i32,
    pub row: i32,
    pub kind: FlowerKind,
    pub hitbox: Rect,
}

type DieListener = Box<dyn FnMut(DeathCause)>;
type WinListener = Box<dyn FnMut()>;

/// Registered observers, called synchronously in registration order
#[derive(Default)]
struct Listeners {
    die: Vec<DieListener>,
    win: Vec<WinListener>,
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("die", &self.die.len())
            .field("win", &self.win.len())
            .finish()
    }
}

/// Serializable view of a level for renderers and debug overlays
#[derive(Debug, Serialize)]
pub struct LevelSnapshot<'a> {
    pub phase: LevelPhase,
    pub time_ticks: u64,
    pub grid: &'a Grid,
    pub player: &'a Actor,
    pub enemies: &'a [Actor],
    pub flowers: &'a [Flower],
}

/// One level instance: grid, actors, constants, phase
#[derive(Debug)]
pub struct Level {
    /// Source data, kept for restarts
    pub data: LevelData,
    pub config: SimConfig,
    pub grid: Grid,
    pub player: Actor,
    pub enemies: Vec<Actor>,
    /// Flowers not yet picked up
    pub flowers: Vec<Flower>,
    pub phase: LevelPhase,
    /// Ticks since the last (re)start
    pub time_ticks: u64,
    listeners: Listeners,
}

impl Level {
    /// Build a level, rejecting bad level data or settings
    pub fn new(data: LevelData, config: SimConfig) -> Result<Self, LevelError> {
        data.validate()?;
        config.validate()?;
        let world = World::build(&data, &config);
        log::info!(
            "level {}x{} built: {} enemies, {} flowers",
            data.width(),
            data.height(),
            world.enemies.len(),
            world.flowers.len()
        );
        Ok(Self {
            data,
            config,
            grid: world.grid,
            player: world.player,
            enemies: world.enemies,
            flowers: world.flowers,
            phase: LevelPhase::Active,
            time_ticks: 0,
            listeners: Listeners::default(),
        })
    }

    /// Throw away all runtime state and rebuild from the level data.
    /// Listeners stay registered.
    pub fn restart(&mut self) {
        let world = World::build(&self.data, &self.config);
        self.grid = world.grid;
        self.player = world.player;
        self.enemies = world.enemies;
        self.flowers = world.flowers;
        self.phase = LevelPhase::Active;
        self.time_ticks = 0;
        log::info!("level restarted");
    }

    pub fn is_active(&self) -> bool {
        self.phase == LevelPhase::Active
    }

    pub fn is_player_dead(&self) -> bool {
        self.phase == LevelPhase::Dead
    }

    pub fn is_player_win(&self) -> bool {
        self.phase == LevelPhase::Won
    }

    pub fn add_die_listener(&mut self, listener: impl FnMut(DeathCause) + 'static) {
        self.listeners.die.push(Box::new(listener));
    }

    pub fn add_win_listener(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.win.push(Box::new(listener));
    }

    /// Active -> Dead. Does nothing (and returns false) in any other phase.
    pub fn kill_player(&mut self, cause: DeathCause) -> bool {
        if !self.is_active() {
            return false;
        }
        self.phase = LevelPhase::Dead;
        log::info!("player died ({cause:?}) after {} ticks", self.time_ticks);
        for listener in &mut self.listeners.die {
            listener(cause);
        }
        true
    }

    /// Active -> Won. Does nothing (and returns false) in any other phase.
    pub fn win(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.phase = LevelPhase::Won;
        log::info!("player won after {} ticks", self.time_ticks);
        for listener in &mut self.listeners.win {
            listener();
        }
        true
    }

    pub fn snapshot(&self) -> LevelSnapshot<'_> {
        LevelSnapshot {
            phase: self.phase,
            time_ticks: self.time_ticks,
            grid: &self.grid,
            player: &self.player,
            enemies: &self.enemies,
            flowers: &self.flowers,
        }
    }
}

/// Everything rebuilt from level data
struct World {
    grid: Grid,
    player: Actor,
    enemies: Vec<Actor>,
    flowers: Vec<Flower>,
}

impl World {
    /// Assumes `data` has been validated; unknown codes become Air
    fn build(data: &LevelData, config: &SimConfig) -> Self {
        let tile_size = data.tile_size;
        let mut enemies = Vec::new();
        let mut flowers = Vec::new();

        let grid = Grid::from_fn(data.width(), data.height(), tile_size, |col, row| {
            let code = data.rows[row as usize][col as usize];
            match CodeEntry::from_code(code) {
                Some(CodeEntry::Tile(kind)) => {
                    if let TileKind::Flower(flower) = kind {
                        flowers.push(Flower {
                            col,
                            row,
                            kind: flower,
                            hitbox: cell_rect(col, row, tile_size),
                        });
                    }
                    kind
                }
                Some(CodeEntry::EnemySpawn) => {
                    enemies.push(Actor::enemy(cell_origin(col, row, tile_size), tile_size));
                    TileKind::Air
                }
                None => TileKind::Air,
            }
        });

        let (col, row) = data.player_spawn;
        let spawn = cell_origin(col as i32, row as i32, tile_size);
        let player = Actor::player(spawn, tile_size, config);

        Self {
            grid,
            player,
            enemies,
            flowers,
        }
    }
}

fn cell_origin(col: i32, row: i32, tile_size: f32) -> Vec2 {
    Vec2::new(col as f32 * tile_size, row as f32 * tile_size)
}

fn cell_rect(col: i32, row: i32, tile_size: f32) -> Rect {
    Rect::from_pos_size(cell_origin(col, row, tile_size), Vec2::splat(tile_size))
}
