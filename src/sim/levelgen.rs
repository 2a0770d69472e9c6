//! Seeded level generator
//!
//! Produces playable-looking `LevelData` for the headless runner and tests.
//! Same seed, same level.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::LevelData;
use crate::consts::DEFAULT_TILE_SIZE;

// Codes from the level table
const AIR: u8 = 0;
const SOLID: u8 = 1;
const SPIKE_UP: u8 = 3;
const GRASS: u8 = 7;
const ENEMY: u8 = 8;
const FLAG: u8 = 9;
const WATER_FLOWER: u8 = 10;
const GAS_FLOWER: u8 = 11;
const PLATFORM: u8 = 14;

pub const MIN_WIDTH: usize = 12;
pub const MIN_HEIGHT: usize = 8;

/// Generate a walled level with a grass floor, floating platforms, spikes,
/// flowers, a couple of enemies and a flag at the far end.
///
/// Sizes below `MIN_WIDTH` x `MIN_HEIGHT` are raised to the minimum.
pub fn generate(seed: u64, width: usize, height: usize) -> LevelData {
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut rows = vec![vec![AIR; width]; height];
    let floor = height - 1;
    let ground = floor - 1; // row actors stand on

    for (row, cells) in rows.iter_mut().enumerate() {
        cells[0] = SOLID;
        cells[width - 1] = SOLID;
        if row == floor {
            cells.fill(GRASS);
        }
    }

    // Keep the spawn area (columns 1..=3) and the flag column clear
    let open_cols = 4..width - 2;

    // Floating platforms in the upper part of the level
    let platform_count = width / 8 + 1;
    for _ in 0..platform_count {
        let len = rng.random_range(3..=5).min(width - 6);
        let start = rng.random_range(open_cols.start..=open_cols.end - len);
        let row = rng.random_range(2..ground - 1);
        for cell in &mut rows[row][start..start + len] {
            *cell = PLATFORM;
        }
    }

    // Ground features: spikes set into the floor, flowers and enemies on it
    for col in open_cols.clone() {
        let roll = rng.random_range(0..100);
        match roll {
            0..10 => rows[floor][col] = SPIKE_UP,
            10..16 => rows[ground][col] = WATER_FLOWER,
            16..22 => rows[ground][col] = GAS_FLOWER,
            22..27 => rows[ground][col] = ENEMY,
            _ => {}
        }
    }

    rows[ground][width - 2] = FLAG;
    log::info!("generated {width}x{height} level from seed {seed}");

    LevelData {
        tile_size: DEFAULT_TILE_SIZE,
        player_spawn: (1, ground as u32),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_level() {
        assert_eq!(generate(7, 30, 12), generate(7, 30, 12));
    }

    #[test]
    fn test_generated_level_is_valid() {
        for seed in 0..20 {
            let data = generate(seed, 24, 10);
            data.validate().unwrap();
            assert_eq!(data.width(), 24);
            assert_eq!(data.height(), 10);
            assert_eq!(data.rows[8][22], FLAG);
            assert_eq!(data.rows[8][1], AIR);
        }
    }

    #[test]
    fn test_small_sizes_are_raised() {
        let data = generate(1, 2, 2);
        assert_eq!(data.width(), MIN_WIDTH);
        assert_eq!(data.height(), MIN_HEIGHT);
        data.validate().unwrap();
    }
}
