//! Bloomfall headless runner
//!
//! Loads a level (JSON file) or generates one from a seed, plays it with a
//! scripted input pattern and reports what happened.
//!
//! Usage: `bloomfall [LEVEL.json | SEED] [CONFIG.json]`

use std::error::Error;

use bloomfall::SimConfig;
use bloomfall::consts::SIM_DT;
use bloomfall::sim::{Level, LevelData, LevelEvent, TickInput, levelgen, tick};

/// Seed used when no level is given
const DEFAULT_SEED: u64 = 0xB100_F411;
/// Generated level size (tiles)
const GEN_WIDTH: usize = 48;
const GEN_HEIGHT: usize = 14;
/// Give up after this many ticks (one minute at 60 Hz)
const MAX_TICKS: u64 = 60 * 60;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let data = match args.next() {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => levelgen::generate(seed, GEN_WIDTH, GEN_HEIGHT),
            Err(_) => LevelData::from_json(&std::fs::read_to_string(&arg)?)?,
        },
        None => levelgen::generate(DEFAULT_SEED, GEN_WIDTH, GEN_HEIGHT),
    };
    let config = match args.next() {
        Some(path) => SimConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };

    let mut level = Level::new(data, config)?;
    level.add_die_listener(|cause| log::warn!("player died: {cause:?}"));
    level.add_win_listener(|| log::info!("flag reached"));

    let mut flowers = 0;
    while level.is_active() && level.time_ticks < MAX_TICKS {
        let input = scripted_input(level.time_ticks);
        for event in tick(&mut level, &input, SIM_DT) {
            log::debug!("tick {}: {event:?}", level.time_ticks);
            if matches!(event, LevelEvent::FlowerCollected { .. }) {
                flowers += 1;
            }
        }
    }

    let grid = &level.grid;
    println!("phase:     {:?}", level.phase);
    println!("ticks:     {}", level.time_ticks);
    println!(
        "player:    ({:.1}, {:.1})",
        level.player.body.pos.x, level.player.body.pos.y
    );
    println!("flowers:   {flowers} collected, {} left", level.flowers.len());
    println!("gas:       {} tiles", grid.count(|k| k.is_gas()));
    println!("water:     {} tiles", grid.count(|k| k.is_water()));

    Ok(())
}

/// Walk right, hop every 40 ticks, and briefly raise the shield every 5 s
fn scripted_input(t: u64) -> TickInput {
    let shielding = t % 300 >= 290;
    TickInput {
        left: false,
        right: !shielding,
        jump: !shielding && t % 40 < 3,
        down: shielding,
    }
}
