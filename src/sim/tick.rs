//! Per-tick simulation step
//!
//! Order within a tick: player, hazards (or just enemies while shielded),
//! flag, flower pickups and the gas/water they release, gas shading.

use super::collision::touching_kind;
use super::gas;
use super::state::{DeathCause, Flower, Level, LevelEvent};
use super::tile::{FlowerKind, TileKind};
use super::water;

/// Input signals for a single tick, sampled by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Freeze in place (shield)
    pub down: bool,
}

/// Advance the level by `dt` seconds. Returns what happened, in order.
///
/// Does nothing once the level is dead or won; call [`Level::restart`].
pub fn tick(level: &mut Level, input: &TickInput, dt: f32) -> Vec<LevelEvent> {
    let mut events = Vec::new();
    if !level.is_active() {
        return events;
    }
    level.time_ticks += 1;

    level.player.update(input, &level.grid, &level.config, dt);

    let idle = TickInput::default();
    if level.player.is_invincible() {
        for enemy in &mut level.enemies {
            enemy.update(&idle, &level.grid, &level.config, dt);
        }
    } else {
        let body = &level.player.body;
        let fell = body.pos.y > level.grid.pixel_height() + level.config.fall_margin;
        let spiked = body.collision.iter().any(|(_, tile)| tile.kind.is_hazard());

        let mut caught = false;
        for enemy in &mut level.enemies {
            enemy.update(&idle, &level.grid, &level.config, dt);
            if level.player.body.hitbox_rect().intersects(&enemy.body.hitbox_rect()) {
                caught = true;
            }
        }

        let causes = [
            (fell, DeathCause::Fell),
            (spiked, DeathCause::Spikes),
            (caught, DeathCause::Enemy),
        ];
        for (_, cause) in causes.into_iter().filter(|(hit, _)| *hit) {
            if level.kill_player(cause) {
                events.push(LevelEvent::PlayerDied(cause));
            }
        }
    }

    if level.is_active()
        && touching_kind(level.player.body.hitbox_rect(), &level.grid, TileKind::is_flag)
        && level.win()
    {
        events.push(LevelEvent::PlayerWon);
    }

    collect_flowers(level, &mut events);

    gas::refresh_intensity(&mut level.grid);

    events
}

/// Pick up every flower the player overlaps and release its contents
fn collect_flowers(level: &mut Level, events: &mut Vec<LevelEvent>) {
    let player_box = level.player.body.hitbox_rect();
    let (picked, kept): (Vec<Flower>, Vec<Flower>) = std::mem::take(&mut level.flowers)
        .into_iter()
        .partition(|flower| flower.hitbox.intersects(&player_box));
    level.flowers = kept;

    for flower in picked {
        log::debug!("flower {:?} collected at ({}, {})", flower.kind, flower.col, flower.row);
        events.push(LevelEvent::FlowerCollected {
            col: flower.col,
            row: flower.row,
            kind: flower.kind,
        });
        match flower.kind {
            FlowerKind::Water => {
                let filled = water::flow(
                    &mut level.grid,
                    flower.col,
                    flower.row,
                    level.config.water_flower_fullness,
                );
                events.push(LevelEvent::WaterReleased {
                    cells: filled.len(),
                });
            }
            FlowerKind::Gas => {
                let placed = gas::diffuse(
                    &mut level.grid,
                    flower.col,
                    flower.row,
                    level.config.gas_flower_quota,
                );
                events.push(LevelEvent::GasReleased { cells: placed });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimConfig;
    use crate::consts::SIM_DT;
    use crate::sim::state::{LevelData, LevelPhase};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Codes: 0 air, 1 solid, 3 upward spike, 8 enemy, 9 flag, 10/11 flowers
    fn level(rows: Vec<Vec<u8>>, spawn: (u32, u32)) -> Level {
        let data = LevelData {
            tile_size: 32.0,
            player_spawn: spawn,
            rows,
        };
        Level::new(data, SimConfig::default()).unwrap()
    }

    fn run(level: &mut Level, input: TickInput, ticks: usize) -> Vec<LevelEvent> {
        let mut all = Vec::new();
        for _ in 0..ticks {
            all.extend(tick(level, &input, SIM_DT));
        }
        all
    }

    #[test]
    fn test_standing_still_is_stable() {
        let mut level = level(
            vec![vec![0, 0, 0], vec![0, 0, 0], vec![1, 1, 1]],
            (1, 1),
        );
        let events = run(&mut level, TickInput::default(), 30);
        assert!(events.is_empty());
        assert!(level.is_active());
        assert_eq!(level.player.body.hitbox_rect().bottom(), 64.0);
        assert_eq!(level.time_ticks, 30);
    }

    #[test]
    fn test_falling_off_the_map_kills() {
        let mut level = level(vec![vec![0, 0], vec![0, 0]], (0, 0));
        let events = run(&mut level, TickInput::default(), 120);
        assert_eq!(events, vec![LevelEvent::PlayerDied(DeathCause::Fell)]);
        assert_eq!(level.phase, LevelPhase::Dead);

        // No further ticking until restart
        let ticks = level.time_ticks;
        tick(&mut level, &TickInput::default(), SIM_DT);
        assert_eq!(level.time_ticks, ticks);
    }

    #[test]
    fn test_landing_on_spikes_kills() {
        let mut level = level(
            vec![vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0], vec![1, 3, 1]],
            (1, 0),
        );
        let events = run(&mut level, TickInput::default(), 60);
        assert_eq!(events, vec![LevelEvent::PlayerDied(DeathCause::Spikes)]);
    }

    #[test]
    fn test_shield_ignores_spikes_and_enemies() {
        let mut level = level(
            vec![vec![0, 0, 0], vec![0, 8, 0], vec![1, 3, 1]],
            (1, 1),
        );
        let shield = TickInput {
            down: true,
            ..Default::default()
        };
        let events = run(&mut level, shield, 30);
        assert!(events.is_empty());
        assert!(level.is_active());
    }

    #[test]
    fn test_enemy_contact_kills() {
        let mut level = level(
            vec![vec![0, 0, 0, 0], vec![0, 8, 0, 0], vec![1, 1, 1, 1]],
            (2, 1),
        );
        // The enemy patrols right, into the player
        let events = run(&mut level, TickInput::default(), 30);
        assert_eq!(events, vec![LevelEvent::PlayerDied(DeathCause::Enemy)]);
    }

    #[test]
    fn test_reaching_flag_wins() {
        let mut level = level(
            vec![vec![0, 0, 0, 0], vec![0, 0, 0, 9], vec![1, 1, 1, 1]],
            (0, 1),
        );
        let walk = TickInput {
            right: true,
            ..Default::default()
        };
        let events = run(&mut level, walk, 60);
        assert_eq!(events, vec![LevelEvent::PlayerWon]);
        assert!(level.is_player_win());
    }

    #[test]
    fn test_gas_flower_releases_cloud() {
        let mut level = level(
            vec![
                vec![0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0],
                vec![0, 0, 11, 0, 0, 0],
                vec![1, 1, 1, 1, 1, 1],
            ],
            (2, 2),
        );
        let events = tick(&mut level, &TickInput::default(), SIM_DT);
        assert_eq!(
            events,
            vec![
                LevelEvent::FlowerCollected {
                    col: 2,
                    row: 2,
                    kind: FlowerKind::Gas
                },
                LevelEvent::GasReleased { cells: 18 },
            ]
        );
        assert!(level.flowers.is_empty());
        assert_eq!(level.grid.count(TileKind::is_gas), 18);
    }

    #[test]
    fn test_water_flower_floods_floor() {
        let mut level = level(
            vec![vec![1, 0, 0, 0, 1], vec![1, 0, 10, 0, 1], vec![1, 1, 1, 1, 1]],
            (2, 1),
        );
        let events = tick(&mut level, &TickInput::default(), SIM_DT);
        assert!(events.contains(&LevelEvent::WaterReleased { cells: 3 }));
        assert_eq!(level.grid.kind_at(2, 1), Some(TileKind::water(3)));
        assert_eq!(level.grid.kind_at(1, 1), Some(TileKind::water(2)));
        assert_eq!(level.grid.kind_at(3, 1), Some(TileKind::water(2)));
    }

    #[test]
    fn test_simultaneous_deaths_report_first_cause_once() {
        // Enemy spawns in the player's cell, both standing over a spike
        let mut level = level(
            vec![vec![0, 0, 0], vec![0, 8, 0], vec![1, 3, 1]],
            (1, 1),
        );
        let deaths = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&deaths);
        level.add_die_listener(move |cause| sink.borrow_mut().push(cause));

        let events = run(&mut level, TickInput::default(), 5);
        assert_eq!(events, vec![LevelEvent::PlayerDied(DeathCause::Spikes)]);
        assert_eq!(*deaths.borrow(), vec![DeathCause::Spikes]);
        assert!(level.is_player_dead());
    }

    #[test]
    fn test_flower_under_gas_still_releases_water() {
        let mut level = level(
            vec![
                vec![0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0],
                vec![0, 0, 11, 0, 10, 0],
                vec![1, 1, 1, 1, 1, 1],
            ],
            (2, 2),
        );
        let events = tick(&mut level, &TickInput::default(), SIM_DT);
        assert!(events.contains(&LevelEvent::GasReleased { cells: 18 }));
        assert!(level.grid.kind_at(4, 2).is_some_and(TileKind::is_gas));
        assert_eq!(level.flowers.len(), 1);
        assert_eq!(level.flowers[0].kind, FlowerKind::Water);

        let walk = TickInput {
            right: true,
            ..Default::default()
        };
        let events = run(&mut level, walk, 10);
        assert!(events.contains(&LevelEvent::FlowerCollected {
            col: 4,
            row: 2,
            kind: FlowerKind::Water
        }));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, LevelEvent::WaterReleased { cells } if *cells > 0))
        );
        assert!(level.grid.kind_at(4, 2).is_some_and(TileKind::is_water));
        assert!(level.flowers.is_empty());
    }

    #[test]
    fn test_two_flowers_in_one_tick() {
        let mut level = level(
            vec![
                vec![0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0],
                vec![0, 0, 10, 11, 0, 0],
                vec![1, 1, 1, 1, 1, 1],
            ],
            (0, 2),
        );
        // Straddle both flower cells
        level.player.body.place_at(Vec2::new(80.0, 64.0));

        let events = tick(&mut level, &TickInput::default(), SIM_DT);
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            LevelEvent::FlowerCollected {
                col: 2,
                row: 2,
                kind: FlowerKind::Water
            }
        );
        assert!(matches!(events[1], LevelEvent::WaterReleased { cells } if cells > 0));
        assert_eq!(
            events[2],
            LevelEvent::FlowerCollected {
                col: 3,
                row: 2,
                kind: FlowerKind::Gas
            }
        );
        assert!(matches!(events[3], LevelEvent::GasReleased { cells } if cells > 0));
        assert!(level.flowers.is_empty());
    }

    #[test]
    fn test_restart_after_death() {
        let mut level = level(vec![vec![0, 0], vec![0, 0]], (0, 0));
        run(&mut level, TickInput::default(), 120);
        assert!(level.is_player_dead());
        level.restart();
        assert!(level.is_active());
        assert_eq!(level.player.body.pos, Vec2::ZERO);
        assert_eq!(tick(&mut level, &TickInput::default(), SIM_DT), vec![]);
    }

    #[test]
    fn test_determinism() {
        let rows = vec![
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 1, 0, 0, 9],
            vec![0, 0, 0, 0, 11, 0],
            vec![1, 1, 1, 1, 1, 1],
        ];
        let mut a = level(rows.clone(), (0, 2));
        let mut b = level(rows, (0, 2));
        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for i in 0..90 {
            let input = inputs[i % inputs.len()];
            assert_eq!(tick(&mut a, &input, SIM_DT), tick(&mut b, &input, SIM_DT));
        }
        assert_eq!(a.player, b.player);
        assert_eq!(a.grid, b.grid);
    }
}
