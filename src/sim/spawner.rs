//! Level population: asteroids, hunter mines, UFOs and boss waves

use glam::Vec2;
use rand::Rng;

use super::entities::{Asteroid, AsteroidSize, EnemyCraft, HunterMine, UfoKind};
use super::state::{GameEvent, SimulationState};
use crate::consts::*;
use crate::distance;

/// Every fifth level is a boss level
pub fn is_boss_level(level: u32) -> bool {
    level > 0 && level % 5 == 0
}

/// Every fourth level (that isn't a boss level) is a minefield
pub fn is_minefield_level(level: u32) -> bool {
    level > 1 && level % 4 == 0 && !is_boss_level(level)
}

/// Asteroid count for a fresh level
pub fn asteroid_count_for_level(level: u32) -> u32 {
    ASTEROID_START_COUNT + level
}

/// Live UFO cap for a level
pub fn max_ufos_for_level(level: u32) -> usize {
    1 + (level / 5) as usize
}

/// Elite UFOs in a boss wave
pub fn boss_count_for_level(level: u32) -> u32 {
    1 + level / 10
}

/// Populate a level.
///
/// Boss levels spawn nothing and start the warning countdown instead; the
/// bosses arrive when it expires (see [`spawn_boss_wave`]). Minefields halve
/// the asteroid count and drop a cluster of mines. Ordinary levels may roll a
/// single bonus mine.
pub fn spawn_asteroids(state: &mut SimulationState, count: u32, level: u32) {
    if is_boss_level(level) {
        state.warning_timer = BOSS_WARNING_TIME;
        log::info!("Level {}: boss warning", level);
        state.emit(GameEvent::BossWarning { level });
        return;
    }

    let minefield = is_minefield_level(level);
    let count = if minefield {
        spawn_minefield(state, level);
        count / 2
    } else {
        count
    };

    for _ in 0..count {
        let player = state.player.pos;
        let id = state.next_entity_id();
        let mut rock = Asteroid::new(id, None, AsteroidSize::Large, level, &mut state.rng);
        for _ in 1..SPAWN_MAX_ATTEMPTS {
            if distance(rock.pos, player) > ASTEROID_SAFE_RADIUS {
                break;
            }
            rock = Asteroid::new(id, None, AsteroidSize::Large, level, &mut state.rng);
        }
        state.asteroids.push(rock);
    }

    let mine_chance = (HUNTER_MINE_SPAWN_CHANCE * level as f64).min(1.0);
    if !minefield && state.rng.random_bool(mine_chance) {
        let player = state.player.pos;
        let pos = sample_position(&mut state.rng, player, MINE_SAFE_RADIUS, |rng| {
            Vec2::new(
                rng.random_range(50.0..=SCREEN_WIDTH - 50.0),
                rng.random_range(50.0..=SCREEN_HEIGHT - 50.0),
            )
        });
        let id = state.next_entity_id();
        state.mines.push(HunterMine::new(id, pos));
    }

    log::debug!(
        "Level {}: {} asteroids, {} mines",
        level,
        state.asteroids.len(),
        state.mines.len()
    );
}

/// A tight cluster of mines around a random interior point
fn spawn_minefield(state: &mut SimulationState, level: u32) {
    let num_mines = (2 + level / 4).min(6);
    let center = Vec2::new(
        state.rng.random_range(100.0..=SCREEN_WIDTH - 100.0),
        state.rng.random_range(100.0..=SCREEN_HEIGHT - 100.0),
    );
    let player = state.player.pos;

    for _ in 0..num_mines {
        let pos = sample_position(&mut state.rng, player, MINE_SAFE_RADIUS, |rng| {
            center + Vec2::new(rng.random_range(-60.0..=60.0), rng.random_range(-60.0..=60.0))
        });
        let id = state.next_entity_id();
        state.mines.push(HunterMine::new(id, pos));
    }
    log::info!("Level {}: minefield with {} mines", level, num_mines);
}

/// Rejection-sample a position at least `safe_radius` away from `avoid`.
///
/// Gives up after `SPAWN_MAX_ATTEMPTS` candidates and keeps the last one.
pub fn sample_position<R: Rng>(
    rng: &mut R,
    avoid: Vec2,
    safe_radius: f32,
    mut candidate: impl FnMut(&mut R) -> Vec2,
) -> Vec2 {
    let mut pos = candidate(rng);
    for _ in 1..SPAWN_MAX_ATTEMPTS {
        if distance(pos, avoid) > safe_radius {
            break;
        }
        pos = candidate(rng);
    }
    pos
}

/// Populate the current level with its standard asteroid count
pub fn spawn_level(state: &mut SimulationState) {
    let level = state.level;
    spawn_asteroids(state, asteroid_count_for_level(level), level);
}

/// Release the boss wave at the end of the warning countdown
pub fn spawn_boss_wave(state: &mut SimulationState) {
    let count = boss_count_for_level(state.level);
    for _ in 0..count {
        let id = state.next_entity_id();
        let boss = EnemyCraft::new(id, UfoKind::Elite, &mut state.rng);
        state.ufos.push(boss);
    }
    log::info!("Level {}: {} elite UFOs inbound", state.level, count);
    state.emit(GameEvent::BossSpawned { count });
}

pub fn reset_ufo_timer<R: Rng>(rng: &mut R) -> u32 {
    rng.random_range(UFO_SPAWN_TIME_MIN..=UFO_SPAWN_TIME_MAX)
}

/// Per-frame UFO spawner. Disabled on boss levels.
pub fn update_ufo_spawner(state: &mut SimulationState) {
    state.ufo_spawn_timer = state.ufo_spawn_timer.saturating_sub(1);

    if is_boss_level(state.level)
        || state.ufo_spawn_timer > 0
        || state.ufos.len() >= max_ufos_for_level(state.level)
    {
        return;
    }

    let kind = if state.level > 3 && state.rng.random_bool(ELITE_UFO_CHANCE) {
        UfoKind::Elite
    } else {
        UfoKind::Normal
    };
    let id = state.next_entity_id();
    let ufo = EnemyCraft::new(id, kind, &mut state.rng);
    log::debug!("UFO {:?} entering at y={:.0}", kind, ufo.pos.y);
    state.ufos.push(ufo);
    state.ufo_spawn_timer = reset_ufo_timer(&mut state.rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameMode;

    fn playing_state() -> SimulationState {
        let mut state = SimulationState::new(42, 256);
        state.mode = GameMode::Playing;
        state
    }

    #[test]
    fn test_level_kinds() {
        assert!(is_boss_level(5));
        assert!(is_boss_level(20));
        assert!(!is_boss_level(4));
        assert!(is_minefield_level(4));
        assert!(is_minefield_level(8));
        assert!(!is_minefield_level(20));
        assert!(!is_minefield_level(1));
    }

    #[test]
    fn test_level_one_spawns_clear_of_player() {
        let mut state = playing_state();
        spawn_asteroids(&mut state, 5, 1);
        assert_eq!(state.asteroids.len(), 5);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
        for a in &state.asteroids {
            assert!(distance(a.pos, state.player.pos) > ASTEROID_SAFE_RADIUS);
        }
        for m in &state.mines {
            assert!(distance(m.pos, state.player.pos) > MINE_SAFE_RADIUS);
        }
    }

    #[test]
    fn test_boss_level_spawns_nothing_but_warning() {
        let mut state = playing_state();
        state.level = 5;
        spawn_asteroids(&mut state, 9, 5);
        assert!(state.asteroids.is_empty());
        assert!(state.mines.is_empty());
        assert_eq!(state.warning_timer, BOSS_WARNING_TIME);
        assert!(state.events.contains(&GameEvent::BossWarning { level: 5 }));
    }

    #[test]
    fn test_boss_wave_size_scales() {
        let mut state = playing_state();
        state.level = 20;
        spawn_boss_wave(&mut state);
        assert_eq!(state.ufos.len(), 3);
        assert!(state.ufos.iter().all(|u| u.kind == UfoKind::Elite));
    }

    #[test]
    fn test_minefield() {
        let mut state = playing_state();
        state.level = 4;
        spawn_asteroids(&mut state, 8, 4);
        assert_eq!(state.asteroids.len(), 4);
        assert_eq!(state.mines.len(), 3);
        for m in &state.mines {
            assert!(distance(m.pos, state.player.pos) > MINE_SAFE_RADIUS);
        }
    }

    #[test]
    fn test_bonus_mine_guaranteed_at_high_level() {
        // 0.3 * level >= 1 from level 4 on; level 7 is neither boss nor minefield
        let mut state = playing_state();
        state.level = 7;
        spawn_asteroids(&mut state, 11, 7);
        assert_eq!(state.mines.len(), 1);
    }

    #[test]
    fn test_sample_position_rejects_close_candidates() {
        let mut state = playing_state();
        let mut calls = 0;
        let pos = sample_position(&mut state.rng, Vec2::ZERO, 100.0, |_| {
            calls += 1;
            if calls < 4 { Vec2::new(10.0, 0.0) } else { Vec2::new(500.0, 0.0) }
        });
        assert_eq!(pos, Vec2::new(500.0, 0.0));
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_ufo_spawner_respects_cap_and_boss_levels() {
        let mut state = playing_state();
        state.ufo_spawn_timer = 1;
        update_ufo_spawner(&mut state);
        assert_eq!(state.ufos.len(), 1);
        assert!((UFO_SPAWN_TIME_MIN..=UFO_SPAWN_TIME_MAX).contains(&state.ufo_spawn_timer));

        state.ufo_spawn_timer = 1;
        update_ufo_spawner(&mut state);
        assert_eq!(state.ufos.len(), 1, "level 1 caps at one UFO");

        let mut boss = playing_state();
        boss.level = 5;
        boss.ufo_spawn_timer = 1;
        update_ufo_spawner(&mut boss);
        assert!(boss.ufos.is_empty());
    }
}
