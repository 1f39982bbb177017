//! Fixed-rate simulation tick
//!
//! Advances the mode machine and, while playing, one frame of gameplay:
//! actions, movement, spawning, collisions, then housekeeping.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::player::{Controls, Player, ShipKind};
use super::spawner::{reset_ufo_timer, spawn_boss_wave, spawn_level, update_ufo_spawner};
use super::state::{GameEvent, GameMode, SimulationState};
use crate::consts::*;
use crate::{angle_to, distance};

/// Input commands for a single tick
///
/// Steering fields are held state. Everything else is edge-triggered: set
/// only on the frame the key went down.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
    pub dash: bool,
    pub hyperspace: bool,
    /// Menu accept (Enter)
    pub confirm: bool,
    /// Ship catalog navigation
    pub left: bool,
    pub right: bool,
    /// Back out of the ship catalog
    pub cancel: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    fn controls(&self) -> Controls {
        Controls {
            thrust: self.thrust,
            turn_left: self.turn_left,
            turn_right: self.turn_right,
        }
    }
}

/// Advance the game by one frame.
///
/// Confirming a ship in the catalog needs the player's profile, so that
/// transition belongs to the session (see [`start_new_game`]).
pub fn tick(state: &mut SimulationState, input: &TickInput) {
    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    match state.mode {
        GameMode::StartMenu => {
            drift_menu(state);
            if input.confirm {
                enter_ship_select(state);
            }
        }
        GameMode::ShipSelect => {
            drift_menu(state);
            let len = ShipKind::ALL.len();
            if input.right {
                state.ship_select_index = (state.ship_select_index + 1) % len;
            }
            if input.left {
                state.ship_select_index = (state.ship_select_index + len - 1) % len;
            }
            if input.cancel {
                log::info!("Back to title");
                state.mode = GameMode::StartMenu;
            }
        }
        GameMode::Playing => play_frame(state, &input),
        GameMode::GameOver => {
            if input.confirm {
                enter_ship_select(state);
            }
        }
    }
}

fn enter_ship_select(state: &mut SimulationState) {
    log::info!("Entering ship select");
    state.mode = GameMode::ShipSelect;
}

fn drift_menu(state: &mut SimulationState) {
    for rock in &mut state.menu_asteroids {
        rock.update();
    }
}

/// Reset everything and launch a run on level 1 with the given ship
pub fn start_new_game(state: &mut SimulationState, ship: ShipKind) {
    state.clear_entities();
    state.level = 1;
    state.player = Player::new(ship);
    state.warning_timer = 0;
    state.level_clear_timer = 0;
    state.fx = Default::default();

    spawn_level(state);
    state.mode = GameMode::Playing;
    state.start_timer = GAME_START_TIME;
    state.ufo_spawn_timer = reset_ufo_timer(&mut state.rng);

    log::info!("New run with the {}", ship.name());
    state.emit(GameEvent::RunStarted { ship });
}

fn play_frame(state: &mut SimulationState, input: &TickInput) {
    if state.warning_timer > 0 {
        state.warning_timer -= 1;
        if state.warning_timer == 0 {
            spawn_boss_wave(state);
        }
        update_visuals(state);
        return;
    }

    if state.start_timer > 0 {
        state.start_timer -= 1;
        update_visuals(state);
        return;
    }

    if state.level_clear_timer > 0 {
        state.level_clear_timer -= 1;
        if state.level_clear_timer == 0 {
            state.level += 1;
            log::info!("Level {} begins", state.level);
            spawn_level(state);
            state.player.invulnerable_timer = LEVEL_START_INVULN_TIME;
            state.emit(GameEvent::LevelStarted { level: state.level });
        }
        update_visuals(state);
        return;
    }

    handle_actions(state, input);

    state.player.update(&input.controls());
    if state.player.thrusting {
        let p = &state.player;
        state
            .effects
            .thruster(p.pos, p.vel, p.angle, p.size(), &mut state.rng);
    }
    state.effects.update();
    update_entities(state);
    state.starfield.scroll(state.player.vel);

    update_ufo_spawner(state);
    state.fx.update(state.player.is_dashing());

    resolve_collisions(state);
    state.prune();

    if state.mode == GameMode::Playing && state.level_is_clear() {
        log::info!("Level {} cleared", state.level);
        state.level_clear_timer = LEVEL_CLEAR_TIME;
        state.emit(GameEvent::LevelCleared { level: state.level });
    }
}

/// Pause frames only animate effects
fn update_visuals(state: &mut SimulationState) {
    state.effects.update();
    state.fx.update(false);
}

fn handle_actions(state: &mut SimulationState, input: &TickInput) {
    if input.fire && (state.bullets.len() < MAX_BULLETS || state.player.in_hyperflow()) {
        let shots = state.player.shoot();
        if let Some(first) = shots.first() {
            let laser = first.is_laser;
            if laser {
                state.fx.shake(2);
            }
            state.bullets.extend(shots);
            state.emit(GameEvent::Shot { laser });
        }
    }

    if input.dash && state.player.dash() {
        state.emit(GameEvent::Dash);
    }

    if input.hyperspace && state.player.hyperspace(&mut state.rng) {
        state.fx.shake(5);
        state.emit(GameEvent::Hyperspace);
    }
}

fn update_entities(state: &mut SimulationState) {
    for bullet in &mut state.bullets {
        bullet.update();
    }
    for bullet in &mut state.enemy_bullets {
        bullet.update();
    }
    for rock in &mut state.asteroids {
        rock.update();
    }
    for pickup in &mut state.powerups {
        pickup.update();
    }

    let target = state.player.pos;
    let mut volleys = Vec::new();
    for ufo in &mut state.ufos {
        volleys.push(ufo.update(target, &mut state.rng));
    }
    for volley in volleys {
        if !volley.is_empty() {
            state.enemy_bullets.extend(volley);
            state.emit(GameEvent::UfoFired);
        }
    }

    let mut mine_shots = Vec::new();
    for mine in &mut state.mines {
        if let Some(shot) = mine.update(target) {
            mine_shots.push(shot);
        }
    }
    for shot in mine_shots {
        state.enemy_bullets.push(shot);
        state.emit(GameEvent::MineFired);
    }
}

/// Signed shortest turn from `from` to `to`, in degrees
fn angle_delta(from: f32, to: f32) -> f32 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Closest asteroid, UFO or mine to the player
fn nearest_target(state: &SimulationState) -> Option<Vec2> {
    let from = state.player.pos;
    state
        .asteroids
        .iter()
        .map(|a| a.pos)
        .chain(state.ufos.iter().map(|u| u.pos))
        .chain(state.mines.iter().map(|m| m.pos))
        .min_by(|a, b| {
            distance(from, *a)
                .partial_cmp(&distance(from, *b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Demo-mode driver: accepts every menu, then hunts the nearest target
fn autopilot(state: &SimulationState, input: &mut TickInput) {
    match state.mode {
        GameMode::StartMenu | GameMode::ShipSelect | GameMode::GameOver => {
            input.confirm = true;
            return;
        }
        GameMode::Playing => {}
    }

    let player = &state.player;
    let Some(target) = nearest_target(state) else {
        return;
    };

    let delta = angle_delta(player.angle, angle_to(player.pos, target));
    let turn = player.stats.turn_speed;
    input.turn_left = delta < -turn;
    input.turn_right = delta > turn;
    input.fire = delta.abs() < 10.0;

    let range = distance(player.pos, target);
    input.thrust = range > 250.0 && delta.abs() < 30.0;

    // Dodge rocks that get too close
    let crowded = state
        .asteroids
        .iter()
        .any(|a| distance(player.pos, a.pos) < a.radius() + player.size() + 25.0);
    input.dash = crowded && player.dash_cooldown == 0;

    let incoming = state
        .enemy_bullets
        .iter()
        .any(|b| distance(player.pos, b.pos) < 40.0 && b.vel.dot(player.pos - b.pos) > 0.0);
    input.hyperspace = incoming && !input.dash && player.hyperspace_cooldown == 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Phase;
    use crate::sim::entities::AsteroidSize;

    fn running_state() -> SimulationState {
        let mut state = SimulationState::new(11, 256);
        start_new_game(&mut state, ShipKind::Cruiser);
        state.start_timer = 0;
        state.player.invulnerable_timer = 0;
        state.ufo_spawn_timer = 10_000;
        state
    }

    fn empty_field(state: &mut SimulationState) {
        state.asteroids.clear();
        state.mines.clear();
        state.ufos.clear();
    }

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_menu_flow() {
        let mut state = SimulationState::new(1, 64);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.mode, GameMode::StartMenu);

        tick(&mut state, &press(|i| i.confirm = true));
        assert_eq!(state.mode, GameMode::ShipSelect);

        tick(&mut state, &press(|i| i.left = true));
        assert_eq!(state.ship_select_index, ShipKind::ALL.len() - 1);
        tick(&mut state, &press(|i| i.right = true));
        assert_eq!(state.ship_select_index, 0);

        tick(&mut state, &press(|i| i.cancel = true));
        assert_eq!(state.mode, GameMode::StartMenu);
    }

    #[test]
    fn test_menu_asteroids_drift() {
        let mut state = SimulationState::new(1, 64);
        let before: Vec<Vec2> = state.menu_asteroids.iter().map(|a| a.pos).collect();
        tick(&mut state, &TickInput::default());
        let after: Vec<Vec2> = state.menu_asteroids.iter().map(|a| a.pos).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_game_over_returns_to_ship_select() {
        let mut state = SimulationState::new(1, 64);
        state.mode = GameMode::GameOver;
        tick(&mut state, &press(|i| i.confirm = true));
        assert_eq!(state.mode, GameMode::ShipSelect);
    }

    #[test]
    fn test_new_run_setup() {
        let mut state = SimulationState::new(3, 64);
        start_new_game(&mut state, ShipKind::Heavy);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.phase(), Phase::Starting);
        assert_eq!(state.level, 1);
        assert_eq!(state.asteroids.len(), 5);
        assert_eq!(state.player.lives, 4);
        assert_eq!(state.start_timer, GAME_START_TIME);
        assert!(
            state
                .events
                .contains(&GameEvent::RunStarted { ship: ShipKind::Heavy })
        );
    }

    #[test]
    fn test_start_countdown_freezes_gameplay() {
        let mut state = SimulationState::new(3, 64);
        start_new_game(&mut state, ShipKind::Cruiser);
        let before: Vec<Vec2> = state.asteroids.iter().map(|a| a.pos).collect();

        tick(&mut state, &press(|i| i.fire = true));
        let after: Vec<Vec2> = state.asteroids.iter().map(|a| a.pos).collect();
        assert_eq!(before, after);
        assert!(state.bullets.is_empty());
        assert_eq!(state.start_timer, GAME_START_TIME - 1);
    }

    #[test]
    fn test_fire_spawns_bullet_and_respects_cap() {
        let mut state = running_state();
        empty_field(&mut state);
        // Keep the level from clearing underneath the test
        let id = state.next_entity_id();
        let far = Vec2::new(50.0, 50.0);
        let rock =
            crate::sim::Asteroid::new(id, Some(far), AsteroidSize::Large, 1, &mut state.rng);
        state.asteroids.push(rock);

        tick(&mut state, &press(|i| i.fire = true));
        assert_eq!(state.bullets.len(), 1);
        assert!(state.events.contains(&GameEvent::Shot { laser: false }));

        state.player.shoot_cooldown = 0;
        state.bullets = (0..MAX_BULLETS)
            .map(|_| crate::sim::Projectile::bullet(Vec2::new(400.0, 100.0), 0.0))
            .collect();
        tick(&mut state, &press(|i| i.fire = true));
        assert_eq!(state.bullets.len(), MAX_BULLETS);
    }

    #[test]
    fn test_hyperflow_fires_laser_past_cap() {
        let mut state = running_state();
        state.player.flow_state_timer = FLOW_STATE_DURATION;
        state.bullets = (0..MAX_BULLETS)
            .map(|_| crate::sim::Projectile::bullet(Vec2::new(400.0, 100.0), 0.0))
            .collect();
        tick(&mut state, &press(|i| i.fire = true));
        assert!(state.events.contains(&GameEvent::Shot { laser: true }));
    }

    #[test]
    fn test_level_clear_cycle() {
        let mut state = running_state();
        empty_field(&mut state);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase(), Phase::LevelClearPause);
        assert_eq!(state.level_clear_timer, LEVEL_CLEAR_TIME);

        // Actions are ignored while paused
        tick(&mut state, &press(|i| i.fire = true));
        assert!(state.bullets.is_empty());

        for _ in 1..LEVEL_CLEAR_TIME {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.level, 2);
        assert_eq!(state.asteroids.len(), 6);
        assert_eq!(state.player.invulnerable_timer, LEVEL_START_INVULN_TIME);
        assert_eq!(state.phase(), Phase::Playing);
        assert!(state.events.contains(&GameEvent::LevelStarted { level: 2 }));
    }

    #[test]
    fn test_boss_warning_then_wave() {
        let mut state = running_state();
        empty_field(&mut state);
        state.level = 4;
        state.level_clear_timer = 1;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 5);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.phase(), Phase::BossWarningPause);

        for _ in 0..BOSS_WARNING_TIME {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.warning_timer, 0);
        assert_eq!(state.ufos.len(), 1);
        assert!(state.events.contains(&GameEvent::BossSpawned { count: 1 }));
    }

    #[test]
    fn test_hyperspace_shakes_screen() {
        let mut state = running_state();
        empty_field(&mut state);
        tick(&mut state, &press(|i| i.hyperspace = true));
        assert!(state.events.contains(&GameEvent::Hyperspace));
        // Armed by the action, then one frame of countdown
        assert_eq!(state.player.hyperspace_cooldown, PLAYER_HYPERSPACE_COOLDOWN - 1);
        assert!(state.fx.shake_timer > 0);
    }

    #[test]
    fn test_nearest_target() {
        let mut state = running_state();
        empty_field(&mut state);
        assert_eq!(nearest_target(&state), None);

        let near = state.player.pos + Vec2::new(100.0, 0.0);
        for pos in [Vec2::new(10.0, 10.0), near] {
            let id = state.next_entity_id();
            let rock =
                crate::sim::Asteroid::new(id, Some(pos), AsteroidSize::Small, 1, &mut state.rng);
            state.asteroids.push(rock);
        }
        assert_eq!(nearest_target(&state), Some(near));
    }

    #[test]
    fn test_angle_delta_takes_short_way() {
        assert!((angle_delta(170.0, -170.0) - 20.0).abs() < 1e-4);
        assert!((angle_delta(-170.0, 170.0) + 20.0).abs() < 1e-4);
        assert!((angle_delta(-90.0, -90.0)).abs() < 1e-4);
    }

    #[test]
    fn test_autopilot_confirms_menus_and_plays() {
        let mut state = SimulationState::new(5, 64);
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &idle);
        assert_eq!(state.mode, GameMode::ShipSelect);

        start_new_game(&mut state, ShipKind::Cruiser);
        for _ in 0..600 {
            tick(&mut state, &idle);
        }
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::Shot { .. })));
    }
}
