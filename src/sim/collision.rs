//! Collision detection and resolution
//!
//! Runs once per frame after everything has moved. Passes execute in a fixed
//! order because several of them consume projectiles or end the run:
//!
//! 1. player projectiles vs asteroids
//! 2. player vs asteroids (kill or near miss)
//! 3. player vs powerups
//! 4. player projectiles vs UFOs
//! 5. player projectiles vs hunter mines
//! 6. enemy bullets vs player
//! 7. player vs UFOs, then player vs hunter mines

use glam::Vec2;
use rand::Rng;

use super::effects::{Explosion, Shockwave, Tint};
use super::entities::{AsteroidSize, PowerUp, PowerUpKind, Projectile};
use super::state::{GameEvent, GameMode, SimulationState};
use crate::consts::*;
use crate::distance;

const LARGE_ROCK_BLAST: Explosion = Explosion::particles(20, &[Tint::White, Tint::Grey])
    .with_shockwave()
    .with_debris();
const MEDIUM_ROCK_BLAST: Explosion =
    Explosion::particles(10, &[Tint::White, Tint::Grey]).with_debris();
const SMALL_ROCK_BLAST: Explosion = Explosion::particles(5, &[Tint::Grey]);
const CHIP_BURST: Explosion = Explosion::particles(3, &[Tint::Grey]).with_debris();
const PLAYER_BLAST: Explosion = Explosion::particles(30, &[Tint::Red, Tint::Orange, Tint::White])
    .with_glitch()
    .with_shockwave();
const UFO_BLAST: Explosion = Explosion::particles(25, &[Tint::Purple, Tint::White])
    .with_glitch()
    .with_shockwave()
    .with_debris();
const MINE_BLAST: Explosion = Explosion::particles(15, &[Tint::Purple, Tint::Red]).with_debris();
const SHIELD_PICKUP: Explosion = Explosion::particles(15, &[Tint::Green, Tint::White]);
const TRIPLE_SHOT_PICKUP: Explosion = Explosion::particles(15, &[Tint::Blue, Tint::White]);

// Screen shake durations (frames)
const SHAKE_CHIP: u32 = 3;
const SHAKE_ROCK_KILL: u32 = 8;
const SHAKE_MINE: u32 = 10;
const SHAKE_UFO: u32 = 15;
const SHAKE_PLAYER_HIT: u32 = 20;

/// Circle vs circle
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    distance(a, b) < ra + rb
}

/// Whether the segment `a..b` passes within `radius` of `center`
pub fn segment_circle_hit(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((center - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    distance(a + ab * t, center) < radius
}

/// Axis-aligned box described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    /// Shrink (or grow) about the center
    pub fn scaled(self, ratio: f32) -> Self {
        Self {
            center: self.center,
            half: self.half * ratio,
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half + other.half;
        gap.x < reach.x && gap.y < reach.y
    }
}

/// Projectile vs a circular target. Lasers test their whole beam.
pub fn projectile_hits(shot: &Projectile, center: Vec2, radius: f32) -> bool {
    if shot.is_laser {
        segment_circle_hit(shot.pos, shot.beam_end(), center, radius)
    } else {
        circles_overlap(shot.pos, BULLET_RADIUS, center, radius)
    }
}

/// First projectile to strike a target this pass
#[derive(Debug, Clone, Copy)]
struct Strike {
    pos: Vec2,
    laser: bool,
}

/// Consume every live projectile overlapping the target. They count as one
/// hit, typed by the first of them.
fn take_hits(shots: &mut [Projectile], center: Vec2, radius: f32) -> Option<Strike> {
    let mut first = None;
    for shot in shots.iter_mut().filter(|s| s.is_alive()) {
        if projectile_hits(shot, center, radius) {
            first.get_or_insert(Strike {
                pos: shot.pos,
                laser: shot.is_laser,
            });
            shot.consume();
        }
    }
    first
}

/// Run every collision pass for this frame
pub fn resolve_collisions(state: &mut SimulationState) {
    projectiles_vs_asteroids(state);
    player_vs_asteroids(state);
    player_vs_powerups(state);
    projectiles_vs_ufos(state);
    projectiles_vs_mines(state);
    enemy_bullets_vs_player(state);
    player_vs_ufos(state);
    player_vs_mines(state);
}

fn projectiles_vs_asteroids(state: &mut SimulationState) {
    // Children join after the pass so they can't be hit on the frame they appear
    let mut children = Vec::new();

    for i in 0..state.asteroids.len() {
        let rock = &state.asteroids[i];
        if !rock.is_alive() {
            continue;
        }
        let Some(strike) = take_hits(&mut state.bullets, rock.pos, rock.radius()) else {
            continue;
        };

        let rock = &mut state.asteroids[i];
        rock.hit_flash_timer = HIT_FLASH_TIME;
        if strike.laser {
            rock.health = 0;
        } else {
            rock.health -= 1;
        }

        if rock.is_alive() {
            state.fx.shake(SHAKE_CHIP);
            state.explode(strike.pos, &CHIP_BURST);
            state.emit(GameEvent::AsteroidChipped);
            continue;
        }

        let rock = rock.clone();
        state.fx.shake(SHAKE_ROCK_KILL);
        let blast = match rock.size {
            AsteroidSize::Large => &LARGE_ROCK_BLAST,
            AsteroidSize::Medium => &MEDIUM_ROCK_BLAST,
            AsteroidSize::Small => &SMALL_ROCK_BLAST,
        };
        state.explode(rock.pos, blast);
        roll_powerup_drop(state, rock.size, rock.pos);

        let award = award_score(state, rock.size.score(), rock.pos, Tint::White);
        state.emit(GameEvent::AsteroidDestroyed {
            size: rock.size,
            award,
        });
        children.extend(state.split_asteroid(&rock));
    }

    state.asteroids.extend(children);
}

fn roll_powerup_drop(state: &mut SimulationState, size: AsteroidSize, pos: Vec2) {
    let (chance, kind) = match size {
        AsteroidSize::Large => return,
        AsteroidSize::Medium => (POWERUP_DROP_CHANCE_MEDIUM, PowerUpKind::TripleShot),
        AsteroidSize::Small => (POWERUP_DROP_CHANCE_SMALL, PowerUpKind::Shield),
    };
    if state.rng.random_bool(chance) {
        let id = state.next_entity_id();
        log::debug!("Dropped {:?} at ({:.0}, {:.0})", kind, pos.x, pos.y);
        state.powerups.push(PowerUp::new(id, kind, pos));
    }
}

/// Route points through the combo and report what changed
fn award_score(state: &mut SimulationState, points: u64, pos: Vec2, tint: Tint) -> u64 {
    let lives = state.player.lives;
    let was_flowing = state.player.in_hyperflow();

    let award = state.player.add_score(points);
    state.effects.float_text(pos, format!("+{award}"), tint);

    if !was_flowing {
        if state.player.in_hyperflow() {
            log::info!("Hyperflow engaged at score {}", state.player.score);
            state.emit(GameEvent::HyperflowStarted);
        } else {
            state.emit(GameEvent::FlowUp {
                level: state.player.flow_level,
            });
        }
    }
    if state.player.lives > lives {
        state.emit(GameEvent::ExtraLife {
            lives: state.player.lives,
        });
    }
    award
}

/// Shared player-hit contract. The blast and shake always play; wreckage
/// and game over only follow a hit the player actually registers.
fn strike_player(state: &mut SimulationState) {
    let pos = state.player.pos;
    let vel = state.player.vel;
    let hull = state.player.ship_points();

    state.fx.shake(SHAKE_PLAYER_HIT);
    state.explode(pos, &PLAYER_BLAST);

    let (registered, fatal) = state.player.hit();
    if !registered {
        return;
    }
    state.effects.hull_break(pos, vel, &hull, &mut state.rng);
    state.emit(GameEvent::PlayerHit {
        lives: state.player.lives,
    });

    if fatal {
        state.mode = GameMode::GameOver;
        log::info!(
            "Game over: score {} on level {}",
            state.player.score,
            state.level
        );
        state.emit(GameEvent::GameOver {
            score: state.player.score,
            level: state.level,
        });
    }
}

/// Player can take a hit right now
fn player_exposed(state: &SimulationState) -> bool {
    !state.player.is_dead() && !state.player.is_invulnerable()
}

fn player_vs_asteroids(state: &mut SimulationState) {
    if !player_exposed(state) || state.player.near_miss_cooldown > 0 {
        return;
    }
    let pos = state.player.pos;
    let kill_reach = state.player.size() * 0.5;
    let (mut overlap, mut grazed) = (false, false);
    for rock in state.asteroids.iter().filter(|a| a.is_alive()) {
        if rock.check_collision(pos, kill_reach) {
            overlap = true;
            break;
        }
        grazed |= rock.check_collision(pos, ASTEROID_NEAR_MISS_RADIUS);
    }

    // Any overlapping rock outranks a near miss elsewhere in the arena
    if overlap {
        strike_player(state);
    } else if grazed {
        state.player.add_near_miss();
        state.effects.float_text(
            pos - Vec2::new(0.0, 15.0),
            format!("+{SCORE_NEAR_MISS}"),
            Tint::Cyan,
        );
        state.emit(GameEvent::NearMiss);
    }
}

fn player_vs_powerups(state: &mut SimulationState) {
    if state.player.is_dead() {
        return;
    }
    let reach = state.player.size() * POWERUP_HIT_RATIO;
    let player = state.player.pos;

    for i in 0..state.powerups.len() {
        let pickup = &mut state.powerups[i];
        if !pickup.is_alive()
            || !circles_overlap(player, reach, pickup.pos, POWERUP_SIZE * POWERUP_HIT_RATIO)
        {
            continue;
        }
        pickup.lifespan = 0;
        let (kind, pos) = (pickup.kind, pickup.pos);

        state.player.add_powerup(kind);
        let burst = match kind {
            PowerUpKind::Shield => &SHIELD_PICKUP,
            PowerUpKind::TripleShot => &TRIPLE_SHOT_PICKUP,
        };
        state.explode(pos, burst);
        state.effects.shockwaves.push(Shockwave::new(pos, 40.0, 20, 2.0));
        state.emit(GameEvent::PowerUpCollected(kind));
    }
}

fn projectiles_vs_ufos(state: &mut SimulationState) {
    for i in 0..state.ufos.len() {
        let ufo = &state.ufos[i];
        if !ufo.is_alive() {
            continue;
        }
        let Some(strike) = take_hits(&mut state.bullets, ufo.pos, ufo.params().size) else {
            continue;
        };

        let ufo = &mut state.ufos[i];
        ufo.hit_flash_timer = HIT_FLASH_TIME;
        if strike.laser {
            ufo.health = 0;
        } else {
            ufo.health -= 1;
        }
        if ufo.health > 0 {
            continue;
        }

        let (kind, pos) = (ufo.kind, ufo.pos);
        let award = award_score(state, kind.params().score, pos, Tint::Purple);
        state.explode(pos, &UFO_BLAST);
        state.fx.shake(SHAKE_UFO);
        log::debug!("{:?} UFO destroyed for {}", kind, award);
        state.emit(GameEvent::UfoDestroyed { kind, award });
    }
}

fn projectiles_vs_mines(state: &mut SimulationState) {
    for i in 0..state.mines.len() {
        let mine = &state.mines[i];
        if !mine.is_alive() {
            continue;
        }
        if take_hits(&mut state.bullets, mine.pos, HUNTER_MINE_SIZE).is_none() {
            continue;
        }

        let mine = &mut state.mines[i];
        mine.destroyed = true;
        let pos = mine.pos;

        let award = award_score(state, SCORE_HUNTER_MINE, pos, Tint::Purple);
        state.explode(pos, &MINE_BLAST);
        state.fx.shake(SHAKE_MINE);
        state.emit(GameEvent::MineDestroyed { award });
    }
}

/// Player hitbox as a square around the ship
fn player_box(state: &SimulationState) -> Aabb {
    Aabb::from_center(state.player.pos, Vec2::splat(state.player.size() * 2.0))
}

fn enemy_bullets_vs_player(state: &mut SimulationState) {
    if !player_exposed(state) {
        return;
    }
    let hitbox = player_box(state).scaled(ENEMY_BULLET_HIT_RATIO);

    let mut struck = false;
    for bullet in state.enemy_bullets.iter_mut().filter(|b| b.is_alive()) {
        let bullet_box = Aabb::from_center(bullet.pos, Vec2::splat(ENEMY_BULLET_RADIUS * 2.0))
            .scaled(ENEMY_BULLET_HIT_RATIO);
        if hitbox.overlaps(&bullet_box) {
            bullet.lifespan = 0;
            struck = true;
        }
    }
    if struck {
        strike_player(state);
    }
}

fn player_vs_ufos(state: &mut SimulationState) {
    if !player_exposed(state) {
        return;
    }
    let hitbox = player_box(state).scaled(UFO_HIT_RATIO);

    let mut struck = false;
    for ufo in state.ufos.iter_mut().filter(|u| u.is_alive()) {
        let ufo_box = Aabb::from_center(ufo.pos, ufo.box_size()).scaled(UFO_HIT_RATIO);
        if hitbox.overlaps(&ufo_box) {
            ufo.health = 0;
            struck = true;
        }
    }
    if struck {
        strike_player(state);
    }
}

fn player_vs_mines(state: &mut SimulationState) {
    if !player_exposed(state) {
        return;
    }
    let pos = state.player.pos;
    let reach = state.player.size() * MINE_HIT_RATIO;

    let mut struck = false;
    for mine in state.mines.iter_mut().filter(|m| m.is_alive()) {
        if circles_overlap(pos, reach, mine.pos, HUNTER_MINE_SIZE * MINE_HIT_RATIO) {
            mine.destroyed = true;
            struck = true;
        }
    }
    if struck {
        strike_player(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Asteroid, EnemyBullet, EnemyCraft, HunterMine, UfoKind};

    fn playing_state() -> SimulationState {
        let mut state = SimulationState::new(7, 256);
        state.mode = GameMode::Playing;
        state.player.invulnerable_timer = 0;
        state
    }

    fn add_rock(state: &mut SimulationState, pos: Vec2, size: AsteroidSize) -> usize {
        let id = state.next_entity_id();
        let rock = Asteroid::new(id, Some(pos), size, 1, &mut state.rng);
        state.asteroids.push(rock);
        state.asteroids.len() - 1
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
    }

    #[test]
    fn test_segment_circle_hit() {
        let a = Vec2::ZERO;
        let b = Vec2::new(100.0, 0.0);
        assert!(segment_circle_hit(a, b, Vec2::new(50.0, 5.0), 10.0));
        assert!(!segment_circle_hit(a, b, Vec2::new(50.0, 15.0), 10.0));
        // Past the end of the segment
        assert!(!segment_circle_hit(a, b, Vec2::new(120.0, 0.0), 10.0));
        assert!(segment_circle_hit(a, a, Vec2::new(3.0, 0.0), 5.0));
    }

    #[test]
    fn test_aabb_overlap_with_shrink() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(20.0));
        let b = Aabb::from_center(Vec2::new(18.0, 0.0), Vec2::splat(20.0));
        assert!(a.overlaps(&b));
        assert!(!a.scaled(0.8).overlaps(&b.scaled(0.8)));
    }

    #[test]
    fn test_bullet_chips_then_kills_large_asteroid() {
        let mut state = playing_state();
        let at = Vec2::new(600.0, 300.0);
        let idx = add_rock(&mut state, at, AsteroidSize::Large);

        for expected in [2, 1] {
            state.bullets.push(Projectile::bullet(at, 0.0));
            resolve_collisions(&mut state);
            assert_eq!(state.asteroids[idx].health, expected);
            assert_eq!(state.asteroids[idx].hit_flash_timer, HIT_FLASH_TIME);
            state.prune();
        }

        state.bullets.push(Projectile::bullet(at, 0.0));
        resolve_collisions(&mut state);
        state.prune();

        assert_eq!(state.player.score, SCORE_LARGE_ASTEROID);
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Medium));
        assert!(state.asteroids.iter().all(|a| a.pos == at));
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_laser_kills_outright_along_beam() {
        let mut state = playing_state();
        let idx = add_rock(&mut state, Vec2::new(700.0, 100.0), AsteroidSize::Large);
        state.bullets.push(Projectile::laser(Vec2::new(100.0, 100.0), 0.0));

        resolve_collisions(&mut state);
        assert_eq!(state.asteroids[idx].health, 0);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::AsteroidDestroyed {
                size: AsteroidSize::Large,
                ..
            }
        )));
    }

    #[test]
    fn test_one_bullet_hits_one_asteroid() {
        let mut state = playing_state();
        let at = Vec2::new(600.0, 300.0);
        let first = add_rock(&mut state, at, AsteroidSize::Large);
        let second = add_rock(&mut state, at, AsteroidSize::Large);
        state.bullets.push(Projectile::bullet(at, 0.0));

        resolve_collisions(&mut state);
        assert_eq!(state.asteroids[first].health, 2);
        assert_eq!(state.asteroids[second].health, 3);
    }

    #[test]
    fn test_overlapping_bullets_count_once() {
        let mut state = playing_state();
        let at = Vec2::new(600.0, 300.0);
        let idx = add_rock(&mut state, at, AsteroidSize::Large);
        for _ in 0..3 {
            state.bullets.push(Projectile::bullet(at, 0.0));
        }

        resolve_collisions(&mut state);
        assert_eq!(state.asteroids[idx].health, 2);
        assert!(state.bullets.iter().all(|b| !b.is_alive()));
    }

    #[test]
    fn test_asteroid_contact_takes_a_life() {
        let mut state = playing_state();
        let center = state.player.pos;
        add_rock(&mut state, center, AsteroidSize::Small);

        resolve_collisions(&mut state);
        assert_eq!(state.player.lives, 2);
        assert!(state.player.is_invulnerable());
        assert_eq!(state.effects.fragments.len(), 3);
        assert_eq!(state.fx.shake_timer, SHAKE_PLAYER_HIT);
        assert!(state.events.contains(&GameEvent::PlayerHit { lives: 2 }));
    }

    #[test]
    fn test_last_life_ends_the_run() {
        let mut state = playing_state();
        state.player.lives = 1;
        let center = state.player.pos;
        add_rock(&mut state, center, AsteroidSize::Large);

        resolve_collisions(&mut state);
        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.player.lives, 0);
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_invulnerable_player_ignores_asteroids() {
        let mut state = playing_state();
        state.player.invulnerable_timer = 10;
        let center = state.player.pos;
        add_rock(&mut state, center, AsteroidSize::Large);

        resolve_collisions(&mut state);
        assert_eq!(state.player.lives, 3);
    }

    #[test]
    fn test_near_miss_awards_flat_bonus() {
        let mut state = playing_state();
        let pos = state.player.pos + Vec2::new(ASTEROID_SMALL_SIZE + 20.0, 0.0);
        add_rock(&mut state, pos, AsteroidSize::Small);

        resolve_collisions(&mut state);
        assert_eq!(state.player.score, SCORE_NEAR_MISS);
        assert_eq!(state.player.flow_level, 1);
        assert_eq!(state.player.near_miss_cooldown, PLAYER_NEAR_MISS_COOLDOWN);
        assert!(state.events.contains(&GameEvent::NearMiss));

        // Cooldown blocks a second bonus next frame
        resolve_collisions(&mut state);
        assert_eq!(state.player.score, SCORE_NEAR_MISS);
    }

    #[test]
    fn test_overlap_beats_earlier_near_miss() {
        let mut state = playing_state();
        let graze = state.player.pos + Vec2::new(ASTEROID_SMALL_SIZE + 20.0, 0.0);
        let on_top = state.player.pos;
        add_rock(&mut state, graze, AsteroidSize::Small);
        add_rock(&mut state, on_top, AsteroidSize::Large);
        let lives = state.player.lives;

        resolve_collisions(&mut state);
        assert_eq!(state.player.lives, lives - 1);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.near_miss_cooldown, 0);
        assert!(!state.events.contains(&GameEvent::NearMiss));
    }

    #[test]
    fn test_powerup_pickup() {
        let mut state = playing_state();
        let id = state.next_entity_id();
        let pos = state.player.pos;
        state
            .powerups
            .push(PowerUp::new(id, PowerUpKind::Shield, pos));

        resolve_collisions(&mut state);
        assert!(state.player.is_shielded);
        assert!(!state.powerups[0].is_alive());
        assert!(
            state
                .events
                .contains(&GameEvent::PowerUpCollected(PowerUpKind::Shield))
        );
    }

    #[test]
    fn test_elite_ufo_needs_two_bullets() {
        let mut state = playing_state();
        let id = state.next_entity_id();
        let mut ufo = EnemyCraft::new(id, UfoKind::Elite, &mut state.rng);
        ufo.pos = Vec2::new(200.0, 100.0);
        state.ufos.push(ufo);

        state.bullets.push(Projectile::bullet(Vec2::new(200.0, 100.0), 0.0));
        resolve_collisions(&mut state);
        assert_eq!(state.ufos[0].health, 1);
        assert_eq!(state.player.score, 0);

        state.prune();
        state.bullets.push(Projectile::bullet(Vec2::new(200.0, 100.0), 0.0));
        resolve_collisions(&mut state);
        assert_eq!(state.ufos[0].health, 0);
        assert_eq!(state.player.score, SCORE_ELITE_UFO);
        assert_eq!(state.fx.glitch_timer, crate::sim::state::GLITCH_TIME);
    }

    #[test]
    fn test_bullet_destroys_mine() {
        let mut state = playing_state();
        let id = state.next_entity_id();
        state.mines.push(HunterMine::new(id, Vec2::new(100.0, 100.0)));
        state.bullets.push(Projectile::bullet(Vec2::new(104.0, 100.0), 0.0));

        resolve_collisions(&mut state);
        assert!(!state.mines[0].is_alive());
        assert_eq!(state.player.score, SCORE_HUNTER_MINE);
    }

    #[test]
    fn test_enemy_bullet_hits_player_and_is_consumed() {
        let mut state = playing_state();
        let pos = state.player.pos;
        state.enemy_bullets.push(EnemyBullet::new(pos, 0.0));

        resolve_collisions(&mut state);
        assert_eq!(state.player.lives, 2);
        assert!(!state.enemy_bullets[0].is_alive());
    }

    #[test]
    fn test_ramming_a_ufo_destroys_it() {
        let mut state = playing_state();
        let id = state.next_entity_id();
        let mut ufo = EnemyCraft::new(id, UfoKind::Normal, &mut state.rng);
        ufo.pos = state.player.pos;
        state.ufos.push(ufo);

        resolve_collisions(&mut state);
        assert!(!state.ufos[0].is_alive());
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.score, 0);
    }

    #[test]
    fn test_one_hit_per_frame_after_respawn() {
        let mut state = playing_state();
        let pos = state.player.pos;
        state.enemy_bullets.push(EnemyBullet::new(pos, 0.0));
        let id = state.next_entity_id();
        state.mines.push(HunterMine::new(id, pos));

        resolve_collisions(&mut state);
        // The respawn window protects the player from the mine
        assert_eq!(state.player.lives, 2);
        assert!(state.mines[0].is_alive());
    }
}
