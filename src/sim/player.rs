//! Player ship, ship catalog and the flow/Hyperflow combo machine

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{PowerUpKind, Projectile};
use crate::consts::*;
use crate::{heading, screen_center, wrap_position};

/// Tuning for one ship archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipStats {
    pub size: f32,
    pub thrust: f32,
    /// Degrees per frame
    pub turn_speed: f32,
    /// Velocity multiplier applied every frame
    pub friction: f32,
    pub lives: u32,
    pub shoot_cooldown: u32,
    /// Credits needed to unlock
    pub cost: u64,
}

/// Selectable ship archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShipKind {
    #[default]
    Cruiser,
    Interceptor,
    Heavy,
}

impl ShipKind {
    pub const ALL: [ShipKind; 3] = [ShipKind::Cruiser, ShipKind::Interceptor, ShipKind::Heavy];

    pub fn stats(self) -> ShipStats {
        match self {
            ShipKind::Cruiser => ShipStats {
                size: 15.0,
                thrust: 0.2,
                turn_speed: 5.0,
                friction: 0.99,
                lives: 3,
                shoot_cooldown: 15,
                cost: 0,
            },
            ShipKind::Interceptor => ShipStats {
                size: 12.0,
                thrust: 0.25,
                turn_speed: 7.0,
                friction: 0.995,
                lives: 3,
                shoot_cooldown: 10,
                cost: 5000,
            },
            ShipKind::Heavy => ShipStats {
                size: 18.0,
                thrust: 0.18,
                turn_speed: 4.0,
                friction: 0.985,
                lives: 4,
                shoot_cooldown: 20,
                cost: 7500,
            },
        }
    }

    /// Name used in the saved profile
    pub fn name(self) -> &'static str {
        match self {
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Interceptor => "Interceptor",
            ShipKind::Heavy => "Heavy",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ShipKind::Cruiser => "The balanced all-rounder.",
            ShipKind::Interceptor => "Fast & agile. Hard to stop.",
            ShipKind::Heavy => "Slow but tough. Starts with 4 lives.",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Steering input for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct Controls {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Silhouette snapshot left behind while thrusting or dashing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailSnapshot {
    pub points: [Vec2; 3],
    pub lifespan: u32,
}

/// The player's ship.
///
/// The countdown timers are independent and may overlap. Legal combinations:
///
/// | state | encoded by | notes |
/// |-------|------------|-------|
/// | invulnerable | `invulnerable_timer > 0` | respawn, level start, dash, shield |
/// | shielded | `is_shielded` | only while `invulnerable_timer > 0`; cleared when it runs out |
/// | dashing | `dash_timer > 0` | steering suspended; always invulnerable; may overlap a shield |
/// | warping | `hyperspace_warp_timer > 0` | cosmetic only |
/// | triple shot | `triple_shot_timer > 0` | ignored by `shoot` while Hyperflow runs |
/// | Hyperflow | `flow_state_timer > 0` | lasers, half cooldown, double score; flow level frozen |
/// | dead | `lives == 0` | terminal; `hit` is a no-op until a fresh `Player` is built |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub ship: ShipKind,
    pub stats: ShipStats,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing in degrees (-90 points up)
    pub angle: f32,
    pub lives: u32,
    pub score: u64,
    /// Score at which the next bonus life is granted
    pub next_life_score: u64,
    pub thrusting: bool,
    pub is_shielded: bool,
    pub flow_level: u32,

    pub invulnerable_timer: u32,
    pub shoot_cooldown: u32,
    pub hyperspace_cooldown: u32,
    pub hyperspace_warp_timer: u32,
    pub dash_cooldown: u32,
    pub dash_timer: u32,
    pub near_miss_cooldown: u32,
    pub triple_shot_timer: u32,
    /// Combo decay countdown
    pub flow_timer: u32,
    /// Hyperflow countdown
    pub flow_state_timer: u32,
    /// HUD wobble after each flow increase
    pub flow_text_shake_timer: u32,

    pub trail: Vec<TrailSnapshot>,
    trail_timer: u32,
}

impl Player {
    pub fn new(ship: ShipKind) -> Self {
        let stats = ship.stats();
        let mut player = Self {
            ship,
            stats,
            pos: screen_center(),
            vel: Vec2::ZERO,
            angle: -90.0,
            lives: stats.lives,
            score: 0,
            next_life_score: SCORE_FOR_EXTRA_LIFE,
            thrusting: false,
            is_shielded: false,
            flow_level: 1,
            invulnerable_timer: 0,
            shoot_cooldown: 0,
            hyperspace_cooldown: 0,
            hyperspace_warp_timer: 0,
            dash_cooldown: 0,
            dash_timer: 0,
            near_miss_cooldown: 0,
            triple_shot_timer: 0,
            flow_timer: 0,
            flow_state_timer: 0,
            flow_text_shake_timer: 0,
            trail: Vec::new(),
            trail_timer: 0,
        };
        player.reset();
        player
    }

    /// Back to center with a fresh invulnerability window; lives and score survive
    pub fn reset(&mut self) {
        self.pos = screen_center();
        self.vel = Vec2::ZERO;
        self.angle = -90.0;
        self.invulnerable_timer = PLAYER_INVULN_TIME;
        self.thrusting = false;
        self.shoot_cooldown = 0;
        self.hyperspace_cooldown = 0;
        self.hyperspace_warp_timer = 0;
        self.dash_cooldown = 0;
        self.dash_timer = 0;
        self.near_miss_cooldown = 0;
        self.is_shielded = false;
        self.flow_level = 1;
        self.flow_timer = 0;
        self.triple_shot_timer = 0;
        self.flow_state_timer = 0;
        self.flow_text_shake_timer = 0;
        self.trail.clear();
        self.trail_timer = 0;
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.stats.size
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0 || self.is_shielded
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0
    }

    #[inline]
    pub fn in_hyperflow(&self) -> bool {
        self.flow_state_timer > 0
    }

    /// Nose and the two rear corners
    pub fn ship_points(&self) -> [Vec2; 3] {
        let size = self.size();
        [
            self.pos + heading(self.angle) * size,
            self.pos + heading(self.angle + 140.0) * size,
            self.pos + heading(self.angle - 140.0) * size,
        ]
    }

    /// Advance one frame
    pub fn update(&mut self, controls: &Controls) {
        if self.dash_timer > 0 {
            // Dash overrides steering
            self.dash_timer -= 1;
        } else {
            self.thrusting = false;
            if controls.turn_left {
                self.angle -= self.stats.turn_speed;
            }
            if controls.turn_right {
                self.angle += self.stats.turn_speed;
            }
            if controls.thrust {
                self.thrusting = true;
                self.vel += heading(self.angle) * self.stats.thrust;
            }
        }

        self.vel *= self.stats.friction;
        self.pos = wrap_position(self.pos + self.vel);

        countdown(&mut self.invulnerable_timer);
        if self.invulnerable_timer == 0 {
            self.is_shielded = false;
        }
        countdown(&mut self.shoot_cooldown);
        countdown(&mut self.hyperspace_cooldown);
        countdown(&mut self.hyperspace_warp_timer);
        countdown(&mut self.dash_cooldown);
        countdown(&mut self.near_miss_cooldown);
        countdown(&mut self.triple_shot_timer);
        countdown(&mut self.flow_state_timer);
        countdown(&mut self.flow_text_shake_timer);

        countdown(&mut self.flow_timer);
        if self.flow_timer == 0 {
            self.flow_level = 1;
        }

        self.update_trail();
    }

    fn update_trail(&mut self) {
        countdown(&mut self.trail_timer);
        let dashing = self.dash_timer > 0;
        if (self.thrusting || dashing) && self.trail_timer == 0 {
            self.trail.push(TrailSnapshot {
                points: self.ship_points(),
                lifespan: PLAYER_TRAIL_LIFESPAN,
            });
            self.trail_timer = if dashing { 1 } else { PLAYER_TRAIL_INTERVAL };
        }

        for snap in &mut self.trail {
            snap.lifespan = snap.lifespan.saturating_sub(1);
        }
        self.trail.retain(|s| s.lifespan > 0);
    }

    /// Fire according to the active mode. Empty while on cooldown.
    pub fn shoot(&mut self) -> Vec<Projectile> {
        if self.shoot_cooldown > 0 {
            return Vec::new();
        }
        self.shoot_cooldown = self.stats.shoot_cooldown;
        let muzzle = self.pos + heading(self.angle) * self.size();

        if self.in_hyperflow() {
            self.shoot_cooldown = self.stats.shoot_cooldown / 2;
            vec![Projectile::laser(muzzle, self.angle)]
        } else if self.triple_shot_timer > 0 {
            vec![
                Projectile::bullet(muzzle, self.angle),
                Projectile::bullet(muzzle, self.angle - 15.0),
                Projectile::bullet(muzzle, self.angle + 15.0),
            ]
        } else {
            vec![Projectile::bullet(muzzle, self.angle)]
        }
    }

    /// Jump to a random on-screen position. Returns whether the jump happened.
    pub fn hyperspace<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.hyperspace_cooldown > 0 {
            return false;
        }
        self.pos = Vec2::new(
            rng.random_range(0.0..=SCREEN_WIDTH),
            rng.random_range(0.0..=SCREEN_HEIGHT),
        );
        self.vel = Vec2::ZERO;
        self.hyperspace_cooldown = PLAYER_HYPERSPACE_COOLDOWN;
        self.hyperspace_warp_timer = PLAYER_HYPERSPACE_WARP_TIME;
        true
    }

    /// Burst forward, invulnerable for the dash. Returns whether the dash happened.
    pub fn dash(&mut self) -> bool {
        if self.dash_cooldown > 0 {
            return false;
        }
        self.dash_cooldown = PLAYER_DASH_COOLDOWN;
        self.dash_timer = PLAYER_DASH_DURATION;
        self.vel += heading(self.angle) * PLAYER_DASH_POWER;
        // A running shield keeps its longer window
        self.invulnerable_timer = self.invulnerable_timer.max(PLAYER_DASH_DURATION);
        true
    }

    /// Take a hit. Returns `(registered, fatal)`.
    pub fn hit(&mut self) -> (bool, bool) {
        if self.is_invulnerable() || self.is_dead() {
            return (false, false);
        }
        self.lives -= 1;
        self.flow_level = 1;
        self.flow_timer = 0;
        self.flow_state_timer = 0;

        let fatal = self.lives == 0;
        if !fatal {
            self.reset();
        }
        (true, fatal)
    }

    pub fn add_powerup(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => {
                self.invulnerable_timer = POWERUP_SHIELD_TIME;
                self.is_shielded = true;
            }
            PowerUpKind::TripleShot => {
                self.triple_shot_timer = POWERUP_TRIPLE_SHOT_TIME;
            }
        }
    }

    /// Award points scaled by the combo. Returns the final award.
    pub fn add_score(&mut self, points: u64) -> u64 {
        let hyperflow_bonus = if self.in_hyperflow() { 2 } else { 1 };
        let award = points * self.flow_level as u64 * hyperflow_bonus;
        self.score += award;
        self.flow_timer = FLOW_DURATION;

        if !self.in_hyperflow() {
            self.flow_level += 1;
            self.flow_text_shake_timer = FLOW_TEXT_SHAKE_TIME;
            if self.flow_level >= FLOW_STATE_TRIGGER {
                self.flow_state_timer = FLOW_STATE_DURATION;
                self.flow_level = 1;
            }
        }

        self.check_extra_life();
        award
    }

    /// Flat bonus for a close pass; leaves the combo alone
    pub fn add_near_miss(&mut self) {
        self.score += SCORE_NEAR_MISS;
        self.near_miss_cooldown = PLAYER_NEAR_MISS_COOLDOWN;
    }

    fn check_extra_life(&mut self) -> bool {
        if self.score >= self.next_life_score {
            self.lives += 1;
            self.next_life_score += SCORE_FOR_EXTRA_LIFE;
            return true;
        }
        false
    }
}

#[inline]
fn countdown(timer: &mut u32) {
    *timer = timer.saturating_sub(1);
}
