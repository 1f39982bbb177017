//! Hyperflow Asteroids - an Asteroids variant with a combo "flow" meter
//!
//! Core modules:
//! - `sim`: Per-frame simulation (player, entities, spawning, collisions, modes)
//! - `session`: Mode glue between the simulation and injected collaborators
//! - `renderer`: Primitive drawing boundary and scene composition
//! - `platform`: Input abstraction
//! - `persistence`: High score and profile storage
//! - `settings`: Runtime configuration

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Timers are in frames, speeds in pixels per frame.
pub mod consts {
    /// Fixed simulation rate (one tick per rendered frame)
    pub const SIM_HZ: u32 = 60;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    // --- Player ---
    pub const PLAYER_INVULN_TIME: u32 = 180;
    pub const PLAYER_HYPERSPACE_COOLDOWN: u32 = 300;
    pub const PLAYER_HYPERSPACE_WARP_TIME: u32 = 15;
    pub const PLAYER_DASH_COOLDOWN: u32 = 120;
    pub const PLAYER_DASH_DURATION: u32 = 10;
    pub const PLAYER_DASH_POWER: f32 = 12.0;
    pub const PLAYER_NEAR_MISS_COOLDOWN: u32 = 10;
    pub const PLAYER_TRAIL_LIFESPAN: u32 = 10;
    pub const PLAYER_TRAIL_INTERVAL: u32 = 3;
    pub const FLOW_TEXT_SHAKE_TIME: u32 = 15;
    /// Invulnerability granted when a new level starts
    pub const LEVEL_START_INVULN_TIME: u32 = PLAYER_INVULN_TIME / 2;

    // --- Projectiles ---
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_LIFESPAN: u32 = 45;
    pub const BULLET_RADIUS: f32 = 2.0;
    pub const LASER_LIFESPAN: u32 = 5;
    /// Length of the Hyperflow beam
    pub const LASER_RANGE: f32 = 1000.0;
    pub const MAX_BULLETS: usize = 10;
    pub const ENEMY_BULLET_SPEED: f32 = 6.0;
    pub const ENEMY_BULLET_LIFESPAN: u32 = 70;
    pub const ENEMY_BULLET_RADIUS: f32 = 3.0;

    // --- Asteroids ---
    pub const ASTEROID_BASE_SPEED: f32 = 1.2;
    pub const ASTEROID_SPEED_LEVEL_SCALE: f32 = 0.12;
    pub const ASTEROID_LARGE_SIZE: f32 = 40.0;
    pub const ASTEROID_MEDIUM_SIZE: f32 = 20.0;
    pub const ASTEROID_SMALL_SIZE: f32 = 10.0;
    pub const ASTEROID_START_COUNT: u32 = 4;
    pub const ASTEROID_NEAR_MISS_RADIUS: f32 = 30.0;
    pub const ASTEROID_SPAWN_GROW_TIME: u32 = 20;
    pub const HIT_FLASH_TIME: u32 = 5;

    // --- UFOs ---
    pub const UFO_SPAWN_TIME_MIN: u32 = 800;
    pub const UFO_SPAWN_TIME_MAX: u32 = 1500;
    pub const UFO_SPEED: f32 = 2.5;
    pub const UFO_SHOOT_COOLDOWN: u32 = 90;
    pub const ELITE_UFO_SHOOT_COOLDOWN: u32 = 70;
    pub const ELITE_UFO_SPEED_SCALE: f32 = 1.3;
    pub const ELITE_UFO_CHANCE: f64 = 0.4;
    pub const BOSS_WARNING_TIME: u32 = 120;

    // --- Hunter mines ---
    pub const HUNTER_MINE_SPAWN_CHANCE: f64 = 0.3;
    pub const HUNTER_MINE_CHARGE_TIME: u32 = 120;
    pub const HUNTER_MINE_SIZE: f32 = 8.0;

    // --- Spawn placement ---
    pub const ASTEROID_SAFE_RADIUS: f32 = 150.0;
    pub const MINE_SAFE_RADIUS: f32 = 100.0;
    pub const SPAWN_MAX_ATTEMPTS: u32 = 64;

    // --- Powerups ---
    pub const POWERUP_DROP_CHANCE_SMALL: f64 = 0.1;
    pub const POWERUP_DROP_CHANCE_MEDIUM: f64 = 0.05;
    pub const POWERUP_LIFESPAN: u32 = 400;
    pub const POWERUP_SIZE: f32 = 10.0;
    pub const POWERUP_SHIELD_TIME: u32 = 300;
    pub const POWERUP_TRIPLE_SHOT_TIME: u32 = 300;

    // --- Score & flow ---
    pub const SCORE_FOR_EXTRA_LIFE: u64 = 10_000;
    pub const SCORE_LARGE_ASTEROID: u64 = 20;
    pub const SCORE_MEDIUM_ASTEROID: u64 = 50;
    pub const SCORE_SMALL_ASTEROID: u64 = 100;
    pub const SCORE_UFO: u64 = 200;
    pub const SCORE_ELITE_UFO: u64 = 400;
    pub const SCORE_HUNTER_MINE: u64 = 75;
    pub const SCORE_NEAR_MISS: u64 = 5;
    pub const CREDITS_PER_SCORE: u64 = 100;
    pub const FLOW_DURATION: u32 = 240;
    pub const FLOW_STATE_TRIGGER: u32 = 10;
    pub const FLOW_STATE_DURATION: u32 = 420;

    // --- Collision forgiveness ---
    pub const POWERUP_HIT_RATIO: f32 = 0.8;
    pub const ENEMY_BULLET_HIT_RATIO: f32 = 0.7;
    pub const UFO_HIT_RATIO: f32 = 0.8;
    pub const MINE_HIT_RATIO: f32 = 0.8;

    // --- Mode timers ---
    pub const GAME_START_TIME: u32 = 180;
    pub const LEVEL_CLEAR_TIME: u32 = 120;
}

/// Toroidal wrap of one coordinate: below zero jumps to `max`, past `max` jumps to zero
#[inline]
pub fn wrap(pos: f32, max: f32) -> f32 {
    if pos < 0.0 {
        max
    } else if pos > max {
        0.0
    } else {
        pos
    }
}

/// Wrap both axes against the screen
#[inline]
pub fn wrap_position(pos: Vec2) -> Vec2 {
    Vec2::new(
        wrap(pos.x, consts::SCREEN_WIDTH),
        wrap(pos.y, consts::SCREEN_HEIGHT),
    )
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg.to_radians()
}

#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad.to_degrees()
}

/// Unit vector pointing along an angle given in degrees
#[inline]
pub fn heading(deg: f32) -> Vec2 {
    let rad = deg_to_rad(deg);
    Vec2::new(rad.cos(), rad.sin())
}

/// Angle in degrees from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    rad_to_deg(d.y.atan2(d.x))
}

/// Screen center
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(consts::SCREEN_WIDTH / 2.0, consts::SCREEN_HEIGHT / 2.0)
}
