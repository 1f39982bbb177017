//! Simulation state and core types
//!
//! Everything the frame loop mutates lives in `SimulationState`. Collaborators
//! (renderer, audio, persistence) only ever see it by reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{Effects, Explosion, Starfield};
use super::entities::{
    Asteroid, AsteroidSize, EnemyBullet, EnemyCraft, HunterMine, PowerUp, PowerUpKind, Projectile,
    UfoKind,
};
use super::player::{Player, ShipKind};
use crate::consts::*;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen with drifting asteroids
    StartMenu,
    /// Ship catalog browser
    ShipSelect,
    /// A run is in progress (possibly inside a pause sub-timer)
    Playing,
    /// Run ended
    GameOver,
}

/// Finer view of the mode, with `Playing` split by its pause sub-timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    StartMenu,
    ShipSelect,
    /// Countdown before the first level
    Starting,
    Playing,
    BossWarningPause,
    LevelClearPause,
    GameOver,
}

/// Things that happened during a frame, drained by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shot { laser: bool },
    AsteroidChipped,
    AsteroidDestroyed { size: AsteroidSize, award: u64 },
    UfoDestroyed { kind: UfoKind, award: u64 },
    MineDestroyed { award: u64 },
    UfoFired,
    MineFired,
    PowerUpCollected(PowerUpKind),
    NearMiss,
    FlowUp { level: u32 },
    HyperflowStarted,
    ExtraLife { lives: u32 },
    PlayerHit { lives: u32 },
    Dash,
    Hyperspace,
    BossWarning { level: u32 },
    BossSpawned { count: u32 },
    LevelCleared { level: u32 },
    LevelStarted { level: u32 },
    RunStarted { ship: ShipKind },
    GameOver { score: u64, level: u32 },
}

/// Camera and post-processing cues
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenFx {
    pub shake_timer: u32,
    pub glitch_timer: u32,
    pub zoom: f32,
}

impl Default for ScreenFx {
    fn default() -> Self {
        Self {
            shake_timer: 0,
            glitch_timer: 0,
            zoom: 1.0,
        }
    }
}

impl ScreenFx {
    /// Request a shake; a longer running shake wins
    pub fn shake(&mut self, frames: u32) {
        self.shake_timer = self.shake_timer.max(frames);
    }

    pub fn update(&mut self, dashing: bool) {
        self.shake_timer = self.shake_timer.saturating_sub(1);
        self.glitch_timer = self.glitch_timer.saturating_sub(1);
        let target = if dashing { 0.95 } else { 1.0 };
        self.zoom += (target - self.zoom) * 0.1;
    }
}

pub const GLITCH_TIME: u32 = 5;

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub mode: GameMode,
    /// Current level (1-based)
    pub level: u32,
    pub player: Player,

    pub bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub asteroids: Vec<Asteroid>,
    pub ufos: Vec<EnemyCraft>,
    pub mines: Vec<HunterMine>,
    pub powerups: Vec<PowerUp>,

    /// Visual effects (not gameplay-affecting)
    pub effects: Effects,
    pub fx: ScreenFx,
    pub starfield: Starfield,
    /// Background rocks on the title and ship-select screens
    pub menu_asteroids: Vec<Asteroid>,

    pub ufo_spawn_timer: u32,
    /// Boss warning countdown (BossWarningPause)
    pub warning_timer: u32,
    /// Level clear countdown (LevelClearPause)
    pub level_clear_timer: u32,
    /// Countdown before a new run starts moving
    pub start_timer: u32,

    /// Highlighted entry in the ship catalog
    pub ship_select_index: usize,

    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    next_id: u32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl SimulationState {
    /// Fresh state sitting on the title screen
    pub fn new(seed: u64, max_particles: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = Starfield::new(&mut rng);
        let mut state = Self {
            mode: GameMode::StartMenu,
            level: 1,
            player: Player::new(ShipKind::default()),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            asteroids: Vec::new(),
            ufos: Vec::new(),
            mines: Vec::new(),
            powerups: Vec::new(),
            effects: Effects::new(max_particles),
            fx: ScreenFx::default(),
            starfield,
            menu_asteroids: Vec::new(),
            ufo_spawn_timer: UFO_SPAWN_TIME_MAX,
            warning_timer: 0,
            level_clear_timer: 0,
            start_timer: 0,
            ship_select_index: 0,
            events: Vec::new(),
            rng,
            next_id: 1,
        };

        for _ in 0..5 {
            let id = state.next_entity_id();
            let rock = Asteroid::new(id, None, AsteroidSize::Large, 0, &mut state.rng);
            state.menu_asteroids.push(rock);
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Children of a destroyed asteroid, with fresh IDs
    pub fn split_asteroid(&mut self, rock: &Asteroid) -> Vec<Asteroid> {
        let Self {
            rng, next_id, level, ..
        } = self;
        rock.split(*level, rng, || {
            let id = *next_id;
            *next_id += 1;
            id
        })
    }

    /// Derived phase for HUD and callers
    pub fn phase(&self) -> Phase {
        match self.mode {
            GameMode::StartMenu => Phase::StartMenu,
            GameMode::ShipSelect => Phase::ShipSelect,
            GameMode::GameOver => Phase::GameOver,
            GameMode::Playing if self.warning_timer > 0 => Phase::BossWarningPause,
            GameMode::Playing if self.start_timer > 0 => Phase::Starting,
            GameMode::Playing if self.level_clear_timer > 0 => Phase::LevelClearPause,
            GameMode::Playing => Phase::Playing,
        }
    }

    /// Any pause sub-timer running inside `Playing`
    pub fn is_paused(&self) -> bool {
        self.warning_timer > 0 || self.start_timer > 0 || self.level_clear_timer > 0
    }

    pub fn selected_ship(&self) -> ShipKind {
        ShipKind::ALL[self.ship_select_index % ShipKind::ALL.len()]
    }

    /// Drop every gameplay collection
    pub fn clear_entities(&mut self) {
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.asteroids.clear();
        self.ufos.clear();
        self.mines.clear();
        self.powerups.clear();
        self.effects.clear();
    }

    /// Spawn an explosion, forwarding its glitch request to the screen effects
    pub fn explode(&mut self, pos: Vec2, explosion: &Explosion) {
        if self.effects.explode(pos, explosion, &mut self.rng) {
            self.fx.glitch_timer = GLITCH_TIME;
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Remove everything that died this frame
    pub fn prune(&mut self) {
        self.bullets.retain(|b| b.is_alive());
        self.enemy_bullets.retain(|b| b.is_alive());
        self.asteroids.retain(|a| a.is_alive());
        self.ufos.retain(|u| u.is_alive());
        self.mines.retain(|m| m.is_alive());
        self.powerups.retain(|p| p.is_alive());
    }

    /// Nothing left that must be destroyed to clear the level
    pub fn level_is_clear(&self) -> bool {
        self.asteroids.is_empty()
            && self.ufos.is_empty()
            && self.mines.is_empty()
            && self.warning_timer == 0
            && self.level_clear_timer == 0
    }
}
