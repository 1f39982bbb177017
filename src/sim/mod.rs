//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering,
//! audio, input and file I/O:
//! - One tick per frame, fixed timestep
//! - Seeded RNG owned by the state
//! - Separate arenas per entity kind, pruned at end of frame
//! - Side effects surface as `GameEvent`s for the session to act on

pub mod collision;
pub mod effects;
pub mod entities;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, circles_overlap, resolve_collisions, segment_circle_hit};
pub use effects::{
    Debris, Effects, Explosion, FloatingText, HullFragment, Particle, Shockwave, Starfield, Tint,
};
pub use entities::{
    Asteroid, AsteroidSize, EnemyBullet, EnemyCraft, HunterMine, PowerUp, PowerUpKind, Projectile,
    UfoKind,
};
pub use player::{Controls, Player, ShipKind, ShipStats};
pub use spawner::{is_boss_level, is_minefield_level, spawn_asteroids, spawn_boss_wave};
pub use state::{GameEvent, GameMode, Phase, ScreenFx, SimulationState};
pub use tick::{TickInput, start_new_game, tick};
