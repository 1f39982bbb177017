//! Ephemeral visual entities
//!
//! Particles, debris, shockwaves, floating score text and hull fragments.
//! None of these take part in collisions; every one dies purely by timeout.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::heading;

/// Semantic color tag, resolved to RGB by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    White,
    Grey,
    Red,
    Orange,
    Yellow,
    Cyan,
    Purple,
    Green,
    Blue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub lifespan: u32,
    pub max_lifespan: u32,
    pub tint: Tint,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debris {
    pub pos: Vec2,
    pub vel: Vec2,
    pub lifespan: u32,
    pub tint: Tint,
    pub size: f32,
}

/// Expanding ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shockwave {
    pub pos: Vec2,
    pub lifespan: u32,
    pub max_lifespan: u32,
    pub max_radius: f32,
    pub width: f32,
}

impl Shockwave {
    pub fn new(pos: Vec2, max_radius: f32, lifespan: u32, width: f32) -> Self {
        Self {
            pos,
            lifespan,
            max_lifespan: lifespan,
            max_radius,
            width,
        }
    }

    /// 0 at spawn, 1 at expiry
    pub fn progress(&self) -> f32 {
        (self.max_lifespan - self.lifespan) as f32 / self.max_lifespan.max(1) as f32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub tint: Tint,
    pub lifespan: u32,
}

impl FloatingText {
    /// Fades out over the last 20 frames
    pub fn alpha(&self) -> f32 {
        if self.lifespan < 20 {
            self.lifespan as f32 / 20.0
        } else {
            1.0
        }
    }
}

/// One edge of the player's hull, tumbling away after a hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HullFragment {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Endpoints relative to `pos`
    pub p1: Vec2,
    pub p2: Vec2,
    pub lifespan: u32,
    pub rotation: f32,
    pub rot_speed: f32,
}

pub const HULL_FRAGMENT_LIFESPAN: u32 = 90;
pub const FLOATING_TEXT_LIFESPAN: u32 = 60;

/// Recipe for an explosion burst
#[derive(Debug, Clone, Copy)]
pub struct Explosion {
    pub count: usize,
    pub palette: &'static [Tint],
    pub glitch: bool,
    pub shockwave: bool,
    pub debris: bool,
}

impl Explosion {
    pub const fn particles(count: usize, palette: &'static [Tint]) -> Self {
        Self {
            count,
            palette,
            glitch: false,
            shockwave: false,
            debris: false,
        }
    }

    pub const fn with_glitch(mut self) -> Self {
        self.glitch = true;
        self
    }

    pub const fn with_shockwave(mut self) -> Self {
        self.shockwave = true;
        self
    }

    pub const fn with_debris(mut self) -> Self {
        self.debris = true;
        self
    }
}

/// All live visual effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub debris: Vec<Debris>,
    pub shockwaves: Vec<Shockwave>,
    pub texts: Vec<FloatingText>,
    pub fragments: Vec<HullFragment>,
    /// Particle cap (0 disables particles and debris)
    pub max_particles: usize,
}

impl Effects {
    pub fn new(max_particles: usize) -> Self {
        Self {
            max_particles,
            ..Default::default()
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.debris.clear();
        self.shockwaves.clear();
        self.texts.clear();
        self.fragments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
            && self.debris.is_empty()
            && self.shockwaves.is_empty()
            && self.texts.is_empty()
            && self.fragments.is_empty()
    }

    /// Advance every effect one frame and drop the expired ones
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.lifespan = p.lifespan.saturating_sub(1);
        }
        for d in &mut self.debris {
            d.pos += d.vel;
            d.vel *= 0.99;
            d.lifespan = d.lifespan.saturating_sub(1);
        }
        for s in &mut self.shockwaves {
            s.lifespan = s.lifespan.saturating_sub(1);
        }
        for t in &mut self.texts {
            t.pos.y -= 1.0;
            t.lifespan = t.lifespan.saturating_sub(1);
        }
        for f in &mut self.fragments {
            f.pos += f.vel;
            f.vel *= 0.99;
            f.rotation += f.rot_speed;
            f.lifespan = f.lifespan.saturating_sub(1);
        }

        self.particles.retain(|p| p.lifespan > 0);
        self.debris.retain(|d| d.lifespan > 0);
        self.shockwaves.retain(|s| s.lifespan > 0);
        self.texts.retain(|t| t.lifespan > 0);
        self.fragments.retain(|f| f.lifespan > 0);
    }

    fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    /// Spawn an explosion burst. Returns whether it asked for a screen glitch.
    pub fn explode<R: Rng>(&mut self, pos: Vec2, explosion: &Explosion, rng: &mut R) -> bool {
        if explosion.palette.is_empty() {
            return explosion.glitch;
        }
        for _ in 0..explosion.count {
            let lifespan = rng.random_range(20..=40);
            let particle = Particle {
                pos,
                vel: Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-2.0..=2.0)),
                lifespan,
                max_lifespan: lifespan,
                tint: pick(explosion.palette, rng),
                size: rng.random_range(1..=3) as f32,
            };
            self.push_particle(particle);
        }
        if explosion.debris && self.max_particles > 0 {
            for _ in 0..explosion.count / 2 {
                self.debris.push(Debris {
                    pos,
                    vel: Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-2.0..=2.0)),
                    lifespan: rng.random_range(30..=60),
                    tint: pick(explosion.palette, rng),
                    size: rng.random_range(1..=3) as f32,
                });
            }
        }
        if explosion.shockwave {
            self.shockwaves.push(Shockwave::new(pos, 60.0, 30, 3.0));
        }
        explosion.glitch
    }

    pub fn float_text(&mut self, pos: Vec2, text: impl Into<String>, tint: Tint) {
        self.texts.push(FloatingText {
            pos,
            text: text.into(),
            tint,
            lifespan: FLOATING_TEXT_LIFESPAN,
        });
    }

    /// Break a hull outline into one tumbling fragment per edge
    pub fn hull_break<R: Rng>(&mut self, center: Vec2, vel: Vec2, points: &[Vec2], rng: &mut R) {
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.fragments.push(HullFragment {
                pos: center,
                vel: vel + Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-2.0..=2.0)),
                p1: a - center,
                p2: b - center,
                lifespan: HULL_FRAGMENT_LIFESPAN,
                rotation: 0.0,
                rot_speed: rng.random_range(-5.0..=5.0),
            });
        }
    }

    /// Exhaust puff behind a thrusting ship
    pub fn thruster<R: Rng>(&mut self, pos: Vec2, vel: Vec2, angle: f32, size: f32, rng: &mut R) {
        let back = heading(angle + 180.0);
        let lifespan = rng.random_range(15..=25);
        let particle = Particle {
            pos: pos + back * (size * 0.8),
            vel: vel
                + back * 2.0
                + Vec2::new(rng.random_range(-0.5..=0.5), rng.random_range(-0.5..=0.5)),
            lifespan,
            max_lifespan: lifespan,
            tint: pick(&[Tint::Orange, Tint::Yellow], rng),
            size: rng.random_range(1..=3) as f32,
        };
        self.push_particle(particle);
    }
}

fn random_point<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..SCREEN_WIDTH),
        rng.random_range(0.0..SCREEN_HEIGHT),
    )
}

fn pick<R: Rng>(palette: &[Tint], rng: &mut R) -> Tint {
    palette[rng.random_range(0..palette.len())]
}

/// Star layers scrolled against the player's velocity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Starfield {
    /// Far stars with their size (1..=3), scroll scaled by size
    pub far: Vec<(Vec2, f32)>,
    pub dust: Vec<Vec2>,
    pub near: Vec<Vec2>,
}

impl Starfield {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let far = (0..150)
            .map(|_| (random_point(rng), rng.random_range(1..=3) as f32))
            .collect();
        let dust = (0..70).map(|_| random_point(rng)).collect();
        let near = (0..50).map(|_| random_point(rng)).collect();
        Self { far, dust, near }
    }

    pub fn scroll(&mut self, player_vel: Vec2) {
        let bounds = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        for (p, size) in &mut self.far {
            *p = (*p - player_vel * 0.03 * *size).rem_euclid(bounds);
        }
        for p in &mut self.dust {
            *p = (*p - player_vel * 0.1).rem_euclid(bounds);
        }
        for p in &mut self.near {
            *p = (*p - player_vel * 0.2).rem_euclid(bounds);
        }
    }
}
