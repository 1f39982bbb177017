//! Gameplay entities: projectiles, asteroids, enemy craft, mines and pickups
//!
//! Each kind lives in its own arena (`Vec`) on the simulation state. Entities
//! carry their own per-frame update rule; cross-kind interaction happens in
//! the collision pass.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{angle_to, heading, wrap_position};

/// Player-fired shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Firing angle in degrees
    pub angle: f32,
    pub lifespan: u32,
    /// Instant-hit Hyperflow beam (zero velocity, short lifespan)
    pub is_laser: bool,
}

impl Projectile {
    pub fn bullet(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: heading(angle) * BULLET_SPEED,
            angle,
            lifespan: BULLET_LIFESPAN,
            is_laser: false,
        }
    }

    pub fn laser(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle,
            lifespan: LASER_LIFESPAN,
            is_laser: true,
        }
    }

    pub fn update(&mut self) {
        if !self.is_laser {
            self.pos = wrap_position(self.pos + self.vel);
        }
        self.lifespan = self.lifespan.saturating_sub(1);
    }

    /// Far end of the beam (lasers only reach, they never travel)
    pub fn beam_end(&self) -> Vec2 {
        self.pos + heading(self.angle) * LASER_RANGE
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifespan > 0
    }

    /// Mark as spent after registering a hit
    #[inline]
    pub fn consume(&mut self) {
        self.lifespan = 0;
    }
}

/// Shot fired by a UFO or a hunter mine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub lifespan: u32,
}

impl EnemyBullet {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: heading(angle) * ENEMY_BULLET_SPEED,
            lifespan: ENEMY_BULLET_LIFESPAN,
        }
    }

    pub fn update(&mut self) {
        self.pos = wrap_position(self.pos + self.vel);
        self.lifespan = self.lifespan.saturating_sub(1);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifespan > 0
    }
}

/// Asteroid size tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => ASTEROID_LARGE_SIZE,
            AsteroidSize::Medium => ASTEROID_MEDIUM_SIZE,
            AsteroidSize::Small => ASTEROID_SMALL_SIZE,
        }
    }

    pub fn health(self) -> i32 {
        match self {
            AsteroidSize::Large => 3,
            AsteroidSize::Medium => 2,
            AsteroidSize::Small => 1,
        }
    }

    /// Base points before the flow multiplier
    pub fn score(self) -> u64 {
        match self {
            AsteroidSize::Large => SCORE_LARGE_ASTEROID,
            AsteroidSize::Medium => SCORE_MEDIUM_ASTEROID,
            AsteroidSize::Small => SCORE_SMALL_ASTEROID,
        }
    }

    /// Tier produced when this one splits
    pub fn child(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    pub health: i32,
    /// Radial offsets of the silhouette, fixed at creation
    pub shape: Vec<f32>,
    /// Current rotation in degrees
    pub rotation: f32,
    pub rot_speed: f32,
    pub hit_flash_timer: u32,
    pub spawn_timer: u32,
}

impl Asteroid {
    /// Create an asteroid. Without a position it enters from a random screen edge.
    pub fn new<R: Rng>(
        id: u32,
        pos: Option<Vec2>,
        size: AsteroidSize,
        level: u32,
        rng: &mut R,
    ) -> Self {
        let pos = pos.unwrap_or_else(|| edge_position(rng));

        let angle = rng.random_range(0.0..360.0);
        let speed = ASTEROID_BASE_SPEED
            + level as f32 * ASTEROID_SPEED_LEVEL_SCALE
            + rng.random_range(-0.2..=0.2);

        let num_points = rng.random_range(8..=12);
        let shape = (0..num_points)
            .map(|_| rng.random_range(0.7..=1.3))
            .collect();

        Self {
            id,
            pos,
            vel: heading(angle) * speed,
            size,
            health: size.health(),
            shape,
            rotation: 0.0,
            rot_speed: rng.random_range(-1.5..=1.5),
            hit_flash_timer: 0,
            spawn_timer: ASTEROID_SPAWN_GROW_TIME,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    pub fn update(&mut self) {
        self.pos = wrap_position(self.pos + self.vel);
        self.rotation += self.rot_speed;
        self.hit_flash_timer = self.hit_flash_timer.saturating_sub(1);
        self.spawn_timer = self.spawn_timer.saturating_sub(1);
    }

    /// Circle test against a point-like object with its own radius
    pub fn check_collision(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance(point) < self.radius() + radius
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Two children of the next tier at this position, none for the smallest tier
    pub fn split<R: Rng>(&self, level: u32, rng: &mut R, mut next_id: impl FnMut() -> u32) -> Vec<Asteroid> {
        match self.size.child() {
            Some(child) => (0..2)
                .map(|_| Asteroid::new(next_id(), Some(self.pos), child, level, rng))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Random point just outside one of the four screen edges
fn edge_position<R: Rng>(rng: &mut R) -> Vec2 {
    let margin = ASTEROID_LARGE_SIZE;
    if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) {
            -margin
        } else {
            SCREEN_WIDTH + margin
        };
        Vec2::new(x, rng.random_range(0.0..=SCREEN_HEIGHT))
    } else {
        let y = if rng.random_bool(0.5) {
            -margin
        } else {
            SCREEN_HEIGHT + margin
        };
        Vec2::new(rng.random_range(0.0..=SCREEN_WIDTH), y)
    }
}

/// Enemy saucer variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UfoKind {
    Normal,
    Elite,
}

/// Per-kind tuning for enemy saucers
#[derive(Debug, Clone, Copy)]
pub struct UfoParams {
    pub size: f32,
    pub speed: f32,
    pub shoot_cooldown: u32,
    pub health: i32,
    pub score: u64,
    /// Angular offsets (degrees) of each shot in a volley
    pub spread: &'static [f32],
    /// Random aim error (degrees) added to the whole volley
    pub jitter: f32,
}

const NORMAL_UFO: UfoParams = UfoParams {
    size: 20.0,
    speed: UFO_SPEED,
    shoot_cooldown: UFO_SHOOT_COOLDOWN,
    health: 1,
    score: SCORE_UFO,
    spread: &[0.0],
    jitter: 10.0,
};

const ELITE_UFO: UfoParams = UfoParams {
    size: 22.0,
    speed: UFO_SPEED * ELITE_UFO_SPEED_SCALE,
    shoot_cooldown: ELITE_UFO_SHOOT_COOLDOWN,
    health: 2,
    score: SCORE_ELITE_UFO,
    spread: &[-15.0, 0.0, 15.0],
    jitter: 0.0,
};

impl UfoKind {
    pub fn params(self) -> &'static UfoParams {
        match self {
            UfoKind::Normal => &NORMAL_UFO,
            UfoKind::Elite => &ELITE_UFO,
        }
    }
}

/// A UFO crossing the screen horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCraft {
    pub id: u32,
    pub kind: UfoKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: i32,
    pub shoot_cooldown: u32,
    pub hit_flash_timer: u32,
}

impl EnemyCraft {
    /// Enter from the left or right edge at a random height
    pub fn new<R: Rng>(id: u32, kind: UfoKind, rng: &mut R) -> Self {
        let params = kind.params();
        let (x, vx) = if rng.random_bool(0.5) {
            (-params.size, params.speed)
        } else {
            (SCREEN_WIDTH + params.size, -params.speed)
        };
        let y = rng.random_range(params.size..=SCREEN_HEIGHT - params.size);

        Self {
            id,
            kind,
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, 0.0),
            health: params.health,
            shoot_cooldown: params.shoot_cooldown,
            hit_flash_timer: 0,
        }
    }

    #[inline]
    pub fn params(&self) -> &'static UfoParams {
        self.kind.params()
    }

    /// Bounding box size (width, height)
    pub fn box_size(&self) -> Vec2 {
        let size = self.params().size;
        Vec2::new(size * 2.0, size)
    }

    /// Advance one frame, returning any volley fired at `target`
    pub fn update<R: Rng>(&mut self, target: Vec2, rng: &mut R) -> Vec<EnemyBullet> {
        self.pos += self.vel;
        self.hit_flash_timer = self.hit_flash_timer.saturating_sub(1);

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        if self.shoot_cooldown == 0 {
            self.shoot_cooldown = self.params().shoot_cooldown;
            return self.shoot(target, rng);
        }
        Vec::new()
    }

    pub fn shoot<R: Rng>(&self, target: Vec2, rng: &mut R) -> Vec<EnemyBullet> {
        let params = self.params();
        let mut aim = angle_to(self.pos, target);
        if params.jitter > 0.0 {
            aim += rng.random_range(-params.jitter..=params.jitter);
        }
        params
            .spread
            .iter()
            .map(|offset| EnemyBullet::new(self.pos, aim + offset))
            .collect()
    }

    /// Left the screen on the far side
    pub fn is_offscreen(&self) -> bool {
        let size = self.params().size;
        self.pos.x < -size || self.pos.x > SCREEN_WIDTH + size
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0 && !self.is_offscreen()
    }
}

/// Stationary hazard that charges up, fires once at the player, then self-destructs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HunterMine {
    pub id: u32,
    pub pos: Vec2,
    pub charge_timer: u32,
    pub pulse_timer: u32,
    pub destroyed: bool,
}

impl HunterMine {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            charge_timer: HUNTER_MINE_CHARGE_TIME,
            pulse_timer: 0,
            destroyed: false,
        }
    }

    /// Advance one frame. When the charge runs out the mine fires at `target`
    /// and is gone, whatever else happened to it.
    pub fn update(&mut self, target: Vec2) -> Option<EnemyBullet> {
        self.pulse_timer = (self.pulse_timer + 1) % 60;
        self.charge_timer = self.charge_timer.saturating_sub(1);
        if self.charge_timer == 0 && !self.destroyed {
            self.destroyed = true;
            return Some(EnemyBullet::new(self.pos, angle_to(self.pos, target)));
        }
        None
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.destroyed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    TripleShot,
}

impl PowerUpKind {
    pub fn letter(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "S",
            PowerUpKind::TripleShot => "T",
        }
    }
}

/// A pickup left behind by a destroyed asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub lifespan: u32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            lifespan: POWERUP_LIFESPAN,
        }
    }

    pub fn update(&mut self) {
        self.lifespan = self.lifespan.saturating_sub(1);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifespan > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_asteroid_tiers() {
        let mut rng = rng();
        let large = Asteroid::new(1, Some(Vec2::new(100.0, 100.0)), AsteroidSize::Large, 1, &mut rng);
        assert_eq!(large.health, 3);
        assert_eq!(large.radius(), 40.0);
        assert!((8..=12).contains(&large.shape.len()));
        assert!(large.shape.iter().all(|o| (0.7..=1.3).contains(o)));
        assert_eq!(large.spawn_timer, ASTEROID_SPAWN_GROW_TIME);
    }

    #[test]
    fn test_split_conservation() {
        let mut rng = rng();
        let mut id = 10;
        let mut next = || {
            id += 1;
            id
        };
        let large = Asteroid::new(1, Some(Vec2::new(300.0, 300.0)), AsteroidSize::Large, 1, &mut rng);

        let mediums = large.split(1, &mut rng, &mut next);
        assert_eq!(mediums.len(), 2);
        assert!(mediums.iter().all(|a| a.size == AsteroidSize::Medium && a.pos == large.pos));

        let smalls: Vec<_> = mediums
            .iter()
            .flat_map(|m| m.split(1, &mut rng, &mut next))
            .collect();
        assert_eq!(smalls.len(), 4);
        assert!(smalls.iter().all(|a| a.size == AsteroidSize::Small));

        let dust: Vec<_> = smalls
            .iter()
            .flat_map(|s| s.split(1, &mut rng, &mut next))
            .collect();
        assert!(dust.is_empty());
    }

    #[test]
    fn test_edge_entry_is_offscreen() {
        let mut rng = rng();
        for id in 0..20 {
            let a = Asteroid::new(id, None, AsteroidSize::Large, 1, &mut rng);
            let off_x = a.pos.x < 0.0 || a.pos.x > SCREEN_WIDTH;
            let off_y = a.pos.y < 0.0 || a.pos.y > SCREEN_HEIGHT;
            assert!(off_x || off_y);
        }
    }

    #[test]
    fn test_asteroid_update_wraps() {
        let mut rng = rng();
        let mut a = Asteroid::new(1, Some(Vec2::new(-1.0, 10.0)), AsteroidSize::Small, 1, &mut rng);
        a.vel = Vec2::new(-1.0, 0.0);
        a.update();
        assert_eq!(a.pos.x, SCREEN_WIDTH);
    }

    #[test]
    fn test_bullet_lifespan() {
        let mut b = Projectile::bullet(Vec2::new(10.0, 10.0), 0.0);
        for _ in 0..BULLET_LIFESPAN - 1 {
            b.update();
            assert!(b.is_alive());
        }
        b.update();
        assert!(!b.is_alive());
    }

    #[test]
    fn test_laser_does_not_travel() {
        let mut l = Projectile::laser(Vec2::new(10.0, 10.0), 0.0);
        l.update();
        assert_eq!(l.pos, Vec2::new(10.0, 10.0));
        assert!((l.beam_end().x - (10.0 + LASER_RANGE)).abs() < 1e-3);
    }

    #[test]
    fn test_ufo_params() {
        let mut rng = rng();
        let normal = EnemyCraft::new(1, UfoKind::Normal, &mut rng);
        let elite = EnemyCraft::new(2, UfoKind::Elite, &mut rng);
        assert_eq!(normal.health, 1);
        assert_eq!(elite.health, 2);
        assert!(elite.vel.x.abs() > normal.vel.x.abs());
        assert_eq!(normal.shoot(Vec2::ZERO, &mut rng).len(), 1);
        assert_eq!(elite.shoot(Vec2::ZERO, &mut rng).len(), 3);
    }

    #[test]
    fn test_ufo_fires_on_cooldown() {
        let mut rng = rng();
        let mut ufo = EnemyCraft::new(1, UfoKind::Normal, &mut rng);
        let mut shots = 0;
        for _ in 0..UFO_SHOOT_COOLDOWN {
            shots += ufo.update(Vec2::new(400.0, 300.0), &mut rng).len();
        }
        assert_eq!(shots, 1);
        assert_eq!(ufo.shoot_cooldown, UFO_SHOOT_COOLDOWN);
    }

    #[test]
    fn test_mine_fires_once_then_dies() {
        let mut mine = HunterMine::new(1, Vec2::new(100.0, 100.0));
        let target = Vec2::new(200.0, 100.0);
        for _ in 0..HUNTER_MINE_CHARGE_TIME - 1 {
            assert!(mine.update(target).is_none());
        }
        let shot = mine.update(target).expect("mine should fire");
        assert!(shot.vel.x > 0.0);
        assert!(!mine.is_alive());
        assert!(mine.update(target).is_none());
    }

    #[test]
    fn test_powerup_expires() {
        let mut p = PowerUp::new(1, PowerUpKind::Shield, Vec2::ZERO);
        for _ in 0..POWERUP_LIFESPAN {
            p.update();
        }
        assert!(!p.is_alive());
    }
}
