//! Outline generation for the game's vector shapes

use glam::Vec2;
use std::f32::consts::PI;

use crate::consts::{ASTEROID_SPAWN_GROW_TIME, PLAYER_DASH_DURATION};
use crate::heading;
use crate::sim::{Asteroid, HullFragment, Player};

/// Points around a circle, for backends without a native circle
pub fn circle_points(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * 2.0 * PI;
            center + Vec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Small deterministic wobble used in place of per-frame random jitter.
/// Components stay within `-amplitude..=amplitude`.
pub fn jitter(timer: u32, amplitude: f32) -> Vec2 {
    if timer == 0 {
        return Vec2::ZERO;
    }
    let t = timer as f32;
    Vec2::new((t * 2.3).sin(), (t * 3.7).cos()) * amplitude
}

/// Rock silhouette from its radial offsets, growing in while it spawns
pub fn asteroid_outline(rock: &Asteroid) -> Vec<Vec2> {
    let scale = 1.0 - rock.spawn_timer as f32 / ASTEROID_SPAWN_GROW_TIME as f32;
    let center = rock.pos + jitter(rock.hit_flash_timer, 2.0);
    let step = 360.0 / rock.shape.len().max(1) as f32;

    rock.shape
        .iter()
        .enumerate()
        .map(|(i, offset)| {
            let dist = rock.radius() * offset * scale;
            center + heading(i as f32 * step + rock.rotation) * dist
        })
        .collect()
}

/// Saucer hull: flat base with a sloped cabin
pub fn saucer_outline(center: Vec2, size: f32) -> [Vec2; 4] {
    let half = (size / 2.0).floor();
    [
        center + Vec2::new(-size, 0.0),
        center + Vec2::new(size, 0.0),
        center + Vec2::new(size * 0.7, -half),
        center + Vec2::new(-size * 0.7, -half),
    ]
}

/// Mine diamond, breathing on a 60-frame pulse
pub fn mine_outline(center: Vec2, size: f32, pulse_timer: u32) -> [Vec2; 4] {
    let pulse = ((pulse_timer as f32 * 0.1).sin() + 1.0) / 2.0;
    let r = size + (pulse * 4.0).floor();
    [
        center + Vec2::new(0.0, -r),
        center + Vec2::new(r, 0.0),
        center + Vec2::new(0.0, r),
        center + Vec2::new(-r, 0.0),
    ]
}

/// Ship triangle while dashing: nose stretched up to 3x, rear tucked in
pub fn dash_outline(player: &Player) -> [Vec2; 3] {
    let progress = player.dash_timer as f32 / PLAYER_DASH_DURATION as f32;
    let stretch = 1.0 + progress * 2.0;
    let tuck = 1.0 - progress * 0.5;
    let size = player.size();
    [
        player.pos + heading(player.angle) * size * stretch,
        player.pos + heading(player.angle + 140.0) * size * tuck,
        player.pos + heading(player.angle - 140.0) * size * tuck,
    ]
}

/// Exhaust flame behind the rear edge of the ship triangle
pub fn thruster_flame(points: &[Vec2; 3], angle: f32, size: f32) -> [Vec2; 3] {
    let rear = (points[1] + points[2]) / 2.0;
    [points[1], points[2], rear - heading(angle) * size * 1.2]
}

/// Radial streaks around `center`. `inner`/`outer` are the start and end
/// distances; `spin` rotates the whole pattern so it doesn't look static.
pub fn streaks(center: Vec2, count: u32, inner: f32, outer: f32, spin: f32) -> Vec<(Vec2, Vec2)> {
    let count = count.max(1);
    let step = 360.0 / count as f32;
    (0..count)
        .map(|i| {
            let dir = heading(i as f32 * step + spin);
            (center + dir * inner, center + dir * outer)
        })
        .collect()
}

/// World-space endpoints of a tumbling hull piece
pub fn fragment_segment(frag: &HullFragment) -> (Vec2, Vec2) {
    let rot = Vec2::from_angle(frag.rotation.to_radians());
    (frag.pos + rot.rotate(frag.p1), frag.pos + rot.rotate(frag.p2))
}
