//! Scene composition
//!
//! Turns a `SimulationState` into renderer primitives for the current mode.
//! The playfield goes through a camera (shake, dash zoom); the HUD and
//! overlays are drawn straight to the screen.

use glam::Vec2;

use super::colors::*;
use super::shapes;
use super::{Color, Renderer, tint_color};
use crate::consts::*;
use crate::persistence::Profile;
use crate::screen_center;
use crate::settings::Settings;
use crate::sim::{GameMode, Player, PowerUpKind, SimulationState, UfoKind};

const FONT_SMALL: f32 = 16.0;
const FONT: f32 = 20.0;
const FONT_MEDIUM: f32 = 30.0;
const FONT_LARGE: f32 = 50.0;

const BAR_WIDTH: f32 = 100.0;
const BAR_HEIGHT: f32 = 10.0;

/// Everything outside the simulation that a frame needs
pub struct SceneInfo<'a> {
    /// Monotonic frame counter, drives blinking and pulses
    pub frame: u64,
    pub high_score: u64,
    pub profile: &'a Profile,
    pub settings: &'a Settings,
}

/// Draw one full frame
pub fn draw_scene<R: Renderer>(out: &mut R, state: &SimulationState, info: &SceneInfo) {
    out.rect(Vec2::ZERO, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT), BACKGROUND);

    match state.mode {
        GameMode::StartMenu => {
            draw_starfield(out, state);
            for rock in &state.menu_asteroids {
                out.polygon(&shapes::asteroid_outline(rock), WHITE, false);
            }
            draw_start_menu(out, info);
        }
        GameMode::ShipSelect => {
            draw_starfield(out, state);
            draw_ship_select(out, state, info);
        }
        GameMode::Playing => draw_playing(out, state, info),
        GameMode::GameOver => draw_game_over(out, state, info),
    }
}

fn draw_playing<R: Renderer>(out: &mut R, state: &SimulationState, info: &SceneInfo) {
    let mut camera = Camera::for_frame(out, state, info);
    draw_playfield(&mut camera, state, info.frame);

    // Chromatic split, layered over the playfield in primitives
    let split = if state.player.in_hyperflow() {
        Some((4.0, 120.0 / 255.0))
    } else if state.fx.glitch_timer > 0 && info.settings.effective_glitch() {
        Some((8.0 + (info.frame % 8) as f32, 150.0 / 255.0))
    } else {
        None
    };
    if let Some((offset, alpha)) = split {
        let base = camera.offset;
        camera.tint = Some(RED.with_alpha(alpha));
        camera.offset = base - Vec2::new(offset, 0.0);
        draw_playfield(&mut camera, state, info.frame);
        camera.tint = Some(Color::rgb(0.0, 0.0, 1.0).with_alpha(alpha));
        camera.offset = base + Vec2::new(offset, 0.0);
        draw_playfield(&mut camera, state, info.frame);
    }

    if state.player.in_hyperflow() {
        draw_vignette(out);
    }
    draw_hud(out, state, info);
    draw_overlays(out, state);
}

/// Entities and effects in world space
fn draw_playfield<R: Renderer>(out: &mut R, state: &SimulationState, frame: u64) {
    draw_starfield(out, state);

    for p in &state.powerups {
        let color = if (p.lifespan / 10) % 2 == 0 {
            match p.kind {
                PowerUpKind::Shield => SHIELD_GREEN,
                PowerUpKind::TripleShot => POWERUP_BLUE,
            }
        } else {
            WHITE
        };
        out.circle(p.pos, POWERUP_SIZE + 2.0, color, 2.0);
        out.text(p.pos, p.kind.letter(), WHITE, 15.0);
    }

    for rock in &state.asteroids {
        let color = if rock.hit_flash_timer > 0 { RED } else { WHITE };
        out.polygon(&shapes::asteroid_outline(rock), color, false);
    }

    for ufo in &state.ufos {
        let color = match (ufo.hit_flash_timer > 0, ufo.kind) {
            (true, _) => WHITE,
            (false, UfoKind::Normal) => PURPLE,
            (false, UfoKind::Elite) => RED,
        };
        let size = ufo.params().size;
        out.polygon(&shapes::saucer_outline(ufo.pos, size), color, false);
        out.line(
            ufo.pos - Vec2::new(size, 0.0),
            ufo.pos + Vec2::new(size, 0.0),
            color,
            3.0,
        );
    }

    for mine in &state.mines {
        let flashing = mine.charge_timer < 30 && (mine.charge_timer / 3) % 2 == 0;
        let color = if flashing { WHITE } else { PURPLE };
        out.polygon(
            &shapes::mine_outline(mine.pos, HUNTER_MINE_SIZE, mine.pulse_timer),
            color,
            false,
        );
    }

    for shot in &state.bullets {
        if shot.is_laser {
            let alpha = shot.lifespan as f32 / LASER_LIFESPAN as f32;
            let end = shot.beam_end();
            out.line(shot.pos, end, CYAN.with_alpha(alpha * 0.5), 8.0);
            out.line(shot.pos, end, WHITE.with_alpha(alpha), 4.0);
        } else {
            out.circle(shot.pos, BULLET_RADIUS, WHITE, 0.0);
        }
    }
    for shot in &state.enemy_bullets {
        out.circle(shot.pos, ENEMY_BULLET_RADIUS, RED, 0.0);
    }

    for wave in &state.effects.shockwaves {
        let progress = wave.progress();
        let radius = progress * wave.max_radius;
        out.circle(wave.pos, radius, WHITE.with_alpha((1.0 - progress) * 0.78), wave.width);
    }

    if !state.player.is_dead() {
        draw_player(out, &state.player, frame);
    }

    let effects = &state.effects;
    for p in &effects.particles {
        out.circle(p.pos, p.size, tint_color(p.tint), 0.0);
    }
    for d in &effects.debris {
        let alpha = d.lifespan as f32 / 60.0 * 0.78;
        out.rect(d.pos, Vec2::splat(d.size), tint_color(d.tint).with_alpha(alpha));
    }
    for f in &effects.fragments {
        let (a, b) = shapes::fragment_segment(f);
        let alpha = f.lifespan as f32 / crate::sim::effects::HULL_FRAGMENT_LIFESPAN as f32;
        out.line(a, b, WHITE.with_alpha(alpha), 2.0);
    }
    for t in &effects.texts {
        out.text(t.pos, &t.text, tint_color(t.tint).with_alpha(t.alpha()), FONT_SMALL);
    }

    let player = &state.player;
    if player.hyperspace_warp_timer > 0 {
        let warp = PLAYER_HYPERSPACE_WARP_TIME as f32;
        let progress = (warp - player.hyperspace_warp_timer as f32) / warp;
        let width = (progress * 3.0).floor() + 1.0;
        for (a, b) in shapes::streaks(
            player.pos,
            40,
            progress * 200.0,
            progress * 400.0 + 50.0,
            frame as f32 * 7.0,
        ) {
            out.line(a, b, WHITE.with_alpha(1.0 - progress), width);
        }
    }
}

fn draw_player<R: Renderer>(out: &mut R, player: &Player, frame: u64) {
    for ghost in &player.trail {
        let alpha = ghost.lifespan as f32 / PLAYER_TRAIL_LIFESPAN as f32 * 0.4;
        out.polygon(&ghost.points, WHITE.with_alpha(alpha), false);
    }

    if player.is_dashing() {
        out.polygon(&shapes::dash_outline(player), CYAN, false);
        return;
    }

    let points = player.ship_points();
    let blink = (frame / 4) % 2 == 0;
    if player.thrusting && blink {
        out.polygon(
            &shapes::thruster_flame(&points, player.angle, player.size()),
            ORANGE,
            true,
        );
    }
    if player.is_shielded && blink {
        out.circle(player.pos, player.size() + 5.0, SHIELD_GREEN, 1.0);
    }

    // Warp-in after a respawn
    const WARP_IN: u32 = 30;
    if !player.is_shielded && player.invulnerable_timer > PLAYER_INVULN_TIME - WARP_IN {
        let progress = PLAYER_INVULN_TIME.saturating_sub(player.invulnerable_timer) as f32 / WARP_IN as f32;
        for (a, b) in shapes::streaks(
            player.pos,
            20,
            (1.0 - progress) * 150.0 + 20.0,
            (1.0 - progress) * 200.0 + 40.0,
            frame as f32 * 11.0,
        ) {
            out.line(a, b, WHITE.with_alpha(progress), 2.0);
        }
        if progress < 0.2 {
            return;
        }
    }

    if !player.is_shielded && player.invulnerable_timer > 0 && (player.invulnerable_timer / 10) % 2 == 0 {
        return;
    }
    out.polygon(&points, WHITE, false);
}

fn draw_starfield<R: Renderer>(out: &mut R, state: &SimulationState) {
    let stars = &state.starfield;
    for (pos, size) in &stars.far {
        let color = match *size as u32 {
            1 => STAR_DIM,
            2 => STAR_MID,
            _ => WHITE,
        };
        out.circle(*pos, (size - 1.0).max(1.0), color, 0.0);
    }
    for pos in &stars.dust {
        out.rect(*pos, Vec2::ONE, DUST);
    }
    for pos in &stars.near {
        out.rect(*pos, Vec2::ONE, STAR_NEAR);
    }
}

fn draw_vignette<R: Renderer>(out: &mut R) {
    for i in (1..=10).rev() {
        let alpha = (10 - i) as f32 * 10.0 / 255.0;
        let radius = SCREEN_WIDTH * i as f32 / 10.0;
        out.circle(screen_center(), radius, Color::rgb(0.0, 0.0, 0.0).with_alpha(alpha), 30.0);
    }
}

fn bar<R: Renderer>(out: &mut R, min: Vec2, fill: f32, color: Color) {
    let size = Vec2::new(BAR_WIDTH, BAR_HEIGHT);
    let corners = [min, min + Vec2::new(size.x, 0.0), min + size, min + Vec2::new(0.0, size.y)];
    out.polygon(&corners, GREY, false);
    let fill = fill.clamp(0.0, 1.0);
    if fill > 0.0 {
        out.rect(min, Vec2::new(BAR_WIDTH * fill, BAR_HEIGHT), color);
    }
}

fn draw_hud<R: Renderer>(out: &mut R, state: &SimulationState, info: &SceneInfo) {
    let player = &state.player;

    out.text(Vec2::new(60.0, 20.0), &format!("Score: {}", player.score), WHITE, FONT);
    out.text(
        Vec2::new(SCREEN_WIDTH / 2.0, 20.0),
        &format!("Level: {}", state.level),
        WHITE,
        FONT,
    );
    out.text(
        Vec2::new(SCREEN_WIDTH - 80.0, 70.0),
        &format!("High: {}", info.high_score),
        GREY,
        FONT,
    );
    out.text(
        Vec2::new(SCREEN_WIDTH - 80.0, 95.0),
        &format!("Credits: {}", info.profile.total_credits),
        YELLOW,
        FONT,
    );

    // Flow meter
    let (label, color, fill, bar_color) = if player.in_hyperflow() {
        let pulse = (((info.frame as f32) / 3.0).sin() + 1.0) / 2.0;
        let gb = (100.0 + 155.0 * pulse) / 255.0;
        (
            "HYPERFLOW".to_string(),
            Color::rgb(1.0, gb, gb),
            player.flow_state_timer as f32 / FLOW_STATE_DURATION as f32,
            RED,
        )
    } else {
        (
            format!("FLOW x{}", player.flow_level),
            YELLOW,
            player.flow_timer as f32 / FLOW_DURATION as f32,
            YELLOW,
        )
    };
    let flow_pos = Vec2::new(170.0, 20.0) + shapes::jitter(player.flow_text_shake_timer, 2.0);
    out.text(flow_pos, &label, color, FONT_MEDIUM);
    bar(out, Vec2::new(120.0, 40.0), fill, bar_color);

    // Lives, drawn as little ships
    for i in 0..player.lives {
        let mut icon = Player::new(player.ship);
        icon.pos = Vec2::new(
            SCREEN_WIDTH - 30.0 - i as f32 * (player.size() + 10.0),
            20.0 + player.size() / 2.0,
        );
        out.polygon(&icon.ship_points(), WHITE, false);
    }

    // Cooldowns, then active powerups
    let mut y = 40.0;
    let ready = |remaining: u32, total: u32| 1.0 - remaining as f32 / total.max(1) as f32;
    bar(out, Vec2::new(10.0, y), ready(player.shoot_cooldown, player.stats.shoot_cooldown), YELLOW);
    y += 15.0;
    bar(out, Vec2::new(10.0, y), ready(player.hyperspace_cooldown, PLAYER_HYPERSPACE_COOLDOWN), ORANGE);
    y += 15.0;
    bar(out, Vec2::new(10.0, y), ready(player.dash_cooldown, PLAYER_DASH_COOLDOWN), CYAN);
    y += 15.0;
    if player.is_shielded {
        let fill = player.invulnerable_timer as f32 / POWERUP_SHIELD_TIME as f32;
        bar(out, Vec2::new(10.0, y), fill, SHIELD_GREEN);
        y += 15.0;
    }
    if player.triple_shot_timer > 0 {
        let fill = player.triple_shot_timer as f32 / POWERUP_TRIPLE_SHOT_TIME as f32;
        bar(out, Vec2::new(10.0, y), fill, POWERUP_BLUE);
    }
}

/// Boss warning, start countdown and level-clear banners
fn draw_overlays<R: Renderer>(out: &mut R, state: &SimulationState) {
    let center = screen_center();

    if state.warning_timer > 0 && (state.warning_timer / 15) % 2 == 0 {
        out.text(center - Vec2::new(0.0, 40.0), "! WARNING !", RED, FONT_LARGE);
        out.text(center + Vec2::new(0.0, 20.0), "BOSS INCOMING", RED, FONT_MEDIUM);
    }

    if state.start_timer > 0 {
        let label = if state.start_timer < 40 {
            "GO!".to_string()
        } else {
            (state.start_timer / 60 + 1).to_string()
        };
        let pulse = (state.start_timer % 60) as f32 / 60.0;
        out.text(center, &label, WHITE, 50.0 + pulse * 30.0);
    }

    if state.level_clear_timer > 0 && state.start_timer == 0 {
        out.text(center, &format!("LEVEL {} CLEAR", state.level), WHITE, FONT_LARGE);
    }
}

fn draw_start_menu<R: Renderer>(out: &mut R, info: &SceneInfo) {
    let c = screen_center();
    out.text(c - Vec2::new(0.0, 130.0), "ASTEROIDS", WHITE, FONT_LARGE);
    out.text(c - Vec2::new(0.0, 90.0), "HYPERFLOW", RED, FONT_MEDIUM);
    out.text(
        c - Vec2::new(0.0, 40.0),
        &format!("High Score: {}", info.high_score),
        CYAN,
        FONT,
    );
    out.text(c, "Press ENTER to Start", WHITE, FONT_MEDIUM);

    let controls = [
        "--- Controls ---",
        "Arrow Keys / WASD: Move",
        "Space / Z: Shoot",
        "LShift / X: Dash",
        "C / V: Hyperspace",
    ];
    for (i, line) in controls.iter().enumerate() {
        let dy = if i == 0 { 80.0 } else { 90.0 + 20.0 * i as f32 };
        out.text(c + Vec2::new(0.0, dy), line, GREY, FONT);
    }
}

fn draw_ship_select<R: Renderer>(out: &mut R, state: &SimulationState, info: &SceneInfo) {
    let c = screen_center();
    let ship = state.selected_ship();
    let cost = ship.stats().cost;
    let credits = info.profile.total_credits;

    out.text(Vec2::new(c.x, 80.0), "SHIPYARD", WHITE, FONT_LARGE);
    out.text(
        Vec2::new(c.x, 130.0),
        &format!("Total Credits: {}", credits),
        YELLOW,
        FONT_MEDIUM,
    );

    let mut preview = Player::new(ship);
    preview.pos = c - Vec2::new(0.0, 50.0);
    out.polygon(&preview.ship_points(), WHITE, false);

    out.text(c, ship.name(), WHITE, FONT_MEDIUM);
    out.text(c + Vec2::new(0.0, 30.0), ship.description(), GREY, FONT_SMALL);

    let (action, color) = if info.profile.is_unlocked(ship) {
        ("Press ENTER to Select".to_string(), SHIELD_GREEN)
    } else if credits >= cost {
        (format!("Press ENTER to Buy ({} C)", cost), CYAN)
    } else {
        (format!("LOCKED ({} C)", cost), RED)
    };
    out.text(c + Vec2::new(0.0, 70.0), &action, color, FONT);

    out.text(c + Vec2::new(-100.0, -50.0), "<", WHITE, FONT_LARGE);
    out.text(c + Vec2::new(100.0, -50.0), ">", WHITE, FONT_LARGE);
}

fn draw_game_over<R: Renderer>(out: &mut R, state: &SimulationState, info: &SceneInfo) {
    let c = screen_center();
    let score = state.player.score;
    out.text(c - Vec2::new(0.0, 100.0), "GAME OVER", RED, FONT_LARGE);
    out.text(
        c - Vec2::new(0.0, 40.0),
        &format!("Final Score: {}", score),
        WHITE,
        FONT_MEDIUM,
    );
    out.text(
        c - Vec2::new(0.0, 10.0),
        &format!("Credits Earned: {}", score / CREDITS_PER_SCORE),
        YELLOW,
        FONT,
    );
    out.text(
        c + Vec2::new(0.0, 20.0),
        &format!("High Score: {}", info.high_score),
        CYAN,
        FONT,
    );
    out.text(c + Vec2::new(0.0, 70.0), "Press ENTER to Continue", WHITE, FONT);
}

/// Playfield view: shake offset plus dash zoom about the screen center.
/// With `tint` set every primitive is recolored (chromatic split passes).
struct Camera<'a, R: Renderer> {
    out: &'a mut R,
    offset: Vec2,
    zoom: f32,
    tint: Option<Color>,
}

impl<'a, R: Renderer> Camera<'a, R> {
    fn for_frame(out: &'a mut R, state: &SimulationState, info: &SceneInfo) -> Self {
        let mut offset = Vec2::ZERO;
        if info.settings.effective_screen_shake() {
            let frame = info.frame as u32;
            if state.fx.shake_timer > 0 {
                offset += shapes::jitter(state.fx.shake_timer.wrapping_add(frame), 5.0);
            }
            let player = &state.player;
            if player.thrusting && state.start_timer == 0 && !player.is_dead() {
                offset += shapes::jitter(frame | 1, 1.0);
            }
        }
        let zoom = if info.settings.camera_zoom { state.fx.zoom } else { 1.0 };
        Self {
            out,
            offset,
            zoom,
            tint: None,
        }
    }

    fn project(&self, p: Vec2) -> Vec2 {
        let c = screen_center();
        c + (p - c) * self.zoom + self.offset
    }

    fn color(&self, color: Color) -> Color {
        self.tint.unwrap_or(color)
    }
}

impl<R: Renderer> Renderer for Camera<'_, R> {
    fn polygon(&mut self, points: &[Vec2], color: Color, filled: bool) {
        let projected: Vec<Vec2> = points.iter().map(|p| self.project(*p)).collect();
        let color = self.color(color);
        self.out.polygon(&projected, color, filled);
    }

    fn line(&mut self, a: Vec2, b: Vec2, color: Color, width: f32) {
        let (a, b, color) = (self.project(a), self.project(b), self.color(color));
        self.out.line(a, b, color, width);
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        let (center, color) = (self.project(center), self.color(color));
        self.out.circle(center, radius * self.zoom, color, width);
    }

    fn rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        let (min, color) = (self.project(min), self.color(color));
        self.out.rect(min, size * self.zoom, color);
    }

    fn text(&mut self, pos: Vec2, text: &str, color: Color, size: f32) {
        let (pos, color) = (self.project(pos), self.color(color));
        self.out.text(pos, text, color, size * self.zoom);
    }
}
