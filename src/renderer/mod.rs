//! Rendering boundary
//!
//! The game draws in terms of a handful of primitives. A backend (window,
//! terminal, test recorder) implements [`Renderer`]; `scene` decides what to
//! draw each frame and `shapes` builds the outlines.

pub mod scene;
pub mod shapes;

pub use scene::{SceneInfo, draw_scene};

use glam::Vec2;

use crate::sim::Tint;

/// Straight RGBA color, components in 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b, 1.0])
    }

    /// Same color with alpha replaced
    pub fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, alpha.clamp(0.0, 1.0)])
    }

    pub fn alpha(&self) -> f32 {
        self.0[3]
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0.039, 0.039, 0.078);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GREY: Color = Color::rgb(0.588, 0.588, 0.588);
    pub const RED: Color = Color::rgb(1.0, 0.196, 0.196);
    pub const ORANGE: Color = Color::rgb(1.0, 0.647, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const PURPLE: Color = Color::rgb(0.784, 0.0, 1.0);
    pub const SHIELD_GREEN: Color = Color::rgb(0.0, 1.0, 0.392);
    pub const POWERUP_BLUE: Color = Color::rgb(0.392, 0.588, 1.0);

    // Star layers, far to near
    pub const STAR_DIM: Color = Color::rgb(0.314, 0.314, 0.392);
    pub const STAR_MID: Color = Color::rgb(0.588, 0.588, 0.588);
    pub const DUST: Color = Color::rgb(0.706, 0.706, 0.784);
    pub const STAR_NEAR: Color = Color::rgb(0.784, 0.784, 1.0);
}

/// Resolve a simulation tint to a drawable color
pub fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::White => colors::WHITE,
        Tint::Grey => colors::GREY,
        Tint::Red => colors::RED,
        Tint::Orange => colors::ORANGE,
        Tint::Yellow => colors::YELLOW,
        Tint::Cyan => colors::CYAN,
        Tint::Purple => colors::PURPLE,
        Tint::Green => colors::SHIELD_GREEN,
        Tint::Blue => colors::POWERUP_BLUE,
    }
}

/// Primitive drawing surface. Coordinates are playfield pixels.
pub trait Renderer {
    /// Closed polygon; outlined unless `filled`
    fn polygon(&mut self, points: &[Vec2], color: Color, filled: bool);
    fn line(&mut self, a: Vec2, b: Vec2, color: Color, width: f32);
    /// Circle outline of the given stroke width; a width of 0 fills it
    fn circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);
    /// Filled axis-aligned rectangle
    fn rect(&mut self, min: Vec2, size: Vec2, color: Color);
    /// Text centered on `pos`
    fn text(&mut self, pos: Vec2, text: &str, color: Color, size: f32);
}

/// Counts primitives and keeps the text it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub polygons: usize,
    pub lines: usize,
    pub circles: usize,
    pub rects: usize,
    pub texts: Vec<String>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.polygons + self.lines + self.circles + self.rects + self.texts.len()
    }

    /// Whether any drawn text contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

impl Renderer for RecordingRenderer {
    fn polygon(&mut self, _points: &[Vec2], _color: Color, _filled: bool) {
        self.polygons += 1;
    }

    fn line(&mut self, _a: Vec2, _b: Vec2, _color: Color, _width: f32) {
        self.lines += 1;
    }

    fn circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _width: f32) {
        self.circles += 1;
    }

    fn rect(&mut self, _min: Vec2, _size: Vec2, _color: Color) {
        self.rects += 1;
    }

    fn text(&mut self, _pos: Vec2, text: &str, _color: Color, _size: f32) {
        self.texts.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(colors::RED.with_alpha(2.0).alpha(), 1.0);
        assert_eq!(colors::RED.with_alpha(-1.0).alpha(), 0.0);
        assert_eq!(colors::RED.with_alpha(0.5).0[0], 1.0);
    }

    #[test]
    fn test_tints_resolve() {
        assert_eq!(tint_color(Tint::Green), colors::SHIELD_GREEN);
        assert_ne!(tint_color(Tint::Purple), tint_color(Tint::Blue));
    }
}
