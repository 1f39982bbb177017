//! Game settings and preferences
//!
//! Read from `settings.json`. Every field has a default, so partial or
//! missing files are fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::PersistenceError;

pub const SETTINGS_FILE: &str = "settings.json";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake on explosions/impacts
    pub screen_shake: bool,
    /// Particle effects (explosions, exhaust, debris)
    pub particles: bool,
    /// Color-split flash on heavy explosions
    pub chromatic_glitch: bool,
    /// Zoom out slightly while dashing
    pub camera_zoom: bool,

    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub mute: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no glitch)
    pub reduced_motion: bool,

    // === Storage ===
    /// Where the high score and player data live
    pub data_dir: PathBuf,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            screen_shake: true,
            particles: true,
            chromatic_glitch: true,
            camera_zoom: true,

            sfx_volume: 1.0,
            mute: false,

            reduced_motion: false,

            data_dir: PathBuf::from("."),
            seed: None,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective chromatic glitch (respects reduced_motion)
    pub fn effective_glitch(&self) -> bool {
        self.chromatic_glitch && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Seed for this session's RNG
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Load `settings.json` from `dir`, falling back to defaults
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(SETTINGS_FILE);
        let Ok(json) = fs::read_to_string(&path) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write `settings.json` into `dir`
    pub fn save(&self, dir: &Path) -> Result<(), PersistenceError> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(SETTINGS_FILE), serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
