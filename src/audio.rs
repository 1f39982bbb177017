//! Audio cues
//!
//! The game has no sound assets; cues are fire-and-forget names that a
//! backend may or may not turn into sound.

use crate::sim::{AsteroidSize, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Shoot,
    Laser,
    ExplosionSmall,
    ExplosionMedium,
    ExplosionLarge,
    PlayerDie,
    Hyperspace,
    ExtraLife,
    UfoShoot,
    MineShoot,
    Powerup,
    NearMiss,
    /// Entering Hyperflow
    FlowActivate,
    /// Combo step
    FlowBlip,
}

impl SoundEffect {
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Laser => "laser",
            SoundEffect::ExplosionSmall => "explosion_small",
            SoundEffect::ExplosionMedium => "explosion_medium",
            SoundEffect::ExplosionLarge => "explosion_large",
            SoundEffect::PlayerDie => "player_die",
            SoundEffect::Hyperspace => "hyperspace",
            SoundEffect::ExtraLife => "extra_life",
            SoundEffect::UfoShoot => "ufo_shoot",
            SoundEffect::MineShoot => "mine_shoot",
            SoundEffect::Powerup => "powerup",
            SoundEffect::NearMiss => "near_miss",
            SoundEffect::FlowActivate => "flow_activate",
            SoundEffect::FlowBlip => "flow_blip",
        }
    }

    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let cue = match event {
            GameEvent::Shot { laser: true } => SoundEffect::Laser,
            GameEvent::Shot { laser: false } => SoundEffect::Shoot,
            GameEvent::AsteroidDestroyed { size, .. } => match size {
                AsteroidSize::Large => SoundEffect::ExplosionLarge,
                AsteroidSize::Medium => SoundEffect::ExplosionMedium,
                AsteroidSize::Small => SoundEffect::ExplosionSmall,
            },
            GameEvent::AsteroidChipped => SoundEffect::ExplosionSmall,
            GameEvent::UfoDestroyed { .. } => SoundEffect::ExplosionLarge,
            GameEvent::MineDestroyed { .. } => SoundEffect::ExplosionMedium,
            GameEvent::UfoFired => SoundEffect::UfoShoot,
            GameEvent::MineFired => SoundEffect::MineShoot,
            GameEvent::PowerUpCollected(_) => SoundEffect::Powerup,
            GameEvent::NearMiss => SoundEffect::NearMiss,
            GameEvent::FlowUp { .. } => SoundEffect::FlowBlip,
            GameEvent::HyperflowStarted => SoundEffect::FlowActivate,
            GameEvent::ExtraLife { .. } => SoundEffect::ExtraLife,
            GameEvent::PlayerHit { .. } => SoundEffect::PlayerDie,
            GameEvent::Hyperspace => SoundEffect::Hyperspace,
            _ => return None,
        };
        Some(cue)
    }
}

/// Something that can play a cue. Must be a silent no-op when unavailable.
pub trait AudioCue {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioCue for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Logs cues at trace level, honoring volume and mute
#[derive(Debug, Clone)]
pub struct LogAudio {
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    /// Cues that were actually audible
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioCue for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::trace!("cue {} @ {:.2}", effect.name(), vol);
    }
}
