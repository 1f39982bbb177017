//! Game session
//!
//! Owns the simulation plus the injected collaborators. Each frame it
//! handles the ship catalog (which needs the profile), ticks the simulation,
//! then drains the frame's events into audio cues and persistence writes.

use crate::audio::{AudioCue, SoundEffect};
use crate::consts::CREDITS_PER_SCORE;
use crate::highscores::HighScore;
use crate::persistence::{PersistenceStore, Profile, Purchase};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameMode, SimulationState, TickInput, start_new_game, tick};

pub struct Session<S: PersistenceStore, A: AudioCue> {
    state: SimulationState,
    store: S,
    audio: A,
    high_score: HighScore,
    profile: Profile,
}

impl<S: PersistenceStore, A: AudioCue> Session<S, A> {
    pub fn new(state: SimulationState, store: S, audio: A) -> Self {
        let high_score = HighScore::new(store.load_high_score());
        let profile = store.load_profile();
        log::info!(
            "Session ready: high score {}, {} credits",
            high_score.best(),
            profile.total_credits
        );
        Self {
            state,
            store,
            audio,
            high_score,
            profile,
        }
    }

    pub fn from_settings(settings: &Settings, store: S, audio: A) -> Self {
        let seed = settings.resolve_seed();
        log::debug!("RNG seed {}", seed);
        Self::new(
            SimulationState::new(seed, settings.max_particles()),
            store,
            audio,
        )
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Advance one frame
    pub fn update(&mut self, input: &TickInput) {
        if self.state.mode == GameMode::ShipSelect && (input.confirm || input.idle_mode) {
            self.confirm_ship();
        }
        tick(&mut self.state, input);
        self.drain_events();
    }

    /// Start the highlighted ship, buying it first if needed
    fn confirm_ship(&mut self) {
        let ship = self.state.selected_ship();
        match self.profile.purchase(ship) {
            Purchase::AlreadyOwned => {}
            Purchase::Bought { cost } => {
                log::info!("Bought the {} for {} credits", ship.name(), cost);
                self.save_profile();
            }
            Purchase::CannotAfford { short_by } => {
                log::info!("Need {} more credits for the {}", short_by, ship.name());
                return;
            }
        }
        start_new_game(&mut self.state, ship);
    }

    fn drain_events(&mut self) {
        for event in std::mem::take(&mut self.state.events) {
            if let Some(cue) = SoundEffect::for_event(&event) {
                self.audio.play(cue);
            }
            if let GameEvent::GameOver { score, .. } = event {
                self.finish_run(score);
            }
        }
    }

    /// Bank credits and persist the results of a finished run
    fn finish_run(&mut self, score: u64) {
        let earned = score / CREDITS_PER_SCORE;
        self.profile.total_credits += earned;
        log::info!(
            "Run finished: {} points, {} credits earned ({} total)",
            score,
            earned,
            self.profile.total_credits
        );

        if self.high_score.record(score) {
            log::info!("New high score: {}", score);
            if let Err(e) = self.store.save_high_score(score) {
                log::warn!("Could not save high score: {}", e);
            }
        }
        self.save_profile();
    }

    fn save_profile(&mut self) {
        if let Err(e) = self.store.save_profile(&self.profile) {
            log::warn!("Could not save player data: {}", e);
        }
    }
}
