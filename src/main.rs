//! Hyperflow Asteroids entry point
//!
//! Runs a headless session on autopilot: the ship flies itself through the
//! menus and into a run, every frame is composed into a recording renderer,
//! and the result is banked to the data directory like a real game.
//!
//! Usage: `hyperflow-asteroids [DATA_DIR] [FRAMES]`

use std::path::PathBuf;

use hyperflow_asteroids::audio::LogAudio;
use hyperflow_asteroids::consts::SIM_HZ;
use hyperflow_asteroids::persistence::FileStore;
use hyperflow_asteroids::platform::{InputSource, ScriptedInput};
use hyperflow_asteroids::renderer::{RecordingRenderer, SceneInfo, draw_scene};
use hyperflow_asteroids::sim::GameMode;
use hyperflow_asteroids::{Session, Settings};

/// Two minutes of play
const DEFAULT_FRAMES: u64 = 120 * SIM_HZ as u64;

fn main() {
    env_logger::init();
    log::info!("Hyperflow Asteroids (headless) starting...");

    let mut args = std::env::args().skip(1);
    let dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        None => DEFAULT_FRAMES,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad frame count ({}), using {}", e, DEFAULT_FRAMES);
            DEFAULT_FRAMES
        }
    };

    let mut settings = Settings::load(&dir);
    if settings.data_dir.is_relative() {
        settings.data_dir = dir.join(&settings.data_dir);
    }
    log::info!(
        "Quality {}, data in {}",
        settings.quality.as_str(),
        settings.data_dir.display()
    );

    let mut audio = LogAudio::new();
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.mute);
    let store = FileStore::new(settings.data_dir.clone());
    let mut session = Session::from_settings(&settings, store, audio);

    // Nobody at the keyboard: the autopilot confirms menus and flies
    let mut input = ScriptedInput::default();
    let mut primitives = 0usize;
    let mut runs = 0u32;

    for frame in 0..frames {
        let snapshot = input.poll();
        if snapshot.quit_requested() {
            break;
        }

        let was_playing = session.state().mode == GameMode::Playing;
        session.update(&snapshot.to_tick_input(true));
        if was_playing && session.state().mode == GameMode::GameOver {
            runs += 1;
            log::info!(
                "Run {} over at level {} with {} points",
                runs,
                session.state().level,
                session.state().player.score
            );
        }

        let mut renderer = RecordingRenderer::new();
        let info = SceneInfo {
            frame,
            high_score: session.high_score(),
            profile: session.profile(),
            settings: &settings,
        };
        draw_scene(&mut renderer, session.state(), &info);
        primitives += renderer.total();
    }

    let state = session.state();
    log::info!(
        "Finished {} frames: {} runs, level {}, score {}, high score {}, {} credits",
        frames,
        runs,
        state.level,
        state.player.score,
        session.high_score(),
        session.profile().total_credits
    );
    log::debug!(
        "{} audible cues, {} primitives drawn",
        session.audio().played(),
        primitives
    );
}
