//! End-to-end scenarios through the public API

use glam::Vec2;
use tempfile::tempdir;

use hyperflow_asteroids::audio::{AudioCue, NullAudio, SoundEffect};
use hyperflow_asteroids::consts::*;
use hyperflow_asteroids::persistence::{FileStore, MemoryStore, PersistenceStore};
use hyperflow_asteroids::renderer::{RecordingRenderer, SceneInfo, draw_scene};
use hyperflow_asteroids::sim::spawner::{asteroid_count_for_level, boss_count_for_level};
use hyperflow_asteroids::sim::{
    Asteroid, AsteroidSize, GameEvent, GameMode, Phase, Projectile, ShipKind, SimulationState,
    TickInput, UfoKind, resolve_collisions, spawn_asteroids, start_new_game, tick,
};
use hyperflow_asteroids::{Session, Settings};

#[derive(Default)]
struct RecordingAudio(Vec<SoundEffect>);

impl AudioCue for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.0.push(effect);
    }
}

fn confirm() -> TickInput {
    TickInput {
        confirm: true,
        ..Default::default()
    }
}

fn cleared_run(seed: u64) -> SimulationState {
    let mut state = SimulationState::new(seed, 256);
    start_new_game(&mut state, ShipKind::Cruiser);
    state.asteroids.clear();
    state.ufos.clear();
    state.mines.clear();
    state.start_timer = 0;
    state.player.invulnerable_timer = 0;
    state
}

fn place_rock(state: &mut SimulationState, pos: Vec2, size: AsteroidSize) {
    let id = state.next_entity_id();
    let rock = Asteroid::new(id, Some(pos), size, state.level, &mut state.rng);
    state.asteroids.push(rock);
}

#[test]
fn large_asteroid_takes_three_hits_and_splits() {
    let mut state = cleared_run(11);
    state.player.flow_level = 3;
    let at = Vec2::new(650.0, 120.0);
    place_rock(&mut state, at, AsteroidSize::Large);

    for _ in 0..3 {
        state.bullets.push(Projectile::bullet(at, 0.0));
        resolve_collisions(&mut state);
        state.prune();
    }

    assert_eq!(state.player.score, SCORE_LARGE_ASTEROID * 3);
    assert_eq!(state.player.flow_level, 4);
    let mediums: Vec<_> = state.asteroids.iter().map(|a| a.size).collect();
    assert_eq!(mediums, vec![AsteroidSize::Medium, AsteroidSize::Medium]);
    assert!(state.events.contains(&GameEvent::AsteroidDestroyed {
        size: AsteroidSize::Large,
        award: 60,
    }));
}

#[test]
fn ten_kill_combo_triggers_hyperflow() {
    let mut state = cleared_run(12);
    let at = Vec2::new(100.0, 100.0);

    for _ in 0..10 {
        place_rock(&mut state, at, AsteroidSize::Small);
        state.bullets.push(Projectile::bullet(at, 0.0));
        resolve_collisions(&mut state);
        state.prune();
    }

    // 100 * (1 + ... + 9), then the tenth kill at x1 doubled by Hyperflow
    assert_eq!(state.player.score, 4500 + 200);
    assert!(state.player.in_hyperflow());
    let starts = state
        .events
        .iter()
        .filter(|e| **e == GameEvent::HyperflowStarted)
        .count();
    assert_eq!(starts, 1);

    // Hyperflow turns the gun into a laser
    tick(
        &mut state,
        &TickInput {
            fire: true,
            ..Default::default()
        },
    );
    assert!(state.bullets.iter().any(|b| b.is_laser));
}

#[test]
fn fatal_collision_ends_run_and_saves() {
    let mut s = Session::new(
        SimulationState::new(13, 256),
        MemoryStore::with_high_score(10),
        RecordingAudio::default(),
    );
    s.update(&confirm());
    s.update(&confirm());
    assert_eq!(s.state().mode, GameMode::Playing);

    {
        let state = s.state_mut();
        state.asteroids.clear();
        state.start_timer = 0;
        state.player.lives = 1;
        state.player.invulnerable_timer = 0;
        state.player.score = 2550;
        let pos = state.player.pos;
        place_rock(state, pos, AsteroidSize::Large);
    }
    s.update(&TickInput::default());

    assert_eq!(s.state().mode, GameMode::GameOver);
    assert_eq!(s.high_score(), 2550);
    assert_eq!(s.store().high_score_writes, vec![2550]);
    assert_eq!(s.profile().total_credits, 25);
    assert!(s.audio().0.contains(&SoundEffect::PlayerDie));

    // Back through the catalog into a fresh run
    s.update(&confirm());
    assert_eq!(s.state().mode, GameMode::ShipSelect);
    s.update(&confirm());
    assert_eq!(s.state().mode, GameMode::Playing);
    assert_eq!(s.state().player.score, 0);
    assert_eq!(s.state().player.lives, ShipKind::Cruiser.stats().lives);
}

#[test]
fn boss_level_warns_then_spawns_elites() {
    let mut state = cleared_run(14);
    state.level = 10;
    state.events.clear();
    spawn_asteroids(&mut state, asteroid_count_for_level(10), 10);

    assert!(state.asteroids.is_empty());
    assert_eq!(state.phase(), Phase::BossWarningPause);
    assert!(state.events.contains(&GameEvent::BossWarning { level: 10 }));

    for _ in 0..BOSS_WARNING_TIME {
        tick(&mut state, &TickInput::default());
    }
    assert_eq!(state.ufos.len(), boss_count_for_level(10) as usize);
    assert_eq!(state.ufos.len(), 2);
    assert!(state.ufos.iter().all(|u| u.kind == UfoKind::Elite));
    assert_eq!(state.phase(), Phase::Playing);
}

#[test]
fn results_survive_a_restart() {
    let dir = tempdir().unwrap();

    let mut s = Session::new(
        SimulationState::new(15, 64),
        FileStore::new(dir.path()),
        NullAudio,
    );
    s.state_mut().events.push(GameEvent::GameOver {
        score: 3000,
        level: 4,
    });
    s.update(&TickInput::default());

    let store = FileStore::new(dir.path());
    assert_eq!(store.load_high_score(), 3000);
    let reopened = Session::new(SimulationState::new(16, 64), store, NullAudio);
    assert_eq!(reopened.high_score(), 3000);
    assert_eq!(reopened.profile().total_credits, 30);
}

#[test]
fn autopilot_session_renders_every_frame() {
    let settings = Settings {
        seed: Some(17),
        ..Default::default()
    };
    let mut s = Session::from_settings(&settings, MemoryStore::new(), NullAudio);
    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut reached_play = false;
    for frame in 0..900 {
        s.update(&idle);
        reached_play |= s.state().mode == GameMode::Playing;

        let mut r = RecordingRenderer::new();
        let info = SceneInfo {
            frame,
            high_score: s.high_score(),
            profile: s.profile(),
            settings: &settings,
        };
        draw_scene(&mut r, s.state(), &info);
        assert!(r.total() > 0);
    }
    assert!(reached_play);
}
