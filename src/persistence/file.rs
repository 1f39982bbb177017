//! File-backed store: a plain-integer high score file and a JSON profile

use std::fs;
use std::path::{Path, PathBuf};

use super::{PersistenceError, PersistenceStore, Profile};
use crate::highscores;

pub const HIGH_SCORE_FILE: &str = "highscore.txt";
pub const PLAYER_DATA_FILE: &str = "player_data.txt";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write(&self, name: &str, contents: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(name), contents)?;
        Ok(())
    }
}

impl PersistenceStore for FileStore {
    fn load_high_score(&self) -> u64 {
        let path = self.path(HIGH_SCORE_FILE);
        let Ok(text) = fs::read_to_string(&path) else {
            log::info!("No high score at {}, starting from 0", path.display());
            return 0;
        };
        match highscores::parse(&text) {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Ignoring corrupt high score file {}: {}", path.display(), e);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        self.write(HIGH_SCORE_FILE, &highscores::format(score))?;
        log::info!("High score saved ({})", score);
        Ok(())
    }

    fn load_profile(&self) -> Profile {
        let path = self.path(PLAYER_DATA_FILE);
        let Ok(text) = fs::read_to_string(&path) else {
            log::info!("No player data at {}, using defaults", path.display());
            return Profile::default();
        };
        match Profile::from_json(&text) {
            Ok(profile) => {
                log::info!(
                    "Loaded profile: {} credits, {} ships",
                    profile.total_credits,
                    profile.unlocked_ships.len()
                );
                profile
            }
            Err(e) => {
                log::warn!("Ignoring corrupt player data {}: {}", path.display(), e);
                Profile::default()
            }
        }
    }

    fn save_profile(&mut self, profile: &Profile) -> Result<(), PersistenceError> {
        self.write(PLAYER_DATA_FILE, &profile.to_json()?)?;
        log::info!("Player data saved");
        Ok(())
    }
}
