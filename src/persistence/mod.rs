//! High score and player profile persistence
//!
//! Reads never fail outward: a missing or corrupt file yields defaults.
//! Writes return a `Result` so callers can log and carry on.

pub mod file;
pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::ShipKind;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid high score: {0}")]
    Parse(#[from] std::num::ParseIntError),
}

/// Persistent storage for the two things that outlive a run
pub trait PersistenceStore {
    /// Best score so far, 0 when nothing usable is stored
    fn load_high_score(&self) -> u64;
    fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError>;
    /// Credits and unlocked ships, defaulted when nothing usable is stored
    fn load_profile(&self) -> Profile;
    fn save_profile(&mut self, profile: &Profile) -> Result<(), PersistenceError>;
}

fn default_unlocked() -> Vec<String> {
    vec![ShipKind::default().name().to_string()]
}

/// Meta-progression carried between runs
///
/// Stored as `{"total_credits": int, "unlocked_ships": [string, ...]}`; missing
/// keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub total_credits: u64,
    #[serde(default = "default_unlocked")]
    pub unlocked_ships: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            total_credits: 0,
            unlocked_ships: default_unlocked(),
        }
    }
}

/// Outcome of confirming a ship in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    AlreadyOwned,
    Bought { cost: u64 },
    CannotAfford { short_by: u64 },
}

impl Profile {
    /// Parse a stored profile; the starter ship is always unlocked
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let mut profile: Profile = serde_json::from_str(json)?;
        let starter = ShipKind::default();
        if !profile.is_unlocked(starter) {
            profile.unlocked_ships.insert(0, starter.name().to_string());
        }
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn is_unlocked(&self, ship: ShipKind) -> bool {
        self.unlocked_ships.iter().any(|s| s == ship.name())
    }

    /// Unlock `ship` if it isn't already, paying its cost in credits
    pub fn purchase(&mut self, ship: ShipKind) -> Purchase {
        if self.is_unlocked(ship) {
            return Purchase::AlreadyOwned;
        }
        let cost = ship.stats().cost;
        if self.total_credits < cost {
            return Purchase::CannotAfford {
                short_by: cost - self.total_credits,
            };
        }
        self.total_credits -= cost;
        self.unlocked_ships.push(ship.name().to_string());
        Purchase::Bought { cost }
    }
}
