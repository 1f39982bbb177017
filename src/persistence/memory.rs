//! In-memory store for tests and headless runs

use std::io;

use super::{PersistenceError, PersistenceStore, Profile};

/// Keeps everything in memory and records every write
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub high_score: u64,
    pub profile: Profile,
    /// Every value passed to `save_high_score`, in order
    pub high_score_writes: Vec<u64>,
    pub profile_writes: usize,
    /// Make every write fail, to exercise error paths
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_high_score(high_score: u64) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    fn check_writable(&self) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(io::Error::other("store is read-only").into());
        }
        Ok(())
    }
}

impl PersistenceStore for MemoryStore {
    fn load_high_score(&self) -> u64 {
        self.high_score
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.high_score = score;
        self.high_score_writes.push(score);
        Ok(())
    }

    fn load_profile(&self) -> Profile {
        self.profile.clone()
    }

    fn save_profile(&mut self, profile: &Profile) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.profile = profile.clone();
        self.profile_writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_writes() {
        let mut store = MemoryStore::with_high_score(5);
        assert_eq!(store.load_high_score(), 5);
        store.save_high_score(50).unwrap();
        store.save_high_score(70).unwrap();
        assert_eq!(store.high_score_writes, vec![50, 70]);
        assert_eq!(store.load_high_score(), 70);
    }

    #[test]
    fn test_failing_writes_leave_state_alone() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        assert!(store.save_high_score(50).is_err());
        assert!(store.save_profile(&Profile::default()).is_err());
        assert_eq!(store.high_score, 0);
        assert_eq!(store.profile_writes, 0);
    }
}
