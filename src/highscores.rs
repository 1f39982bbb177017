//! High score tracking
//!
//! The stored form is a bare decimal integer. `HighScore` keeps the best
//! value for the session and decides when a new one needs saving.

use crate::persistence::PersistenceError;

/// Parse the high score file contents (surrounding whitespace allowed)
pub fn parse(text: &str) -> Result<u64, PersistenceError> {
    Ok(text.trim().parse::<u64>()?)
}

pub fn format(score: u64) -> String {
    score.to_string()
}

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Whether `score` beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true when it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(parse("1500").unwrap(), 1500);
        assert_eq!(parse(" 42\n").unwrap(), 42);
        assert!(parse("").is_err());
        assert!(parse("-3").is_err());
        assert!(parse("12abc").is_err());
    }

    #[test]
    fn test_record_only_beats() {
        let mut hs = HighScore::new(100);
        assert!(!hs.record(100));
        assert!(!hs.record(50));
        assert!(hs.record(101));
        assert_eq!(hs.best(), 101);
    }

    #[test]
    fn test_zero_never_qualifies() {
        assert!(!HighScore::default().qualifies(0));
    }
}
