//! High-score table
//!
//! Stored as plain text, one integer score per line, best first.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::HighScoreError;

/// Number of scores kept
pub const MAX_HIGH_SCORES: usize = 10;

/// The best scores, highest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    scores: Vec<u32>,
}

impl HighScores {
    /// Empty table
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Table holding the best of `scores`
    pub fn from_scores(scores: impl IntoIterator<Item = u32>) -> Self {
        let mut table = Self {
            scores: scores.into_iter().collect(),
        };
        table.normalize();
        table
    }

    /// Read the table at `path`. A missing file is an empty table; reading
    /// stops at the first line that is not a score.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HighScoreError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores at {}", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let scores = contents
            .lines()
            .map(|line| line.trim().parse::<u32>())
            .take_while(Result::is_ok)
            .filter_map(Result::ok);
        Ok(Self::from_scores(scores))
    }

    /// Write the table to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HighScoreError> {
        let contents: String = self.scores.iter().map(|score| format!("{score}\n")).collect();
        fs::write(path.as_ref(), contents)?;
        log::debug!("Saved {} high scores", self.scores.len());
        Ok(())
    }

    /// Record `score`. Returns whether it made it into the table.
    ///
    /// A score tying the lowest entry of a full table does not enter it.
    pub fn submit(&mut self, score: u32) -> bool {
        let entered = self.scores.len() < MAX_HIGH_SCORES
            || self.scores.last().is_some_and(|&lowest| score > lowest);
        if !entered {
            return false;
        }
        self.scores.push(score);
        self.normalize();
        log::info!("New high score {score}");
        true
    }

    /// Highest score, if any
    pub fn best(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    /// Scores, best first
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    fn normalize(&mut self) {
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores.truncate(MAX_HIGH_SCORES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_and_truncated() {
        let table = HighScores::from_scores(0..15);
        assert_eq!(table.scores().len(), MAX_HIGH_SCORES);
        assert_eq!(table.best(), Some(14));
        assert_eq!(table.scores().last(), Some(&5));
    }

    #[test]
    fn test_submit_reports_entry() {
        let mut table = HighScores::from_scores([100; 10]);
        assert!(!table.submit(50));
        assert!(table.submit(150));
        assert_eq!(table.best(), Some(150));
        assert_eq!(table.scores().len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_tie_with_lowest_of_full_table_does_not_enter() {
        let mut table = HighScores::from_scores((1..=10).map(|n| n * 100));
        let before = table.clone();

        assert!(!table.submit(100));
        assert_eq!(table, before);

        assert!(table.submit(101));
        assert_eq!(table.scores().last(), Some(&101));
    }

    #[test]
    fn test_tie_enters_table_with_room() {
        let mut table = HighScores::from_scores([300, 200]);
        assert!(table.submit(200));
        assert_eq!(table.scores(), &[300, 200, 200]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let table = HighScores::load(dir.path().join("none.txt")).unwrap();
        assert_eq!(table, HighScores::new());
        assert_eq!(table.best(), None);
    }

    #[test]
    fn test_file_round_trip_stops_at_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        std::fs::write(&path, "30\n250\nabc\n999\n").unwrap();

        let table = HighScores::load(&path).unwrap();
        assert_eq!(table.scores(), &[250, 30]);

        table.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "250\n30\n");
    }
}
