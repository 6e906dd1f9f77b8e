//! Error types
//!
//! The simulation itself never fails; errors only come from the edges of the
//! game: configuration, save files and the high-score table.

use arc_engine::config::ConfigError;

/// Save file errors
#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the save magic
    #[error("Not a save file (bad header)")]
    BadHeader,

    /// The file ended before the record was complete
    #[error("Save file is truncated")]
    Truncated,

    /// Unknown bonus type code
    #[error("Invalid bonus type {0}")]
    InvalidBonusType(i32),

    /// Hit counters that no live brick can have
    #[error("Invalid brick hit counters {current}/{max}")]
    InvalidHits {
        /// Hits taken
        current: i32,
        /// Hits needed
        max: i32,
    },

    /// Negative score
    #[error("Invalid score {0}")]
    InvalidScore(i32),

    /// The session has no entity to capture
    #[error("No {0} to save")]
    MissingEntity(&'static str),
}

/// High-score table errors
#[derive(thiserror::Error, Debug)]
pub enum HighScoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any error the game can report
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Save file error
    #[error("Save error: {0}")]
    Save(#[from] SaveError),

    /// High-score error
    #[error("High score error: {0}")]
    HighScore(#[from] HighScoreError),
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
