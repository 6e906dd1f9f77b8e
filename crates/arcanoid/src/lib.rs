//! # Arcanoid
//!
//! A brick-breaker built on `arc_engine`. The platform, the ball and the
//! bricks are entities in a [`World`]; six systems advance them each tick in
//! a fixed order (input, movement, resize, collision, ball speed, bonus
//! expiry) under the control of a [`GameSession`].
//!
//! ```rust
//! use arcanoid::{GameConfig, GameSession, InputState, Phase};
//!
//! let mut session = GameSession::with_seed(GameConfig::default(), 7);
//! for _ in 0..60 {
//!     session.tick(1.0 / 60.0, InputState::RIGHT);
//! }
//! assert_eq!(session.phase(), Phase::Playing);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bonus;
pub mod components;
pub mod config;
pub mod error;
pub mod factory;
pub mod highscore;
pub mod input;
pub mod render;
pub mod runner;
pub mod save;
pub mod session;
pub mod systems;
pub mod world;

pub use config::GameConfig;
pub use error::{GameError, GameResult, HighScoreError, SaveError};
pub use highscore::HighScores;
pub use input::{InputSource, InputState, ScriptedInput};
pub use render::{FrameSnapshot, LogRenderer, Renderer};
pub use save::{load_game, save_exists, save_game, SaveData};
pub use session::{GameSession, Phase};
pub use world::World;
