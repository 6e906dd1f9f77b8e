//! Game configuration
//!
//! Every tunable constant of the game lives here. The config is built once at
//! startup (defaults, or a `.toml`/`.ron` file) and handed by reference to
//! whatever needs it.

use arc_engine::config::{Config, ConfigError, Deserialize, Serialize};
use arc_engine::foundation::math::Vec2;

use crate::components::{BonusType, Color, DurableBrick};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield and frame rate
    pub window: WindowConfig,
    /// Player platform
    pub platform: PlatformConfig,
    /// Ball
    pub ball: BallConfig,
    /// Periodic ball acceleration
    pub speed_ramp: SpeedRampConfig,
    /// Temporary bonuses
    pub bonus: BonusConfig,
    /// Brick field layout
    pub bricks: BrickLayout,
    /// Points awarded
    pub scoring: ScoringConfig,
    /// Lives and restart behaviour
    pub session: SessionConfig,
    /// Persistence locations
    pub files: FilesConfig,
}

/// Playfield size and frame rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Playfield width
    pub width: f32,
    /// Playfield height
    pub height: f32,
    /// Simulation ticks per second
    pub target_fps: u32,
}

impl WindowConfig {
    /// Fixed simulation time step in seconds
    pub fn time_step(&self) -> f32 {
        1.0 / self.target_fps as f32
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            target_fps: 60,
        }
    }
}

/// Platform archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Start x (left edge)
    pub start_x: f32,
    /// Start y (top edge)
    pub start_y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Horizontal speed while a control is held
    pub move_speed: f32,
    /// Fill color
    pub color: Color,
}

impl PlatformConfig {
    /// Start position
    pub fn start(&self) -> Vec2 {
        Vec2::new(self.start_x, self.start_y)
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            start_x: 350.0,
            start_y: 550.0,
            width: 100.0,
            height: 20.0,
            move_speed: 400.0,
            color: Color::WHITE,
        }
    }
}

/// Ball archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Start x (center)
    pub start_x: f32,
    /// Start y (center)
    pub start_y: f32,
    /// Radius
    pub radius: f32,
    /// Initial horizontal velocity
    pub velocity_x: f32,
    /// Initial vertical velocity (negative is up)
    pub velocity_y: f32,
    /// Fill color
    pub color: Color,
}

impl BallConfig {
    /// Start position
    pub fn start(&self) -> Vec2 {
        Vec2::new(self.start_x, self.start_y)
    }

    /// Initial velocity vector
    pub fn initial_velocity(&self) -> Vec2 {
        Vec2::new(self.velocity_x, self.velocity_y)
    }

    /// Magnitude of the initial velocity
    pub fn base_speed(&self) -> f32 {
        self.initial_velocity().norm()
    }
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            start_x: 400.0,
            start_y: 400.0,
            radius: 10.0,
            velocity_x: 200.0,
            velocity_y: -200.0,
            color: Color::GREEN,
        }
    }
}

/// Periodic ball acceleration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedRampConfig {
    /// Seconds between steps
    pub interval: f32,
    /// Multiplier applied per step
    pub factor: f32,
    /// Upper bound of the accumulated multiplier
    pub max_multiplier: f32,
}

impl Default for SpeedRampConfig {
    fn default() -> Self {
        Self {
            interval: 10.0,
            factor: 1.2,
            max_multiplier: 3.0,
        }
    }
}

/// Bonus durations and strengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    /// Seconds a bonus stays active
    pub duration: f32,
    /// Ball speed multiplier for slow ball
    pub slow_ball: f32,
    /// Move speed multiplier for fast platform
    pub fast_platform: f32,
    /// Width multiplier for big platform
    pub big_platform: f32,
}

impl BonusConfig {
    /// Multiplier configured for `kind`
    pub fn multiplier(&self, kind: BonusType) -> f32 {
        match kind {
            BonusType::SlowBall => self.slow_ball,
            BonusType::FastPlatform => self.fast_platform,
            BonusType::BigPlatform => self.big_platform,
        }
    }
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            duration: 10.0,
            slow_ball: 0.5,
            fast_platform: 1.5,
            big_platform: 1.5,
        }
    }
}

/// Brick field layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    /// Number of rows
    pub rows: u32,
    /// Number of columns
    pub columns: u32,
    /// Brick width
    pub width: f32,
    /// Brick height
    pub height: f32,
    /// Gap between neighbouring bricks
    pub padding: f32,
    /// Distance from the top of the playfield to the first row
    pub top_offset: f32,
    /// Hits needed for the top row; each lower row needs one fewer (at least one)
    pub max_hits: u32,
    /// Probability in `[0, 1]` that a brick carries a bonus
    pub bonus_chance: f64,
    /// Row colors, cycled when there are more rows than colors
    pub palette: Vec<Color>,
}

impl BrickLayout {
    /// Color of `row`
    pub fn row_color(&self, row: u32) -> Color {
        if self.palette.is_empty() {
            return Color::WHITE;
        }
        self.palette[row as usize % self.palette.len()]
    }

    /// Hits needed for bricks of `row`
    pub fn row_hits(&self, row: u32) -> u32 {
        self.max_hits.saturating_sub(row).max(1)
    }
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 10,
            width: 70.0,
            height: 20.0,
            padding: 5.0,
            top_offset: 50.0,
            max_hits: 3,
            bonus_chance: 0.15,
            palette: vec![
                Color::rgb(255, 0, 0),
                Color::rgb(255, 165, 0),
                Color::rgb(255, 255, 0),
                Color::rgb(0, 200, 0),
                Color::rgb(0, 120, 255),
            ],
        }
    }
}

/// Points awarded for destroying bricks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points per hit a durable brick needed, paid on destruction
    pub points_per_hit: u32,
    /// Points for a brick without durability
    pub plain_brick: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_hit: 10,
            plain_brick: 10,
        }
    }
}

/// Lives and restart behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lives at the start of a game
    pub lives: u32,
    /// Seconds the simulation pauses after the ball is lost
    pub restart_pause: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            restart_pause: 1.0,
        }
    }
}

/// Persistence locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Save game file
    pub save_file: String,
    /// High-score table
    pub high_scores: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            save_file: "arcanoid.sav".to_string(),
            high_scores: "highscores.txt".to_string(),
        }
    }
}

fn ensure(condition: bool, message: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_string()))
    }
}

impl Config for GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            self.window.width > 0.0 && self.window.height > 0.0,
            "window size must be positive",
        )?;
        ensure(self.window.target_fps > 0, "target_fps must be positive")?;
        ensure(
            self.platform.width > 0.0 && self.platform.height > 0.0,
            "platform size must be positive",
        )?;
        ensure(self.platform.move_speed >= 0.0, "platform move_speed must not be negative")?;
        ensure(self.ball.radius > 0.0, "ball radius must be positive")?;
        ensure(self.ball.base_speed() > 0.0, "ball initial velocity must not be zero")?;
        ensure(self.speed_ramp.interval > 0.0, "speed_ramp interval must be positive")?;
        ensure(self.speed_ramp.factor >= 1.0, "speed_ramp factor must be at least 1")?;
        ensure(
            self.speed_ramp.max_multiplier >= 1.0,
            "speed_ramp max_multiplier must be at least 1",
        )?;
        ensure(self.bonus.duration > 0.0, "bonus duration must be positive")?;
        ensure(
            BonusType::ALL.iter().all(|kind| self.bonus.multiplier(*kind) > 0.0),
            "bonus multipliers must be positive",
        )?;
        ensure(
            self.bricks.width > 0.0 && self.bricks.height > 0.0,
            "brick size must be positive",
        )?;
        ensure(
            (1..=DurableBrick::MAX_HITS).contains(&self.bricks.max_hits),
            "brick max_hits must be within [1, 255]",
        )?;
        ensure(
            (0.0..=1.0).contains(&self.bricks.bonus_chance),
            "brick bonus_chance must be within [0, 1]",
        )?;
        ensure(self.session.lives >= 1, "session lives must be at least 1")?;
        ensure(self.session.restart_pause >= 0.0, "restart_pause must not be negative")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_match_classic_constants() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.width, 800.0);
        assert_eq!(config.window.height, 600.0);
        assert_relative_eq!(config.window.time_step(), 1.0 / 60.0);
        assert_eq!(config.platform.start(), Vec2::new(350.0, 550.0));
        assert_eq!(config.ball.initial_velocity(), Vec2::new(200.0, -200.0));
        assert_eq!(config.speed_ramp.factor, 1.2);
        assert_eq!(config.session.lives, 3);
    }

    #[test]
    fn test_row_hits_and_colors() {
        let layout = BrickLayout::default();
        assert_eq!(layout.row_hits(0), 3);
        assert_eq!(layout.row_hits(2), 1);
        assert_eq!(layout.row_hits(10), 1);
        assert_eq!(layout.row_color(5), layout.row_color(0));

        let empty = BrickLayout {
            palette: Vec::new(),
            ..BrickLayout::default()
        };
        assert_eq!(empty.row_color(3), Color::WHITE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = GameConfig::default();
        config.speed_ramp.factor = 0.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.bricks.bonus_chance = 1.5;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.ball.velocity_x = 0.0;
        config.ball.velocity_y = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.bricks.max_hits = DurableBrick::MAX_HITS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "[session]\nlives = 5\n\n[window]\nwidth = 1024.0\n").unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(config.session.lives, 5);
        assert_eq!(config.window.width, 1024.0);
        assert_eq!(config.window.height, 600.0);
        assert_eq!(config.bricks, BrickLayout::default());
    }
}
