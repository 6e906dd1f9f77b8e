//! Game session
//!
//! [`GameSession`] owns the world, the system pipeline and the configuration
//! of one game. It spawns the level, drives ticks, handles a lost ball (a
//! short pause, then a fresh platform and ball) and tracks lives until the
//! level is cleared or the game is over.

use arc_engine::ecs::{ComponentStore, Entity, SystemScheduler};
use arc_engine::foundation::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::{ActiveBonus, Bonus, DurableBrick, Position, Shape};
use crate::config::GameConfig;
use crate::factory::{build_brick_field, create_ball, create_platform};
use crate::input::InputState;
use crate::render::{Drawable, FrameSnapshot};
use crate::systems::{CollisionSystem, GameSystem};
use crate::world::{Playfield, World};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Simulation running
    Playing,
    /// Ball lost; waiting before the platform and ball respawn
    Restarting,
    /// Every brick destroyed
    LevelCleared,
    /// No lives left
    GameOver,
}

impl Phase {
    /// Whether ticks still change anything
    pub fn is_finished(self) -> bool {
        matches!(self, Self::LevelCleared | Self::GameOver)
    }
}

/// One game in progress
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    world: World,
    scheduler: SystemScheduler<GameSystem>,
    rng: StdRng,
    lives: u32,
    phase: Phase,
    restart_timer: f32,
}

impl GameSession {
    /// Start a game with an entropy-seeded brick layout
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a game whose brick layout is determined by `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let playfield = Playfield::new(config.window.width, config.window.height);
        let mut session = Self {
            world: World::new(playfield),
            scheduler: GameSystem::scheduler(&config),
            rng,
            lives: config.session.lives,
            phase: Phase::Playing,
            restart_timer: 0.0,
            config,
        };
        session.spawn_level();
        session
    }

    /// Advance the game by `delta_time` seconds with `input` held
    pub fn tick(&mut self, delta_time: f32, input: InputState) {
        match self.phase {
            Phase::LevelCleared | Phase::GameOver => {}
            Phase::Restarting => {
                self.restart_timer -= delta_time;
                if self.restart_timer <= 0.0 {
                    self.respawn_platform_and_ball();
                    self.phase = Phase::Playing;
                }
            }
            Phase::Playing => {
                self.world.input = input;
                self.scheduler.update(delta_time, &mut self.world);
                self.check_progress();
            }
        }
    }

    fn check_progress(&mut self) {
        if self.world.bricks().is_empty() {
            self.phase = Phase::LevelCleared;
            log::info!("Level cleared with score {}", self.score());
            return;
        }

        let lost = self
            .world
            .ball()
            .map_or(true, |ball| CollisionSystem::is_ball_out_of_bounds(&self.world, ball));
        if !lost {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = Phase::GameOver;
            log::info!("Game over with score {}", self.score());
        } else {
            self.phase = Phase::Restarting;
            self.restart_timer = self.config.session.restart_pause;
            log::info!("Ball lost, {} lives left", self.lives);
        }
    }

    /// Throw the current game away and start over
    pub fn restart(&mut self) {
        self.world.clear();
        self.lives = self.config.session.lives;
        self.phase = Phase::Playing;
        self.restart_timer = 0.0;
        self.reset_speed_ramp();
        self.spawn_level();
        log::info!("Session restarted");
    }

    /// Report a new presentation surface size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.surface = Vec2::new(width, height);
    }

    fn spawn_level(&mut self) {
        create_platform(&mut self.world, &self.config.platform);
        create_ball(&mut self.world, &self.config.ball);
        build_brick_field(&mut self.world, &self.config.bricks, &mut self.rng);
    }

    /// Destroy the platform and ball and create fresh ones at their start
    /// positions. Active bonuses go with them and the speed ramp restarts.
    pub(crate) fn respawn_platform_and_ball(&mut self) {
        while let Some(platform) = self.world.platform() {
            self.world.destroy_entity(platform);
        }
        while let Some(ball) = self.world.ball() {
            self.world.destroy_entity(ball);
        }
        create_platform(&mut self.world, &self.config.platform);
        create_ball(&mut self.world, &self.config.ball);
        self.reset_speed_ramp();
    }

    fn reset_speed_ramp(&mut self) {
        for system in self.scheduler.systems_mut() {
            system.reset();
        }
    }

    /// Resume play immediately, discarding any pending restart pause
    pub(crate) fn resume(&mut self) {
        self.phase = Phase::Playing;
        self.restart_timer = 0.0;
    }

    /// Read-only view of the world for the renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        let mut entities = self.world.entities_with::<Shape>();
        entities.sort_unstable();

        let drawables = entities
            .into_iter()
            .filter_map(|entity| self.drawable(entity))
            .collect();

        FrameSnapshot {
            drawables,
            score: self.score(),
            lives: self.lives,
            phase: self.phase,
            viewport: self.world.viewport,
        }
    }

    fn drawable(&self, entity: Entity) -> Option<Drawable> {
        let position = self.world.get::<Position>(entity)?;
        let shape = self.world.get::<Shape>(entity)?;
        Some(Drawable {
            entity,
            position: position.0,
            shape: shape.kind,
            color: shape.color,
            damage: self
                .world
                .get::<DurableBrick>(entity)
                .filter(|durable| durable.max_hits() > 1)
                .map(DurableBrick::damage_ratio),
            bonus_indicator: self
                .world
                .get::<Bonus>(entity)
                .filter(|bonus| !bonus.collected)
                .map(|bonus| bonus.kind),
            active_bonus: self
                .world
                .get::<ActiveBonus>(entity)
                .map(|active| (active.kind, active.remaining_time)),
        })
    }

    /// Current score
    pub fn score(&self) -> u32 {
        self.world.score.value()
    }

    /// Lives left
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The platform, if alive
    pub fn platform(&self) -> Option<Entity> {
        self.world.platform()
    }

    /// The ball, if alive
    pub fn ball(&self) -> Option<Entity> {
        self.world.ball()
    }

    /// Remaining bricks, ordered by entity id
    pub fn bricks(&self) -> Vec<Entity> {
        self.world.bricks()
    }

    /// The component store
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the component store
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Configuration the session was built with
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current speed ramp multiplier
    pub fn speed_multiplier(&self) -> f32 {
        self.scheduler
            .systems()
            .iter()
            .find_map(|system| match system {
                GameSystem::BallSpeed(ramp) => Some(ramp.multiplier()),
                _ => None,
            })
            .unwrap_or(1.0)
    }

    /// Ticks the pipeline has run
    pub fn ticks(&self) -> u64 {
        self.scheduler.ticks()
    }
}
