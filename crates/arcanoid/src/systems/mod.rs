//! Game systems
//!
//! The system set is fixed, so it is a closed enum rather than boxed trait
//! objects. [`GameSystem::pipeline`] builds them in their run order:
//! input, movement, resize, collision, ball speed, bonus expiry.

pub mod ball_speed_system;
pub mod bonus_expiry_system;
pub mod collision_system;
pub mod input_system;
pub mod movement_system;
pub mod resize_system;

pub use ball_speed_system::BallSpeedSystem;
pub use bonus_expiry_system::BonusExpirySystem;
pub use collision_system::{BrickEdge, CollisionSystem};
pub use input_system::InputSystem;
pub use movement_system::MovementSystem;
pub use resize_system::ResizeSystem;

use arc_engine::ecs::{System, SystemScheduler};

use crate::config::GameConfig;
use crate::world::World;

/// One of the game's systems
#[derive(Debug)]
pub enum GameSystem {
    /// Samples controls
    Input(InputSystem),
    /// Integrates velocities
    Movement(MovementSystem),
    /// Tracks the surface size
    Resize(ResizeSystem),
    /// Resolves collisions
    Collision(CollisionSystem),
    /// Ramps up ball speed
    BallSpeed(BallSpeedSystem),
    /// Expires bonuses
    BonusExpiry(BonusExpirySystem),
}

impl GameSystem {
    /// Every system, in run order
    pub fn pipeline(config: &GameConfig) -> Vec<Self> {
        vec![
            Self::Input(InputSystem::new()),
            Self::Movement(MovementSystem::new()),
            Self::Resize(ResizeSystem::new()),
            Self::Collision(CollisionSystem::new(
                config.scoring.clone(),
                config.bonus.clone(),
            )),
            Self::BallSpeed(BallSpeedSystem::new(
                config.speed_ramp.clone(),
                config.ball.base_speed(),
            )),
            Self::BonusExpiry(BonusExpirySystem::new()),
        ]
    }

    /// Scheduler running the full pipeline
    pub fn scheduler(config: &GameConfig) -> SystemScheduler<Self> {
        Self::pipeline(config)
            .into_iter()
            .fold(SystemScheduler::new(), SystemScheduler::with_system)
    }

    /// Clear per-game state (the speed ramp)
    pub fn reset(&mut self) {
        if let Self::BallSpeed(system) = self {
            system.reset();
        }
    }
}

impl System<World> for GameSystem {
    fn name(&self) -> &'static str {
        match self {
            Self::Input(system) => system.name(),
            Self::Movement(system) => system.name(),
            Self::Resize(system) => system.name(),
            Self::Collision(system) => system.name(),
            Self::BallSpeed(system) => system.name(),
            Self::BonusExpiry(system) => system.name(),
        }
    }

    fn update(&mut self, delta_time: f32, world: &mut World) {
        match self {
            Self::Input(system) => system.update(delta_time, world),
            Self::Movement(system) => system.update(delta_time, world),
            Self::Resize(system) => system.update(delta_time, world),
            Self::Collision(system) => system.update(delta_time, world),
            Self::BallSpeed(system) => system.update(delta_time, world),
            Self::BonusExpiry(system) => system.update(delta_time, world),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_order() {
        let scheduler = GameSystem::scheduler(&GameConfig::default());
        let names: Vec<_> = scheduler.systems().iter().map(|system| system.name()).collect();
        assert_eq!(
            names,
            ["input", "movement", "resize", "collision", "ball_speed", "bonus_expiry"]
        );
    }
}
