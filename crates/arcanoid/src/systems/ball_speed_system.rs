//! Ball speed ramp
//!
//! The ball speeds up by a fixed factor at a fixed interval of play, up to a
//! cap. While a slow-ball bonus is active the ramp is paused without losing
//! progress.

use arc_engine::ecs::{ComponentStore, System};

use crate::components::{ActiveBonus, BonusType, Velocity};
use crate::config::SpeedRampConfig;
use crate::world::World;

/// Periodically accelerates the ball
#[derive(Debug, Clone)]
pub struct BallSpeedSystem {
    config: SpeedRampConfig,
    game_time: f32,
    last_increase: f32,
    multiplier: f32,
    base_speed: f32,
}

impl BallSpeedSystem {
    /// Create the system with its ramp settings. `base_speed` is the ball
    /// speed at multiplier 1.
    pub fn new(config: SpeedRampConfig, base_speed: f32) -> Self {
        Self {
            config,
            game_time: 0.0,
            last_increase: 0.0,
            multiplier: 1.0,
            base_speed,
        }
    }

    /// Back to multiplier 1 with cleared timers
    pub fn reset(&mut self) {
        self.game_time = 0.0;
        self.last_increase = 0.0;
        self.multiplier = 1.0;
    }

    /// Current speed multiplier
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Seconds of play tracked since the last reset
    pub fn game_time(&self) -> f32 {
        self.game_time
    }
}

impl System<World> for BallSpeedSystem {
    fn name(&self) -> &'static str {
        "ball_speed"
    }

    fn update(&mut self, delta_time: f32, world: &mut World) {
        self.game_time += delta_time;

        let Some(ball) = world.ball() else {
            return;
        };

        let slowed = world
            .get::<ActiveBonus>(ball)
            .is_some_and(|active| active.kind == BonusType::SlowBall);
        if slowed {
            self.last_increase += delta_time;
            return;
        }

        if self.game_time - self.last_increase < self.config.interval {
            return;
        }
        self.last_increase = self.game_time;

        let next = self.multiplier * self.config.factor;
        if next > self.config.max_multiplier {
            return;
        }
        self.multiplier = next;
        if let Some(velocity) = world.get_mut::<Velocity>(ball) {
            velocity.set_speed(self.base_speed * next);
        }
        log::debug!("Ball speed multiplier now {next:.2}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Collider, Position};
    use crate::world::Playfield;
    use approx::assert_relative_eq;
    use arc_engine::ecs::Entity;

    fn setup() -> (World, Entity) {
        let mut world = World::new(Playfield::new(800.0, 600.0));
        let ball = world.create_entity();
        world.set(ball, Position::new(400.0, 400.0));
        world.set(ball, Velocity::new(3.0, 4.0));
        world.set(ball, Collider::ball(10.0));
        (world, ball)
    }

    fn run(system: &mut BallSpeedSystem, world: &mut World, seconds: f32) {
        let steps = (seconds / 0.5).round() as usize;
        for _ in 0..steps {
            system.update(0.5, world);
        }
    }

    #[test]
    fn test_speed_steps_every_interval() {
        let (mut world, ball) = setup();
        let mut system = BallSpeedSystem::new(SpeedRampConfig::default(), 5.0);

        run(&mut system, &mut world, 9.5);
        assert_relative_eq!(system.multiplier(), 1.0);

        run(&mut system, &mut world, 0.5);
        assert_relative_eq!(system.multiplier(), 1.2);
        let velocity = world.get::<Velocity>(ball).unwrap();
        assert_relative_eq!(velocity.speed, 6.0, epsilon = 1e-5);
        assert_relative_eq!(velocity.linear.x, 3.6, epsilon = 1e-5);
        assert_relative_eq!(velocity.linear.y, 4.8, epsilon = 1e-5);
    }

    #[test]
    fn test_multiplier_never_exceeds_cap() {
        let (mut world, _) = setup();
        let mut system = BallSpeedSystem::new(SpeedRampConfig::default(), 5.0);

        run(&mut system, &mut world, 200.0);

        assert!(system.multiplier() <= 3.0);
        assert_relative_eq!(system.multiplier(), 1.2_f32.powi(6), epsilon = 1e-4);
    }

    #[test]
    fn test_slow_ball_pauses_ramp() {
        let (mut world, ball) = setup();
        let mut system = BallSpeedSystem::new(SpeedRampConfig::default(), 5.0);
        run(&mut system, &mut world, 6.0);

        world.set(
            ball,
            ActiveBonus {
                kind: BonusType::SlowBall,
                remaining_time: 100.0,
                original_value: 5.0,
            },
        );
        run(&mut system, &mut world, 20.0);
        assert_relative_eq!(system.multiplier(), 1.0);

        world.remove::<ActiveBonus>(ball);
        run(&mut system, &mut world, 3.5);
        assert_relative_eq!(system.multiplier(), 1.0);
        run(&mut system, &mut world, 0.5);
        assert_relative_eq!(system.multiplier(), 1.2);
    }

    #[test]
    fn test_reset_restores_multiplier() {
        let (mut world, _) = setup();
        let mut system = BallSpeedSystem::new(SpeedRampConfig::default(), 5.0);
        run(&mut system, &mut world, 25.0);
        assert!(system.multiplier() > 1.0);

        system.reset();
        assert_relative_eq!(system.multiplier(), 1.0);
        assert_relative_eq!(system.game_time(), 0.0);
    }
}
