//! Bonus expiry system
//!
//! Counts down every [`ActiveBonus`] and reverts the ones that run out.

use arc_engine::ecs::{ComponentStore, System};

use crate::bonus::revert_bonus;
use crate::components::ActiveBonus;
use crate::world::World;

/// Expires timed bonuses
#[derive(Debug, Default)]
pub struct BonusExpirySystem;

impl BonusExpirySystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System<World> for BonusExpirySystem {
    fn name(&self) -> &'static str {
        "bonus_expiry"
    }

    fn update(&mut self, delta_time: f32, world: &mut World) {
        let mut entities = world.entities_with::<ActiveBonus>();
        entities.sort_unstable();

        for entity in entities {
            let Some(active) = world.get_mut::<ActiveBonus>(entity) else {
                continue;
            };
            active.remaining_time -= delta_time;
            if active.remaining_time > 0.0 {
                continue;
            }

            let expired = *active;
            revert_bonus(world, entity, &expired);
            world.remove::<ActiveBonus>(entity);
            log::debug!("{} expired on {entity}", expired.kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::apply_bonus;
    use crate::components::{BonusType, Velocity};
    use crate::config::BonusConfig;
    use crate::world::Playfield;
    use approx::assert_relative_eq;

    #[test]
    fn test_bonus_reverts_when_time_runs_out() {
        let mut world = World::new(Playfield::new(800.0, 600.0));
        let ball = world.create_entity();
        world.set(ball, Velocity::new(300.0, -400.0));
        let config = BonusConfig {
            duration: 1.0,
            ..BonusConfig::default()
        };
        apply_bonus(&mut world, ball, BonusType::SlowBall, &config);
        assert_relative_eq!(world.get::<Velocity>(ball).unwrap().speed, 250.0);

        let mut system = BonusExpirySystem::new();
        system.update(0.6, &mut world);
        assert_relative_eq!(
            world.get::<ActiveBonus>(ball).unwrap().remaining_time,
            0.4,
            epsilon = 1e-6
        );

        system.update(0.5, &mut world);
        assert!(world.get::<ActiveBonus>(ball).is_none());
        let velocity = world.get::<Velocity>(ball).unwrap();
        assert_relative_eq!(velocity.speed, 500.0);
        assert_relative_eq!(velocity.magnitude(), 500.0, epsilon = 1e-3);
    }
}
