//! Movement system
//!
//! Turns held controls into horizontal velocity and integrates velocity into
//! position.

use arc_engine::ecs::{ComponentStore, System};

use crate::components::{Input, Position, Velocity};
use crate::world::World;

/// Integrates velocities
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System<World> for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn update(&mut self, delta_time: f32, world: &mut World) {
        for entity in world.entities_with::<Position>() {
            // Input-driven entities get their horizontal velocity from the
            // controls alone, so an idle platform stops dead.
            if let Some(input) = world.get::<Input>(entity).copied() {
                if let Some(velocity) = world.get_mut::<Velocity>(entity) {
                    velocity.linear.x = input.direction() * input.move_speed;
                }
            }

            let Some(velocity) = world.get::<Velocity>(entity).copied() else {
                continue;
            };
            if let Some(position) = world.get_mut::<Position>(entity) {
                position.0 += velocity.linear * delta_time;
            }
        }
    }
}
