//! Input system
//!
//! Copies the control state sampled for this tick into every [`Input`]
//! component.

use arc_engine::ecs::{ComponentStore, System};

use crate::components::Input;
use crate::world::World;

/// Feeds the sampled control state to input-driven entities
#[derive(Debug, Default)]
pub struct InputSystem;

impl InputSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System<World> for InputSystem {
    fn name(&self) -> &'static str {
        "input"
    }

    fn update(&mut self, _delta_time: f32, world: &mut World) {
        let state = world.input;
        for entity in world.entities_with::<Input>() {
            if let Some(input) = world.get_mut::<Input>(entity) {
                input.left_pressed = state.left;
                input.right_pressed = state.right;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::world::Playfield;

    #[test]
    fn test_copies_state_into_inputs() {
        let mut world = World::new(Playfield::new(800.0, 600.0));
        let platform = world.create_entity();
        world.set(platform, Input::new(400.0));
        world.input = InputState::LEFT;

        InputSystem::new().update(0.016, &mut world);

        let input = world.get::<Input>(platform).unwrap();
        assert!(input.left_pressed);
        assert!(!input.right_pressed);
    }
}
