//! Resize system
//!
//! Watches the presentation surface size and keeps the letterboxed
//! [`Viewport`] up to date. The playfield bounds never change.

use arc_engine::ecs::System;
use arc_engine::foundation::math::Vec2;

use crate::render::Viewport;
use crate::world::World;

/// Tracks the surface size
#[derive(Debug, Default)]
pub struct ResizeSystem {
    last_surface: Option<Vec2>,
}

impl ResizeSystem {
    /// Create the system
    pub fn new() -> Self {
        Self { last_surface: None }
    }
}

impl System<World> for ResizeSystem {
    fn name(&self) -> &'static str {
        "resize"
    }

    fn update(&mut self, _delta_time: f32, world: &mut World) {
        let surface = world.surface;
        if self.last_surface == Some(surface) {
            return;
        }
        self.last_surface = Some(surface);

        match Viewport::fit(world.playfield().size(), surface) {
            Some(viewport) => {
                world.viewport = viewport;
                log::debug!(
                    "Surface resized to {}x{}, scale {:.3}",
                    surface.x,
                    surface.y,
                    viewport.scale
                );
            }
            None => log::warn!(
                "Ignoring degenerate surface size {}x{}",
                surface.x,
                surface.y
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Playfield;
    use approx::assert_relative_eq;

    #[test]
    fn test_recomputes_viewport_only_on_change() {
        let mut world = World::new(Playfield::new(800.0, 600.0));
        let mut system = ResizeSystem::new();

        system.update(0.016, &mut world);
        assert_eq!(world.viewport, Viewport::IDENTITY);

        world.surface = Vec2::new(400.0, 600.0);
        system.update(0.016, &mut world);
        assert_relative_eq!(world.viewport.scale, 0.5);
        assert_relative_eq!(world.viewport.offset_y, 150.0);
        assert_eq!(world.playfield(), Playfield::new(800.0, 600.0));
    }

    #[test]
    fn test_zero_surface_keeps_previous_viewport() {
        let mut world = World::new(Playfield::new(800.0, 600.0));
        let mut system = ResizeSystem::new();
        world.surface = Vec2::new(1600.0, 1200.0);
        system.update(0.016, &mut world);

        world.surface = Vec2::new(0.0, 0.0);
        system.update(0.016, &mut world);
        assert_relative_eq!(world.viewport.scale, 2.0);
    }
}
