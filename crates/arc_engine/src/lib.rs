//! # Arc Engine
//!
//! A small, single-threaded Entity-Component-System core for frame-stepped
//! 2D arcade games.
//!
//! ## Features
//!
//! - **Typed component tables**: one strongly-typed table per component kind,
//!   resolved at compile time
//! - **Monotonic entity ids**: identifiers are never reused within a session
//! - **Fixed-order scheduling**: systems run once per tick in registration order
//! - **Config files**: TOML and RON loading for any serde config struct
//!
//! ## Quick Start
//!
//! ```rust
//! use arc_engine::prelude::*;
//! use arc_engine::component_store;
//!
//! #[derive(Debug, Clone, Copy)]
//! struct Position(Vec2);
//! impl Component for Position {}
//!
//! #[derive(Debug, Clone, Copy)]
//! struct Velocity(Vec2);
//! impl Component for Velocity {}
//!
//! #[derive(Default)]
//! struct World {
//!     registry: EntityRegistry,
//!     positions: ComponentStorage<Position>,
//!     velocities: ComponentStorage<Velocity>,
//! }
//!
//! component_store!(World {
//!     registry: registry,
//!     positions: Position,
//!     velocities: Velocity,
//! });
//!
//! struct Integrate;
//!
//! impl System<World> for Integrate {
//!     fn name(&self) -> &'static str {
//!         "integrate"
//!     }
//!
//!     fn update(&mut self, delta_time: f32, world: &mut World) {
//!         for entity in world.entities_with::<Velocity>() {
//!             let Some(velocity) = world.get::<Velocity>(entity).copied() else {
//!                 continue;
//!             };
//!             if let Some(position) = world.get_mut::<Position>(entity) {
//!                 position.0 += velocity.0 * delta_time;
//!             }
//!         }
//!     }
//! }
//!
//! let mut world = World::default();
//! let ball = world.create_entity();
//! world.set(ball, Position(Vec2::new(0.0, 0.0)));
//! world.set(ball, Velocity(Vec2::new(10.0, 0.0)));
//!
//! let mut scheduler = SystemScheduler::new().with_system(Integrate);
//! scheduler.update(0.5, &mut world);
//!
//! assert_eq!(world.get::<Position>(ball).map(|p| p.0.x), Some(5.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        ecs::{
            Component, ComponentStorage, ComponentStore, Entity, EntityRegistry, HasStorage,
            System, SystemScheduler,
        },
        foundation::{
            math::{Rect, Vec2},
            time::{FramePacer, Timer},
        },
    };
}
