//! Entity-Component-System implementation
//!
//! Entities are identifiers, components are plain values held in one typed
//! table per kind, and systems run in a fixed order once per tick.

pub mod component;
pub mod entity;
pub mod scheduler;
pub mod storage;
pub mod system;
pub mod world;

pub use component::Component;
pub use entity::{Entity, EntityRegistry};
pub use scheduler::SystemScheduler;
pub use storage::ComponentStorage;
pub use system::System;
pub use world::{ComponentStore, HasStorage};
