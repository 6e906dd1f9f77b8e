//! Component trait
//!
//! Components are plain values attached to an entity. Any `'static` type can be
//! a component once it opts in by implementing the marker trait.

/// Marker trait for components
pub trait Component: 'static {}
