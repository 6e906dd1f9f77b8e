//! System trait
//!
//! A system is a per-tick function over the entities of a component store,
//! recognizing the entities it acts on by the components they carry.

/// System trait for processing entities and components of a store `W`
pub trait System<W> {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Advance this system by one tick
    fn update(&mut self, delta_time: f32, world: &mut W);
}

impl<W, S: System<W> + ?Sized> System<W> for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn update(&mut self, delta_time: f32, world: &mut W) {
        (**self).update(delta_time, world);
    }
}
