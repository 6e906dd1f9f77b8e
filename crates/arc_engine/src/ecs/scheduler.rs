//! System scheduling
//!
//! Systems run synchronously, once per tick, in the order they were added.
//! There is no dependency graph and no parallelism: the order of registration
//! is the execution order, and a system observes exactly the writes of the
//! systems registered before it.

use super::System;

/// Ordered list of systems driven once per tick
#[derive(Debug)]
pub struct SystemScheduler<S> {
    systems: Vec<S>,
    ticks: u64,
}

impl<S> SystemScheduler<S> {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            ticks: 0,
        }
    }

    /// Append a system; it runs after every system added before it
    pub fn add_system(&mut self, system: S) {
        self.systems.push(system);
    }

    /// Builder-style variant of [`add_system`](Self::add_system)
    #[must_use]
    pub fn with_system(mut self, system: S) -> Self {
        self.add_system(system);
        self
    }

    /// Run every system once, in registration order
    pub fn update<W>(&mut self, delta_time: f32, world: &mut W)
    where
        S: System<W>,
    {
        for system in &mut self.systems {
            log::trace!("Running system {}", system.name());
            system.update(delta_time, world);
        }
        self.ticks += 1;
    }

    /// Registered systems in execution order
    pub fn systems(&self) -> &[S] {
        &self.systems
    }

    /// Mutable access to the registered systems
    pub fn systems_mut(&mut self) -> &mut [S] {
        &mut self.systems
    }

    /// Number of completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl<S> Default for SystemScheduler<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        label: &'static str,
    }

    impl System<Vec<&'static str>> for Recorder {
        fn name(&self) -> &'static str {
            self.label
        }

        fn update(&mut self, _delta_time: f32, world: &mut Vec<&'static str>) {
            world.push(self.label);
        }
    }

    #[test]
    fn test_systems_run_in_registration_order() {
        let mut scheduler = SystemScheduler::new()
            .with_system(Recorder { label: "input" })
            .with_system(Recorder { label: "movement" })
            .with_system(Recorder { label: "collision" });
        let mut log = Vec::new();

        scheduler.update(0.016, &mut log);
        scheduler.update(0.016, &mut log);

        assert_eq!(
            log,
            vec!["input", "movement", "collision", "input", "movement", "collision"]
        );
        assert_eq!(scheduler.ticks(), 2);
    }

    #[test]
    fn test_boxed_systems_are_systems() {
        let mut scheduler: SystemScheduler<Box<dyn System<Vec<&'static str>>>> =
            SystemScheduler::new();
        scheduler.add_system(Box::new(Recorder { label: "a" }));
        scheduler.add_system(Box::new(Recorder { label: "b" }));
        let mut log = Vec::new();

        scheduler.update(1.0, &mut log);

        assert_eq!(log, vec!["a", "b"]);
        assert_eq!(scheduler.systems()[1].name(), "b");
    }
}
