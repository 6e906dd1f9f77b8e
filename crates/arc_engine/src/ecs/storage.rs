//! Typed component storage
//!
//! One [`ComponentStorage`] exists per component kind. Values are owned by the
//! table and keyed by their entity, so no component is ever shared between two
//! entities and callers only ever hold borrows scoped to the current access.

use std::collections::HashMap;

use super::{Component, Entity};

/// Table mapping entity → component value for a single component kind
#[derive(Debug, Clone)]
pub struct ComponentStorage<T: Component> {
    components: HashMap<Entity, T>,
}

impl<T: Component> ComponentStorage<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Insert or overwrite the component for `entity`, returning the old value
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        self.components.insert(entity, component)
    }

    /// Get the component for `entity`
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.components.get(&entity)
    }

    /// Get the component for `entity` mutably
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut(&entity)
    }

    /// Remove the component for `entity`, returning it if it was present
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.components.remove(&entity)
    }

    /// Whether `entity` has a component in this table
    pub fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(&entity)
    }

    /// Snapshot of the entities present in this table.
    ///
    /// Iteration order is unspecified. The returned list is owned, so the table
    /// can be mutated while walking it.
    pub fn entities(&self) -> Vec<Entity> {
        self.components.keys().copied().collect()
    }

    /// Iterate over `(entity, component)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.components.iter().map(|(&entity, component)| (entity, component))
    }

    /// Iterate mutably over `(entity, component)` pairs in unspecified order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.components
            .iter_mut()
            .map(|(&entity, component)| (entity, component))
    }

    /// Number of entities with this component
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Remove every component from the table
    pub fn clear(&mut self) {
        self.components.clear();
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::EntityRegistry;

    #[derive(Debug, Clone, PartialEq)]
    struct Health(u32);

    impl Component for Health {}

    #[test]
    fn test_insert_overwrites() {
        let mut registry = EntityRegistry::new();
        let e = registry.create();
        let mut storage = ComponentStorage::new();

        assert_eq!(storage.insert(e, Health(3)), None);
        assert_eq!(storage.insert(e, Health(5)), Some(Health(3)));
        assert_eq!(storage.get(e), Some(&Health(5)));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_get_absent_returns_none() {
        let mut registry = EntityRegistry::new();
        let e = registry.create();
        let storage: ComponentStorage<Health> = ComponentStorage::new();

        assert!(storage.get(e).is_none());
        assert!(!storage.contains(e));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_remove_and_mutate() {
        let mut registry = EntityRegistry::new();
        let a = registry.create();
        let b = registry.create();
        let mut storage = ComponentStorage::new();
        storage.insert(a, Health(1));
        storage.insert(b, Health(2));

        if let Some(health) = storage.get_mut(b) {
            health.0 += 10;
        }
        assert_eq!(storage.remove(a), Some(Health(1)));
        assert_eq!(storage.remove(a), None);

        let mut entities = storage.entities();
        entities.sort();
        assert_eq!(entities, vec![b]);
        assert_eq!(storage.get(b), Some(&Health(12)));
    }
}
