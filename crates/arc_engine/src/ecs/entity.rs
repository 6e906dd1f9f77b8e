//! Entity implementation
//!
//! Entities are plain identifiers. They own no data and have no behavior;
//! components are attached to them through a component store.

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;

/// Entity identifier
///
/// Identifiers are non-zero. [`Entity::INVALID`] is the sentinel used where an
/// entity slot is empty, and it is never issued by an [`EntityRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Sentinel that never names a live entity
    pub const INVALID: Self = Self { id: 0 };

    /// Create an entity handle from a non-zero raw id
    pub(super) fn new(id: NonZeroU32) -> Self {
        Self { id: id.get() }
    }

    /// Get the entity ID
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Whether this handle is the invalid sentinel
    pub fn is_invalid(&self) -> bool {
        self.id == 0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

/// Allocates entity identifiers and tracks which ones are still alive.
///
/// Allocation is monotonic: identifiers are never reused during a session, so
/// a stale handle can always be told apart from a newer entity.
#[derive(Debug)]
pub struct EntityRegistry {
    next_entity_id: NonZeroU32,
    destroyed: HashSet<Entity>,
}

impl EntityRegistry {
    /// Create an empty registry. The first issued id is 1.
    pub fn new() -> Self {
        Self {
            next_entity_id: NonZeroU32::MIN, // Start at 1, 0 is invalid entity
            destroyed: HashSet::new(),
        }
    }

    /// Issue a fresh identifier, strictly greater than every previous one.
    ///
    /// # Panics
    ///
    /// Panics if the 32-bit id space is exhausted.
    pub fn create(&mut self) -> Entity {
        let id = self.next_entity_id;
        self.next_entity_id = id.checked_add(1).expect("entity id space exhausted");
        Entity::new(id)
    }

    /// Mark an entity as destroyed. Unknown or already destroyed ids are ignored.
    pub fn destroy(&mut self, entity: Entity) {
        if self.was_issued(entity) {
            self.destroyed.insert(entity);
        }
    }

    /// True iff `entity` was issued by this registry and not yet destroyed.
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.was_issued(entity) && !self.destroyed.contains(&entity)
    }

    /// Number of identifiers handed out so far
    pub fn issued(&self) -> u32 {
        self.next_entity_id.get() - 1
    }

    /// Every live entity, in issue order
    pub fn alive(&self) -> impl Iterator<Item = Entity> + '_ {
        (1..self.next_entity_id.get())
            .filter_map(NonZeroU32::new)
            .map(Entity::new)
            .filter(|entity| !self.destroyed.contains(entity))
    }

    fn was_issued(&self, entity: Entity) -> bool {
        !entity.is_invalid() && entity.id < self.next_entity_id.get()
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_above_sentinel_and_increase() {
        let mut registry = EntityRegistry::new();
        let a = registry.create();
        let b = registry.create();
        let c = registry.create();

        assert_eq!(a.id(), 1);
        assert!(a < b && b < c);
        assert!(!a.is_invalid());
        assert_eq!(registry.issued(), 3);
    }

    #[test]
    fn test_destroyed_entity_is_invalid() {
        let mut registry = EntityRegistry::new();
        let a = registry.create();
        let b = registry.create();

        registry.destroy(a);

        assert!(!registry.is_valid(a));
        assert!(registry.is_valid(b));
    }

    #[test]
    fn test_ids_are_not_reused_after_destroy() {
        let mut registry = EntityRegistry::new();
        let a = registry.create();
        registry.destroy(a);
        let b = registry.create();

        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_alive_skips_destroyed() {
        let mut registry = EntityRegistry::new();
        let a = registry.create();
        let b = registry.create();
        let c = registry.create();
        registry.destroy(b);

        assert_eq!(registry.alive().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn test_sentinel_and_unissued_ids_are_invalid() {
        let mut registry = EntityRegistry::new();
        assert!(!registry.is_valid(Entity::INVALID));

        let issued = registry.create();
        let future = Entity::new(NonZeroU32::new(issued.id() + 5).unwrap());
        assert!(!registry.is_valid(future));

        // Destroying something we never issued must not poison later ids
        registry.destroy(future);
        for _ in 0..5 {
            registry.create();
        }
        assert!(registry.is_valid(future));
    }
}
