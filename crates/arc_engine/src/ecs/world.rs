//! Component store access
//!
//! A game declares its own store struct holding an [`EntityRegistry`] and one
//! [`ComponentStorage`] per component kind, then wires it up with
//! [`component_store!`](crate::component_store). Every access is resolved at
//! compile time through [`HasStorage`], so there is no type-erased lookup.
//!
//! ```rust
//! use arc_engine::component_store;
//! use arc_engine::ecs::{Component, ComponentStorage, ComponentStore, EntityRegistry};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Speed(f32);
//! impl Component for Speed {}
//!
//! #[derive(Default)]
//! struct Store {
//!     registry: EntityRegistry,
//!     speeds: ComponentStorage<Speed>,
//! }
//!
//! component_store!(Store { registry: registry, speeds: Speed });
//!
//! let mut store = Store::default();
//! let e = store.create_entity();
//! store.set(e, Speed(2.0));
//! assert_eq!(store.get::<Speed>(e), Some(&Speed(2.0)));
//! store.destroy_entity(e);
//! assert!(!store.has::<Speed>(e));
//! ```

use super::{Component, ComponentStorage, Entity, EntityRegistry};

/// Compile-time access to the table holding components of kind `T`
pub trait HasStorage<T: Component> {
    /// Shared access to the table
    fn storage(&self) -> &ComponentStorage<T>;

    /// Exclusive access to the table
    fn storage_mut(&mut self) -> &mut ComponentStorage<T>;
}

/// Entity lifecycle plus the generic per-kind operations of a component store.
///
/// Accessors never fail: an absent component reads as `None`, and writes aimed
/// at an entity that is not alive are dropped.
pub trait ComponentStore {
    /// The registry issuing this store's entities
    fn registry(&self) -> &EntityRegistry;

    /// Mutable access to the registry
    fn registry_mut(&mut self) -> &mut EntityRegistry;

    /// Remove `entity` from every component table
    fn remove_all_components(&mut self, entity: Entity);

    /// Allocate a fresh entity with no components
    fn create_entity(&mut self) -> Entity {
        self.registry_mut().create()
    }

    /// Remove `entity` from every table and invalidate its id.
    ///
    /// Completes before returning, so no caller can observe a partially
    /// removed entity.
    fn destroy_entity(&mut self, entity: Entity) {
        if !self.is_valid(entity) {
            return;
        }
        self.remove_all_components(entity);
        self.registry_mut().destroy(entity);
    }

    /// True iff `entity` was issued and not yet destroyed
    fn is_valid(&self, entity: Entity) -> bool {
        self.registry().is_valid(entity)
    }

    /// Insert or overwrite the `T` component of `entity`
    fn set<T: Component>(&mut self, entity: Entity, component: T)
    where
        Self: HasStorage<T>,
    {
        if !self.is_valid(entity) {
            log::warn!(
                "Ignoring {} for dead entity {}",
                std::any::type_name::<T>(),
                entity
            );
            return;
        }
        self.storage_mut().insert(entity, component);
    }

    /// The `T` component of `entity`, if present
    fn get<T: Component>(&self, entity: Entity) -> Option<&T>
    where
        Self: HasStorage<T>,
    {
        self.storage().get(entity)
    }

    /// The `T` component of `entity` mutably, if present
    fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T>
    where
        Self: HasStorage<T>,
    {
        self.storage_mut().get_mut(entity)
    }

    /// Detach and return the `T` component of `entity`
    fn remove<T: Component>(&mut self, entity: Entity) -> Option<T>
    where
        Self: HasStorage<T>,
    {
        self.storage_mut().remove(entity)
    }

    /// Whether `entity` carries a `T` component
    fn has<T: Component>(&self, entity: Entity) -> bool
    where
        Self: HasStorage<T>,
    {
        self.storage().contains(entity)
    }

    /// Every entity carrying a `T` component, in unspecified order
    fn entities_with<T: Component>(&self) -> Vec<Entity>
    where
        Self: HasStorage<T>,
    {
        self.storage().entities()
    }
}

/// Implement [`HasStorage`] for each listed table and [`ComponentStore`] for
/// the store type.
///
/// The first entry names the registry field; every following entry is
/// `field: ComponentType`.
#[macro_export]
macro_rules! component_store {
    ($store:ty { registry: $registry:ident, $($field:ident : $component:ty),+ $(,)? }) => {
        $(
            impl $crate::ecs::HasStorage<$component> for $store {
                fn storage(&self) -> &$crate::ecs::ComponentStorage<$component> {
                    &self.$field
                }

                fn storage_mut(&mut self) -> &mut $crate::ecs::ComponentStorage<$component> {
                    &mut self.$field
                }
            }
        )+

        impl $crate::ecs::ComponentStore for $store {
            fn registry(&self) -> &$crate::ecs::EntityRegistry {
                &self.$registry
            }

            fn registry_mut(&mut self) -> &mut $crate::ecs::EntityRegistry {
                &mut self.$registry
            }

            fn remove_all_components(&mut self, entity: $crate::ecs::Entity) {
                $( self.$field.remove(entity); )+
            }
        }
    };
}
