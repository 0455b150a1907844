//! ECS World implementation

use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

use super::{Entity, PhysicsComponent, TransformComponent};

/// Errors raised by world bookkeeping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The entity was never created or has been removed
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(Entity),

    /// The operation needs a transform the entity does not have
    #[error("entity {0:?} has no transform")]
    MissingTransform(Entity),

    /// Parenting would make an entity its own ancestor
    #[error("parenting {child:?} to {parent:?} would create a cycle")]
    ParentCycle {
        /// Entity being parented
        child: Entity,
        /// Requested parent
        parent: Entity,
    },
}

/// ECS World containing all entities and components
///
/// Entities are kept in creation order; the physics step tests pairs in
/// that order.
pub struct World {
    entities: SlotMap<Entity, ()>,
    order: Vec<Entity>,
    transforms: SecondaryMap<Entity, TransformComponent>,
    bodies: SecondaryMap<Entity, PhysicsComponent>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: Vec::new(),
            transforms: SecondaryMap::new(),
            bodies: SecondaryMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.insert(());
        self.order.push(entity);
        entity
    }

    /// Create an entity carrying a transform and a physics body
    pub fn spawn_body(&mut self, transform: TransformComponent, body: PhysicsComponent) -> Entity {
        let entity = self.create_entity();
        self.transforms.insert(entity, transform);
        self.bodies.insert(entity, body);
        entity
    }

    /// Remove an entity and its components.
    ///
    /// Children of the removed entity lose their parent link.
    pub fn remove_entity(&mut self, entity: Entity) -> Result<(), WorldError> {
        self.entities.remove(entity).ok_or(WorldError::NoSuchEntity(entity))?;
        self.order.retain(|&e| e != entity);
        self.transforms.remove(entity);
        self.bodies.remove(entity);

        for (child, transform) in self.transforms.iter_mut() {
            if transform.parent == Some(entity) {
                log::debug!("Clearing parent of {:?}, parent {:?} was removed", child, entity);
                transform.parent = None;
            }
        }

        Ok(())
    }

    /// True if the entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the world has no entities
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    /// Entities with a physics body, in creation order
    pub fn bodies(&self) -> Vec<Entity> {
        self.order
            .iter()
            .copied()
            .filter(|&e| self.bodies.contains_key(e))
            .collect()
    }

    /// Attach or replace a transform
    pub fn add_transform(&mut self, entity: Entity, transform: TransformComponent) -> Result<(), WorldError> {
        if !self.contains(entity) {
            return Err(WorldError::NoSuchEntity(entity));
        }
        self.transforms.insert(entity, transform);
        Ok(())
    }

    /// Attach or replace a physics body
    pub fn add_physics(&mut self, entity: Entity, body: PhysicsComponent) -> Result<(), WorldError> {
        if !self.contains(entity) {
            return Err(WorldError::NoSuchEntity(entity));
        }
        self.bodies.insert(entity, body);
        Ok(())
    }

    /// Get an entity's transform
    pub fn transform(&self, entity: Entity) -> Option<&TransformComponent> {
        self.transforms.get(entity)
    }

    /// Get an entity's transform mutably
    pub fn transform_mut(&mut self, entity: Entity) -> Option<&mut TransformComponent> {
        self.transforms.get_mut(entity)
    }

    /// Get an entity's physics body
    pub fn physics(&self, entity: Entity) -> Option<&PhysicsComponent> {
        self.bodies.get(entity)
    }

    /// Get an entity's physics body mutably
    pub fn physics_mut(&mut self, entity: Entity) -> Option<&mut PhysicsComponent> {
        self.bodies.get_mut(entity)
    }

    /// Entities with a transform, in creation order
    pub fn transformed(&self) -> Vec<Entity> {
        self.order
            .iter()
            .copied()
            .filter(|&e| self.transforms.contains_key(e))
            .collect()
    }

    /// Set or clear the parent of `child`'s transform
    pub fn set_parent(&mut self, child: Entity, parent: Option<Entity>) -> Result<(), WorldError> {
        if !self.contains(child) {
            return Err(WorldError::NoSuchEntity(child));
        }

        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(WorldError::NoSuchEntity(parent));
            }

            // walk up from the new parent; meeting the child means a cycle
            let mut cursor = Some(parent);
            while let Some(current) = cursor {
                if current == child {
                    return Err(WorldError::ParentCycle { child, parent });
                }
                cursor = self.transforms.get(current).and_then(|t| t.parent);
            }
        }

        let transform = self
            .transforms
            .get_mut(child)
            .ok_or(WorldError::MissingTransform(child))?;
        transform.parent = parent;
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec2, Vec3};
    use crate::physics::collision::Point;

    fn body() -> PhysicsComponent {
        PhysicsComponent::new(Point::new(Vec2::zeros()))
    }

    #[test]
    fn test_creation_order_is_kept() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.spawn_body(TransformComponent::identity(), body());
        let c = world.spawn_body(TransformComponent::identity(), body());

        assert_eq!(world.entities().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(world.bodies(), vec![b, c]);
        assert_eq!(world.len(), 3);
    }

    #[test]
    fn test_remove_entity_drops_components_and_parent_links() {
        let mut world = World::new();
        let parent = world.spawn_body(TransformComponent::identity(), body());
        let child = world.spawn_body(TransformComponent::from_position(Vec3::new(1.0, 0.0, 0.0)), body());
        world.set_parent(child, Some(parent)).unwrap();

        world.remove_entity(parent).unwrap();
        assert!(!world.contains(parent));
        assert!(world.physics(parent).is_none());
        assert_eq!(world.transform(child).unwrap().parent, None);
        assert_eq!(world.bodies(), vec![child]);

        assert_eq!(world.remove_entity(parent), Err(WorldError::NoSuchEntity(parent)));
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let mut world = World::new();
        let a = world.spawn_body(TransformComponent::identity(), body());
        let b = world.spawn_body(TransformComponent::identity(), body());

        world.set_parent(b, Some(a)).unwrap();
        assert_eq!(
            world.set_parent(a, Some(b)),
            Err(WorldError::ParentCycle { child: a, parent: b })
        );
        assert_eq!(
            world.set_parent(a, Some(a)),
            Err(WorldError::ParentCycle { child: a, parent: a })
        );
    }

    #[test]
    fn test_components_need_live_entity() {
        let mut world = World::new();
        let e = world.create_entity();
        world.remove_entity(e).unwrap();

        assert_eq!(world.add_physics(e, body()), Err(WorldError::NoSuchEntity(e)));
        assert_eq!(
            world.add_transform(e, TransformComponent::identity()),
            Err(WorldError::NoSuchEntity(e))
        );
    }

    #[test]
    fn test_set_parent_needs_transform() {
        let mut world = World::new();
        let parent = world.spawn_body(TransformComponent::identity(), body());
        let bare = world.create_entity();
        assert_eq!(world.set_parent(bare, Some(parent)), Err(WorldError::MissingTransform(bare)));
    }
}
