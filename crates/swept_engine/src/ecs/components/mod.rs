//! ECS Components module

pub mod physics;
pub mod transform;

pub use physics::PhysicsComponent;
pub use transform::{ParentInheritance, TransformComponent};
