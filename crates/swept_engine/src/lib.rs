//! # Swept Engine
//!
//! Swept 2D collision detection and roll-back resolution for a small game
//! engine.
//!
//! ## Features
//!
//! - **Swept tests**: Collisions are found along each body's displacement,
//!   so fast bodies do not tunnel through thin ones
//! - **Four primitives**: Point, Circle, axis-aligned and oriented boxes
//! - **Roll-back resolution**: The lighter moving body is moved back to its
//!   point of first contact
//! - **ECS Integration**: Bodies and transforms live in a slotmap-backed world
//!
//! ## Quick Start
//!
//! ```rust
//! use swept_engine::prelude::*;
//!
//! let mut world = World::new();
//! let mut events = EventSystem::new();
//! let mut physics = PhysicsSystem::new(PhysicsConfig::default());
//!
//! let wall = TransformComponent::from_position(Vec3::new(0.0, 0.0, 0.0))
//!     .with_scale(Vec3::new(2.0, 2.0, 1.0));
//! world.spawn_body(wall.clone(), PhysicsComponent::from_transform(ShapeKind::Aabb, &wall));
//!
//! let ball = world.spawn_body(
//!     TransformComponent::from_position(Vec3::new(3.0, 0.0, 0.0)),
//!     PhysicsComponent::new(Point::new(Vec2::new(3.0, 0.0))).with_velocity(Vec2::new(-6.0, 0.0)),
//! );
//!
//! physics.update(&mut world, &mut events);
//! assert_eq!(world.physics(ball).map(|b| b.collisions().len()), Some(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{ApplicationConfig, Config, EngineConfig, PhysicsConfig},
        ecs::{Entity, ParentInheritance, PhysicsComponent, TransformComponent, World},
        events::{Event, EventHandler, EventSystem, EventType},
        foundation::math::{Mat4, Vec2, Vec3},
        physics::{
            collision::{is_collision, Aabb, Circle, CollisionResult, Obb, Point, Shape, ShapeKind},
            PhysicsSystem, StepReport,
        },
    };
}
