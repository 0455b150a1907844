//! Entity-Component-System implementation
//!
//! A small world holding the two components the physics step works with:
//! [`TransformComponent`] for placement and [`PhysicsComponent`] for the
//! collider, its weight and its per-step velocity.

pub mod components;
pub mod entity;
pub mod world;

pub use components::{ParentInheritance, PhysicsComponent, TransformComponent};
pub use entity::Entity;
pub use world::{World, WorldError};
