//! Physics module
//!
//! Swept collision detection and weight-based roll-back resolution for 2D
//! bodies.
//!
//! # Architecture
//!
//! - [`algebra`] - Line segments and their intersections
//! - [`collision`] - Collider shapes and pairwise swept tests
//! - [`transform`] - World matrix assembly with parent inheritance
//! - [`PhysicsSystem`] - The per-step resolution loop over a [`World`](crate::ecs::World)
//!
//! A body moves by its velocity at the start of a step. Every pair that
//! collided is resolved by rolling one of its bodies back along its own
//! motion to the point of first contact.

pub mod algebra;
pub mod collision;
pub mod transform;

mod physics_system;


pub use physics_system::{PhysicsSystem, StepReport};
