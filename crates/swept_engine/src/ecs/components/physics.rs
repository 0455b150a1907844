//! Physics component for the ECS system
//!
//! Holds the collider the physics step moves and resolves, the weight used to
//! decide which body gives way, and the contact normals gathered for gameplay
//! reactions.

use crate::ecs::TransformComponent;
use crate::foundation::math::Vec2;
use crate::physics::collision::{Aabb, Circle, Obb, Point, Shape, ShapeKind, ShapeParseError};

/// Collider, weight and per-step velocity of a body
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsComponent {
    /// Collider in world coordinates
    pub shape: Shape,

    /// Relative weight; a weight of exactly zero makes the body a ghost that
    /// never takes part in collision resolution
    pub weight: f32,

    /// Displacement applied at the start of every step
    pub velocity: Vec2,

    collisions: Vec<Vec2>,
    collided: bool,
    collision_count: u64,
}

impl PhysicsComponent {
    /// Create a body with weight 1 and no velocity
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            weight: 1.0,
            velocity: Vec2::zeros(),
            collisions: Vec::new(),
            collided: false,
            collision_count: 0,
        }
    }

    /// Build a collider of `kind` sized by a transform: half extents are half
    /// the scale, a circle's radius is half the X scale and an oriented box
    /// takes the Z rotation.
    pub fn from_transform(kind: ShapeKind, transform: &TransformComponent) -> Self {
        let center = transform.planar_position();
        let half_extents = transform.scale.xy() * 0.5;

        let shape = match kind {
            ShapeKind::Point => Shape::from(Point::new(center)),
            ShapeKind::Circle => Circle::new(center, transform.scale.x * 0.5).into(),
            ShapeKind::Aabb => Aabb::new(center, half_extents).into(),
            // counter-clockwise transform angle to clockwise collider angle
            ShapeKind::Obb => Obb::new(center, half_extents, -transform.rotation.z).into(),
        };

        Self::new(shape)
    }

    /// [`PhysicsComponent::from_transform`] with the kind given by name
    /// ("Point", "Circle", "AABB" or "OBB")
    pub fn from_kind_name(name: &str, transform: &TransformComponent) -> Result<Self, ShapeParseError> {
        let kind: ShapeKind = name.parse()?;
        Ok(Self::from_transform(kind, transform))
    }

    /// Builder pattern: Set weight
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Builder pattern: Set velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// True for weightless bodies, which are skipped by collision resolution
    pub fn is_ghost(&self) -> bool {
        self.weight == 0.0
    }

    /// Contact normals recorded since the last [`reset_collisions`](Self::reset_collisions)
    pub fn collisions(&self) -> &[Vec2] {
        &self.collisions
    }

    /// Record a contact normal
    pub fn add_collision(&mut self, normal: Vec2) {
        self.collisions.push(normal);
    }

    /// Forget recorded contact normals once gameplay has reacted to them
    pub fn reset_collisions(&mut self) {
        self.collisions.clear();
    }

    /// Mark that this body took part in a collision this step
    pub fn notify_collision(&mut self) {
        self.collided = true;
        self.collision_count += 1;
    }

    /// True when the body took part in a collision during the last step
    pub fn has_collided(&self) -> bool {
        self.collided
    }

    /// Collisions this body took part in since it was created
    pub fn collision_count(&self) -> u64 {
        self.collision_count
    }

    /// Clear the per-step collision flag
    pub(crate) fn begin_step(&mut self) {
        self.collided = false;
    }
}
