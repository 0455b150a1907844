//! Transform component for the ECS system
//!
//! Pure data: position, Euler rotation in degrees and scale, plus an
//! optional parent and the cached world matrix the physics step refreshes.

use bitflags::bitflags;

use crate::ecs::Entity;
use crate::foundation::math::utils::{rotation_degrees, scaling, translation};
use crate::foundation::math::{Mat4, Vec2, Vec3};

bitflags! {
    /// Parts of the parent transform a child composes into its world matrix
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ParentInheritance: u8 {
        /// Parent translation
        const POSITION = 1 << 0;
        /// Parent rotation
        const ROTATION = 1 << 1;
        /// Parent scale
        const SCALE = 1 << 2;
    }
}

impl Default for ParentInheritance {
    fn default() -> Self {
        Self::all()
    }
}

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Position; Z is kept for draw order and never touched by collisions
    pub position: Vec3,

    /// Euler angles in degrees, applied X then Y then Z
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,

    /// Entity whose transform this one is composed with
    pub parent: Option<Entity>,

    /// Which parts of the parent's transform are inherited
    pub inheritance: ParentInheritance,

    /// World matrix, refreshed once per physics step
    pub matrix: Mat4,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            parent: None,
            inheritance: ParentInheritance::default(),
            matrix: Mat4::identity(),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation (degrees)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set parent and inherited parts
    pub fn with_parent(mut self, parent: Entity, inheritance: ParentInheritance) -> Self {
        self.parent = Some(parent);
        self.inheritance = inheritance;
        self
    }

    /// Position projected onto the collision plane
    pub fn planar_position(&self) -> Vec2 {
        self.position.xy()
    }

    /// Move in the collision plane, keeping Z
    pub fn set_planar_position(&mut self, position: Vec2) {
        self.position.x = position.x;
        self.position.y = position.y;
    }

    /// Translate × rotate × scale of this transform alone
    pub fn local_matrix(&self) -> Mat4 {
        translation(&self.position) * rotation_degrees(&self.rotation) * scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_transform_identity() {
        let transform = TransformComponent::identity();

        assert_eq!(transform.position, Vec3::zeros());
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(transform.parent, None);
        assert_eq!(transform.inheritance, ParentInheritance::all());
        assert_relative_eq!(transform.local_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_planar_position_keeps_depth() {
        let mut transform = TransformComponent::from_position(Vec3::new(1.0, 2.0, -5.0));
        transform.set_planar_position(Vec2::new(7.0, 8.0));

        assert_eq!(transform.position, Vec3::new(7.0, 8.0, -5.0));
        assert_eq!(transform.planar_position(), Vec2::new(7.0, 8.0));
    }

    #[test]
    fn test_local_matrix_applies_scale_then_rotation_then_translation() {
        let transform = TransformComponent::identity()
            .with_position(Vec3::new(10.0, 0.0, 0.0))
            .with_rotation(Vec3::new(0.0, 0.0, 90.0))
            .with_scale(Vec3::new(2.0, 1.0, 1.0));

        let p = transform.local_matrix().transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        // scaled to (2, 0), turned to (0, 2), moved to (10, 2)
        assert_relative_eq!(p.coords, Vec3::new(10.0, 2.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_inheritance_flags() {
        let flags = ParentInheritance::POSITION | ParentInheritance::SCALE;
        assert!(flags.contains(ParentInheritance::POSITION));
        assert!(!flags.contains(ParentInheritance::ROTATION));
        assert_eq!(ParentInheritance::default(), ParentInheritance::all());
    }
}
