//! World matrix assembly
//!
//! A child's world matrix is its own translate × rotate × scale, composed
//! with the parts of its parent's transform it inherits. Only the direct
//! parent's own components take part; grandparents do not.

use crate::ecs::{ParentInheritance, TransformComponent};
use crate::foundation::math::utils::{rotation_degrees, scaling, translation};
use crate::foundation::math::Mat4;

/// Matrix of the inherited parts of `parent`, translate × rotate × scale
pub fn parent_matrix(parent: &TransformComponent, inheritance: ParentInheritance) -> Mat4 {
    let mut matrix = Mat4::identity();

    if inheritance.contains(ParentInheritance::POSITION) {
        matrix *= translation(&parent.position);
    }
    if inheritance.contains(ParentInheritance::ROTATION) {
        matrix *= rotation_degrees(&parent.rotation);
    }
    if inheritance.contains(ParentInheritance::SCALE) {
        matrix *= scaling(&parent.scale);
    }

    matrix
}

/// World matrix of `local`, composed with `parent` when there is one
pub fn assemble_world_matrix(
    local: &TransformComponent,
    parent: Option<&TransformComponent>,
    inheritance: ParentInheritance,
) -> Mat4 {
    let matrix = local.local_matrix();

    match parent {
        Some(parent) => parent_matrix(parent, inheritance) * matrix,
        None => matrix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    const EPSILON: f32 = 1e-5;

    fn parent() -> TransformComponent {
        TransformComponent::from_position(Vec3::new(10.0, 0.0, 0.0))
            .with_rotation(Vec3::new(0.0, 0.0, 90.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0))
    }

    fn child() -> TransformComponent {
        TransformComponent::from_position(Vec3::new(1.0, 0.0, 0.0))
    }

    fn origin_of(matrix: &Mat4) -> Vec3 {
        matrix.transform_point(&Point3::origin()).coords
    }

    #[test]
    fn test_no_parent_is_local_matrix() {
        let matrix = assemble_world_matrix(&child(), None, ParentInheritance::all());
        assert_relative_eq!(matrix, child().local_matrix(), epsilon = EPSILON);
    }

    #[test]
    fn test_full_inheritance() {
        let matrix = assemble_world_matrix(&child(), Some(&parent()), ParentInheritance::all());
        // (1, 0) scaled to (2, 0), turned to (0, 2), moved to (10, 2)
        assert_relative_eq!(origin_of(&matrix), Vec3::new(10.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_position_only_inheritance() {
        let matrix = assemble_world_matrix(&child(), Some(&parent()), ParentInheritance::POSITION);
        assert_relative_eq!(origin_of(&matrix), Vec3::new(11.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_omitting_everything_ignores_parent() {
        let matrix = assemble_world_matrix(&child(), Some(&parent()), ParentInheritance::empty());
        assert_relative_eq!(matrix, child().local_matrix(), epsilon = EPSILON);
    }
}
