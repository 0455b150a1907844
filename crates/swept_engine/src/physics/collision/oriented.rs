//! Oriented box pairs
//!
//! Only oriented box against point is supported. The point is brought into
//! the box's local frame, where the box is axis-aligned, and the result's
//! normals are turned back into world space.

use crate::foundation::math::utils::rotate_clockwise;
use crate::foundation::math::Vec2;

use super::aabb::aabb_point;
use super::result::{CollisionEvent, CollisionResult};
use super::shape::{Aabb, Obb, Point};

/// Map a world position into the frame where `obb` is axis-aligned,
/// pivoting around the box's final center
fn to_local(obb: &Obb, position: Vec2) -> Vec2 {
    rotate_clockwise(position - obb.center, -obb.rotation) + obb.center
}

fn normals_to_world(event: &mut CollisionEvent, rotation: f32) {
    if event.is_collision {
        event.this_shape.normal = rotate_clockwise(event.this_shape.normal, rotation);
        event.colliding_shape.normal = rotate_clockwise(event.colliding_shape.normal, rotation);
    }
}

/// Oriented box against point
pub fn obb_point(a: &Obb, b: &Point) -> CollisionResult {
    let local_box = Aabb {
        center: a.center,
        previous_center: to_local(a, a.previous_center),
        half_extents: a.half_extents,
    };
    let local_point = Point {
        center: to_local(a, b.center),
        previous_center: to_local(a, b.previous_center),
    };

    let mut result = aabb_point(&local_box, &local_point);
    normals_to_world(&mut result.a, a.rotation);
    normals_to_world(&mut result.b, a.rotation);
    result
}
