//! Swept pairwise collision detection
//!
//! Every query takes two shapes whose `previous_center -> center`
//! displacement describes this step's motion and answers, for each operand,
//! how far along its displacement it first touched the other one.
//!
//! # Module Organization
//!
//! - [`shape`] - The four collider primitives and the [`Shape`] sum type
//! - [`result`] - [`ShapeCollision`], [`CollisionEvent`], [`CollisionResult`]
//! - `point`, `circle`, `aabb`, `oriented` - Per-pair algorithms
//!
//! # Supported pairs
//!
//! | A \ B  | Point | Circle | AABB | OBB |
//! |--------|-------|--------|------|-----|
//! | Point  | yes   | yes    | yes  | yes |
//! | Circle | yes   | yes    | yes  | no  |
//! | AABB   | yes   | yes    | yes  | no  |
//! | OBB    | yes   | no     | no   | no  |
//!
//! Unsupported pairs always report no collision.

pub mod result;
pub mod shape;

mod aabb;
mod circle;
mod oriented;
mod point;

pub use aabb::{aabb_aabb, aabb_point};
pub use circle::{circle_aabb, circle_circle, circle_point};
pub use oriented::obb_point;
pub use point::point_point;
pub use result::{CollisionEvent, CollisionResult, ShapeCollision};
pub use shape::{Aabb, Circle, Obb, Point, Shape, ShapeKind, ShapeParseError};

/// True when a pair of kinds has a collision algorithm, in either order
pub fn is_supported(a: ShapeKind, b: ShapeKind) -> bool {
    match (a, b) {
        (ShapeKind::Obb, ShapeKind::Point) | (ShapeKind::Point, ShapeKind::Obb) => true,
        (ShapeKind::Obb, _) | (_, ShapeKind::Obb) => false,
        _ => true,
    }
}

/// Test two shapes for a collision caused by this step's motion.
///
/// Pairs where neither shape moved never collide. The result's `a` and `b`
/// events belong to the first and second argument; swapping the arguments
/// swaps the events.
pub fn is_collision(a: &Shape, b: &Shape) -> CollisionResult {
    if !a.is_moved() && !b.is_moved() {
        return CollisionResult::none();
    }

    dispatch(a, b)
}

fn dispatch(a: &Shape, b: &Shape) -> CollisionResult {
    match (a, b) {
        (Shape::Point(a), Shape::Point(b)) => point_point(a, b),
        (Shape::Circle(a), Shape::Point(b)) => circle_point(a, b),
        (Shape::Circle(a), Shape::Circle(b)) => circle_circle(a, b),
        (Shape::Circle(a), Shape::Aabb(b)) => circle_aabb(a, b),
        (Shape::Aabb(a), Shape::Point(b)) => aabb_point(a, b),
        (Shape::Aabb(a), Shape::Aabb(b)) => aabb_aabb(a, b),
        (Shape::Obb(a), Shape::Point(b)) => obb_point(a, b),

        (Shape::Point(_), Shape::Circle(_) | Shape::Aabb(_) | Shape::Obb(_))
        | (Shape::Aabb(_), Shape::Circle(_)) => mirrored(a, b),

        (Shape::Circle(_) | Shape::Aabb(_), Shape::Obb(_))
        | (Shape::Obb(_), Shape::Circle(_) | Shape::Aabb(_) | Shape::Obb(_)) => {
            log::trace!("No collision algorithm for {} x {}", a.kind(), b.kind());
            CollisionResult::none()
        }
    }
}

/// Run the pair in its implemented order and hand the events back swapped
fn mirrored(a: &Shape, b: &Shape) -> CollisionResult {
    dispatch(b, a).swapped()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn all_kinds_at(center: Vec2) -> [Shape; 4] {
        [
            Point::new(center).into(),
            Circle::new(center, 1.0).into(),
            Aabb::new(center, Vec2::new(1.0, 1.0)).into(),
            Obb::new(center, Vec2::new(1.0, 1.0), 30.0).into(),
        ]
    }

    fn moved(mut shape: Shape, velocity: Vec2) -> Shape {
        let start = shape.center() - velocity;
        shape.teleport(start);
        shape.advance(velocity);
        shape
    }

    #[test]
    fn test_static_pairs_never_collide() {
        // fully overlapping yet motionless
        for a in all_kinds_at(Vec2::zeros()) {
            for b in all_kinds_at(Vec2::zeros()) {
                assert_eq!(is_collision(&a, &b), CollisionResult::none());
            }
        }
    }

    #[test]
    fn test_swapping_operands_swaps_events() {
        let velocity = Vec2::new(0.75, -0.5);
        for a in all_kinds_at(Vec2::new(0.4, 0.3)) {
            for b in all_kinds_at(Vec2::new(-0.3, 0.2)) {
                let a = moved(a, velocity);
                let forward = is_collision(&a, &b);
                let backward = is_collision(&b, &a);
                assert_eq!(forward, backward.swapped(), "{} x {}", a.kind(), b.kind());
            }
        }
    }

    #[test]
    fn test_swapping_operands_with_both_moving() {
        for a in all_kinds_at(Vec2::new(0.4, 0.3)) {
            for b in all_kinds_at(Vec2::new(-0.3, 0.2)) {
                let a = moved(a, Vec2::new(0.75, -0.5));
                let b = moved(b, Vec2::new(-0.4, 0.6));
                let forward = is_collision(&a, &b);
                let backward = is_collision(&b, &a);
                assert_eq!(forward, backward.swapped(), "{} x {}", a.kind(), b.kind());
            }
        }
    }

    #[test]
    fn test_unsupported_oriented_pairs_report_nothing() {
        let obb: Shape = moved(Obb::new(Vec2::zeros(), Vec2::new(1.0, 1.0), 45.0).into(), Vec2::new(0.5, 0.0));
        let others: [Shape; 3] = [
            Circle::new(Vec2::new(0.2, 0.0), 1.0).into(),
            Aabb::new(Vec2::new(0.2, 0.0), Vec2::new(1.0, 1.0)).into(),
            Obb::new(Vec2::new(0.2, 0.0), Vec2::new(1.0, 1.0), 10.0).into(),
        ];

        for other in others {
            assert!(!is_supported(obb.kind(), other.kind()));
            assert!(!is_collision(&obb, &other).is_any());
            assert!(!is_collision(&other, &obb).is_any());
        }
    }

    #[test]
    fn test_supported_pairs() {
        assert!(is_supported(ShapeKind::Point, ShapeKind::Obb));
        assert!(is_supported(ShapeKind::Obb, ShapeKind::Point));
        assert!(is_supported(ShapeKind::Aabb, ShapeKind::Circle));
        assert!(!is_supported(ShapeKind::Obb, ShapeKind::Obb));
    }

    #[test]
    fn test_point_into_box_through_dispatch() {
        let aabb: Shape = Aabb::new(Vec2::zeros(), Vec2::new(1.0, 1.0)).into();
        let point: Shape = Point::new(Vec2::new(-3.0, 0.0))
            .with_previous_center(Vec2::new(3.0, 0.0))
            .into();

        let result = is_collision(&point, &aabb);
        assert!(result.a.is_collision);
        assert_relative_eq!(result.a.this_shape.time, 1.0 / 3.0, epsilon = EPSILON);
        assert_relative_eq!(result.a.colliding_shape.normal, Vec2::new(1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_mirrored_circle_against_box() {
        let aabb: Shape = Aabb::new(Vec2::zeros(), Vec2::new(2.0, 1.0)).into();
        let circle: Shape = Circle::new(Vec2::new(0.0, 1.5), 1.0)
            .with_previous_center(Vec2::new(0.0, 3.5))
            .into();

        let result = is_collision(&aabb, &circle);
        assert!(!result.a.is_collision);
        assert!(result.b.is_collision);
        assert_relative_eq!(result.b.this_shape.time, 0.75, epsilon = EPSILON);
    }
}
