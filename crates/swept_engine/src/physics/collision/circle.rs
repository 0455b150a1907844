//! Circle against point, circle and box

use crate::foundation::math::utils::{length_sq, normalize_or_zero};
use crate::foundation::math::Vec2;
use crate::physics::algebra::{distance_point_to_line, Line};

use super::aabb::aabb_point;
use super::result::{CollisionEvent, CollisionResult, ShapeCollision};
use super::shape::{Aabb, Circle, Point};

/// Diagonal directions of the box corners, top-left, top-right,
/// bottom-right, bottom-left
const CORNER_DIAGONALS: [(f32, f32); 4] = [(-1.0, 1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];

fn corner_normal(corner: usize) -> Vec2 {
    let (x, y) = CORNER_DIAGONALS[corner];
    Vec2::new(x, y).normalize()
}

/// Time of impact of a center moving `previous -> current` against a
/// stationary `target`, where contact happens at distance `reach`.
///
/// The time is found on the movement line: the contact center sits
/// `sqrt(reach² - perp²)` before the foot of the perpendicular from
/// `target`, and the final center sits at its signed offset from that foot.
/// Returns `None` for a zero displacement.
pub(crate) fn sweep_to_reach(previous: Vec2, current: Vec2, target: Vec2, reach: f32) -> Option<ShapeCollision> {
    let velocity = current - previous;
    let move_distance = velocity.norm();
    if move_distance == 0.0 {
        return None;
    }

    let direction = velocity / move_distance;
    let movement = Line::from_points(previous, current);
    let perp = distance_point_to_line(&movement, target);

    let final_offset = (current - target).dot(&direction);
    let contact_offset = (reach * reach - perp * perp).max(0.0).sqrt();
    let backoff = final_offset + contact_offset;

    let time = (1.0 - backoff / move_distance).clamp(0.0, 1.0);
    let adjusted = previous + velocity * time;

    Some(ShapeCollision::new(time, normalize_or_zero(target - adjusted)))
}

/// One operand's half for a moving center against a stationary target
fn sweep_event(previous: Vec2, current: Vec2, target: Vec2, reach: f32) -> CollisionEvent {
    match sweep_to_reach(previous, current, target, reach) {
        Some(this_shape) => CollisionEvent::hit(
            this_shape,
            ShapeCollision::new(1.0, -this_shape.normal),
        ),
        None => CollisionEvent::none(),
    }
}

/// Circle against point
pub fn circle_point(a: &Circle, b: &Point) -> CollisionResult {
    if length_sq(b.center - a.center) > a.radius * a.radius {
        return CollisionResult::none();
    }

    let mut result = CollisionResult::none();
    if a.is_moved() {
        result.a = sweep_event(a.previous_center, a.center, b.center, a.radius);
    }
    if b.is_moved() {
        result.b = sweep_event(b.previous_center, b.center, a.center, a.radius);
    }
    result
}

/// Circle against circle
pub fn circle_circle(a: &Circle, b: &Circle) -> CollisionResult {
    let reach = a.radius + b.radius;
    if length_sq(b.center - a.center) > reach * reach {
        return CollisionResult::none();
    }

    let mut result = CollisionResult::none();
    if a.is_moved() {
        result.a = sweep_event(a.previous_center, a.center, b.center, reach);
    }
    if b.is_moved() {
        result.b = sweep_event(b.previous_center, b.center, a.center, reach);
    }
    result
}

fn may_overlap(a: &Circle, b: &Aabb) -> bool {
    (b.center.x - a.center.x).abs() <= a.radius + b.half_extents.x
        && (b.center.y - a.center.y).abs() <= a.radius + b.half_extents.y
}

/// Circle against axis-aligned box.
///
/// Samples the circle's four extremal points against the box and the box's
/// four corners against the circle, keeping the deepest hit per operand.
pub fn circle_aabb(a: &Circle, b: &Aabb) -> CollisionResult {
    if !may_overlap(a, b) {
        return CollisionResult::none();
    }

    let mut result = CollisionResult::none();

    for point in a.cardinal_points() {
        let sample = aabb_point(b, &point).swapped();
        result.a.keep_deepest(sample.a);
        result.b.keep_deepest(sample.b);
    }

    let mut winning_corner = None;
    for (corner, point) in b.corner_points().iter().enumerate() {
        let sample = circle_point(a, point);
        result.a.keep_deepest(sample.a);
        if result.b.keep_deepest(sample.b) {
            winning_corner = Some(corner);
        }
    }

    if let Some(corner) = winning_corner {
        result.b.this_shape.normal = corner_normal(corner);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_moving_circle_against_resting_circle() {
        let a = Circle::new(Vec2::new(4.0, 0.0), 1.0).with_previous_center(Vec2::new(0.0, 0.0));
        let b = Circle::new(Vec2::new(4.0, 0.0), 1.0);

        let result = circle_circle(&a, &b);
        assert!(result.a.is_collision);
        assert!(!result.b.is_collision);
        assert_relative_eq!(result.a.this_shape.time, 0.5, epsilon = EPSILON);
        // adjusted center (2, 0) faces the resting circle along +x
        assert_relative_eq!(result.a.this_shape.normal, Vec2::new(1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(result.a.colliding_shape.time, 1.0);
        assert_relative_eq!(result.a.colliding_shape.normal, Vec2::new(-1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_circle_from_origin_to_three_against_circle_at_two() {
        // already touching at the start, so contact is at time 0
        let a = Circle::new(Vec2::new(3.0, 0.0), 1.0).with_previous_center(Vec2::new(0.0, 0.0));
        let b = Circle::new(Vec2::new(2.0, 0.0), 1.0);

        let result = circle_circle(&a, &b);
        assert!(result.a.is_collision);
        assert_relative_eq!(result.a.this_shape.time, 0.0, epsilon = EPSILON);
        assert_relative_eq!(result.a.this_shape.normal, Vec2::new(1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_circle_passing_the_foot_of_perpendicular() {
        // moves along x, the resting point sits 0.6 above the path at x = 2
        let a = Circle::new(Vec2::new(2.5, 0.0), 1.0).with_previous_center(Vec2::new(0.0, 0.0));
        let b = Point::new(Vec2::new(2.0, 0.6));

        let result = circle_point(&a, &b);
        assert!(result.a.is_collision);
        // contact at x = 2 - 0.8 = 1.2
        assert_relative_eq!(result.a.this_shape.time, 1.2 / 2.5, epsilon = EPSILON);
        assert_relative_eq!(result.a.this_shape.normal, Vec2::new(0.8, 0.6), epsilon = EPSILON);
    }

    #[test]
    fn test_circles_apart_do_not_collide() {
        let a = Circle::new(Vec2::new(1.0, 0.0), 1.0).with_previous_center(Vec2::new(0.0, 0.0));
        let b = Circle::new(Vec2::new(5.0, 0.0), 1.0);
        assert!(!circle_circle(&a, &b).is_any());
    }

    #[test]
    fn test_both_circles_moving_get_independent_halves() {
        let a = Circle::new(Vec2::new(1.0, 0.0), 1.0).with_previous_center(Vec2::new(-1.0, 0.0));
        let b = Circle::new(Vec2::new(2.0, 0.0), 1.0).with_previous_center(Vec2::new(4.0, 0.0));

        let result = circle_circle(&a, &b);
        assert!(result.a.is_collision && result.b.is_collision);
        // each assumes the other is already resting at its final center
        assert_relative_eq!(result.a.this_shape.time, 0.5, epsilon = EPSILON);
        assert_relative_eq!(result.a.this_shape.normal, Vec2::new(1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(result.b.this_shape.time, 0.5, epsilon = EPSILON);
        assert_relative_eq!(result.b.this_shape.normal, Vec2::new(-1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_moving_point_into_resting_circle() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 1.0);
        let b = Point::new(Vec2::new(0.0, 0.5)).with_previous_center(Vec2::new(0.0, 3.0));

        let result = circle_point(&a, &b);
        assert!(!result.a.is_collision);
        assert!(result.b.is_collision);
        // boundary at y = 1 is reached after 2 of 2.5 units
        assert_relative_eq!(result.b.this_shape.time, 0.8, epsilon = EPSILON);
        assert_relative_eq!(result.b.this_shape.normal, Vec2::new(0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(result.b.colliding_shape.normal, Vec2::new(0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_circle_dropping_onto_box_top() {
        let a = Circle::new(Vec2::new(0.0, 1.5), 1.0).with_previous_center(Vec2::new(0.0, 3.5));
        let b = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0));

        let result = circle_aabb(&a, &b);
        assert!(result.a.is_collision);
        assert!(!result.b.is_collision);
        // bottom point travels from y = 2.5 to 0.5 and meets the top face at 1
        assert_relative_eq!(result.a.this_shape.time, 0.75, epsilon = EPSILON);
        assert_relative_eq!(result.a.colliding_shape.normal, Vec2::new(0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_box_corner_into_resting_circle_uses_corner_normal() {
        // top-right corner travels from (-1.5, -1.5) to (-0.5, -0.5)
        let a = Circle::new(Vec2::new(0.0, 0.0), 1.0);
        let b = Aabb::new(Vec2::new(-1.0, -1.0), Vec2::new(0.5, 0.5))
            .with_previous_center(Vec2::new(-2.0, -2.0));

        let result = circle_aabb(&a, &b);
        assert!(result.b.is_collision);
        let diagonal = Vec2::new(1.0, 1.0).normalize();
        assert_relative_eq!(result.b.this_shape.normal, diagonal, epsilon = EPSILON);
    }

    #[test]
    fn test_broad_phase_rejects_far_box() {
        let a = Circle::new(Vec2::new(10.0, 0.0), 1.0).with_previous_center(Vec2::new(9.0, 0.0));
        let b = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert_eq!(circle_aabb(&a, &b), CollisionResult::none());
    }
}
