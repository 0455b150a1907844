//! Point against point

use crate::foundation::math::Vec2;

use super::result::{CollisionEvent, CollisionResult, ShapeCollision};
use super::shape::Point;

fn arrival_event(point: &Point) -> CollisionEvent {
    let time = if point.is_moved() { 1.0 } else { 0.0 };
    CollisionEvent::hit(
        ShapeCollision::new(time, Vec2::zeros()),
        ShapeCollision::new(1.0, Vec2::zeros()),
    )
}

/// Point against point: only exact coincidence of the final positions
/// counts. Normals are zero since there is no contact surface.
pub fn point_point(a: &Point, b: &Point) -> CollisionResult {
    if a.center != b.center {
        return CollisionResult::none();
    }

    CollisionResult {
        a: arrival_event(a),
        b: arrival_event(b),
    }
}
