//! Axis-aligned box against point and box

use crate::foundation::math::utils::normalize_or_zero;
use crate::foundation::math::Vec2;
use crate::physics::algebra::{intersection, Line};

use super::result::{CollisionEvent, CollisionResult, ShapeCollision};
use super::shape::{Aabb, Point};

/// Slack allowed when checking that a crossing lies on a box edge
const EDGE_TOLERANCE: f32 = 1e-4;

/// Crossings closer than this are treated as simultaneous (corner hits)
const SAME_TIME: f32 = 1e-6;

/// Box edges around `center`: top, right, bottom, left
fn edges_at(aabb: &Aabb, center: Vec2) -> [Line; 4] {
    let [top_left, top_right, bottom_right, bottom_left] = aabb.corners_at(center);
    [
        Line::from_points(top_left, top_right),
        Line::from_points(top_right, bottom_right),
        Line::from_points(bottom_right, bottom_left),
        Line::from_points(bottom_left, top_left),
    ]
}

/// Outward normal of an edge, from the box center through the edge midpoint
fn face_normal(edge: &Line, center: Vec2) -> Vec2 {
    normalize_or_zero((edge.p0 - center) + (edge.p1 - center))
}

struct Crossing {
    time: f32,
    direction: Vec2,
    face_normals: Vec2,
}

/// Earliest entry of `movement` through the edges of the box placed at
/// `center`. Edges entered at that same time add their face normals.
///
/// Only motion against an edge's outward normal enters; leaving or sliding
/// along a face is not a crossing.
fn first_crossing(aabb: &Aabb, center: Vec2, movement: &Line) -> Option<Crossing> {
    let mut first: Option<Crossing> = None;

    for edge in edges_at(aabb, center) {
        let normal = face_normal(&edge, center);
        if movement.direction().dot(&normal) >= 0.0 {
            continue;
        }

        let hit = intersection(&edge, movement);
        if !hit.is_hit() {
            continue;
        }

        let point = movement.p0 + movement.direction() * hit.time;
        if !aabb.contains_at(center, point, EDGE_TOLERANCE) {
            continue;
        }

        if let Some(current) = first.as_mut() {
            if (hit.time - current.time).abs() <= SAME_TIME {
                current.face_normals += normal;
                continue;
            }
            if hit.time > current.time {
                continue;
            }
        }

        first = Some(Crossing {
            time: hit.time,
            direction: hit.normal,
            face_normals: normal,
        });
    }

    first
}

/// Axis-aligned box against point.
///
/// The box half traces the point backwards along the box's displacement
/// against the box's pre-step edges. The point half traces the point's own
/// displacement against the box's final edges. A half collides only when
/// its trace crosses an edge.
pub fn aabb_point(a: &Aabb, b: &Point) -> CollisionResult {
    let mut result = CollisionResult::none();

    if a.is_moved() {
        let movement = Line::from_points(b.center, b.center - a.velocity());
        if let Some(crossing) = first_crossing(a, a.previous_center, &movement) {
            result.a = CollisionEvent::hit(
                ShapeCollision::new(crossing.time, crossing.face_normals),
                ShapeCollision::new(1.0, crossing.direction),
            );
        }
    }

    if b.is_moved() {
        let movement = Line::from_points(b.previous_center, b.center);
        if let Some(crossing) = first_crossing(a, a.center, &movement) {
            result.b = CollisionEvent::hit(
                ShapeCollision::new(crossing.time, crossing.direction),
                ShapeCollision::new(1.0, crossing.face_normals),
            );
        }
    }

    result
}

fn may_overlap(a: &Aabb, b: &Aabb) -> bool {
    (b.center.x - a.center.x).abs() <= a.half_extents.x + b.half_extents.x
        && (b.center.y - a.center.y).abs() <= a.half_extents.y + b.half_extents.y
}

/// Keep the deeper event, facing its own normal against the other box's face
fn keep_deepest_flipped(best: &mut CollisionEvent, candidate: CollisionEvent) {
    if best.keep_deepest(candidate) {
        best.this_shape.normal = -best.colliding_shape.normal;
    }
}

/// Deepest hit for `this` box: its corners traced against `other`, then
/// `other`'s corners traced against it
fn box_event(this: &Aabb, other: &Aabb) -> CollisionEvent {
    let mut best = CollisionEvent::none();

    for corner in this.corner_points() {
        keep_deepest_flipped(&mut best, aabb_point(other, &corner).b);
    }
    for corner in other.corner_points() {
        keep_deepest_flipped(&mut best, aabb_point(this, &corner).a);
    }

    best
}

/// Axis-aligned box against axis-aligned box.
///
/// Each box's corners are traced against the other box; the deepest hit per
/// operand wins.
pub fn aabb_aabb(a: &Aabb, b: &Aabb) -> CollisionResult {
    if !may_overlap(a, b) {
        return CollisionResult::none();
    }

    CollisionResult {
        a: box_event(a, b),
        b: box_event(b, a),
    }
}
