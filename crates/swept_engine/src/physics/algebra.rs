//! 2D line algebra used by the swept collision tests
//!
//! Lines are bound by two points and carry the slope/intercept form
//! `y = k * x + b`. Vertical lines (`p0.x == p1.x`) have no meaningful `k`
//! or `b`; every query branches on [`Line::is_vertical`] instead of trusting
//! them.

use crate::foundation::math::utils::{length_sq, normalize_or_zero};
use crate::foundation::math::Vec2;
use crate::physics::collision::ShapeCollision;

/// A line through two bound points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// First bound point (segment start)
    pub p0: Vec2,
    /// Second bound point (segment end)
    pub p1: Vec2,
    /// Slope, zero for vertical lines
    pub k: f32,
    /// Y intercept, zero for vertical lines
    pub b: f32,
}

/// Line in the form `a * x + b * y + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStandardForm {
    /// X coefficient
    pub a: f32,
    /// Y coefficient
    pub b: f32,
    /// Constant term
    pub c: f32,
}

impl Line {
    /// Build the line passing through `p0` and `p1`
    pub fn from_points(p0: Vec2, p1: Vec2) -> Self {
        if p0.x == p1.x {
            return Self { p0, p1, k: 0.0, b: 0.0 };
        }

        let k = (p1.y - p0.y) / (p1.x - p0.x);
        let b = p0.y - k * p0.x;
        Self { p0, p1, k, b }
    }

    /// True when both bound points share the same x coordinate
    pub fn is_vertical(&self) -> bool {
        self.p0.x == self.p1.x
    }

    /// Point on the line at `x`.
    ///
    /// For a vertical line the argument is read as the y coordinate.
    pub fn point_at(&self, x: f32) -> Vec2 {
        if self.is_vertical() {
            Vec2::new(self.p0.x, x)
        } else {
            Vec2::new(x, self.k * x + self.b)
        }
    }

    /// Convert to `a * x + b * y + c = 0`.
    ///
    /// `y = k * x + b` becomes `(k, -1, b)` and a vertical line at `x0`
    /// becomes `(1, 0, -x0)`, so every point on the line satisfies the
    /// equation and [`distance_point_to_line`] is the true distance.
    pub fn to_standard_form(&self) -> LineStandardForm {
        if self.is_vertical() {
            LineStandardForm { a: 1.0, b: 0.0, c: -self.p0.x }
        } else {
            LineStandardForm { a: self.k, b: -1.0, c: self.b }
        }
    }

    /// Distance between the two bound points
    pub fn length(&self) -> f32 {
        line_length(self.p0, self.p1)
    }

    /// Squared distance between the two bound points
    pub fn length_sq(&self) -> f32 {
        length_sq(self.p1 - self.p0)
    }

    /// Direction from `p0` to `p1` (not normalized)
    pub fn direction(&self) -> Vec2 {
        self.p1 - self.p0
    }
}

/// Perpendicular distance from `point` to the infinite line
pub fn distance_point_to_line(line: &Line, point: Vec2) -> f32 {
    if line.is_vertical() {
        return (point.x - line.p0.x).abs();
    }

    let std = line.to_standard_form();
    (std.a * point.x + std.b * point.y + std.c).abs() / (std.a * std.a + std.b * std.b).sqrt()
}

/// Euclidean distance between two points
pub fn line_length(a: Vec2, b: Vec2) -> f32 {
    (a - b).norm()
}

/// Intersect line `a` with segment `b`.
///
/// The returned time is measured along `b` (0 at `b.p0`, 1 at `b.p1`) and the
/// normal is the normalized direction from `b.p0` to the intersection point.
/// Returns [`ShapeCollision::none`] when the lines are parallel and apart, when
/// the hit lies outside `b`, or when `b` is degenerate.
pub fn intersection(a: &Line, b: &Line) -> ShapeCollision {
    if b.length_sq() == 0.0 {
        return ShapeCollision::none();
    }

    let x = match (a.is_vertical(), b.is_vertical()) {
        (true, true) => {
            if a.p0.x != b.p0.x {
                return ShapeCollision::none();
            }
            return collinear_overlap(a, b);
        }
        (true, false) => a.p0.x,
        (false, true) => b.p0.x,
        (false, false) => {
            let slope_diff = a.k - b.k;
            let intercept_diff = b.b - a.b;
            if slope_diff == 0.0 {
                if intercept_diff != 0.0 {
                    return ShapeCollision::none();
                }
                return collinear_overlap(a, b);
            }
            intercept_diff / slope_diff
        }
    };

    let non_vertical = if a.is_vertical() { b } else { a };
    let point = non_vertical.point_at(x);

    let b_len_sq = b.length_sq();
    let from_start_sq = length_sq(point - b.p0);
    let from_end_sq = length_sq(point - b.p1);
    if from_start_sq > b_len_sq || from_end_sq > b_len_sq {
        return ShapeCollision::none();
    }

    ShapeCollision::new(
        from_start_sq.sqrt() / b_len_sq.sqrt(),
        normalize_or_zero(point - b.p0),
    )
}

/// Overlap of two collinear segments, expressed along `b`
fn collinear_overlap(a: &Line, b: &Line) -> ShapeCollision {
    let points = [a.p0, a.p1, b.p0, b.p1];

    // lowest x wins, ties broken by y
    let min = points.iter().copied().fold(points[0], |min, p| {
        if p.x < min.x || (p.x == min.x && p.y < min.y) { p } else { min }
    });
    let max = points.iter().copied().fold(points[0], |max, p| {
        if p.x > max.x || (p.x == max.x && p.y > max.y) { p } else { max }
    });

    let b_len = b.length();
    let overlap = a.length() + b.length() - line_length(min, max);
    if overlap < 0.0 {
        return ShapeCollision::none();
    }

    let direction = if min == a.p0 || min == a.p1 { min - max } else { max - min };

    ShapeCollision::new(1.0 - overlap / b_len, normalize_or_zero(direction))
}
