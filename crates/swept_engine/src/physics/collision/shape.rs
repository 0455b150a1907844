//! Collider shapes
//!
//! Every shape lives in the XY plane and carries both its post-step
//! `center` and its pre-step `previous_center`; the difference is the
//! displacement applied during the current step.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::foundation::math::Vec2;

/// Error returned when a shape kind name cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeParseError {
    /// The name does not match any supported shape kind
    #[error("unknown shape kind: {0}")]
    UnknownKind(String),
}

/// Tag identifying the variant of a [`Shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Infinitely small point
    Point,
    /// Circle with a radius
    Circle,
    /// Axis-aligned box
    Aabb,
    /// Box rotated around its center
    Obb,
}

impl ShapeKind {
    /// Display name of the kind, as used in scene descriptions
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Point => "Point",
            ShapeKind::Circle => "Circle",
            ShapeKind::Aabb => "AABB",
            ShapeKind::Obb => "OBB",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Point" => Ok(ShapeKind::Point),
            "Circle" => Ok(ShapeKind::Circle),
            "AABB" => Ok(ShapeKind::Aabb),
            "OBB" => Ok(ShapeKind::Obb),
            other => Err(ShapeParseError::UnknownKind(other.to_string())),
        }
    }
}

/// A point collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Position after this step's displacement
    pub center: Vec2,
    /// Position before this step's displacement
    pub previous_center: Vec2,
}

impl Point {
    /// Stationary point at `center`
    pub fn new(center: Vec2) -> Self {
        Self { center, previous_center: center }
    }

    /// Set the pre-step position
    pub fn with_previous_center(mut self, previous_center: Vec2) -> Self {
        self.previous_center = previous_center;
        self
    }

    /// Displacement applied this step
    pub fn velocity(&self) -> Vec2 {
        self.center - self.previous_center
    }

    /// True when the point changed position this step
    pub fn is_moved(&self) -> bool {
        self.center != self.previous_center
    }
}

/// A circle collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Position after this step's displacement
    pub center: Vec2,
    /// Position before this step's displacement
    pub previous_center: Vec2,
    /// Radius, never negative
    pub radius: f32,
}

impl Circle {
    /// Stationary circle
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, previous_center: center, radius: radius.max(0.0) }
    }

    /// Set the pre-step position
    pub fn with_previous_center(mut self, previous_center: Vec2) -> Self {
        self.previous_center = previous_center;
        self
    }

    /// Displacement applied this step
    pub fn velocity(&self) -> Vec2 {
        self.center - self.previous_center
    }

    /// True when the circle changed position this step
    pub fn is_moved(&self) -> bool {
        self.center != self.previous_center
    }

    /// Top, right, bottom and left extremal points, each carrying the
    /// circle's displacement
    pub fn cardinal_points(&self) -> [Point; 4] {
        let velocity = self.velocity();
        let r = self.radius;
        [
            Vec2::new(0.0, r),
            Vec2::new(r, 0.0),
            Vec2::new(0.0, -r),
            Vec2::new(-r, 0.0),
        ]
        .map(|offset| {
            let center = self.center + offset;
            Point { center, previous_center: center - velocity }
        })
    }
}

/// An axis-aligned box collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Position after this step's displacement
    pub center: Vec2,
    /// Position before this step's displacement
    pub previous_center: Vec2,
    /// Half width and half height, never negative
    pub half_extents: Vec2,
}

impl Aabb {
    /// Stationary box
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            previous_center: center,
            half_extents: half_extents.map(|e| e.max(0.0)),
        }
    }

    /// Set the pre-step position
    pub fn with_previous_center(mut self, previous_center: Vec2) -> Self {
        self.previous_center = previous_center;
        self
    }

    /// Displacement applied this step
    pub fn velocity(&self) -> Vec2 {
        self.center - self.previous_center
    }

    /// True when the box changed position this step
    pub fn is_moved(&self) -> bool {
        self.center != self.previous_center
    }

    /// Corners around `center` in top-left, top-right, bottom-right,
    /// bottom-left order
    pub fn corners_at(&self, center: Vec2) -> [Vec2; 4] {
        let h = self.half_extents;
        [
            Vec2::new(center.x - h.x, center.y + h.y),
            Vec2::new(center.x + h.x, center.y + h.y),
            Vec2::new(center.x + h.x, center.y - h.y),
            Vec2::new(center.x - h.x, center.y - h.y),
        ]
    }

    /// Corners as points carrying the box's displacement, same order as
    /// [`Aabb::corners_at`]
    pub fn corner_points(&self) -> [Point; 4] {
        let velocity = self.velocity();
        self.corners_at(self.center).map(|center| Point {
            center,
            previous_center: center - velocity,
        })
    }

    /// True when `point` lies within the box around `center`, `tolerance`
    /// widening every side
    pub fn contains_at(&self, center: Vec2, point: Vec2, tolerance: f32) -> bool {
        (point.x - center.x).abs() <= self.half_extents.x + tolerance
            && (point.y - center.y).abs() <= self.half_extents.y + tolerance
    }
}

/// An oriented box collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// Position after this step's displacement
    pub center: Vec2,
    /// Position before this step's displacement
    pub previous_center: Vec2,
    /// Half width and half height in the box's local frame
    pub half_extents: Vec2,
    /// Rotation in degrees, clockwise
    pub rotation: f32,
}

impl Obb {
    /// Stationary oriented box
    pub fn new(center: Vec2, half_extents: Vec2, rotation: f32) -> Self {
        Self {
            center,
            previous_center: center,
            half_extents: half_extents.map(|e| e.max(0.0)),
            rotation,
        }
    }

    /// Set the pre-step position
    pub fn with_previous_center(mut self, previous_center: Vec2) -> Self {
        self.previous_center = previous_center;
        self
    }

    /// Displacement applied this step
    pub fn velocity(&self) -> Vec2 {
        self.center - self.previous_center
    }

    /// True when the box changed position this step
    pub fn is_moved(&self) -> bool {
        self.center != self.previous_center
    }

    /// The same box with its rotation dropped
    pub fn as_aabb(&self) -> Aabb {
        Aabb {
            center: self.center,
            previous_center: self.previous_center,
            half_extents: self.half_extents,
        }
    }
}

/// Collider shape, one of the four supported primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Point collider
    Point(Point),
    /// Circle collider
    Circle(Circle),
    /// Axis-aligned box collider
    Aabb(Aabb),
    /// Oriented box collider
    Obb(Obb),
}

impl Shape {
    /// Variant tag
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point(_) => ShapeKind::Point,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Aabb(_) => ShapeKind::Aabb,
            Shape::Obb(_) => ShapeKind::Obb,
        }
    }

    /// Position after this step's displacement
    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Point(s) => s.center,
            Shape::Circle(s) => s.center,
            Shape::Aabb(s) => s.center,
            Shape::Obb(s) => s.center,
        }
    }

    /// Position before this step's displacement
    pub fn previous_center(&self) -> Vec2 {
        match self {
            Shape::Point(s) => s.previous_center,
            Shape::Circle(s) => s.previous_center,
            Shape::Aabb(s) => s.previous_center,
            Shape::Obb(s) => s.previous_center,
        }
    }

    /// Displacement applied this step
    pub fn velocity(&self) -> Vec2 {
        self.center() - self.previous_center()
    }

    /// True when the shape changed position this step (exact comparison)
    pub fn is_moved(&self) -> bool {
        self.center() != self.previous_center()
    }

    /// Overwrite the current position, keeping the previous one
    pub fn set_center(&mut self, center: Vec2) {
        match self {
            Shape::Point(s) => s.center = center,
            Shape::Circle(s) => s.center = center,
            Shape::Aabb(s) => s.center = center,
            Shape::Obb(s) => s.center = center,
        }
    }

    /// Start a new step: remember the current position, then displace it
    pub fn advance(&mut self, velocity: Vec2) {
        let current = self.center();
        match self {
            Shape::Point(s) => s.previous_center = current,
            Shape::Circle(s) => s.previous_center = current,
            Shape::Aabb(s) => s.previous_center = current,
            Shape::Obb(s) => s.previous_center = current,
        }
        self.set_center(current + velocity);
    }

    /// Place the shape at `center` with no displacement this step
    pub fn teleport(&mut self, center: Vec2) {
        self.set_center(center);
        match self {
            Shape::Point(s) => s.previous_center = center,
            Shape::Circle(s) => s.previous_center = center,
            Shape::Aabb(s) => s.previous_center = center,
            Shape::Obb(s) => s.previous_center = center,
        }
    }
}

impl From<Point> for Shape {
    fn from(s: Point) -> Self {
        Shape::Point(s)
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Shape::Circle(s)
    }
}

impl From<Aabb> for Shape {
    fn from(s: Aabb) -> Self {
        Shape::Aabb(s)
    }
}

impl From<Obb> for Shape {
    fn from(s: Obb) -> Self {
        Shape::Obb(s)
    }
}
