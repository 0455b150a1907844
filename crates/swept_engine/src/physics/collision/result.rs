//! Values produced by a pairwise collision query

use crate::foundation::math::Vec2;

/// Time of impact along a displacement plus the contact normal
///
/// `time` lies in `[0, 1]` for a hit. A miss carries the sentinel `-1`
/// and a zero normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeCollision {
    /// Fraction of the step's displacement at which contact happens
    pub time: f32,
    /// Contact normal, meaningless for a miss
    pub normal: Vec2,
}

impl ShapeCollision {
    /// Sentinel time of a miss
    pub const NO_HIT_TIME: f32 = -1.0;

    /// A hit at `time` with `normal`
    pub fn new(time: f32, normal: Vec2) -> Self {
        Self { time, normal }
    }

    /// A miss
    pub fn none() -> Self {
        Self { time: Self::NO_HIT_TIME, normal: Vec2::zeros() }
    }

    /// True unless this is the miss sentinel
    pub fn is_hit(&self) -> bool {
        self.time != Self::NO_HIT_TIME
    }
}

impl Default for ShapeCollision {
    fn default() -> Self {
        Self::none()
    }
}

/// One operand's view of a contact
///
/// `this_shape` moves this operand back to its point of contact assuming
/// the other operand is already at its final position. `colliding_shape`
/// is the same contact seen from the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionEvent {
    /// True when this operand's half reports contact
    pub is_collision: bool,
    /// Adjustment data for this operand
    pub this_shape: ShapeCollision,
    /// Adjustment data as seen from the other operand
    pub colliding_shape: ShapeCollision,
}

impl CollisionEvent {
    /// Event with no contact
    pub fn none() -> Self {
        Self::default()
    }

    /// Event reporting a contact
    pub fn hit(this_shape: ShapeCollision, colliding_shape: ShapeCollision) -> Self {
        Self { is_collision: true, this_shape, colliding_shape }
    }

    /// Deepest-wins ordering: true when `self` collides and either `best`
    /// does not or `self` happens strictly earlier
    pub fn is_deeper_than(&self, best: &CollisionEvent) -> bool {
        self.is_collision && (!best.is_collision || self.this_shape.time < best.this_shape.time)
    }

    /// Replace `self` with `candidate` when the candidate is deeper.
    ///
    /// Returns true if a replacement happened.
    pub fn keep_deepest(&mut self, candidate: CollisionEvent) -> bool {
        if candidate.is_deeper_than(self) {
            *self = candidate;
            true
        } else {
            false
        }
    }
}

/// Both operands' events for one pairwise query
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionResult {
    /// Event for the first operand
    pub a: CollisionEvent,
    /// Event for the second operand
    pub b: CollisionEvent,
}

impl CollisionResult {
    /// Result with no contact for either operand
    pub fn none() -> Self {
        Self::default()
    }

    /// The same result with operands exchanged
    pub fn swapped(self) -> Self {
        Self { a: self.b, b: self.a }
    }

    /// True when either half reports contact
    pub fn is_any(&self) -> bool {
        self.a.is_collision || self.b.is_collision
    }
}
