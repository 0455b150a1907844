//! Math utilities and types
//!
//! Provides the fundamental math types used by the collision core and the
//! transform layer. Shapes live in the XY plane; transforms keep a full 3D
//! position so the Z (draw order) coordinate survives collision resolution.

pub use nalgebra::{Matrix4, Rotation3, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4, Rotation3, Vec2, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Normalize a vector, returning the zero vector for zero-length input
    pub fn normalize_or_zero(v: Vec2) -> Vec2 {
        v.try_normalize(0.0).unwrap_or_else(Vec2::zeros)
    }

    /// Squared length of a 2D vector
    pub fn length_sq(v: Vec2) -> f32 {
        v.x * v.x + v.y * v.y
    }

    /// Rotate a 2D vector clockwise by `degrees`.
    ///
    /// Negative angles rotate counter-clockwise, so
    /// `rotate_clockwise(rotate_clockwise(v, a), -a) == v`.
    pub fn rotate_clockwise(v: Vec2, degrees: f32) -> Vec2 {
        let (sin, cos) = deg_to_rad(degrees).sin_cos();
        Vec2::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos)
    }

    /// Translation matrix
    pub fn translation(position: &Vec3) -> Mat4 {
        Mat4::new_translation(position)
    }

    /// Rotation matrix from Euler angles in degrees, applied X then Y then Z
    pub fn rotation_degrees(angles: &Vec3) -> Mat4 {
        Rotation3::from_euler_angles(
            deg_to_rad(angles.x),
            deg_to_rad(angles.y),
            deg_to_rad(angles.z),
        )
        .to_homogeneous()
    }

    /// Non-uniform scale matrix
    pub fn scaling(scale: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(scale)
    }
}
