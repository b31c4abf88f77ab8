//! Math utilities and types
//!
//! Provides the fundamental math types used across the scene graph and
//! the physics simulation, plus the Euler-XYZ rotation helpers the
//! scene nodes cache their rotation matrices with.

pub use nalgebra::{Matrix3, Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * constants::DEG_TO_RAD
}

/// Convert radians to degrees
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * constants::RAD_TO_DEG
}

/// Closed-form rotation matrix for Euler angles applied in X, then Y,
/// then Z order (intrinsic). The composition is `Rz * Ry * Rx`, so a
/// column vector is rotated about X first.
///
/// The scene graph and the physics bodies both derive their orientation
/// matrices through this function; using the same composition on both
/// sides keeps rendered and simulated orientations consistent.
pub fn euler_xyz_matrix(rotation: Vec3) -> Mat3 {
    let (sx, cx) = rotation.x.sin_cos();
    let (sy, cy) = rotation.y.sin_cos();
    let (sz, cz) = rotation.z.sin_cos();

    let rx = Mat3::new(
        1.0, 0.0, 0.0,
        0.0, cx, -sx,
        0.0, sx, cx,
    );
    let ry = Mat3::new(
        cy, 0.0, sy,
        0.0, 1.0, 0.0,
        -sy, 0.0, cy,
    );
    let rz = Mat3::new(
        cz, -sz, 0.0,
        sz, cz, 0.0,
        0.0, 0.0, 1.0,
    );

    rz * ry * rx
}

/// Build a homogeneous transform from a position, a rotation matrix and
/// a non-uniform scale, in translate * rotate * scale order.
pub fn compose_transform(position: Vec3, rotation: &Mat3, scale: Vec3) -> Mat4 {
    Mat4::new_translation(&position)
        * rotation.to_homogeneous()
        * Mat4::new_nonuniform_scaling(&scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn euler_identity_for_zero_angles() {
        let m = euler_xyz_matrix(Vec3::zeros());
        assert_relative_eq!(m, Mat3::identity(), epsilon = 1e-6);
    }

    #[test]
    fn euler_x_only_matches_axis_rotation() {
        let angle = 0.7;
        let m = euler_xyz_matrix(Vec3::new(angle, 0.0, 0.0));
        let expected = nalgebra::Rotation3::from_axis_angle(&Vec3::x_axis(), angle);
        assert_relative_eq!(m, *expected.matrix(), epsilon = 1e-6);
    }

    #[test]
    fn euler_composition_order_is_x_then_y_then_z() {
        let angles = Vec3::new(0.3, -0.5, 1.1);
        let m = euler_xyz_matrix(angles);
        let rx = nalgebra::Rotation3::from_axis_angle(&Vec3::x_axis(), angles.x);
        let ry = nalgebra::Rotation3::from_axis_angle(&Vec3::y_axis(), angles.y);
        let rz = nalgebra::Rotation3::from_axis_angle(&Vec3::z_axis(), angles.z);
        let expected = rz * ry * rx;
        assert_relative_eq!(m, *expected.matrix(), epsilon = 1e-6);
    }

    #[test]
    fn euler_matrix_is_idempotent_over_repeated_calls() {
        let angles = Vec3::new(0.2, 0.4, 0.6);
        let first = euler_xyz_matrix(angles);
        for _ in 0..10 {
            assert_eq!(first, euler_xyz_matrix(angles));
        }
    }

    #[test]
    fn degree_conversions_round_trip() {
        assert_relative_eq!(rad_to_deg(deg_to_rad(45.0)), 45.0, epsilon = 1e-5);
    }
}
