//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene graph. Rotations on
//! game objects are stored as Euler angles in degrees, matching the scene
//! file format, and only converted to matrices when composing transforms.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix3, Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Transform representing position, rotation (Euler degrees), and scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation as XYZ Euler angles, in degrees
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix (translate * rotate * scale)
    ///
    /// Rotation order is Z * Y * X, applied after scaling.
    pub fn to_matrix(&self) -> Mat4 {
        let rot = Mat4::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(self.rotation.z))
            * Mat4::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(self.rotation.y))
            * Mat4::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(self.rotation.x));

        Mat4::new_translation(&self.position) * rot * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Wrap an angle in degrees into the [0, 360) range
    pub fn wrap_degrees(angle: f32) -> f32 {
        let wrapped = angle % 360.0;
        if wrapped < 0.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_transform_is_identity_matrix() {
        let t = Transform::identity();
        assert_relative_eq!(t.to_matrix(), Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_translation_lands_in_matrix_column() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let m = t.to_matrix();
        assert_relative_eq!(m[(0, 3)], 1.0);
        assert_relative_eq!(m[(1, 3)], 2.0);
        assert_relative_eq!(m[(2, 3)], 3.0);
    }

    #[test]
    fn test_rotation_z_90_degrees_maps_x_to_y() {
        let t = Transform {
            rotation: Vec3::new(0.0, 0.0, 90.0),
            ..Default::default()
        };
        let p = t.to_matrix().transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_relative_eq!(utils::wrap_degrees(370.0), 10.0);
        assert_relative_eq!(utils::wrap_degrees(-90.0), 270.0);
        assert_relative_eq!(utils::wrap_degrees(360.0), 0.0);
    }
}
