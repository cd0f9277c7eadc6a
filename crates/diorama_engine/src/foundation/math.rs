//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the placement [`Transform`].

pub use nalgebra::{
    Vector3,
    Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Build a rotation from Euler angles in radians, applied in XYZ order
///
/// The resulting matrix is `Rx * Ry * Rz`, so a vector is rotated about Z
/// first and X last.
pub fn quat_from_euler_xyz(euler: Vec3) -> Quat {
    Quat::from_axis_angle(&Vec3::x_axis(), euler.x)
        * Quat::from_axis_angle(&Vec3::y_axis(), euler.y)
        * Quat::from_axis_angle(&Vec3::z_axis(), euler.z)
}

/// Convert a packed `0xRRGGBB` color into RGB components in `[0, 1]`
pub fn color_from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
    let b = (hex & 0xFF) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,
    
    /// Rotation quaternion
    pub rotation: Quat,
    
    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
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
    
    /// Create a transform from position, XYZ Euler angles (radians) and scale
    pub fn from_euler(position: Vec3, euler: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation: quat_from_euler_xyz(euler),
            scale,
        }
    }
    
    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;
    
    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;
    
    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;
    
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn euler_order_is_xyz() {
        let euler = Vec3::new(0.3, -1.1, 0.7);
        let q = quat_from_euler_xyz(euler);
        let expected = Mat4::from_axis_angle(&Vec3::x_axis(), euler.x)
            * Mat4::from_axis_angle(&Vec3::y_axis(), euler.y)
            * Mat4::from_axis_angle(&Vec3::z_axis(), euler.z);
        assert_relative_eq!(q.to_homogeneous(), expected, epsilon = 1e-5);
    }

    #[test]
    fn matrix_applies_scale_then_rotation_then_translation() {
        let t = Transform::from_euler(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, constants::PI * 0.5, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let p = t.to_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 2.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn hex_colors_unpack() {
        let sky = color_from_hex(0xB1E1FF);
        assert_relative_eq!(sky, Vec3::new(177.0 / 255.0, 225.0 / 255.0, 1.0));
    }
}
