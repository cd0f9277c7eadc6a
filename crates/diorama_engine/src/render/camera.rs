//! # Camera Rig
//!
//! A perspective camera plus an orbit controller that turns pointer input
//! into camera position and orientation around a fixed target point.
//!
//! ## Coordinate System
//! Right-handed, Y-up. Matrices follow OpenGL clip-space conventions, which
//! is what render hosts in this crate expect.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{constants, utils, Mat4, Point3, Vec3};

/// Camera setup read from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Distance to the near clipping plane
    pub near: f32,
    /// Distance to the far clipping plane
    pub far: f32,
    /// Initial camera position
    pub position: [f32; 3],
    /// Point the orbit controller circles around
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 12.0, 70.0],
            target: [0.0, 12.0, 0.0],
        }
    }
}

/// Perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Camera position in world space
    pub position: Vec3,
    
    /// Point the camera is looking at in world space
    pub target: Vec3,
    
    /// Up vector for camera orientation
    pub up: Vec3,
    
    /// Vertical field of view in radians
    pub fov: f32,
    
    /// Aspect ratio (width / height)
    pub aspect: f32,
    
    /// Distance to near clipping plane
    pub near: f32,
    
    /// Distance to far clipping plane
    pub far: f32,
}

impl PerspectiveCamera {
    /// Create a camera at `position` looking at the origin
    pub fn new(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }
    
    /// Create a camera from configuration for a surface of the given aspect
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(
            Vec3::from(config.position),
            config.fov_degrees,
            aspect,
            config.near,
            config.far,
        );
        camera.target = Vec3::from(config.target);
        camera
    }
    
    /// Update the aspect ratio after a surface resize
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        log::trace!("Camera aspect updated to: {}", aspect);
    }
    
    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(self.position), &Point3::from(self.target), &self.up)
    }
    
    /// View-to-clip matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }
    
    /// Combined projection * view
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Pointer input consumed by the orbit controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary-button drag, in pixels
    Rotate {
        /// Horizontal movement
        dx: f32,
        /// Vertical movement
        dy: f32,
    },
    /// Secondary-button drag, in pixels
    Pan {
        /// Horizontal movement
        dx: f32,
        /// Vertical movement
        dy: f32,
    },
    /// Wheel movement; positive values move away from the target
    Wheel {
        /// Scroll delta
        delta: f32,
    },
}

/// Orbit controller
///
/// Keeps the camera on a sphere around `target`. Horizontal drags change
/// the azimuth, vertical drags the polar angle, the wheel scales the radius.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    /// Point the camera orbits
    pub target: Vec3,
    /// Distance from target
    radius: f32,
    /// Angle around the Y axis, measured from +Z
    azimuth: f32,
    /// Angle from the +Y axis
    polar: f32,
    /// Rotation speed multiplier
    pub rotate_speed: f32,
    /// Zoom speed multiplier
    pub zoom_speed: f32,
    /// Pan speed multiplier
    pub pan_speed: f32,
    /// Closest allowed distance to the target
    pub min_distance: f32,
    /// Farthest allowed distance from the target
    pub max_distance: f32,
    /// Viewport height in pixels, used to scale pointer deltas
    pub viewport_height: f32,
}

impl OrbitController {
    const POLAR_EPSILON: f32 = 1e-4;
    
    /// Create a controller orbiting `target`, starting from the camera's position
    pub fn new(camera: &PerspectiveCamera, target: Vec3, viewport_height: f32) -> Self {
        let offset = camera.position - target;
        let radius = offset.norm();
        let (azimuth, polar) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, constants::PI * 0.5)
        };
        
        let min_distance = 0.0;
        Self {
            target,
            // A zero radius would stay zero under every wheel step
            radius: radius.max(Self::min_radius(min_distance)),
            azimuth,
            polar,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance,
            max_distance: f32::INFINITY,
            viewport_height: viewport_height.max(1.0),
        }
    }
    
    fn min_radius(min_distance: f32) -> f32 {
        min_distance.max(f32::EPSILON)
    }
    
    /// Current distance from the target
    pub fn distance(&self) -> f32 {
        self.radius
    }
    
    /// Apply one pointer event to the controller state
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Rotate { dx, dy } => {
                let per_pixel = constants::TAU / self.viewport_height * self.rotate_speed;
                self.azimuth -= dx * per_pixel;
                self.polar = (self.polar - dy * per_pixel)
                    .clamp(Self::POLAR_EPSILON, constants::PI - Self::POLAR_EPSILON);
            }
            PointerEvent::Wheel { delta } => {
                let scale = 0.95_f32.powf(self.zoom_speed);
                let factor = if delta > 0.0 {
                    1.0 / scale
                } else if delta < 0.0 {
                    scale
                } else {
                    1.0
                };
                let min = Self::min_radius(self.min_distance);
                self.radius = (self.radius * factor).clamp(min, self.max_distance.max(min));
            }
            PointerEvent::Pan { dx, dy } => {
                let (right, up) = self.screen_axes();
                let per_pixel = self.radius / self.viewport_height * self.pan_speed;
                self.target += (-dx * per_pixel) * right + (dy * per_pixel) * up;
            }
        }
    }
    
    fn offset(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.radius * sin_polar * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * sin_polar * self.azimuth.cos(),
        )
    }
    
    fn screen_axes(&self) -> (Vec3, Vec3) {
        let forward = (-self.offset()).try_normalize(f32::EPSILON).unwrap_or_else(|| -Vec3::z());
        let right = forward.cross(&Vec3::y()).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::x);
        let up = right.cross(&forward);
        (right, up)
    }
    
    /// Write the controller state into the camera
    pub fn update(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.target + self.offset();
        camera.target = self.target;
    }
}
