//! Render host abstraction
//!
//! The host owns the drawing surface, the output color space and shadow-map
//! settings. [`HeadlessBackend`] is the host used by the binaries and tests:
//! it walks the scene every frame and reports what a GPU host would draw.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::{Mat4, Vec3};
use crate::scene::{NodeKind, Scene};
use super::camera::PerspectiveCamera;
use super::texture::ColorSpace;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The drawing surface cannot be used
    #[error("Surface error: {0}")]
    Surface(String),
    
    /// The backend was asked to do something in the wrong state
    #[error("Invalid render state: {0}")]
    InvalidState(String),
}

/// Shadow filtering technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowMapKind {
    /// Single tap
    Basic,
    /// Percentage-closer filtering
    #[default]
    Pcf,
    /// Softened PCF
    PcfSoft,
}

/// Shadow-map settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowMapSettings {
    /// Whether shadow maps are rendered at all
    pub enabled: bool,
    /// Filtering technique
    pub kind: ShadowMapKind,
    /// Shadow map resolution per light
    pub map_size: u32,
}

impl Default for ShadowMapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: ShadowMapKind::Pcf,
            map_size: 512,
        }
    }
}

/// Renderer host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    /// Surface width in logical pixels
    pub width: u32,
    /// Surface height in logical pixels
    pub height: u32,
    /// Device pixels per logical pixel
    pub pixel_ratio: f32,
    /// Multisample anti-aliasing
    pub antialias: bool,
    /// Color space of the output framebuffer
    pub output_color_space: ColorSpace,
    /// Shadow-map settings
    pub shadow_map: ShadowMapSettings,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            pixel_ratio: 1.0,
            antialias: true,
            output_color_space: ColorSpace::Srgb,
            shadow_map: ShadowMapSettings::default(),
        }
    }
}

impl RendererSettings {
    /// Width / height of the surface
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
    
    /// Size of the drawing buffer in device pixels
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| (v as f32 * self.pixel_ratio).round().max(1.0) as u32;
        (scale(self.width), scale(self.height))
    }
}

/// What one rendered frame contained
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStats {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Mesh draws
    pub draw_calls: usize,
    /// Triangles submitted
    pub triangles: usize,
    /// Lights in the scene
    pub lights: usize,
    /// Shadow-map passes rendered
    pub shadow_passes: usize,
    /// Meshes rendered into shadow maps
    pub shadow_casters: usize,
    /// Meshes sampling shadow maps
    pub shadow_receivers: usize,
    /// Textures sampled as placeholder because decoding has not finished
    pub placeholder_textures: usize,
    /// Camera position used for this frame
    pub camera_position: Vec3,
    /// View-projection used for this frame
    pub view_projection: Mat4,
}

/// Rendering backend trait
pub trait RenderBackend {
    /// Current host settings
    fn settings(&self) -> &RendererSettings;
    
    /// Resize the drawing surface
    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()>;
    
    /// Render `scene` as seen from `camera`
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> BackendResult<FrameStats>;
}

/// Backend that renders nothing to screen but evaluates the full frame
#[derive(Debug)]
pub struct HeadlessBackend {
    settings: RendererSettings,
    frames_rendered: u64,
    last_frame: Option<FrameStats>,
}

impl HeadlessBackend {
    /// Create a headless host
    pub fn new(settings: RendererSettings) -> Self {
        log::info!(
            "Headless renderer {}x{} @{}x, antialias: {}, shadows: {}",
            settings.width,
            settings.height,
            settings.pixel_ratio,
            settings.antialias,
            settings.shadow_map.enabled,
        );
        Self {
            settings,
            frames_rendered: 0,
            last_frame: None,
        }
    }
    
    /// Number of frames rendered so far
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
    
    /// Stats of the most recent frame
    pub fn last_frame(&self) -> Option<&FrameStats> {
        self.last_frame.as_ref()
    }
}

impl RenderBackend for HeadlessBackend {
    fn settings(&self) -> &RendererSettings {
        &self.settings
    }
    
    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::Surface(format!("cannot resize surface to {width}x{height}")));
        }
        self.settings.width = width;
        self.settings.height = height;
        Ok(())
    }
    
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> BackendResult<FrameStats> {
        self.frames_rendered += 1;
        
        let mut stats = FrameStats {
            frame: self.frames_rendered,
            draw_calls: 0,
            triangles: 0,
            lights: 0,
            shadow_passes: 0,
            shadow_casters: 0,
            shadow_receivers: 0,
            placeholder_textures: 0,
            camera_position: camera.position,
            view_projection: camera.view_projection_matrix(),
        };
        let shadows_enabled = self.settings.shadow_map.enabled;
        
        scene.traverse(|_, node, _world| match &node.kind {
            NodeKind::Mesh(mesh) => {
                stats.draw_calls += 1;
                stats.triangles += mesh.geometry.triangle_count();
                stats.placeholder_textures += mesh
                    .material
                    .textures()
                    .filter(|texture| texture.is_placeholder())
                    .count();
                if shadows_enabled && node.shadows.casts() {
                    stats.shadow_casters += 1;
                }
                if shadows_enabled && node.shadows.receives() {
                    stats.shadow_receivers += 1;
                }
            }
            NodeKind::Light(light) => {
                stats.lights += 1;
                if shadows_enabled && light.casts_shadow() {
                    stats.shadow_passes += 1;
                }
            }
            NodeKind::Group => {}
        });
        
        if let Some(background) = scene.background() {
            stats.placeholder_textures += background.placeholder_textures();
        }
        
        log::trace!(
            "Frame {}: {} draws, {} triangles, {} placeholder textures",
            stats.frame,
            stats.draw_calls,
            stats.triangles,
            stats.placeholder_textures,
        );
        self.last_frame = Some(stats.clone());
        Ok(stats)
    }
}
