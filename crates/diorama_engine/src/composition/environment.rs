//! Floor and skybox
//!
//! Built once at startup. Texture decoding runs in the background; the
//! builder returns immediately and the first frames draw placeholders.

use serde::{Deserialize, Serialize};

use crate::render::{
    CubeTexture, FilterMode, Material, PhongParams, Side, TextureLoader, TextureSettings,
};
use crate::scene::{Background, BoxGeometry, Geometry, NodeId, Scene, SceneNode, ShadowFlags};

/// Textured floor slab centred on the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorSpec {
    /// Floor texture path
    pub texture: String,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub thickness: f32,
    /// Extent along Z
    pub depth: f32,
    /// Texture repeats per axis; `None` tiles once per two units of depth
    pub repeats: Option<f32>,
    /// Magnification filter for the tiled texture
    pub mag_filter: FilterMode,
}

impl Default for FloorSpec {
    fn default() -> Self {
        Self {
            texture: "background/floor.jpg".to_string(),
            width: 70.0,
            thickness: 5.0,
            depth: 150.0,
            repeats: None,
            mag_filter: FilterMode::Nearest,
        }
    }
}

impl FloorSpec {
    /// Effective repeat count
    pub fn repeat_count(&self) -> f32 {
        self.repeats.unwrap_or(self.depth / 2.0)
    }
}

/// Cubemap sky, faces ordered +X, -X, +Y, -Y, +Z, -Z
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyboxSpec {
    /// Face image paths
    pub faces: [String; 6],
}

impl Default for SkyboxSpec {
    fn default() -> Self {
        Self {
            faces: ["px", "nx", "py", "ny", "pz", "nz"].map(|face| format!("background/{face}.png")),
        }
    }
}

/// Static surroundings of the diorama
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSpec {
    /// Floor slab
    pub floor: FloorSpec,
    /// Sky
    pub skybox: SkyboxSpec,
}

/// Nodes created by [`EnvironmentBuilder::build`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    /// Floor mesh
    pub floor: NodeId,
}

/// Builds the floor and sky into a scene
pub struct EnvironmentBuilder {
    textures: TextureLoader,
}

impl EnvironmentBuilder {
    /// Create a builder decoding textures with `textures`
    pub fn new(textures: TextureLoader) -> Self {
        Self { textures }
    }
    
    /// Insert the floor and set the sky background
    pub fn build(&self, spec: &EnvironmentSpec, scene: &mut Scene) -> Environment {
        let floor = self.build_floor(&spec.floor, scene);
        self.build_skybox(&spec.skybox, scene);
        Environment { floor }
    }
    
    fn build_floor(&self, spec: &FloorSpec, scene: &mut Scene) -> NodeId {
        let settings = TextureSettings {
            mag_filter: spec.mag_filter,
            ..TextureSettings::tiled(spec.repeat_count())
        };
        let material = Material::phong(PhongParams {
            map: Some(self.textures.load(&spec.texture, settings)),
            ..PhongParams::default()
        })
        .with_name("floor")
        .with_side(Side::Double);
        
        let node = SceneNode::mesh(
            Geometry::Box(BoxGeometry::new(spec.width, spec.thickness, spec.depth)),
            material,
        )
        .with_name("floor")
        .with_shadows(ShadowFlags::RECEIVE);
        
        log::debug!("Floor {}x{}x{} tiled {}x", spec.width, spec.thickness, spec.depth, spec.repeat_count());
        scene.insert_node(node)
    }
    
    fn build_skybox(&self, spec: &SkyboxSpec, scene: &mut Scene) {
        let faces = spec
            .faces
            .each_ref()
            .map(|path| self.textures.load(path, TextureSettings::default()));
        scene.set_background(Background::CubeMap(CubeTexture { faces }));
    }
}
