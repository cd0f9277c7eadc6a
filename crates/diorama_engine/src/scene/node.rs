//! Scene node types

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::assets::MeshGeometry;
use crate::foundation::math::{Transform, Vec3};
use crate::render::{CubeTexture, Light, Material};

slotmap::new_key_type! {
    /// Handle to a node in a [`Scene`](super::Scene)
    pub struct NodeId;
}

bitflags! {
    /// Shadow participation of a renderable
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ShadowFlags: u8 {
        /// Occludes shadow-casting lights
        const CAST = 1 << 0;
        /// Shows shadows cast by others
        const RECEIVE = 1 << 1;
    }
}

impl ShadowFlags {
    /// Whether the renderable casts shadows
    pub fn casts(self) -> bool {
        self.contains(Self::CAST)
    }

    /// Whether the renderable receives shadows
    pub fn receives(self) -> bool {
        self.contains(Self::RECEIVE)
    }
}

/// Axis-aligned box centred on its node origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
    /// Extent along Z
    pub depth: f32,
}

impl BoxGeometry {
    /// Create a box with the given extents
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    /// Extents as a vector
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }
}

/// Geometry drawn by a mesh node
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Procedural box
    Box(BoxGeometry),
    /// Geometry decoded from a model file
    Mesh(MeshGeometry),
}

impl Geometry {
    /// Number of triangles drawn
    pub fn triangle_count(&self) -> usize {
        match self {
            // two per face
            Self::Box(_) => 12,
            Self::Mesh(mesh) => mesh.triangle_count(),
        }
    }
}

/// Geometry plus material
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    /// Geometry
    pub geometry: Geometry,
    /// Surface material
    pub material: Material,
}

/// What a node contributes to the frame
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Transform-only grouping node
    Group,
    /// Renderable
    Mesh(MeshNode),
    /// Light source
    Light(Light),
}

/// A node in the scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Optional display name
    pub name: Option<String>,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Node payload
    pub kind: NodeKind,
    /// Shadow participation
    pub shadows: ShadowFlags,
    /// Asset path this node was loaded from, for placement roots
    pub source: Option<String>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl SceneNode {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            name: None,
            transform: Transform::identity(),
            kind,
            shadows: ShadowFlags::empty(),
            source: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Empty grouping node
    pub fn group() -> Self {
        Self::with_kind(NodeKind::Group)
    }

    /// Renderable node
    pub fn mesh(geometry: Geometry, material: Material) -> Self {
        Self::with_kind(NodeKind::Mesh(MeshNode { geometry, material }))
    }

    /// Light node
    pub fn light(light: Light) -> Self {
        Self::with_kind(NodeKind::Light(light))
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set shadow participation
    pub fn with_shadows(mut self, shadows: ShadowFlags) -> Self {
        self.shadows = shadows;
        self
    }

    /// Parent node, `None` for roots
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Mesh payload, if this is a renderable
    pub fn as_mesh(&self) -> Option<&MeshNode> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// Scene background
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// Six-face cubemap sky
    CubeMap(CubeTexture),
    /// Flat colour
    Color(Vec3),
}

impl Background {
    /// Faces still showing placeholder content
    pub fn placeholder_textures(&self) -> usize {
        match self {
            Self::CubeMap(cube) => cube.placeholder_faces(),
            Self::Color(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_flag_queries() {
        assert!(ShadowFlags::CAST.casts());
        assert!(!ShadowFlags::CAST.receives());
        assert!((ShadowFlags::CAST | ShadowFlags::RECEIVE).receives());
        assert!(!ShadowFlags::default().casts());
    }

    #[test]
    fn box_has_twelve_triangles() {
        assert_eq!(Geometry::Box(BoxGeometry::new(70.0, 5.0, 150.0)).triangle_count(), 12);
    }
}
