//! Decoded model data, before it is placed into a scene

use std::collections::BTreeMap;

use crate::foundation::math::Transform;
use crate::render::Material;
use crate::scene::ShadowFlags;

/// Uncompressed triangle geometry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals, empty when the source had none
    pub normals: Vec<[f32; 3]>,
    /// First UV set, empty when the source had none
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices; `None` for non-indexed geometry
    pub indices: Option<Vec<u32>>,
}

/// Geometry still in its compressed container, decoded by the render host
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedGeometry {
    /// glTF extension that produced the payload
    pub extension: String,
    /// Compressed bytes
    pub payload: Vec<u8>,
    /// Attribute semantic to compressed attribute id
    pub attributes: BTreeMap<String, u64>,
    /// Vertex count declared by the position accessor
    pub vertex_count: usize,
    /// Index count declared by the index accessor
    pub index_count: Option<usize>,
}

/// Geometry of one renderable sub-part
#[derive(Debug, Clone, PartialEq)]
pub enum MeshGeometry {
    /// Plain triangle lists
    Triangles(MeshData),
    /// Compressed payload
    Compressed(CompressedGeometry),
}

impl MeshGeometry {
    /// Number of triangles this geometry draws
    pub fn triangle_count(&self) -> usize {
        match self {
            Self::Triangles(data) => data
                .indices
                .as_ref()
                .map_or(data.positions.len(), Vec::len)
                / 3,
            Self::Compressed(geometry) => geometry.index_count.unwrap_or(geometry.vertex_count) / 3,
        }
    }
}

/// One renderable sub-part of a model
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    /// Mesh name from the source file
    pub name: Option<String>,
    /// Geometry
    pub geometry: MeshGeometry,
    /// Surface material
    pub material: Material,
    /// Shadow participation
    pub shadows: ShadowFlags,
}

/// Node of a decoded model hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    /// Node name from the source file
    pub name: Option<String>,
    /// Transform relative to the parent node
    pub transform: Transform,
    /// Renderable sub-parts attached to this node
    pub meshes: Vec<MeshPart>,
    /// Child nodes
    pub children: Vec<ModelNode>,
}

impl ModelNode {
    fn visit_meshes_mut(&mut self, f: &mut impl FnMut(&mut MeshPart)) {
        self.meshes.iter_mut().for_each(&mut *f);
        for child in &mut self.children {
            child.visit_meshes_mut(f);
        }
    }
    
    fn visit_meshes<'a>(&'a self, f: &mut impl FnMut(&'a MeshPart)) {
        self.meshes.iter().for_each(&mut *f);
        for child in &self.children {
            child.visit_meshes(f);
        }
    }
}

/// A decoded model file
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    /// Path the model was loaded from
    pub source: String,
    /// Top-level nodes of the model's scene
    pub roots: Vec<ModelNode>,
}

impl ModelAsset {
    /// Visit every renderable sub-part, depth first
    pub fn for_each_mesh_mut(&mut self, mut f: impl FnMut(&mut MeshPart)) {
        for root in &mut self.roots {
            root.visit_meshes_mut(&mut f);
        }
    }
    
    /// All renderable sub-parts, depth first
    pub fn meshes(&self) -> Vec<&MeshPart> {
        let mut meshes = Vec::new();
        for root in &self.roots {
            root.visit_meshes(&mut |mesh| meshes.push(mesh));
        }
        meshes
    }
}
