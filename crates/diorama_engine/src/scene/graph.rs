//! Scene container and hierarchy operations

use slotmap::SlotMap;
use thiserror::Error;

use crate::assets::{ModelAsset, ModelNode};
use crate::foundation::math::{Mat4, Transform, Vec3};
use crate::render::Light;
use super::node::{Background, Geometry, NodeId, NodeKind, SceneNode, ShadowFlags};

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The referenced node does not exist
    #[error("Unknown scene node {0:?}")]
    UnknownNode(NodeId),
}

/// The scene: a forest of nodes plus an optional background
#[derive(Debug, Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, SceneNode>,
    roots: Vec<NodeId>,
    background: Option<Background>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Insert `node` as a new root
    pub fn insert_node(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = self.nodes.insert(node);
        self.roots.push(id);
        id
    }
    
    /// Insert `node` under `parent`
    pub fn insert_child(&mut self, parent: NodeId, mut node: SceneNode) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        Ok(id)
    }
    
    /// Insert a light as a root node
    pub fn insert_light(&mut self, light: Light) -> NodeId {
        let position = match &light {
            Light::Directional { position, .. } => *position,
            _ => Vec3::zeros(),
        };
        self.insert_node(SceneNode::light(light).with_transform(Transform::from_position(position)))
    }
    
    /// Attach a decoded model under a new root placed at `transform`
    ///
    /// Every mesh node gets the model part's own flags plus `shadows`.
    /// Returns the placement root.
    pub fn insert_model(&mut self, model: ModelAsset, transform: Transform, shadows: ShadowFlags) -> NodeId {
        if self.find_by_source(&model.source).is_some() {
            log::warn!("{} is already in the scene; adding another copy", model.source);
        }
        
        let mut root = SceneNode::group().with_transform(transform);
        root.name = Some(model.source.clone());
        root.source = Some(model.source);
        let root_id = self.insert_node(root);
        
        for node in model.roots {
            self.insert_model_node(root_id, node, shadows);
        }
        root_id
    }
    
    fn insert_model_node(&mut self, parent: NodeId, model_node: ModelNode, shadows: ShadowFlags) {
        let mut group = SceneNode::group().with_transform(model_node.transform);
        group.name = model_node.name;
        let id = self.attach(parent, group);
        
        for part in model_node.meshes {
            let mut mesh = SceneNode::mesh(Geometry::Mesh(part.geometry), part.material)
                .with_shadows(part.shadows | shadows);
            mesh.name = part.name;
            self.attach(id, mesh);
        }
        for child in model_node.children {
            self.insert_model_node(id, child, shadows);
        }
    }
    
    fn attach(&mut self, parent: NodeId, mut node: SceneNode) -> NodeId {
        node.parent = Some(parent);
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        id
    }
    
    /// Replace the background
    pub fn set_background(&mut self, background: Background) {
        self.background = Some(background);
    }
    
    /// Current background
    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }
    
    /// Look up a node
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }
    
    /// Look up a node mutably
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }
    
    /// Root nodes in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }
    
    /// Total node count
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    
    /// True if the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    
    /// First placement root loaded from `source`
    pub fn find_by_source(&self, source: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .copied()
            .find(|id| self.nodes[*id].source.as_deref() == Some(source))
    }
    
    /// Every light in the scene
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.nodes.values().filter_map(|node| match &node.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        })
    }
    
    /// Every node below `id`, including `id`, depth first
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get(next) {
                out.push(next);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }
    
    /// World matrix of a node
    pub fn world_transform(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.nodes.get(id)?;
        let mut world = node.transform.to_matrix();
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            world = node.transform.to_matrix() * world;
        }
        Some(world)
    }
    
    /// Visit every node depth first with its world matrix
    pub fn traverse(&self, mut visit: impl FnMut(NodeId, &SceneNode, &Mat4)) {
        let mut stack: Vec<(NodeId, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|id| (*id, Mat4::identity()))
            .collect();
        
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else { continue };
            let world = parent_world * node.transform.to_matrix();
            visit(id, node, &world);
            stack.extend(node.children.iter().rev().map(|child| (*child, world)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{MeshData, MeshGeometry, MeshPart};
    use crate::foundation::math::Point3;
    use crate::render::Material;
    use approx::assert_relative_eq;

    fn model(source: &str) -> ModelAsset {
        let part = MeshPart {
            name: Some("cup".into()),
            geometry: MeshGeometry::Triangles(MeshData {
                positions: vec![[0.0; 3]; 3],
                ..MeshData::default()
            }),
            material: Material::default(),
            shadows: ShadowFlags::empty(),
        };
        ModelAsset {
            source: source.into(),
            roots: vec![ModelNode {
                name: Some("Root".into()),
                transform: Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
                meshes: vec![part],
                children: vec![],
            }],
        }
    }

    #[test]
    fn insert_model_builds_hierarchy_with_shadows() {
        let mut scene = Scene::new();
        let placement = Transform::from_euler(Vec3::new(10.0, 0.0, 0.0), Vec3::zeros(), Vec3::repeat(2.0));
        let root = scene.insert_model(model("models/cup.gltf"), placement.clone(), ShadowFlags::CAST);

        assert_eq!(scene.roots(), &[root]);
        assert_eq!(scene.get(root).unwrap().transform, placement);
        assert_eq!(scene.find_by_source("models/cup.gltf"), Some(root));
        assert_eq!(scene.len(), 3);

        let mut meshes = Vec::new();
        scene.traverse(|id, node, world| {
            if node.as_mesh().is_some() {
                meshes.push((id, *world));
            }
        });
        assert_eq!(meshes.len(), 1);
        let (mesh_id, world) = meshes[0];
        assert!(scene.get(mesh_id).unwrap().shadows.casts());

        // placement scale applies to the child offset
        let origin = world.transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::new(10.0, 2.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(scene.world_transform(mesh_id).unwrap(), world, epsilon = 1e-5);
    }

    #[test]
    fn insert_child_rejects_unknown_parent() {
        let mut scene = Scene::new();
        let parent = scene.insert_node(SceneNode::group());
        let mut other = Scene::new();
        for _ in 0..3 {
            other.insert_node(SceneNode::group());
        }
        let stale = other.insert_node(SceneNode::group());

        assert!(scene.insert_child(parent, SceneNode::group()).is_ok());
        assert_eq!(scene.insert_child(stale, SceneNode::group()), Err(SceneError::UnknownNode(stale)));
        assert_eq!(scene.get(parent).unwrap().children().len(), 1);
    }

    #[test]
    fn lights_and_descendants() {
        let mut scene = Scene::new();
        scene.insert_light(Light::ambient(Vec3::repeat(1.0), 1.0));
        let root = scene.insert_model(model("a.gltf"), Transform::identity(), ShadowFlags::empty());
        assert_eq!(scene.lights().count(), 1);
        assert_eq!(scene.descendants(root).len(), 3);
    }
}
