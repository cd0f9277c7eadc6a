//! Scene graph
//!
//! Nodes live in a slot map keyed by [`NodeId`]; parents own their
//! children by id. The graph only grows during a session.

pub mod node;
pub mod graph;

pub use node::{SceneNode, NodeId, NodeKind, MeshNode, Geometry, BoxGeometry, Background, ShadowFlags};
pub use graph::{Scene, SceneError};
