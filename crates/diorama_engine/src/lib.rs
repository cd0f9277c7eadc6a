//! # Diorama Engine
//!
//! Declarative scene composition for a static, camera-navigable 3D diorama.
//!
//! ## Features
//!
//! - **Placement Loader**: Concurrent, best-effort loading of a model manifest
//! - **Material Normalization**: Every placed sub-part ends up physically based
//! - **Environment**: Textured floor and cubemap sky built once at startup
//! - **Camera Rig**: Perspective camera with an orbit controller
//! - **Frame Loop**: One render per display refresh, no terminal state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use diorama_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DioramaConfig::default();
//!     let manifest = Manifest::new(vec![
//!         PlacedAsset::new("models/coffee_cup/scene.gltf")
//!             .with_scale(Vec3::new(70.0, 70.0, 70.0))
//!             .with_position(Vec3::new(10.0, 5.445, 10.0)),
//!     ]);
//!     let source = Arc::new(FileSystemSource::new(config.assets.search_paths.clone()));
//!     let backend = HeadlessBackend::new(config.renderer.clone());
//!     let mut diorama = Diorama::compose(
//!         &config,
//!         CompositionProfile::classic(),
//!         &manifest,
//!         source,
//!         backend,
//!     )?;
//!     diorama.run(&mut VsyncScheduler::new(60.0))?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod config;
pub mod foundation;
pub mod assets;
pub mod render;
pub mod scene;
pub mod composition;
pub mod frame_loop;

mod engine;

pub use engine::{Diorama, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Diorama, EngineError,
        assets::{AssetError, AssetSource, FileSystemSource, MemorySource, Manifest, PlacedAsset},
        composition::{
            CompositionProfile, LightingProfile, LoaderProfile, MaterialPolicy,
            PlacementLoader, PendingPlacements, LoadReport, CancelToken,
        },
        config::Config,
        core::config::DioramaConfig,
        foundation::math::{Vec3, Quat, Mat4, Transform},
        frame_loop::{FrameLoop, FrameScheduler, VsyncScheduler},
        render::{HeadlessBackend, RenderBackend, PerspectiveCamera, OrbitController, PointerEvent},
        scene::{Scene, SceneNode, NodeId, NodeKind, ShadowFlags},
    };
}
