//! Rendering types: materials, textures, lights, camera rig and render hosts

pub mod material;
pub mod texture;
pub mod lighting;
pub mod camera;
pub mod backend;

pub use material::{Material, MaterialKind, StandardParams, PhongParams, LambertParams, UnlitParams, Side};
pub use texture::{
    Texture, TextureSettings, TextureHandle, TextureStatus, TextureLoader, CubeTexture,
    WrapMode, FilterMode, ColorSpace, TextureEncoding,
};
pub use lighting::Light;
pub use camera::{CameraConfig, PerspectiveCamera, OrbitController, PointerEvent};
pub use backend::{
    RenderBackend, HeadlessBackend, RendererSettings, ShadowMapSettings, ShadowMapKind,
    FrameStats, RenderError, BackendResult,
};
