//! Asset management: where bytes come from and what they decode into

pub mod source;
pub mod image_loader;
pub mod model;
pub mod gltf_loader;
pub mod manifest;

#[cfg(test)]
pub(crate) mod fixtures;

pub use source::{AssetSource, FileSystemSource, MemorySource, resolve_relative};
pub use image_loader::ImageData;
pub use model::{ModelAsset, ModelNode, MeshPart, MeshGeometry, MeshData, CompressedGeometry};
pub use gltf_loader::{GltfLoader, LoaderProfile, DRACO_EXTENSION, BASISU_EXTENSION};
pub use manifest::{Manifest, PlacedAsset};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found in any search location
    #[error("Asset not found: {0}")]
    NotFound(String),
    
    /// Failed to decode asset contents
    #[error("Failed to decode {path}: {reason}")]
    Decode {
        /// Asset path
        path: String,
        /// Decoder message
        reason: String,
    },
    
    /// Asset needs an extension the active loader profile cannot handle
    #[error("{path} requires unsupported extension {extension}")]
    UnsupportedExtension {
        /// Asset path
        path: String,
        /// glTF extension name
        extension: String,
    },
    
    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),
    
    /// The load was cancelled before it completed
    #[error("Load cancelled: {0}")]
    Cancelled(String),
    
    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
