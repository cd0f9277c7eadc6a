//! Placement manifest
//!
//! A [`Manifest`] is the static list of models that make up a diorama and
//! where each one goes. It is usually built in code, but can also be read
//! from a `.toml` or `.ron` file through [`Config`].

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{Transform, Vec3};
use crate::scene::ShadowFlags;

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

fn casts_shadow() -> ShadowFlags {
    ShadowFlags::CAST
}

/// One model to load and where to put it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedAsset {
    /// Model path, relative to the asset search roots
    pub path: String,
    /// World-space translation
    #[serde(default)]
    pub position: [f32; 3],
    /// XYZ Euler angles in radians
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Per-axis scale
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Shadow participation applied to every sub-part
    #[serde(default = "casts_shadow")]
    pub shadows: ShadowFlags,
}

impl PlacedAsset {
    /// Entry at the origin with unit scale that casts shadows
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: unit_scale(),
            shadows: casts_shadow(),
        }
    }
    
    /// Set per-axis scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale.into();
        self
    }
    
    /// Set the same scale on all three axes
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::repeat(scale))
    }
    
    /// Set translation
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position.into();
        self
    }
    
    /// Set XYZ Euler rotation in radians
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation.into();
        self
    }
    
    /// Set shadow participation
    pub fn with_shadows(mut self, shadows: ShadowFlags) -> Self {
        self.shadows = shadows;
        self
    }
    
    /// Placement transform applied to the model's root
    pub fn transform(&self) -> Transform {
        Transform::from_euler(
            Vec3::from(self.position),
            Vec3::from(self.rotation),
            Vec3::from(self.scale),
        )
    }
}

/// Ordered list of placements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Entries, in declaration order
    #[serde(default)]
    pub assets: Vec<PlacedAsset>,
}

impl Manifest {
    /// Create a manifest from entries
    pub fn new(assets: Vec<PlacedAsset>) -> Self {
        Self { assets }
    }
    
    /// Entries in declaration order
    pub fn entries(&self) -> &[PlacedAsset] {
        &self.assets
    }
    
    /// Number of entries
    pub fn len(&self) -> usize {
        self.assets.len()
    }
    
    /// True when there is nothing to load
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
    
    /// Iterate over entries
    pub fn iter(&self) -> std::slice::Iter<'_, PlacedAsset> {
        self.assets.iter()
    }
}

impl FromIterator<PlacedAsset> for Manifest {
    fn from_iter<I: IntoIterator<Item = PlacedAsset>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a PlacedAsset;
    type IntoIter = std::slice::Iter<'a, PlacedAsset>;
    
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Config for Manifest {}
