//! Material normalization

use serde::{Deserialize, Serialize};

use crate::assets::ModelAsset;
use crate::render::Material;

/// Replaces non-physically-based materials with standard ones
///
/// Base color, alpha, base texture and normal map carry over; metalness and
/// roughness are fixed by the policy. Materials that are already physically
/// based are left untouched, so applying a policy twice changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialPolicy {
    /// Metalness given to converted materials
    pub metalness: f32,
    /// Roughness given to converted materials
    pub roughness: f32,
}

impl Default for MaterialPolicy {
    fn default() -> Self {
        Self {
            metalness: 0.5,
            roughness: 0.5,
        }
    }
}

impl MaterialPolicy {
    /// Normalize one material; returns `true` if it was replaced
    pub fn normalize(&self, material: &mut Material) -> bool {
        if material.is_physically_based() {
            return false;
        }
        *material = material.to_standard(self.metalness, self.roughness);
        true
    }
    
    /// Normalize every sub-part of `model`; returns the number replaced
    pub fn apply(&self, model: &mut ModelAsset) -> usize {
        let mut converted = 0;
        model.for_each_mesh_mut(|part| {
            if self.normalize(&mut part.material) {
                converted += 1;
            }
        });
        if converted > 0 {
            log::debug!("{}: converted {} materials to standard", model.source, converted);
        }
        converted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::{LambertParams, MaterialKind, StandardParams, Texture, TextureSettings};

    #[test]
    fn standard_materials_are_left_alone() {
        let mut material = Material::standard(StandardParams {
            metalness: 0.9,
            roughness: 0.1,
            ..StandardParams::default()
        });
        let before = material.clone();
        assert!(!MaterialPolicy::default().normalize(&mut material));
        assert_eq!(material, before);
    }

    #[test]
    fn lambert_becomes_standard_with_policy_constants() {
        let mut material = Material::lambert(LambertParams {
            color: Vec3::new(0.8, 0.6, 0.4),
            alpha: 1.0,
            map: Some(Texture::new("bagel/base.png", TextureSettings::default())),
            normal_map: None,
        });
        let policy = MaterialPolicy::default();
        assert!(policy.normalize(&mut material));

        let MaterialKind::Standard(params) = &material.kind else {
            panic!("expected standard material");
        };
        assert_eq!(params.color, Vec3::new(0.8, 0.6, 0.4));
        assert_eq!((params.metalness, params.roughness), (0.5, 0.5));
        assert_eq!(params.map.as_ref().map(|t| t.key.as_str()), Some("bagel/base.png"));

        let once = material.clone();
        assert!(!policy.normalize(&mut material));
        assert_eq!(material, once);
    }
}
