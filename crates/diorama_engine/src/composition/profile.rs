//! Composition profiles
//!
//! Both binaries run the same composition routine; a profile supplies the
//! parts that differ between them.

use serde::{Deserialize, Serialize};

use crate::assets::LoaderProfile;
use crate::foundation::math::{color_from_hex, Vec3};
use crate::render::Light;
use super::MaterialPolicy;

/// Fixed light rig: ambient fill, one directional key light, hemisphere bounce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingProfile {
    /// Ambient color as `0xRRGGBB`
    pub ambient_color: u32,
    /// Ambient intensity
    pub ambient_intensity: f32,
    /// Key light color as `0xRRGGBB`
    pub key_color: u32,
    /// Key light intensity
    pub key_intensity: f32,
    /// Key light position; it shines towards the origin
    pub key_position: [f32; 3],
    /// Whether the key light renders a shadow map
    pub key_casts_shadow: bool,
    /// Hemisphere sky color as `0xRRGGBB`
    pub sky_color: u32,
    /// Hemisphere ground color as `0xRRGGBB`
    pub ground_color: u32,
    /// Hemisphere intensity
    pub hemisphere_intensity: f32,
}

impl LightingProfile {
    /// White ambient and key light with a warm ground bounce
    pub fn classic() -> Self {
        Self {
            ambient_color: 0xFF_FF_FF,
            ambient_intensity: 1.0,
            key_color: 0xFF_FF_FF,
            key_intensity: 1.0,
            key_position: [-1.0, 2.0, 4.0],
            key_casts_shadow: true,
            sky_color: 0xB1_E1_FF,
            ground_color: 0xB9_7A_20,
            hemisphere_intensity: 0.4,
        }
    }
    
    /// Brighter rig for assets authored with physically-based materials
    pub fn studio() -> Self {
        Self {
            ambient_intensity: 1.5,
            key_intensity: 2.5,
            hemisphere_intensity: 0.8,
            ..Self::classic()
        }
    }
    
    /// Lights to insert into the scene
    pub fn lights(&self) -> Vec<Light> {
        let key = Light::directional(
            color_from_hex(self.key_color),
            self.key_intensity,
            Vec3::from(self.key_position),
        );
        vec![
            Light::ambient(color_from_hex(self.ambient_color), self.ambient_intensity),
            if self.key_casts_shadow { key.with_shadows() } else { key },
            Light::hemisphere(
                color_from_hex(self.sky_color),
                color_from_hex(self.ground_color),
                self.hemisphere_intensity,
            ),
        ]
    }
}

impl Default for LightingProfile {
    fn default() -> Self {
        Self::classic()
    }
}

/// Everything that distinguishes one composition from another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionProfile {
    /// Name used in logs
    pub name: String,
    /// Light rig
    pub lighting: LightingProfile,
    /// Decoders available to the model loader
    pub loader: LoaderProfile,
    /// Material normalization applied to every placed model
    pub materials: MaterialPolicy,
}

impl CompositionProfile {
    /// Plain glTF assets under the classic light rig
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            lighting: LightingProfile::classic(),
            loader: LoaderProfile::Plain,
            materials: MaterialPolicy::default(),
        }
    }
    
    /// Draco/KTX2-capable loader under the studio light rig
    pub fn compressed() -> Self {
        Self {
            name: "compressed".to_string(),
            lighting: LightingProfile::studio(),
            loader: LoaderProfile::Compressed,
            materials: MaterialPolicy::default(),
        }
    }
}

impl Default for CompositionProfile {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn classic_rig() {
        let lights = LightingProfile::classic().lights();
        assert_eq!(lights.len(), 3);
        assert_eq!(lights.iter().filter(|light| light.casts_shadow()).count(), 1);

        let Light::Hemisphere { sky_color, intensity, .. } = &lights[2] else {
            panic!("expected hemisphere light");
        };
        assert_relative_eq!(*sky_color, Vec3::new(177.0, 225.0, 255.0) / 255.0, epsilon = 1e-6);
        assert_eq!(*intensity, 0.4);
    }

    #[test]
    fn both_profiles_normalize_to_the_same_constants() {
        let classic = CompositionProfile::classic();
        let compressed = CompositionProfile::compressed();
        assert_eq!(classic.materials, MaterialPolicy::default());
        assert_eq!(compressed.materials, classic.materials);
        assert_eq!(classic.loader, LoaderProfile::Plain);
        assert_eq!(compressed.loader, LoaderProfile::Compressed);
        assert!(compressed.lighting.key_intensity > classic.lighting.key_intensity);
        assert_eq!(compressed.lighting.key_position, classic.lighting.key_position);
    }
}
