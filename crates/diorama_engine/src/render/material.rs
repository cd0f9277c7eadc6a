//! Material type definitions
//!
//! Loaded assets arrive with heterogeneous shading models. The scene wants
//! every placed sub-part on the metallic-roughness model, so each kind can
//! be queried for that capability and converted.

use crate::foundation::math::Vec3;
use super::texture::Texture;

/// Standard metallic-roughness parameters
#[derive(Debug, Clone, PartialEq)]
pub struct StandardParams {
    /// Base color (albedo) - RGB values
    pub color: Vec3,
    /// Alpha transparency value
    pub alpha: f32,
    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metalness: f32,
    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
    /// Emission color
    pub emissive: Vec3,
    /// Base color texture
    pub map: Option<Texture>,
    /// Tangent-space normal map
    pub normal_map: Option<Texture>,
}

impl Default for StandardParams {
    fn default() -> Self {
        Self {
            color: Vec3::new(1.0, 1.0, 1.0),
            alpha: 1.0,
            metalness: 0.0,
            roughness: 1.0,
            emissive: Vec3::zeros(),
            map: None,
            normal_map: None,
        }
    }
}

/// Blinn-Phong parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PhongParams {
    /// Diffuse color
    pub color: Vec3,
    /// Alpha transparency
    pub alpha: f32,
    /// Specular highlight color
    pub specular: Vec3,
    /// Specular exponent
    pub shininess: f32,
    /// Diffuse texture
    pub map: Option<Texture>,
    /// Tangent-space normal map
    pub normal_map: Option<Texture>,
}

impl Default for PhongParams {
    fn default() -> Self {
        Self {
            color: Vec3::new(1.0, 1.0, 1.0),
            alpha: 1.0,
            specular: Vec3::new(0.067, 0.067, 0.067),
            shininess: 30.0,
            map: None,
            normal_map: None,
        }
    }
}

/// Diffuse-only parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LambertParams {
    /// Diffuse color
    pub color: Vec3,
    /// Alpha transparency
    pub alpha: f32,
    /// Diffuse texture
    pub map: Option<Texture>,
    /// Tangent-space normal map
    pub normal_map: Option<Texture>,
}

/// Unlit parameters
#[derive(Debug, Clone, PartialEq)]
pub struct UnlitParams {
    /// Material color
    pub color: Vec3,
    /// Alpha transparency
    pub alpha: f32,
    /// Color texture
    pub map: Option<Texture>,
}

/// Enumeration of supported shading models
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialKind {
    /// Physically-based metallic-roughness
    Standard(StandardParams),
    /// Blinn-Phong
    Phong(PhongParams),
    /// Lambertian diffuse
    Lambert(LambertParams),
    /// No lighting
    Unlit(UnlitParams),
}

/// Which faces are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Front faces only
    #[default]
    Front,
    /// Back faces only
    Back,
    /// Both faces
    Double,
}

/// Material attached to a renderable sub-part
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Shading model and its parameters
    pub kind: MaterialKind,
    /// Optional name for debugging
    pub name: Option<String>,
    /// Face culling
    pub side: Side,
}

impl Material {
    /// Create a standard PBR material
    pub fn standard(params: StandardParams) -> Self {
        Self::from_kind(MaterialKind::Standard(params))
    }

    /// Create a Phong material
    pub fn phong(params: PhongParams) -> Self {
        Self::from_kind(MaterialKind::Phong(params))
    }

    /// Create a Lambert material
    pub fn lambert(params: LambertParams) -> Self {
        Self::from_kind(MaterialKind::Lambert(params))
    }

    /// Create an unlit material
    pub fn unlit(params: UnlitParams) -> Self {
        Self::from_kind(MaterialKind::Unlit(params))
    }

    fn from_kind(kind: MaterialKind) -> Self {
        Self {
            kind,
            name: None,
            side: Side::Front,
        }
    }

    /// Set the material name for debugging
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set which faces are drawn
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Whether this material already uses the metallic-roughness model
    pub fn is_physically_based(&self) -> bool {
        matches!(self.kind, MaterialKind::Standard(_))
    }

    /// Base color as RGB
    pub fn color(&self) -> Vec3 {
        match &self.kind {
            MaterialKind::Standard(p) => p.color,
            MaterialKind::Phong(p) => p.color,
            MaterialKind::Lambert(p) => p.color,
            MaterialKind::Unlit(p) => p.color,
        }
    }

    /// Alpha
    pub fn alpha(&self) -> f32 {
        match &self.kind {
            MaterialKind::Standard(p) => p.alpha,
            MaterialKind::Phong(p) => p.alpha,
            MaterialKind::Lambert(p) => p.alpha,
            MaterialKind::Unlit(p) => p.alpha,
        }
    }

    /// Base color texture
    pub fn map(&self) -> Option<&Texture> {
        match &self.kind {
            MaterialKind::Standard(p) => p.map.as_ref(),
            MaterialKind::Phong(p) => p.map.as_ref(),
            MaterialKind::Lambert(p) => p.map.as_ref(),
            MaterialKind::Unlit(p) => p.map.as_ref(),
        }
    }

    /// Normal map, if the shading model has one
    pub fn normal_map(&self) -> Option<&Texture> {
        match &self.kind {
            MaterialKind::Standard(p) => p.normal_map.as_ref(),
            MaterialKind::Phong(p) => p.normal_map.as_ref(),
            MaterialKind::Lambert(p) => p.normal_map.as_ref(),
            MaterialKind::Unlit(_) => None,
        }
    }

    /// Every texture referenced by this material
    pub fn textures(&self) -> impl Iterator<Item = &Texture> {
        self.map().into_iter().chain(self.normal_map())
    }

    /// Build a standard material from this one
    ///
    /// Color, alpha, base texture, normal map, name and side carry over;
    /// metalness and roughness are taken from the arguments.
    pub fn to_standard(&self, metalness: f32, roughness: f32) -> Self {
        let params = StandardParams {
            color: self.color(),
            alpha: self.alpha(),
            metalness,
            roughness,
            map: self.map().cloned(),
            normal_map: self.normal_map().cloned(),
            ..StandardParams::default()
        };
        Self {
            kind: MaterialKind::Standard(params),
            name: self.name.clone(),
            side: self.side,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard(StandardParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::texture::TextureSettings;

    #[test]
    fn only_standard_is_physically_based() {
        assert!(Material::default().is_physically_based());
        assert!(!Material::phong(PhongParams::default()).is_physically_based());
        assert!(!Material::unlit(UnlitParams {
            color: Vec3::new(1.0, 0.0, 0.0),
            alpha: 1.0,
            map: None,
        })
        .is_physically_based());
    }

    #[test]
    fn conversion_keeps_color_and_maps() {
        let phong = Material::phong(PhongParams {
            color: Vec3::new(0.2, 0.4, 0.6),
            alpha: 0.5,
            map: Some(Texture::new("cup/base.png", TextureSettings::default())),
            normal_map: Some(Texture::new("cup/normal.png", TextureSettings::linear())),
            ..PhongParams::default()
        })
        .with_name("mug")
        .with_side(Side::Double);

        let standard = phong.to_standard(0.5, 0.5);
        let MaterialKind::Standard(params) = &standard.kind else {
            panic!("expected standard material");
        };
        assert_eq!(params.color, Vec3::new(0.2, 0.4, 0.6));
        assert_eq!(params.alpha, 0.5);
        assert_eq!(params.metalness, 0.5);
        assert_eq!(params.roughness, 0.5);
        assert_eq!(params.map.as_ref().map(|t| t.key.as_str()), Some("cup/base.png"));
        assert_eq!(params.normal_map.as_ref().map(|t| t.key.as_str()), Some("cup/normal.png"));
        assert_eq!(standard.name.as_deref(), Some("mug"));
        assert_eq!(standard.side, Side::Double);
    }

    #[test]
    fn unlit_has_no_normal_map() {
        let unlit = Material::unlit(UnlitParams {
            color: Vec3::new(1.0, 1.0, 1.0),
            alpha: 1.0,
            map: Some(Texture::new("label.png", TextureSettings::default())),
        });
        assert!(unlit.normal_map().is_none());
        assert_eq!(unlit.textures().count(), 1);
    }
}
