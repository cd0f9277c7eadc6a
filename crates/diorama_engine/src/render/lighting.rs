//! Light sources

use crate::foundation::math::Vec3;

/// Light source placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Uniform light from every direction
    Ambient {
        /// Light color
        color: Vec3,
        /// Light intensity
        intensity: f32,
    },
    /// Parallel rays (like sunlight), shining from `position` towards `target`
    Directional {
        /// Light color
        color: Vec3,
        /// Light intensity
        intensity: f32,
        /// Position the rays originate from
        position: Vec3,
        /// Point the rays travel towards
        target: Vec3,
        /// Whether the light renders a shadow map
        cast_shadow: bool,
    },
    /// Sky/ground gradient light
    Hemisphere {
        /// Color from above
        sky_color: Vec3,
        /// Color from below
        ground_color: Vec3,
        /// Light intensity
        intensity: f32,
    },
}

impl Light {
    /// Create an ambient light
    pub fn ambient(color: Vec3, intensity: f32) -> Self {
        Self::Ambient { color, intensity }
    }

    /// Create a directional light aimed at the origin
    pub fn directional(color: Vec3, intensity: f32, position: Vec3) -> Self {
        Self::Directional {
            color,
            intensity,
            position,
            target: Vec3::zeros(),
            cast_shadow: false,
        }
    }

    /// Create a hemisphere light
    pub fn hemisphere(sky_color: Vec3, ground_color: Vec3, intensity: f32) -> Self {
        Self::Hemisphere {
            sky_color,
            ground_color,
            intensity,
        }
    }

    /// Enable shadow casting; only directional lights cast shadows
    pub fn with_shadows(mut self) -> Self {
        if let Self::Directional { cast_shadow, .. } = &mut self {
            *cast_shadow = true;
        }
        self
    }

    /// Whether this light renders a shadow map
    pub fn casts_shadow(&self) -> bool {
        matches!(self, Self::Directional { cast_shadow: true, .. })
    }

    /// Light intensity
    pub fn intensity(&self) -> f32 {
        match self {
            Self::Ambient { intensity, .. }
            | Self::Directional { intensity, .. }
            | Self::Hemisphere { intensity, .. } => *intensity,
        }
    }

    /// Normalized direction the light travels, for directional lights
    pub fn direction(&self) -> Option<Vec3> {
        match self {
            Self::Directional { position, target, .. } => (target - position).try_normalize(f32::EPSILON),
            _ => None,
        }
    }
}
