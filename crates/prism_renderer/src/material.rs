//! Surface shading parameters.

use prism_math::Vec3;
use serde::Deserialize;

/// Color type alias (linear RGB, nominally 0-1 but never clamped internally)
pub type Color = Vec3;

/// Refractive index of the medium rays travel through between surfaces.
pub const AMBIENT_IOR: f64 = 1.0;

/// Shading parameters for a surface.
///
/// Primitives own their material by value; intersections copy it into the
/// [`HitInfo`](crate::HitInfo) so shading never reaches back into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Diffuse albedo
    pub color: Color,
    /// Blinn-Phong exponent
    pub shininess: f64,
    /// Weight of the specular highlight and of mirror reflection (0-1)
    pub specular: f64,
    /// Fraction of light passing through the surface (0-1)
    pub transparency: f64,
    /// Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ONE,
            shininess: 32.0,
            specular: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    /// A plain diffuse material with the given albedo.
    pub fn diffuse(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// An opaque material with a Blinn-Phong highlight and mirror weight.
    pub fn glossy(color: Color, specular: f64, shininess: f64) -> Self {
        Self {
            color,
            specular,
            shininess,
            ..Default::default()
        }
    }

    /// A clear dielectric (glass, water...).
    pub fn dielectric(color: Color, transparency: f64, refractive_index: f64) -> Self {
        Self {
            color,
            transparency,
            refractive_index,
            ..Default::default()
        }
    }

    pub fn with_shininess(mut self, shininess: f64) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_specular(mut self, specular: f64) -> Self {
        self.specular = specular;
        self
    }

    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }

    pub fn with_refractive_index(mut self, refractive_index: f64) -> Self {
        self.refractive_index = refractive_index;
        self
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }

    /// True when the weights sit in their nominal [0, 1] ranges.
    pub fn is_well_formed(&self) -> bool {
        (0.0..=1.0).contains(&self.specular)
            && (0.0..=1.0).contains(&self.transparency)
            && self.refractive_index > 0.0
    }

    /// Normal-incidence reflectance between the ambient medium and this surface.
    pub fn f0(&self) -> f64 {
        let ratio = (self.refractive_index - AMBIENT_IOR) / (self.refractive_index + AMBIENT_IOR);
        ratio * ratio
    }

    /// Fresnel reflectance at the given cosine between normal and view.
    pub fn fresnel(&self, cos_theta: f64) -> f64 {
        schlick(self.f0(), cos_theta)
    }
}

/// Schlick's approximation for reflectance
#[inline]
pub fn schlick(f0: f64, cos_theta: f64) -> f64 {
    let c = 1.0 - cos_theta.clamp(0.0, 1.0);
    f0 + (1.0 - f0) * c.powi(5)
}
