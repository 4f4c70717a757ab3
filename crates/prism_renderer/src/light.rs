//! Point lights.

use crate::Color;
use prism_math::{normalize, Ray, Vec3};

/// An isotropic point light with inverse-square falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    /// Scalar radiant power proxy
    pub intensity: f64,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Color::ONE,
            intensity: 1.0,
        }
    }
}

impl Light {
    pub fn new(position: Vec3, color: Color, intensity: f64) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Unit direction from `point` toward the light.
    pub fn direction_from(&self, point: Vec3) -> Vec3 {
        normalize(self.position - point)
    }

    pub fn distance_to(&self, point: Vec3) -> f64 {
        (self.position - point).length()
    }

    /// Ray leaving `point` toward the light, nudged `bias` off the surface.
    pub fn shadow_ray_from(&self, point: Vec3, bias: f64) -> Ray {
        let dir = self.direction_from(point);
        Ray::new(point + dir * bias, dir)
    }

    /// Radiance leaving the light: color * intensity.
    #[inline]
    pub fn emitted(&self) -> Color {
        self.color * self.intensity
    }

    /// Irradiance reaching a surface `distance` away at cosine `n_dot_l`.
    pub fn contribution(&self, distance: f64, n_dot_l: f64) -> Color {
        self.emitted() * (1.0 / (distance * distance)) * n_dot_l.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_and_distance() {
        let light = Light::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE, 10.0);
        let p = Vec3::new(0.0, 1.0, 0.0);

        assert_eq!(light.direction_from(p), Vec3::Y);
        assert!((light.distance_to(p) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_shadow_ray_is_offset() {
        let light = Light::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE, 1.0);
        let ray = light.shadow_ray_from(Vec3::ZERO, 0.01);

        assert_eq!(ray.origin, Vec3::new(0.0, 0.01, 0.0));
        assert_eq!(ray.direction, Vec3::Y);
    }

    #[test]
    fn test_inverse_square_falloff() {
        let light = Light::new(Vec3::ZERO, Color::new(1.0, 0.5, 0.0), 8.0);
        let c = light.contribution(2.0, 1.0);
        assert_eq!(c, Color::new(2.0, 1.0, 0.0));

        let half = light.contribution(4.0, 1.0);
        assert_eq!(half * 4.0, c);
    }

    #[test]
    fn test_back_facing_contributes_nothing() {
        let light = Light::default();
        assert_eq!(light.contribution(1.0, -0.5), Color::ZERO);
    }
}
