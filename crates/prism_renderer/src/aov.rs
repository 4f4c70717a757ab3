//! Diagnostic render passes (AOVs).
//!
//! Each pass traces one unjittered primary ray per pixel and writes a
//! single quantity of the first hit. Misses are black, except in the
//! beauty pass where they see the background.

use crate::{
    renderer::{gather_light, render, render_with, trace_ray, ImageBuffer, RenderConfig},
    Color, Scene,
};
use prism_math::normalize;
use rand::RngCore;
use serde::Deserialize;

/// Which image to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aov {
    /// Full shaded render
    #[default]
    Beauty,
    /// Normalized hit distance, white at the near plane
    Depth,
    /// Facing normal mapped from [-1, 1] to [0, 1]
    Normal,
    /// Material albedo
    Albedo,
    /// Direct diffuse and specular light, without albedo
    Light,
}

impl Aov {
    pub fn name(&self) -> &'static str {
        match self {
            Aov::Beauty => "beauty",
            Aov::Depth => "depth",
            Aov::Normal => "normal",
            Aov::Albedo => "albedo",
            Aov::Light => "light",
        }
    }
}

/// Value of a diagnostic pass at pixel (x, y).
pub fn aov_pixel(scene: &Scene, aov: Aov, x: u32, y: u32, config: &RenderConfig, rng: &mut dyn RngCore) -> Color {
    let camera = scene.camera();
    let ray = camera.get_ray(x, y, false, rng);

    let Some(hit) = scene.intersect_closest(&ray) else {
        return match aov {
            Aov::Beauty => config.background.color(&ray),
            _ => Color::ZERO,
        };
    };

    let incoming = normalize(ray.direction());
    let (normal, _) = hit.facing_normal(incoming);

    match aov {
        Aov::Beauty => trace_ray(scene, &ray, 0, config),
        Aov::Depth => Color::splat(camera.normalized_depth(hit.distance)),
        Aov::Normal => normal * 0.5 + Color::splat(0.5),
        Aov::Albedo => hit.material.color,
        Aov::Light => {
            let light = gather_light(scene, &hit, normal, -incoming, config);
            light.diffuse + light.specular
        }
    }
}

/// Render a full image of the requested pass.
pub fn render_aov(scene: &Scene, aov: Aov, config: &RenderConfig) -> ImageBuffer {
    log::info!("Rendering {} pass", aov.name());
    match aov {
        Aov::Beauty => render(scene, config),
        _ => render_with(scene, config, |x, y, rng| aov_pixel(scene, aov, x, y, config, rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Light, Material, Plane, Sphere};
    use prism_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene(focal: f64) -> Scene {
        let camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), focal, 16, 16).with_planes(1.0, 9.0);
        let mut scene = Scene::new(camera);
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, Material::diffuse(Color::new(0.2, 0.4, 0.8))));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, -3.0), Color::ONE, 4.0));
        scene
    }

    fn center(aov: Aov) -> Color {
        let mut rng = StdRng::seed_from_u64(0);
        aov_pixel(&scene(200.0), aov, 8, 8, &RenderConfig::default(), &mut rng)
    }

    #[test]
    fn test_depth_pass() {
        // Hit near z = -1, four units out: (4 - 1) / (9 - 1) of the way to far
        let depth = center(Aov::Depth);
        assert!((depth.x - 0.625).abs() < 1e-3, "depth={}", depth.x);
        assert_eq!(depth.x, depth.y);
    }

    #[test]
    fn test_normal_pass_faces_camera() {
        let n = center(Aov::Normal);
        // Normal is close to -Z
        assert!(n.z < 0.01);
        assert!((n.x - 0.5).abs() < 0.01);
        assert!((n.y - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_albedo_pass() {
        assert_eq!(center(Aov::Albedo), Color::new(0.2, 0.4, 0.8));
    }

    #[test]
    fn test_light_pass_ignores_albedo() {
        let light = center(Aov::Light);
        // 4 / 2^2 at near-normal incidence, equal in every channel
        assert!((light.x - 1.0).abs() < 1e-3, "light={}", light.x);
        assert_eq!(light.x, light.z);
    }

    #[test]
    fn test_miss_is_black() {
        let mut scene = Scene::new(Camera::new(Vec3::ZERO, 10.0, 4, 4));
        scene.add_plane(Plane::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z, Material::default()));
        let mut rng = StdRng::seed_from_u64(0);

        for aov in [Aov::Depth, Aov::Normal, Aov::Albedo, Aov::Light] {
            assert_eq!(aov_pixel(&scene, aov, 2, 2, &RenderConfig::default(), &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_render_aov_dimensions() {
        let image = render_aov(&scene(20.0), Aov::Albedo, &RenderConfig::default());
        assert_eq!(image.pixels.len(), 16 * 16);
        assert_eq!(image.get(8, 8), Color::new(0.2, 0.4, 0.8));
        assert_eq!(image.get(0, 0), Color::ZERO);
    }
}
