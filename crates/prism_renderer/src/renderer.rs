//! Whitted-style recursive ray tracer.
//!
//! Implements:
//! - Local shading: ambient + Lambert diffuse + Blinn-Phong specular
//! - Colored shadows through transparent occluders
//! - Mirror reflection and Fresnel-weighted refraction
//! - Anti-aliasing via jittered multi-sampling
//! - Parallel bucket rendering

use crate::{
    bucket::{generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE},
    hittable::HitInfo,
    material::AMBIENT_IOR,
    scene::TRANSMITTANCE_CUTOFF,
    Color, Scene,
};
use prism_math::{lerp, normalize, reflect, refract, Ray, Vec3};
use rand::RngCore;
use rayon::prelude::*;
use serde::Deserialize;
use std::time::Instant;

/// Refracted rays start this many biases past the surface.
pub const REFRACTION_BIAS_SCALE: f64 = 100.0;

/// Reflection and refraction weights at or below this are skipped.
const WEIGHT_EPSILON: f64 = 1e-6;

/// How shadow rays treat occluders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowMode {
    /// Attenuate by the transparency of every occluder crossed
    #[default]
    Transmittance,
    /// Any occluder blocks the light completely
    Hard,
}

/// Vertical gradient returned for rays that escape the scene.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Background {
    /// Color for rays pointing straight down
    pub horizon: Color,
    /// Color for rays pointing straight up
    pub zenith: Color,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            horizon: Color::ONE,
            zenith: Color::new(0.5, 0.7, 1.0),
        }
    }
}

impl Background {
    /// A background with the same color in every direction.
    pub fn solid(color: Color) -> Self {
        Self {
            horizon: color,
            zenith: color,
        }
    }

    /// Color seen along `ray` when nothing is hit.
    pub fn color(&self, ray: &Ray) -> Color {
        let unit_direction = normalize(ray.direction());
        let a = 0.5 * (unit_direction.y + 1.0);
        lerp(self.horizon, self.zenith, a)
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Maximum recursion depth for reflection/refraction
    pub max_recursion: u32,
    /// Offset applied to secondary ray origins
    pub bias: f64,
    /// Ambient term, scaled by albedo
    pub ambient: f64,
    pub shadow_mode: ShadowMode,
    pub background: Background,
    /// Base seed for anti-aliasing jitter
    pub seed: u64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_recursion: 5,
            bias: 1e-4,
            ambient: 0.0,
            shadow_mode: ShadowMode::Transmittance,
            background: Background::default(),
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_max_recursion(mut self, max_recursion: u32) -> Self {
        self.max_recursion = max_recursion;
        self
    }

    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_shadow_mode(mut self, shadow_mode: ShadowMode) -> Self {
        self.shadow_mode = shadow_mode;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size.max(1);
        self
    }
}

/// Light arriving at a surface point, before albedo is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LightSample {
    /// Sum of shadowed, distance-attenuated N.L terms
    pub diffuse: Color,
    /// Sum of shadowed Blinn-Phong highlight terms
    pub specular: Color,
}

/// Fraction of light reaching the end of a shadow ray.
pub fn shadow_transmittance(scene: &Scene, ray: &Ray, max_distance: f64, config: &RenderConfig) -> f64 {
    match config.shadow_mode {
        ShadowMode::Transmittance => scene.compute_transmittance(ray, max_distance, config.bias),
        ShadowMode::Hard => {
            if scene.intersect_any_before(ray, max_distance) {
                0.0
            } else {
                1.0
            }
        }
    }
}

/// Gather direct light from every point light at a hit.
///
/// `normal` must face the viewer and `view` points from the surface back
/// toward the ray origin.
pub fn gather_light(
    scene: &Scene,
    hit: &HitInfo,
    normal: Vec3,
    view: Vec3,
    config: &RenderConfig,
) -> LightSample {
    let material = &hit.material;
    let wants_highlight = !material.is_transparent() && material.specular > 0.0;
    let mut sample = LightSample::default();

    for light in scene.lights() {
        let distance = light.distance_to(hit.hit_point);
        if distance <= config.bias {
            continue;
        }

        let to_light = light.direction_from(hit.hit_point);
        let n_dot_l = normal.dot(to_light);
        if n_dot_l <= 0.0 {
            continue;
        }

        let shadow_ray = light.shadow_ray_from(hit.hit_point, config.bias);
        let transmittance = shadow_transmittance(scene, &shadow_ray, distance - config.bias, config);
        if transmittance <= TRANSMITTANCE_CUTOFF {
            continue;
        }

        sample.diffuse += light.contribution(distance, n_dot_l) * transmittance;

        if wants_highlight {
            let half = normalize(to_light + view);
            let n_dot_h = normal.dot(half).max(0.0);
            if n_dot_h > 0.0 {
                let falloff = light.emitted() / (distance * distance);
                sample.specular += falloff * n_dot_h.powf(material.shininess) * transmittance;
            }
        }
    }

    sample
}

/// Local illumination at a hit: ambient + diffuse + specular.
pub fn direct_lighting(
    scene: &Scene,
    hit: &HitInfo,
    normal: Vec3,
    view: Vec3,
    config: &RenderConfig,
) -> Color {
    let material = &hit.material;
    let light = gather_light(scene, hit, normal, view, config);

    material.color * config.ambient + material.color * light.diffuse + light.specular * material.specular
}

/// Compute the color seen along a ray.
///
/// Recursion stops once `depth` reaches `config.max_recursion`; that call
/// returns the background without touching the scene.
pub fn trace_ray(scene: &Scene, ray: &Ray, depth: u32, config: &RenderConfig) -> Color {
    if depth >= config.max_recursion {
        return config.background.color(ray);
    }

    let Some(hit) = scene.intersect_closest(ray) else {
        return config.background.color(ray);
    };

    let incoming = normalize(ray.direction());
    let (normal, outside) = hit.facing_normal(incoming);
    let view = -incoming;
    let material = hit.material;

    let local = direct_lighting(scene, &hit, normal, view, config);
    let mut color = local * (1.0 - material.transparency);

    let mut reflect_weight = material.specular;

    if material.is_transparent() {
        let cos_theta = normal.dot(view);
        let mut fresnel = material.fresnel(cos_theta);

        let eta = if outside {
            AMBIENT_IOR / material.refractive_index
        } else {
            material.refractive_index / AMBIENT_IOR
        };

        let refracted = refract(incoming, normal, eta);
        if refracted == Vec3::ZERO {
            // Total internal reflection
            fresnel = 1.0;
        } else {
            let refract_weight = material.transparency * (1.0 - fresnel);
            if refract_weight > WEIGHT_EPSILON {
                let direction = normalize(refracted);
                let origin = hit.hit_point + direction * (config.bias * REFRACTION_BIAS_SCALE);
                color += trace_ray(scene, &Ray::new(origin, direction), depth + 1, config) * refract_weight;
            }
        }

        reflect_weight = fresnel;
    }

    if reflect_weight > WEIGHT_EPSILON {
        let direction = normalize(reflect(incoming, normal));
        let origin = hit.hit_point + normal * config.bias;
        color += trace_ray(scene, &Ray::new(origin, direction), depth + 1, config) * reflect_weight;
    }

    color
}

/// Render a single pixel, averaging the camera's anti-aliasing samples.
///
/// The first sample always goes through the pixel center; the rest are
/// jittered when more than one sample is requested.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, config: &RenderConfig, rng: &mut dyn RngCore) -> Color {
    let camera = scene.camera();
    let samples = camera.anti_aliasing_amount.max(1);
    let mut pixel_color = Color::ZERO;

    for sample in 0..samples {
        let jitter = sample > 0 && samples > 1;
        let ray = camera.get_ray(x, y, jitter, rng);
        pixel_color += trace_ray(scene, &ray, 0, config);
    }

    // Average the samples
    pixel_color / samples as f64
}

/// Simple image buffer for storing linear render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render every pixel with `shade`, one bucket per rayon task.
///
/// Each bucket owns an RNG seeded from `config.seed` and its spiral index,
/// so output does not depend on the thread count.
pub fn render_with<F>(scene: &Scene, config: &RenderConfig, shade: F) -> ImageBuffer
where
    F: Fn(u32, u32, &mut dyn RngCore) -> Color + Sync,
{
    let camera = scene.camera();
    let mut image = ImageBuffer::new(camera.width, camera.height);
    let buckets = generate_buckets(camera.width, camera.height, config.bucket_size);

    let start = Instant::now();
    let results: Vec<_> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, config.seed, &shade))
        .collect();

    for result in &results {
        result.write_into(&mut image);
    }

    log::info!(
        "Rendered {}x{} in {} buckets ({:.2?})",
        camera.width,
        camera.height,
        results.len(),
        start.elapsed()
    );

    image
}

/// Render the full beauty image.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    scene.log_summary();
    log::debug!(
        "Render config: max_recursion={}, bias={}, shadows={:?}, samples={}",
        config.max_recursion,
        config.bias,
        config.shadow_mode,
        scene.camera().anti_aliasing_amount
    );
    render_with(scene, config, |x, y, rng| render_pixel(scene, x, y, config, rng))
}
