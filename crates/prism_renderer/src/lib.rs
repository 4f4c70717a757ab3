//! Prism renderer - CPU Whitted-style ray tracing
//!
//! A recursive ray tracer for scenes made of spheres, planes, triangles
//! and indexed meshes lit by point lights. Surfaces combine Lambert
//! diffuse, Blinn-Phong highlights, mirror reflection and Fresnel-weighted
//! refraction; shadows are tinted by transparent occluders.

mod hittable;
mod material;
mod sphere;
mod plane;
mod triangle;
mod mesh;
mod light;
mod camera;
mod scene;
mod renderer;
mod bucket;
pub mod aov;
pub mod tonemap;
pub mod output;
pub mod scene_file;

pub use hittable::{HitInfo, Hittable, ShapeKind, HIT_EPSILON};
pub use material::{schlick, Color, Material, AMBIENT_IOR};
pub use sphere::Sphere;
pub use plane::Plane;
pub use triangle::Triangle;
pub use mesh::Mesh;
pub use light::Light;
pub use camera::Camera;
pub use scene::{Scene, Shape, MAX_TRANSMITTANCE_STEPS, TRANSMITTANCE_CUTOFF};
pub use renderer::{
    direct_lighting, gather_light, render, render_pixel, render_with, shadow_transmittance, trace_ray,
    Background, ImageBuffer, LightSample, RenderConfig, ShadowMode,
};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use aov::{render_aov, Aov};
pub use tonemap::ToneMap;
pub use output::{write_image, OutputError};
pub use scene_file::{load_scene, parse_scene, SceneFile, SceneFileError};

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Interval, Ray, Vec3};

/// Uniform sample in [0, 1) from a type-erased RNG.
#[inline]
pub(crate) fn gen_f64(rng: &mut dyn rand::RngCore) -> f64 {
    use rand::Rng;
    rng.gen()
}
