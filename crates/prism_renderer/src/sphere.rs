//! Sphere primitive for ray tracing.

use crate::{
    hittable::{is_valid_distance, HitInfo, Hittable, ShapeKind},
    Material,
};
use prism_math::{normalize, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        normalize(point - self.center)
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        if a == 0.0 {
            return None;
        }
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root first; the far one covers rays starting inside
        let near = (h - sqrtd) / a;
        if is_valid_distance(near) {
            return Some(near);
        }
        let far = (h + sqrtd) / a;
        is_valid_distance(far).then_some(far)
    }

    fn hit_info_at(&self, ray: &Ray, index: usize) -> Option<HitInfo> {
        let t = self.intersect(ray)?;
        let normal = self.normal_at(ray.point_at_distance(t));
        HitInfo::new(ray, t, ShapeKind::Sphere, index, self.material, normal)
    }
}
