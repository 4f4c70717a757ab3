//! Infinite plane primitive.

use crate::{
    hittable::{HitInfo, Hittable, ShapeKind},
    Material,
};
use prism_math::{normalize, Ray, Vec3};

/// Below this |D.N| the ray counts as parallel to the plane.
const PARALLEL_EPSILON: f64 = 1e-6;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
    pub material: Material,
}

impl Plane {
    /// Create a new plane. The normal is normalized on the way in.
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            point,
            normal: normalize(normal),
            material,
        }
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        (t >= 0.0).then_some(t)
    }

    fn hit_info_at(&self, ray: &Ray, index: usize) -> Option<HitInfo> {
        let t = self.intersect(ray)?;
        HitInfo::new(ray, t, ShapeKind::Plane, index, self.material, self.normal)
    }
}
