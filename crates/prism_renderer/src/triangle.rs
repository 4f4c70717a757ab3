//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{is_valid_distance, HitInfo, Hittable, ShapeKind},
    Material,
};
use prism_math::{normalize, Ray, Vec3};

/// Determinants below this magnitude mean the ray is parallel to the
/// triangle or the triangle is degenerate.
const DETERMINANT_EPSILON: f64 = 1e-6;

/// A triangle primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Vertices
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Pre-computed face normal (unit length, zero when degenerate)
    normal: Vec3,
    pub material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The normal follows the winding: (v1 - v0) x (v2 - v0).
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal: face_normal(v0, v1, v2),
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        moller_trumbore(ray, self.v0, self.v1, self.v2)
    }

    fn hit_info_at(&self, ray: &Ray, index: usize) -> Option<HitInfo> {
        let t = self.intersect(ray)?;
        HitInfo::new(ray, t, ShapeKind::Triangle, index, self.material, self.normal)
    }
}

/// Unit geometric normal of a triangle.
pub(crate) fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    normalize((v1 - v0).cross(v2 - v0))
}

/// Möller-Trumbore ray-triangle intersection.
pub(crate) fn moller_trumbore(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < DETERMINANT_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);

    // Check if intersection is outside triangle (u parameter)
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);

    // Check if intersection is outside triangle (v parameter)
    if !(0.0..=1.0).contains(&v) || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    is_valid_distance(t).then_some(t)
}
