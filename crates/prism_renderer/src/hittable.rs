//! Hittable trait and HitInfo for ray-object intersection.

use crate::Material;
use prism_math::{Ray, Vec3};

/// Hits at or below this distance are rejected to avoid self-intersection acne.
pub const HIT_EPSILON: f64 = 1e-6;

/// Which primitive collection a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Plane,
    Triangle,
    Mesh,
}

/// Record of a ray-object intersection.
///
/// Built fresh for each query and dropped once the pixel is shaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Parameter t along the ray, always finite and > [`HIT_EPSILON`]
    pub distance: f64,
    /// Collection the primitive lives in
    pub kind: ShapeKind,
    /// Index of the primitive within its collection (statistics/debug only)
    pub index: usize,
    /// Material snapshot at the hit
    pub material: Material,
    /// Geometric normal, not necessarily facing the ray
    pub normal: Vec3,
    /// World-space point of intersection
    pub hit_point: Vec3,
}

impl HitInfo {
    /// Package a hit if `distance` passes the validity check.
    pub fn new(
        ray: &Ray,
        distance: f64,
        kind: ShapeKind,
        index: usize,
        material: Material,
        normal: Vec3,
    ) -> Option<Self> {
        if !is_valid_distance(distance) {
            return None;
        }
        Some(Self {
            distance,
            kind,
            index,
            material,
            normal,
            hit_point: ray.point_at_distance(distance),
        })
    }

    #[inline]
    pub fn is_closer_than(&self, other: &HitInfo) -> bool {
        self.distance < other.distance
    }

    /// The normal flipped to face against `direction`, and whether the
    /// geometric normal already did (ray arriving from outside).
    pub fn facing_normal(&self, direction: Vec3) -> (Vec3, bool) {
        if direction.dot(self.normal) >= 0.0 {
            (-self.normal, false)
        } else {
            (self.normal, true)
        }
    }
}

#[inline]
pub fn is_valid_distance(t: f64) -> bool {
    t.is_finite() && t > HIT_EPSILON
}

/// Trait for primitives that can be hit by rays.
///
/// Collections in the [`Scene`](crate::Scene) are scanned with static
/// dispatch through this trait.
pub trait Hittable: Send + Sync {
    /// Distance along `ray` to the nearest valid intersection.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Full hit record for the nearest intersection; `index` is the
    /// primitive's position in its collection.
    fn hit_info_at(&self, ray: &Ray, index: usize) -> Option<HitInfo>;
}
