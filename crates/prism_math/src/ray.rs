use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The constructor does not normalize `direction`. Most call sites pass a
/// unit direction so that the ray parameter `t` equals Euclidean distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + direction * t
    #[inline]
    pub fn point_at_distance(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same ray with its origin pushed `offset` along the direction.
    pub fn advanced(&self, offset: f64) -> Ray {
        Ray::new(self.point_at_distance(offset), self.direction)
    }
}
