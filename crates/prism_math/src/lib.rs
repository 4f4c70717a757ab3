//! Double-precision math types for the Prism ray tracer.

// Re-export glam for convenience
pub use glam::DVec3;

/// Points, directions and linear RGB colors all share this type.
pub type Vec3 = DVec3;

mod interval;
mod ray;
pub mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{lerp, normalize, reflect, refract};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_doubles_as_color() {
        let albedo = Vec3::new(1.0, 0.5, 0.0);
        let light = Vec3::new(0.5, 0.5, 2.0);
        assert_eq!(albedo * light, Vec3::new(0.5, 0.25, 0.0));
    }
}
