//! Vector helpers with the NaN-free conventions the tracer relies on.
//!
//! glam provides the algebra (dot, cross, length). The functions here add
//! the degenerate-case policy: near-zero vectors normalize to zero, and
//! total internal reflection is signalled by a zero-length refraction.

use crate::Vec3;

/// Lengths at or below this are treated as zero by [`normalize`].
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Normalize `v`, returning the zero vector when `|v| <= 1e-12`.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    if len <= NORMALIZE_EPSILON {
        return Vec3::ZERO;
    }
    v / len
}

/// Mirror `v` about the normal `n`: `v - 2(v.n)n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `v` through a surface with unit normal `n`.
///
/// `n` must face against `v` and `eta` is the ratio of refractive indices
/// (incident over transmitted). Past the critical angle the discriminant
/// goes negative and the zero vector is returned; callers detect total
/// internal reflection by checking for a near-zero length.
#[inline]
pub fn refract(v: Vec3, n: Vec3, eta: f64) -> Vec3 {
    let cos_i = -v.dot(n);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return Vec3::ZERO;
    }
    eta * v + (eta * cos_i - k.sqrt()) * n
}

/// Linear interpolation from `a` (t = 0) to `b` (t = 1).
#[inline]
pub fn lerp(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unit_length() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1e-6, 2e-6, 5e-7),
            Vec3::new(1e6, -3e5, 42.0),
        ] {
            let n = normalize(v);
            assert!((n.length() - 1.0).abs() < 1e-9, "len={}", n.length());
        }
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        let n = normalize(Vec3::ZERO);
        assert_eq!(n, Vec3::ZERO);
        assert!(!n.is_nan());

        let tiny = normalize(Vec3::splat(1e-14));
        assert_eq!(tiny, Vec3::ZERO);
    }

    #[test]
    fn test_reflect() {
        let v = normalize(Vec3::new(1.0, -1.0, 0.0));
        let r = reflect(v, Vec3::Y);
        assert!((r - normalize(Vec3::new(1.0, 1.0, 0.0))).length() < 1e-12);
    }

    #[test]
    fn test_refract_straight_through() {
        let v = Vec3::new(0.0, -1.0, 0.0);
        let t = refract(v, Vec3::Y, 1.0 / 1.5);
        assert!((t - v).length() < 1e-12);
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        let v = normalize(Vec3::new(1.0, -1.0, 0.0));
        let t = refract(v, Vec3::Y, 1.0 / 1.5);
        // Snell: sin_t = sin_i / 1.5
        let sin_i = v.x;
        assert!((t.x - sin_i / 1.5).abs() < 1e-12);
        assert!((t.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // Leaving glass at a grazing angle
        let v = normalize(Vec3::new(1.0, -0.2, 0.0));
        let t = refract(v, Vec3::Y, 1.5);
        assert_eq!(t.length(), 0.0);
        assert!(!t.is_nan());
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::new(1.0, 1.0, 1.0);
        let b = Vec3::new(0.5, 0.7, 1.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
    }
}
