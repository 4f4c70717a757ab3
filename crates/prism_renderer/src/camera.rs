//! Camera for ray generation.

use crate::gen_f64;
use prism_math::{normalize, Interval, Ray, Vec3};
use rand::RngCore;

/// Pinhole camera mapping pixel coordinates to world-space rays.
///
/// The image plane sits `focal` units along `forward`, measured in pixels,
/// so `focal` acts as the field of view control: the optical axis passes
/// through pixel (width / 2, height / 2) and screen Y grows downward.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    forward: Vec3,
    pub width: u32,
    pub height: u32,
    /// Distance to the image plane, in pixels
    pub focal: f64,
    /// Near/far distances for depth diagnostics only; nothing is clipped
    pub near_plane_distance: f64,
    pub far_plane_distance: f64,
    /// Samples per pixel
    pub anti_aliasing_amount: u32,

    // Cached basis (kept in sync with forward)
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a camera looking down +Z.
    pub fn new(position: Vec3, focal: f64, width: u32, height: u32) -> Self {
        let mut camera = Self {
            position,
            forward: Vec3::Z,
            width,
            height,
            focal,
            near_plane_distance: 1.0,
            far_plane_distance: 1000.0,
            anti_aliasing_amount: 1,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.update_basis();
        camera
    }

    /// Set the viewing direction.
    pub fn with_forward(mut self, forward: Vec3) -> Self {
        let forward = normalize(forward);
        if forward != Vec3::ZERO {
            self.forward = forward;
            self.update_basis();
        }
        self
    }

    /// Aim the camera at a point.
    pub fn looking_at(self, target: Vec3) -> Self {
        let forward = target - self.position;
        self.with_forward(forward)
    }

    /// Set depth-diagnostic plane distances.
    pub fn with_planes(mut self, near: f64, far: f64) -> Self {
        self.near_plane_distance = near;
        self.far_plane_distance = far;
        self
    }

    /// Set samples per pixel (at least one).
    pub fn with_anti_aliasing(mut self, samples: u32) -> Self {
        self.anti_aliasing_amount = samples.max(1);
        self
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    fn update_basis(&mut self) {
        // Keep world +Y as up unless we look straight along it
        let world_up = if self.forward.cross(Vec3::Y).length_squared() < 1e-12 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        self.right = normalize(world_up.cross(self.forward));
        self.up = self.forward.cross(self.right);
    }

    /// Generate the ray through pixel (x, y).
    ///
    /// The screen point is offset from `position` along the camera basis, so a
    /// camera moved off the Z axis still looks through its own image center.
    ///
    /// With `jitter` the sample point moves by a random sub-pixel offset in
    /// [0, 1 / anti_aliasing_amount) on each axis. The direction is unit length.
    pub fn get_ray(&self, x: u32, y: u32, jitter: bool, rng: &mut dyn RngCore) -> Ray {
        let (jx, jy) = if jitter {
            let step = 1.0 / self.anti_aliasing_amount.max(1) as f64;
            (gen_f64(rng) * step, gen_f64(rng) * step)
        } else {
            (0.0, 0.0)
        };

        let sx = (x as f64 + 0.5 + jx) - self.width as f64 / 2.0;
        let sy = self.height as f64 / 2.0 - (y as f64 + 0.5 + jy);

        let screen_point = self.position + self.right * sx + self.up * sy + self.forward * self.focal;
        Ray::new(self.position, normalize(screen_point - self.position))
    }

    /// Map a hit distance to [0, 1] between the far (0) and near (1) planes.
    pub fn normalized_depth(&self, distance: f64) -> f64 {
        let range = self.far_plane_distance - self.near_plane_distance;
        if range <= 0.0 {
            return 0.0;
        }
        1.0 - Interval::UNIT.clamp((distance - self.near_plane_distance) / range)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0, 800, 600)
    }
}
