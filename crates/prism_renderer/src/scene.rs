//! Scene aggregate and visibility queries.
//!
//! The scene owns every primitive and light by value, plus one camera.
//! Queries are brute-force linear scans: spheres, then planes, then
//! triangles, then meshes.

use crate::{
    hittable::{HitInfo, Hittable},
    Camera, Light, Mesh, Plane, Sphere, Triangle,
};
use prism_math::{Interval, Ray};

/// Transmittance below this counts as fully blocked.
pub const TRANSMITTANCE_CUTOFF: f64 = 1e-4;

/// Safety cap on occluders crossed by one shadow ray.
pub const MAX_TRANSMITTANCE_STEPS: usize = 64;

/// Closed set of primitive kinds the scene accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Mesh(Mesh),
}

impl Hittable for Shape {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Plane(s) => s.intersect(ray),
            Shape::Triangle(s) => s.intersect(ray),
            Shape::Mesh(s) => s.intersect(ray),
        }
    }

    fn hit_info_at(&self, ray: &Ray, index: usize) -> Option<HitInfo> {
        match self {
            Shape::Sphere(s) => s.hit_info_at(ray, index),
            Shape::Plane(s) => s.hit_info_at(ray, index),
            Shape::Triangle(s) => s.hit_info_at(ray, index),
            Shape::Mesh(s) => s.hit_info_at(ray, index),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl From<Plane> for Shape {
    fn from(s: Plane) -> Self {
        Shape::Plane(s)
    }
}

impl From<Triangle> for Shape {
    fn from(s: Triangle) -> Self {
        Shape::Triangle(s)
    }
}

impl From<Mesh> for Shape {
    fn from(s: Mesh) -> Self {
        Shape::Mesh(s)
    }
}

/// Everything a render reads. Immutable once rendering starts.
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    triangles: Vec<Triangle>,
    meshes: Vec<Mesh>,
    lights: Vec<Light>,
    camera: Camera,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            spheres: Vec::new(),
            planes: Vec::new(),
            triangles: Vec::new(),
            meshes: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        check_material("sphere", self.spheres.len(), &sphere.material);
        self.spheres.push(sphere);
    }

    pub fn add_plane(&mut self, plane: Plane) {
        check_material("plane", self.planes.len(), &plane.material);
        self.planes.push(plane);
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        check_material("triangle", self.triangles.len(), &triangle.material);
        self.triangles.push(triangle);
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        check_material("mesh", self.meshes.len(), &mesh.material);
        log::debug!(
            "Added mesh {} with {} triangles, {} vertices",
            self.meshes.len(),
            mesh.triangle_count(),
            mesh.vertex_count()
        );
        self.meshes.push(mesh);
    }

    pub fn add_light(&mut self, light: Light) {
        if light.intensity < 0.0 {
            log::warn!("Light {} has negative intensity {}", self.lights.len(), light.intensity);
        }
        self.lights.push(light);
    }

    /// Route any primitive into its collection.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) {
        match shape.into() {
            Shape::Sphere(s) => self.add_sphere(s),
            Shape::Plane(s) => self.add_plane(s),
            Shape::Triangle(s) => self.add_triangle(s),
            Shape::Mesh(s) => self.add_mesh(s),
        }
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Total primitive count across all collections.
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.triangles.len() + self.meshes.len()
    }

    pub fn log_summary(&self) {
        log::debug!(
            "Scene: {} spheres, {} planes, {} triangles, {} meshes ({} mesh triangles), {} lights",
            self.spheres.len(),
            self.planes.len(),
            self.triangles.len(),
            self.meshes.len(),
            self.meshes.iter().map(Mesh::triangle_count).sum::<usize>(),
            self.lights.len()
        );
    }

    /// Nearest valid hit along `ray` across every collection.
    pub fn intersect_closest(&self, ray: &Ray) -> Option<HitInfo> {
        let mut closest = None;
        closest_in(&self.spheres, ray, &mut closest);
        closest_in(&self.planes, ray, &mut closest);
        closest_in(&self.triangles, ray, &mut closest);
        closest_in(&self.meshes, ray, &mut closest);
        closest
    }

    /// True if anything intersects `ray` with 0 < t < `max_distance`.
    pub fn intersect_any_before(&self, ray: &Ray, max_distance: f64) -> bool {
        let window = Interval::new(0.0, max_distance);
        any_in(&self.spheres, ray, window)
            || any_in(&self.planes, ray, window)
            || any_in(&self.triangles, ray, window)
            || any_in(&self.meshes, ray, window)
    }

    /// Fraction of light surviving along `ray` up to `max_distance`.
    ///
    /// Each occluder multiplies the running transmittance by its clamped
    /// transparency; the ray restarts `bias` past every hit. Marching stops
    /// once the result is negligible, nothing else lies before
    /// `max_distance`, or [`MAX_TRANSMITTANCE_STEPS`] occluders were crossed.
    pub fn compute_transmittance(&self, ray: &Ray, max_distance: f64, bias: f64) -> f64 {
        let mut transmittance = 1.0;
        let mut current = *ray;
        let mut remaining = max_distance;

        for _ in 0..MAX_TRANSMITTANCE_STEPS {
            let Some(hit) = self.intersect_closest(&current) else {
                break;
            };
            if hit.distance >= remaining {
                break;
            }

            transmittance *= Interval::UNIT.clamp(hit.material.transparency);
            if transmittance < TRANSMITTANCE_CUTOFF {
                break;
            }

            let step = hit.distance + bias;
            current = current.advanced(step);
            remaining -= step;
            if remaining <= 0.0 {
                break;
            }
        }

        transmittance
    }
}

fn closest_in<T: Hittable>(items: &[T], ray: &Ray, closest: &mut Option<HitInfo>) {
    for (index, item) in items.iter().enumerate() {
        if let Some(hit) = item.hit_info_at(ray, index) {
            if closest.as_ref().map_or(true, |best| hit.is_closer_than(best)) {
                *closest = Some(hit);
            }
        }
    }
}

fn any_in<T: Hittable>(items: &[T], ray: &Ray, window: Interval) -> bool {
    items
        .iter()
        .any(|item| item.intersect(ray).is_some_and(|t| window.surrounds(t)))
}

fn check_material(kind: &str, index: usize, material: &crate::Material) {
    if !material.is_well_formed() {
        log::warn!(
            "{} {} has out-of-range material (specular {}, transparency {}, ior {})",
            kind,
            index,
            material.specular,
            material.transparency,
            material.refractive_index
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hittable::ShapeKind, Color, Material};
    use prism_math::Vec3;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, -5.0), 64.0, 64, 64)
    }

    fn occluder(transparency: f64) -> Sphere {
        Sphere::new(
            Vec3::new(0.0, 2.0, 0.0),
            0.5,
            Material::diffuse(Color::ONE).with_transparency(transparency),
        )
    }

    #[test]
    fn test_closest_across_collections() {
        let mut scene = Scene::new(camera());
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, Material::default()));
        scene.add_plane(Plane::new(Vec3::new(0.0, 0.0, 20.0), -Vec3::Z, Material::default()));
        scene.add_triangle(Triangle::new(
            Vec3::new(-1.0, -1.0, 4.0),
            Vec3::new(1.0, -1.0, 4.0),
            Vec3::new(0.0, 1.0, 4.0),
            Material::default(),
        ));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = scene.intersect_closest(&ray).unwrap();
        assert_eq!(hit.kind, ShapeKind::Triangle);
        assert!((hit.distance - 4.0).abs() < 1e-12);

        let up = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(scene.intersect_closest(&up).is_none());
    }

    #[test]
    fn test_closest_keeps_collection_index() {
        let mut scene = Scene::new(camera());
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 30.0), 1.0, Material::default()));
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, Material::default()));

        let hit = scene.intersect_closest(&Ray::new(Vec3::ZERO, Vec3::Z)).unwrap();
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn test_add_shape_routes_by_kind() {
        let mut scene = Scene::new(camera());
        scene.add_shape(Sphere::new(Vec3::ZERO, 1.0, Material::default()));
        scene.add_shape(Shape::Plane(Plane::new(Vec3::ZERO, Vec3::Y, Material::default())));
        scene.add_shape(Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2], Material::default()));

        assert_eq!(scene.spheres().len(), 1);
        assert_eq!(scene.planes().len(), 1);
        assert_eq!(scene.meshes().len(), 1);
        assert_eq!(scene.primitive_count(), 3);
    }

    #[test]
    fn test_any_before_respects_distance() {
        let mut scene = Scene::new(camera());
        scene.add_sphere(occluder(0.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(scene.intersect_any_before(&ray, 5.0));
        // Sphere surface starts at t = 1.5
        assert!(!scene.intersect_any_before(&ray, 1.0));
        assert!(!scene.intersect_any_before(&Ray::new(Vec3::ZERO, -Vec3::Y), 100.0));
    }

    #[test]
    fn test_transmittance_opaque_blocks() {
        let mut scene = Scene::new(camera());
        scene.add_sphere(occluder(0.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(scene.compute_transmittance(&ray, 5.0, 1e-4), 0.0);
    }

    #[test]
    fn test_transmittance_clear_passes() {
        let mut scene = Scene::new(camera());
        scene.add_sphere(occluder(1.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!((scene.compute_transmittance(&ray, 5.0, 1e-4) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transmittance_multiplies_each_surface() {
        let mut scene = Scene::new(camera());
        scene.add_sphere(occluder(0.5));

        // Enters and leaves the sphere: 0.5 * 0.5
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!((scene.compute_transmittance(&ray, 5.0, 1e-4) - 0.25).abs() < 1e-12);

        // Stops before the far side
        assert!((scene.compute_transmittance(&ray, 2.0, 1e-4) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_transmittance_clamps_transparency() {
        let mut scene = Scene::new(camera());
        scene.add_plane(Plane::new(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::Y,
            Material::default().with_transparency(3.0),
        ));

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(scene.compute_transmittance(&ray, 5.0, 1e-4), 1.0);
    }

    #[test]
    fn test_transmittance_stops_after_step_cap() {
        let mut scene = Scene::new(camera());
        for i in 1..=100 {
            scene.add_plane(Plane::new(
                Vec3::new(0.0, 0.0, i as f64),
                -Vec3::Z,
                Material::default().with_transparency(0.99),
            ));
        }

        // Only the first MAX_TRANSMITTANCE_STEPS sheets count
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let expected = 0.99_f64.powi(MAX_TRANSMITTANCE_STEPS as i32);
        assert!((scene.compute_transmittance(&ray, 200.0, 1e-4) - expected).abs() < 1e-12);
    }
}
