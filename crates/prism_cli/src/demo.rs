//! Built-in demo scene: a closed room with colored walls.

use prism_math::Vec3;
use prism_renderer::{Camera, Color, Light, Material, Mesh, Plane, RenderConfig, Scene, Sphere};

/// Room walls sit this far from the origin on X and Y.
const ROOM_HALF_SIZE: f64 = 50.0;

pub fn demo_scene() -> Scene {
    let camera = Camera::new(Vec3::new(0.0, 0.0, -50.0), 300.0, 800, 800)
        .with_planes(0.0, 150.0)
        .with_anti_aliasing(4);
    let mut scene = Scene::new(camera);

    // Walls: ceiling, floor, left, right, back
    let white = Material::diffuse(Color::ONE);
    let s = ROOM_HALF_SIZE;
    scene.add_plane(Plane::new(Vec3::new(0.0, s, 0.0), Vec3::Y, white));
    scene.add_plane(Plane::new(Vec3::new(0.0, -s, 0.0), -Vec3::Y, white));
    scene.add_plane(Plane::new(Vec3::new(-s, 0.0, 0.0), -Vec3::X, Material::diffuse(Color::new(1.0, 0.0, 0.0))));
    scene.add_plane(Plane::new(Vec3::new(s, 0.0, 0.0), Vec3::X, Material::diffuse(Color::new(0.0, 0.0, 1.0))));
    scene.add_plane(Plane::new(Vec3::new(0.0, 0.0, 30.0), -Vec3::Z, Material::diffuse(Color::new(0.0, 1.0, 1.0))));

    scene.add_sphere(Sphere::new(Vec3::new(25.0, 0.0, 18.0), 10.0, Material::diffuse(Color::new(1.0, 0.0, 0.0))));
    scene.add_sphere(Sphere::new(Vec3::new(-45.0, 0.0, 20.0), 15.0, Material::diffuse(Color::new(0.0, 1.0, 0.0))));
    scene.add_sphere(Sphere::new(
        Vec3::new(12.0, 0.0, 15.0),
        5.0,
        Material::glossy(Color::new(0.0, 0.0, 1.0), 0.3, 64.0),
    ));

    // Glass ball in front, mirror ball on the floor
    scene.add_sphere(Sphere::new(
        Vec3::new(-8.0, -12.0, -5.0),
        8.0,
        Material::dielectric(Color::ONE, 0.9, 1.5),
    ));
    scene.add_sphere(Sphere::new(
        Vec3::new(-22.0, -38.0, 12.0),
        12.0,
        Material::glossy(Color::splat(0.05), 0.9, 256.0),
    ));

    scene.add_mesh(tetrahedron(Vec3::new(28.0, -s, 0.0), 10.0, Material::diffuse(Color::new(1.0, 0.8, 0.2))));

    scene.add_light(Light::new(Vec3::new(0.0, 0.0, -20.0), Color::new(1.0, 1.0, 0.85), 1500.0));

    scene
}

pub fn demo_config() -> RenderConfig {
    RenderConfig::default().with_ambient(0.03)
}

/// A tetrahedron standing on its base at `base_center`.
fn tetrahedron(base_center: Vec3, size: f64, material: Material) -> Mesh {
    let h = size * 0.5;
    let positions = vec![
        base_center + Vec3::new(-h, 0.0, -h),
        base_center + Vec3::new(h, 0.0, -h),
        base_center + Vec3::new(0.0, 0.0, h),
        base_center + Vec3::new(0.0, size * 1.5, 0.0),
    ];
    let indices = vec![0, 2, 1, 0, 1, 3, 1, 2, 3, 2, 0, 3];
    Mesh::new(positions, indices, material)
}
