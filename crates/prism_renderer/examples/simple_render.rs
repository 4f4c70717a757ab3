//! Simple ray tracer example.
//!
//! Renders glass, diffuse and mirror spheres on a floor and saves to PPM format.

use prism_renderer::{
    render, tonemap::to_rgb8, write_image, Camera, Color, Light, Material, Plane, RenderConfig, Scene, Sphere,
    ToneMap, Vec3,
};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Prism Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig::default().with_max_recursion(6).with_ambient(0.05);

    println!(
        "Rendering {}x{} @ {} spp...",
        scene.camera().width,
        scene.camera().height,
        scene.camera().anti_aliasing_amount
    );

    let start = std::time::Instant::now();
    let image = render(&scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    let rgb = to_rgb8(&image, ToneMap::Reinhard, 2.2);
    write_image(Path::new(filename), rgb, image.width, image.height)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Scene {
    let camera = Camera::new(Vec3::new(0.0, 2.0, -12.0), 500.0, 800, 450)
        .looking_at(Vec3::new(0.0, 1.0, 0.0))
        .with_anti_aliasing(4);
    let mut scene = Scene::new(camera);

    // Ground
    scene.add_plane(Plane::new(Vec3::ZERO, Vec3::Y, Material::diffuse(Color::splat(0.5))));

    // Three main spheres
    scene.add_sphere(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Material::dielectric(Color::ONE, 0.95, 1.5),
    ));
    scene.add_sphere(Sphere::new(
        Vec3::new(-2.5, 1.0, 1.0),
        1.0,
        Material::diffuse(Color::new(0.4, 0.2, 0.1)),
    ));
    scene.add_sphere(Sphere::new(
        Vec3::new(2.5, 1.0, 1.0),
        1.0,
        Material::glossy(Color::new(0.7, 0.6, 0.5), 0.8, 128.0),
    ));

    scene.add_light(Light::new(Vec3::new(-4.0, 8.0, -6.0), Color::ONE, 120.0));
    scene.add_light(Light::new(Vec3::new(6.0, 5.0, -2.0), Color::new(1.0, 0.9, 0.8), 40.0));

    println!("Created {} objects", scene.primitive_count());
    scene
}
