//! JSON scene descriptions.
//!
//! ```json
//! {
//!   "camera": { "position": [0, 0, -5], "look_at": [0, 0, 0],
//!               "width": 640, "height": 480, "focal": 500 },
//!   "render": { "max_recursion": 5, "shadow_mode": "transmittance" },
//!   "shapes": [
//!     { "type": "sphere", "center": [0, 0, 0], "radius": 1,
//!       "material": { "color": [1, 0, 0] } }
//!   ],
//!   "lights": [ { "position": [0, 5, -5], "intensity": 20 } ]
//! }
//! ```

use crate::{Camera, Color, Light, Material, Mesh, Plane, RenderConfig, Scene, Shape, Sphere, Triangle};
use prism_math::Vec3;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a scene file.
#[derive(Debug, Error)]
pub enum SceneFileError {
    #[error("failed to read scene file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scene JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scene: {0}")]
    Validation(String),
}

/// Top-level scene document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    pub camera: CameraDesc,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub shapes: Vec<ShapeDesc>,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDesc {
    pub position: Vec3,
    /// Point to aim at; wins over `forward`
    #[serde(default)]
    pub look_at: Option<Vec3>,
    #[serde(default)]
    pub forward: Option<Vec3>,
    pub width: u32,
    pub height: u32,
    pub focal: f64,
    #[serde(default = "default_near")]
    pub near: f64,
    #[serde(default = "default_far")]
    pub far: f64,
    #[serde(default = "default_samples")]
    pub anti_aliasing: u32,
}

fn default_near() -> f64 {
    1.0
}

fn default_far() -> f64 {
    1000.0
}

fn default_samples() -> u32 {
    1
}

/// One primitive, tagged by `"type"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ShapeDesc {
    Sphere {
        center: Vec3,
        radius: f64,
        #[serde(default)]
        material: Material,
    },
    Plane {
        point: Vec3,
        normal: Vec3,
        #[serde(default)]
        material: Material,
    },
    Triangle {
        vertices: [Vec3; 3],
        #[serde(default)]
        material: Material,
    },
    Mesh {
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        #[serde(default)]
        material: Material,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightDesc {
    pub position: Vec3,
    #[serde(default = "default_light_color")]
    pub color: Color,
    #[serde(default = "default_intensity")]
    pub intensity: f64,
}

fn default_light_color() -> Color {
    Color::ONE
}

fn default_intensity() -> f64 {
    1.0
}

impl CameraDesc {
    fn build(&self) -> Result<Camera, SceneFileError> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneFileError::Validation(format!(
                "camera resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.anti_aliasing == 0 {
            return Err(SceneFileError::Validation(
                "camera anti_aliasing must be at least 1".to_string(),
            ));
        }

        let mut camera = Camera::new(self.position, self.focal, self.width, self.height)
            .with_planes(self.near, self.far)
            .with_anti_aliasing(self.anti_aliasing);
        if let Some(target) = self.look_at {
            camera = camera.looking_at(target);
        } else if let Some(forward) = self.forward {
            camera = camera.with_forward(forward);
        }
        Ok(camera)
    }
}

impl ShapeDesc {
    fn build(&self, index: usize) -> Result<Shape, SceneFileError> {
        let shape = match self {
            ShapeDesc::Sphere { center, radius, material } => {
                if *radius < 0.0 {
                    return Err(SceneFileError::Validation(format!(
                        "shape {}: sphere radius {} is negative",
                        index, radius
                    )));
                }
                Shape::Sphere(Sphere::new(*center, *radius, *material))
            }
            ShapeDesc::Plane { point, normal, material } => {
                if normal.length_squared() == 0.0 {
                    return Err(SceneFileError::Validation(format!(
                        "shape {}: plane normal is zero",
                        index
                    )));
                }
                Shape::Plane(Plane::new(*point, *normal, *material))
            }
            ShapeDesc::Triangle { vertices, material } => {
                Shape::Triangle(Triangle::new(vertices[0], vertices[1], vertices[2], *material))
            }
            ShapeDesc::Mesh { positions, indices, material } => {
                if indices.len() % 3 != 0 {
                    return Err(SceneFileError::Validation(format!(
                        "shape {}: mesh has {} indices, not a multiple of 3",
                        index,
                        indices.len()
                    )));
                }
                if let Some(bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                    return Err(SceneFileError::Validation(format!(
                        "shape {}: mesh index {} out of bounds for {} vertices",
                        index,
                        bad,
                        positions.len()
                    )));
                }
                Shape::Mesh(Mesh::new(positions.clone(), indices.clone(), *material))
            }
        };
        Ok(shape)
    }
}

impl SceneFile {
    /// Parse a scene document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SceneFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the scene and its render settings.
    pub fn build(&self) -> Result<(Scene, RenderConfig), SceneFileError> {
        let mut scene = Scene::new(self.camera.build()?);

        for (index, desc) in self.shapes.iter().enumerate() {
            scene.add_shape(desc.build(index)?);
        }
        for light in &self.lights {
            scene.add_light(Light::new(light.position, light.color, light.intensity));
        }

        if self.render.bias <= 0.0 {
            return Err(SceneFileError::Validation(format!(
                "render bias must be positive, got {}",
                self.render.bias
            )));
        }

        Ok((scene, self.render.clone()))
    }
}

/// Parse and build a scene from a JSON string.
pub fn parse_scene(json: &str) -> Result<(Scene, RenderConfig), SceneFileError> {
    SceneFile::from_json(json)?.build()
}

/// Load a scene from a JSON file on disk.
pub fn load_scene(path: &Path) -> Result<(Scene, RenderConfig), SceneFileError> {
    let json = std::fs::read_to_string(path).map_err(|source| SceneFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (scene, config) = parse_scene(&json)?;
    log::debug!(
        "Loaded {} primitives and {} lights from {}",
        scene.primitive_count(),
        scene.lights().len(),
        path.display()
    );
    Ok((scene, config))
}
