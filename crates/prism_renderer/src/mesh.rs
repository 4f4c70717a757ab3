//! Indexed triangle mesh sharing a single material.

use crate::{
    hittable::{HitInfo, Hittable, ShapeKind},
    triangle::{face_normal, moller_trumbore},
    Material,
};
use prism_math::{Ray, Vec3};

/// A mesh consisting of vertex positions and triangle indices.
///
/// Every 3 indices form a triangle. Faces referencing missing vertices and
/// a trailing partial face are dropped when the mesh is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    pub material: Material,
}

impl Mesh {
    /// Create a new mesh from positions and indices.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, material: Material) -> Self {
        let vertex_count = positions.len();
        let mut valid = Vec::with_capacity(indices.len() - indices.len() % 3);

        for chunk in indices.chunks(3) {
            if chunk.len() < 3 {
                log::warn!("Ignoring {} trailing mesh indices", chunk.len());
                continue;
            }

            // Bounds check
            if chunk.iter().any(|&i| i as usize >= vertex_count) {
                log::warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    chunk[0],
                    chunk[1],
                    chunk[2],
                    vertex_count
                );
                continue;
            }

            valid.extend_from_slice(chunk);
        }

        Self {
            positions,
            indices: valid,
            material,
        }
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Vertices of face `face`.
    pub fn face(&self, face: usize) -> [Vec3; 3] {
        let i = &self.indices[face * 3..face * 3 + 3];
        [
            self.positions[i[0] as usize],
            self.positions[i[1] as usize],
            self.positions[i[2] as usize],
        ]
    }

    /// Closest face hit along `ray`: (face index, distance).
    fn closest_face(&self, ray: &Ray) -> Option<(usize, f64)> {
        let mut closest: Option<(usize, f64)> = None;
        for face in 0..self.triangle_count() {
            let [v0, v1, v2] = self.face(face);
            if let Some(t) = moller_trumbore(ray, v0, v1, v2) {
                if closest.map_or(true, |(_, best)| t < best) {
                    closest = Some((face, t));
                }
            }
        }
        closest
    }
}

impl Hittable for Mesh {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.closest_face(ray).map(|(_, t)| t)
    }

    fn hit_info_at(&self, ray: &Ray, index: usize) -> Option<HitInfo> {
        let (face, t) = self.closest_face(ray)?;
        let [v0, v1, v2] = self.face(face);
        HitInfo::new(ray, t, ShapeKind::Mesh, index, self.material, face_normal(v0, v1, v2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two unit quads facing -Z, at z = 1 and z = 3.
    fn stacked_quads() -> Mesh {
        let positions = vec![
            Vec3::new(-1.0, -1.0, 3.0),
            Vec3::new(1.0, -1.0, 3.0),
            Vec3::new(1.0, 1.0, 3.0),
            Vec3::new(-1.0, 1.0, 3.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        let indices = vec![0, 2, 1, 0, 3, 2, 4, 6, 5, 4, 7, 6];
        Mesh::new(positions, indices, Material::diffuse(Vec3::new(0.2, 0.4, 0.6)))
    }

    #[test]
    fn test_mesh_counts() {
        let mesh = stacked_quads();
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.vertex_count(), 8);
    }

    #[test]
    fn test_mesh_returns_closest_face() {
        let mesh = stacked_quads();
        let ray = Ray::new(Vec3::new(0.25, 0.1, -2.0), Vec3::Z);
        let hit = mesh.hit_info_at(&ray, 7).unwrap();

        assert!((hit.distance - 3.0).abs() < 1e-12);
        assert_eq!(hit.kind, ShapeKind::Mesh);
        assert_eq!(hit.index, 7);
        assert_eq!(hit.material, mesh.material);
        // Clockwise seen from -Z, so the face normal points at the camera
        assert!((hit.normal + Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_mesh_miss() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, -2.0), Vec3::Z);
        assert!(stacked_quads().intersect(&ray).is_none());
    }

    #[test]
    fn test_invalid_faces_dropped() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let mesh = Mesh::new(positions, vec![0, 1, 2, 0, 1, 9, 2, 1], Material::default());
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.face(0), [Vec3::ZERO, Vec3::X, Vec3::Y]);
    }
}
