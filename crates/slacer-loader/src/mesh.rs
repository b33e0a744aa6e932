//! # Mesh Module
//!
//! Triangle geometry decoded from STL data (ASCII or binary), the displayable
//! mesh object handed to the viewer and slicer, and the derived figures shown
//! in the mesh panel.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use slacer_core::LoadError;
use slacer_settings::Size3;
use std::io::Cursor;
use tracing::debug;
use uuid::Uuid;

/// Cubic millimeters per cubic centimeter
const MM3_PER_CM3: f64 = 1000.0;

/// A triangle of the mesh surface
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
    pub normal: Vector3<f32>,
}

impl Triangle {
    pub fn new(v1: Point3<f32>, v2: Point3<f32>, v3: Point3<f32>) -> Self {
        let normal = (v2 - v1)
            .cross(&(v3 - v1))
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        Self {
            vertices: [v1, v2, v3],
            normal,
        }
    }

    /// Signed volume of the tetrahedron spanned by the origin and this face
    fn signed_volume(&self) -> f64 {
        let [a, b, c] = self.vertices.map(|p| p.coords.cast::<f64>());
        a.dot(&b.cross(&c)) / 6.0
    }
}

/// Triangle geometry of a parsed mesh, in millimeters
#[derive(Debug, Clone)]
pub struct Geometry {
    triangles: Vec<Triangle>,
    bounds_min: Point3<f32>,
    bounds_max: Point3<f32>,
}

impl Geometry {
    /// Build geometry from triangles; empty input is rejected
    pub fn new(triangles: Vec<Triangle>) -> Result<Self, LoadError> {
        let Some(first) = triangles.first() else {
            return Err(LoadError::ParseFailed {
                reason: "mesh has no faces".to_string(),
            });
        };

        let mut min = first.vertices[0];
        let mut max = first.vertices[0];
        for vertex in triangles.iter().flat_map(|t| t.vertices.iter()) {
            min = min.inf(vertex);
            max = max.sup(vertex);
        }

        Ok(Self {
            triangles,
            bounds_min: min,
            bounds_max: max,
        })
    }

    /// Decode STL bytes, ASCII or binary
    pub fn from_stl_bytes(data: &[u8]) -> Result<Self, LoadError> {
        debug!("Parsing STL data ({} bytes)", data.len());

        let mut cursor = Cursor::new(data);
        let stl = stl_io::read_stl(&mut cursor).map_err(|e| LoadError::ParseFailed {
            reason: e.to_string(),
        })?;

        let vertex_count = stl.vertices.len();
        let mut triangles = Vec::with_capacity(stl.faces.len());
        for face in &stl.faces {
            let [i1, i2, i3] = face.vertices;
            if i1 >= vertex_count || i2 >= vertex_count || i3 >= vertex_count {
                return Err(LoadError::ParseFailed {
                    reason: format!("face references missing vertex (of {})", vertex_count),
                });
            }
            let point = |i: usize| {
                let v = stl.vertices[i];
                Point3::new(v[0], v[1], v[2])
            };
            triangles.push(Triangle::new(point(i1), point(i2), point(i3)));
        }

        let geometry = Self::new(triangles)?;
        debug!(
            "STL contains {} faces, bounds {:?} to {:?}",
            geometry.face_count(),
            geometry.bounds_min,
            geometry.bounds_max
        );
        Ok(geometry)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        (self.bounds_min, self.bounds_max)
    }

    /// Bounding box extents along x, y and z
    pub fn size(&self) -> Vector3<f32> {
        self.bounds_max - self.bounds_min
    }

    /// Enclosed volume in mm³
    ///
    /// Sum of signed tetrahedra against the origin. Exact for closed,
    /// consistently wound meshes; inverted winding is absorbed by `abs`.
    pub fn volume_mm3(&self) -> f64 {
        self.triangles
            .iter()
            .map(Triangle::signed_volume)
            .sum::<f64>()
            .abs()
    }

    /// Whether the bounding box fits inside a build volume
    pub fn fits_in(&self, volume: &Size3) -> bool {
        let size = self.size().cast::<f64>();
        size.x <= volume.x && size.y <= volume.y && size.z <= volume.z
    }
}

/// Figures shown in the mesh panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshInfo {
    /// Face count
    pub faces: usize,
    /// Volume in whole cm³, truncated
    pub volume_cm3: u64,
    /// Weight in grams; not derived yet and always 0
    pub weight_g: f64,
}

impl MeshInfo {
    pub fn from_geometry(geometry: &Geometry) -> Self {
        Self {
            faces: geometry.face_count(),
            volume_cm3: (geometry.volume_mm3() / MM3_PER_CM3).trunc() as u64,
            weight_g: 0.0,
        }
    }
}

/// Mesh object installed in the viewer and slicer
///
/// Shared behind `Arc` so both collaborators hold the same instance and
/// identity can be compared with `Arc::ptr_eq`.
#[derive(Debug, Clone)]
pub struct DisplayMesh {
    id: Uuid,
    geometry: Geometry,
    color: u32,
}

impl DisplayMesh {
    pub fn new(geometry: Geometry, color: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            color,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Draw color as 0xRRGGBB
    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn info(&self) -> MeshInfo {
        MeshInfo::from_geometry(&self.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(s: f32) -> Vec<Triangle> {
        let p = |x: f32, y: f32, z: f32| Point3::new(x, y, z);
        let faces = [
            [p(0., 0., 0.), p(0., s, 0.), p(s, s, 0.)],
            [p(0., 0., 0.), p(s, s, 0.), p(s, 0., 0.)],
            [p(0., 0., s), p(s, 0., s), p(s, s, s)],
            [p(0., 0., s), p(s, s, s), p(0., s, s)],
            [p(0., 0., 0.), p(s, 0., 0.), p(s, 0., s)],
            [p(0., 0., 0.), p(s, 0., s), p(0., 0., s)],
            [p(0., s, 0.), p(0., s, s), p(s, s, s)],
            [p(0., s, 0.), p(s, s, s), p(s, s, 0.)],
            [p(0., 0., 0.), p(0., 0., s), p(0., s, s)],
            [p(0., 0., 0.), p(0., s, s), p(0., s, 0.)],
            [p(s, 0., 0.), p(s, s, 0.), p(s, s, s)],
            [p(s, 0., 0.), p(s, s, s), p(s, 0., s)],
        ];
        faces
            .into_iter()
            .map(|[a, b, c]| Triangle::new(a, b, c))
            .collect()
    }

    #[test]
    fn test_triangle_normal() {
        let t = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(t.normal, Vector3::new(0.0, 0.0, 1.0));

        let degenerate = Triangle::new(Point3::origin(), Point3::origin(), Point3::origin());
        assert_eq!(degenerate.normal, Vector3::zeros());
    }

    #[test]
    fn test_cube_volume_and_info() {
        let geometry = Geometry::new(cube(20.0)).unwrap();
        assert!((geometry.volume_mm3() - 8000.0).abs() < 1e-6);

        let info = MeshInfo::from_geometry(&geometry);
        assert_eq!(info.faces, 12);
        assert_eq!(info.volume_cm3, 8);
        assert_eq!(info.weight_g, 0.0);
    }

    #[test]
    fn test_volume_is_truncated() {
        // 15³ = 3375 mm³
        let info = MeshInfo::from_geometry(&Geometry::new(cube(15.0)).unwrap());
        assert_eq!(info.volume_cm3, 3);
    }

    #[test]
    fn test_inverted_winding_volume() {
        let inverted: Vec<Triangle> = cube(10.0)
            .into_iter()
            .map(|t| Triangle::new(t.vertices[0], t.vertices[2], t.vertices[1]))
            .collect();
        let geometry = Geometry::new(inverted).unwrap();
        assert!((geometry.volume_mm3() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_and_fit() {
        let geometry = Geometry::new(cube(50.0)).unwrap();
        let (min, max) = geometry.bounds();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(50.0, 50.0, 50.0));
        assert_eq!(geometry.size(), Vector3::new(50.0, 50.0, 50.0));

        assert!(geometry.fits_in(&Size3 { x: 100.0, y: 100.0, z: 100.0 }));
        assert!(!geometry.fits_in(&Size3 { x: 100.0, y: 100.0, z: 40.0 }));
    }

    #[test]
    fn test_empty_geometry_rejected() {
        assert!(matches!(
            Geometry::new(Vec::new()),
            Err(LoadError::ParseFailed { .. })
        ));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(matches!(
            Geometry::from_stl_bytes(b"definitely not a mesh"),
            Err(LoadError::ParseFailed { .. })
        ));
        assert!(Geometry::from_stl_bytes(&[]).is_err());
    }

    #[test]
    fn test_display_mesh_identity() {
        let geometry = Geometry::new(cube(1.0)).unwrap();
        let a = DisplayMesh::new(geometry.clone(), 0x333333);
        let b = DisplayMesh::new(geometry, 0x333333);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.color(), 0x333333);
    }
}
