//! Ready-made triangle meshes.

use crate::errors::MeshResult;
use crate::faces::Faces;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::plane::Plane;
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

/// An axis-aligned box with one corner at `origin`, extending by `size`
/// (width along x, height along y, depth along z).
///
/// ```text
/// Vertex layout (y is up):
///     7-------6
///    /|      /|
///   4-------5 |
///   | 3-----|-2
///   |/      |/
///   0-------1
/// ```
///
/// Faces, two triangles each, wound counter-clockwise seen from outside:
/// - **Bottom** (y = 0): `[0,1,2] [0,2,3]`
/// - **Top** (y = height): `[7,6,5] [7,5,4]`
/// - **Back** (z = 0): `[4,5,1] [4,1,0]`
/// - **Right** (x = width): `[5,6,2] [5,2,1]`
/// - **Front** (z = depth): `[6,7,3] [6,3,2]`
/// - **Left** (x = 0): `[3,7,4] [3,4,0]`
pub fn rectangular_prism(origin: Point3<Real>, size: Vector3<Real>) -> Mesh {
    let (w, h, d) = (size.x, size.y, size.z);
    let lower = [
        origin,
        origin + Vector3::new(w, 0.0, 0.0),
        origin + Vector3::new(w, 0.0, d),
        origin + Vector3::new(0.0, 0.0, d),
    ];
    let up = Vector3::new(0.0, h, 0.0);
    let vertices: Arc<[Point3<Real>]> = lower.iter().copied().chain(lower.iter().map(|p| p + up)).collect();

    let faces = Faces::triangles(&[
        [0, 1, 2],
        [0, 2, 3],
        [7, 6, 5],
        [7, 5, 4],
        [4, 5, 1],
        [4, 1, 0],
        [5, 6, 2],
        [5, 2, 1],
        [6, 7, 3],
        [6, 3, 2],
        [3, 7, 4],
        [3, 4, 0],
    ]);
    Mesh::from_parts_unchecked(vertices, faces, None)
}

/// [`rectangular_prism`] with all three sides equal to `size`.
pub fn cube(origin: Point3<Real>, size: Real) -> Mesh {
    rectangular_prism(origin, Vector3::repeat(size))
}

/// A prism whose base is the triangle `p1 p2 p3`, extruded by `height`
/// away from the base normal (right-hand rule), so the base faces outward.
///
/// # Errors
/// [`crate::MeshError::DegeneratePlane`] if the base points are collinear.
pub fn triangular_prism(
    p1: Point3<Real>,
    p2: Point3<Real>,
    p3: Point3<Real>,
    height: Real,
) -> MeshResult<Mesh> {
    let base = Plane::from_points(p1, p2, p3)?;
    let extrusion = base.normal() * -height;
    let vertices: Arc<[Point3<Real>]> = [p1, p2, p3, p1 + extrusion, p2 + extrusion, p3 + extrusion]
        .into_iter()
        .collect();
    let faces = Faces::triangles(&[
        [0, 1, 2],
        [0, 3, 4],
        [0, 4, 1],
        [1, 4, 5],
        [1, 5, 2],
        [2, 5, 3],
        [2, 3, 0],
        [5, 4, 3],
    ]);
    Ok(Mesh::from_parts_unchecked(vertices, faces, None))
}

/// A 2 × 2 square in the xz plane, centered on the origin, facing +y.
pub fn rectangle() -> Mesh {
    let vertices: Arc<[Point3<Real>]> = [
        Point3::new(1.0, 0.0, -1.0),
        Point3::new(-1.0, 0.0, -1.0),
        Point3::new(-1.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
    ]
    .into_iter()
    .collect();
    Mesh::from_parts_unchecked(vertices, Faces::triangles(&[[0, 1, 2], [3, 0, 2]]), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Outward normal of face `index`, by the right-hand rule.
    fn face_normal(mesh: &Mesh, index: usize) -> Vector3<Real> {
        let p: Vec<_> = mesh.face_vertices(index).collect();
        (p[1] - p[0]).cross(&(p[2] - p[0])).normalize()
    }

    #[test]
    fn cube_faces_point_outward() {
        let cube = cube(Point3::new(-1.0, -1.0, -1.0), 2.0);
        let expected = [
            -Vector3::y(),
            Vector3::y(),
            -Vector3::z(),
            Vector3::x(),
            Vector3::z(),
            -Vector3::x(),
        ];
        for (side, normal) in expected.iter().enumerate() {
            for face in [2 * side, 2 * side + 1] {
                assert!((face_normal(&cube, face) - normal).norm() < 1e-9, "face {face}");
            }
        }
    }

    #[test]
    fn prism_sizes() {
        let prism = rectangular_prism(Point3::origin(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(prism.num_v(), 8);
        assert_eq!(prism.num_f(), 12);
        assert_eq!(prism.vertices()[6], Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn triangular_prism_extrudes_away_from_base_normal() {
        let prism = triangular_prism(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            2.0,
        )
        .unwrap();
        assert_eq!(prism.vertices()[3], Point3::new(0.0, 0.0, -2.0));
        assert_eq!(face_normal(&prism, 0), Vector3::z());
        assert_eq!(face_normal(&prism, 7), -Vector3::z());
        assert!(triangular_prism(Point3::origin(), Point3::origin(), Point3::origin(), 1.0).is_err());
    }

    #[test]
    fn rectangle_faces_up() {
        let rectangle = rectangle();
        assert_eq!(face_normal(&rectangle, 0), Vector3::y());
        assert_eq!(face_normal(&rectangle, 1), Vector3::y());
    }
}
