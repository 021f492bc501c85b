//! Test support library
//! Provides fixtures & helpers shared by the integration tests.
#![allow(dead_code)]

use meshcore::{GroupMap, Mesh, float_types::Real, shapes};
use nalgebra::Point3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A 3 × 3 × 3 cube with a corner at the origin.
///
/// Vertices: `[0,0,0] [3,0,0] [3,0,3] [0,0,3] [0,3,0] [3,3,0] [3,3,3] [0,3,3]`,
/// faces two per side in the order bottom, top, back, right, front, left.
pub fn cube() -> Mesh {
    shapes::cube(Point3::origin(), 3.0)
}

/// Groups over the twelve faces of [`cube`], including overlapping and empty
/// groups.
pub fn create_group_map() -> GroupMap {
    GroupMap::from_mapping(
        [
            ("bottom", vec![0, 1]),
            ("top", vec![2, 3]),
            ("back_side", vec![4, 5]),
            ("right_side", vec![6, 7]),
            ("front_side", vec![8, 9]),
            ("left_side", vec![10, 11]),
            ("sides", (4..12).collect()),
            ("top_and_bottom", vec![0, 1, 2, 3]),
            ("empty", vec![]),
        ],
        12,
    )
    .unwrap()
}

/// [`cube`] with [`create_group_map`] attached.
pub fn cube_with_groups() -> Mesh {
    cube().with_face_groups(Some(create_group_map())).unwrap()
}

/// The groups of [`cube`] that partition its faces.
pub fn non_overlapping_group_names() -> [&'static str; 6] {
    ["bottom", "top", "back_side", "right_side", "front_side", "left_side"]
}

/// Check that `submesh` is the part of [`cube`] given by the original
/// vertex and face indices.
pub fn assert_subcube(submesh: &Mesh, vertex_indices: &[usize], face_indices: &[usize]) {
    let cube = cube();
    let expected_vertices: Vec<_> = vertex_indices.iter().map(|&i| cube.vertices()[i]).collect();
    assert_eq!(submesh.vertices(), expected_vertices.as_slice());
    assert_eq!(submesh.num_f(), face_indices.len());
    for (new, &old) in face_indices.iter().enumerate() {
        let expected: Vec<_> = cube.face_vertices(old).collect();
        let actual: Vec<_> = submesh.face_vertices(new).collect();
        assert_eq!(actual, expected, "face {new} should be original face {old}");
    }
}
