//! Explicit vertex and face reordering.

use crate::errors::MeshResult;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::validation::check_permutation;
use nalgebra::Point3;
use std::sync::Arc;

/// Reorder the vertices of `mesh`. `new_order[i]` is the original index of
/// the vertex placed at position `i`; it must be a permutation of
/// `0..num_v`. Faces are rewritten to point at the moved vertices and face
/// groups are shared unchanged.
///
/// ```
/// use meshcore::{Mesh, reindex_vertices};
///
/// let mesh = Mesh::from_slices(
///     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     &[[0, 1, 2]],
/// )?;
/// let reordered = reindex_vertices(&mesh, &[2, 0, 1])?;
/// assert_eq!(reordered.vertices()[0], mesh.vertices()[2]);
/// assert_eq!(reordered.faces().get(0), &[1, 2, 0]);
/// # Ok::<(), meshcore::MeshError>(())
/// ```
pub fn reindex_vertices(mesh: &Mesh, new_order: &[usize]) -> MeshResult<Mesh> {
    let old_to_new = check_permutation(new_order, mesh.num_v(), "vertex")?;
    let vertices: Arc<[Point3<Real>]> = new_order.iter().map(|&old| mesh.vertices()[old]).collect();
    let faces = mesh.faces().remapped(&old_to_new);
    Ok(Mesh::from_parts_unchecked(
        vertices,
        faces,
        mesh.shared_face_groups().cloned(),
    ))
}

/// Reorder the faces of `mesh`. `new_order[i]` is the original index of the
/// face placed at position `i`; it must be a permutation of `0..num_f`.
/// Vertex storage is shared and face groups follow their faces.
pub fn reindex_faces(mesh: &Mesh, new_order: &[usize]) -> MeshResult<Mesh> {
    check_permutation(new_order, mesh.num_f(), "face")?;
    let faces = mesh.faces().reordered(new_order);
    let face_groups = mesh
        .face_groups()
        .map(|groups| groups.reindexed(new_order).map(Arc::new))
        .transpose()?;
    Ok(Mesh::from_parts_unchecked(
        Arc::clone(mesh.shared_vertices()),
        faces,
        face_groups,
    ))
}
