//! Reconciliation of independently derived vertex and face masks.

use crate::errors::MeshResult;
use crate::faces::Faces;
use crate::validation::{check_indices, check_mask_length};

/// Reconcile a face mask with a vertex mask so that every kept face
/// references only kept vertices.
///
/// 1. A face stays only if it was already kept and all of its vertices are
///    kept.
/// 2. With `prune_orphan_vertices`, a vertex is dropped when it belongs to a
///    face removed in step 1 (or before it) and to no kept face. Otherwise the
///    vertex mask passes through unchanged.
///
/// Returns `(face_mask, vertex_mask)`. The number of vertices is the length
/// of `vertex_mask`.
///
/// ```
/// use meshcore::{Faces, reconcile_selection};
///
/// let faces = Faces::triangles(&[[0, 1, 2], [1, 3, 2]]);
/// let (face_mask, vertex_mask) =
///     reconcile_selection(&faces, &[true, true], &[true, true, true, false], true)?;
/// assert_eq!(face_mask, vec![true, false]);
/// assert_eq!(vertex_mask, vec![true, true, true, false]);
/// # Ok::<(), meshcore::MeshError>(())
/// ```
pub fn reconcile_selection(
    faces: &Faces,
    face_mask: &[bool],
    vertex_mask: &[bool],
    prune_orphan_vertices: bool,
) -> MeshResult<(Vec<bool>, Vec<bool>)> {
    check_mask_length(face_mask, faces.len(), "face")?;
    check_indices(faces.as_flat(), vertex_mask.len(), "faces")?;

    // Invalidate faces containing any vertex which is being removed.
    let reconciled_face_mask: Vec<bool> = faces
        .iter()
        .zip(face_mask)
        .map(|(face, &keep)| keep && face.iter().all(|&v| vertex_mask[v]))
        .collect();

    if !prune_orphan_vertices {
        return Ok((reconciled_face_mask, vertex_mask.to_vec()));
    }

    // Orphans are referenced by removed faces and by no kept face.
    let mut in_kept_face = vec![false; vertex_mask.len()];
    let mut in_removed_face = vec![false; vertex_mask.len()];
    for (face, &keep) in faces.iter().zip(&reconciled_face_mask) {
        let touched = if keep {
            &mut in_kept_face
        } else {
            &mut in_removed_face
        };
        for &v in face {
            touched[v] = true;
        }
    }
    let reconciled_vertex_mask = vertex_mask
        .iter()
        .zip(in_kept_face.iter().zip(&in_removed_face))
        .map(|(&keep, (&kept, &removed))| keep && (kept || !removed))
        .collect();

    Ok((reconciled_face_mask, reconciled_vertex_mask))
}
