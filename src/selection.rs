//! Chained submesh selection.
//!
//! [`Mesh::select`] starts a [`Selection`]. Each predicate narrows the current
//! vertex or face mask (logical AND). [`Selection::union`] closes the current
//! set of criteria and opens a fresh one, so the chain reads as
//! `(criteria...) OR (criteria...)`. [`Selection::end`] reconciles everything
//! into a new mesh.

use crate::errors::{MeshError, MeshResult};
use crate::faces::Faces;
use crate::float_types::Real;
use crate::mask::{Pick, and_assign, compaction_map, or_assign};
use crate::mesh::Mesh;
use crate::plane::{Plane, Side};
use crate::reconcile::reconcile_selection;
use nalgebra::Point3;
use std::sync::Arc;
use tracing::debug;

/// The masks accumulated by one branch of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Criteria {
    vertex_mask: Vec<bool>,
    face_mask: Vec<bool>,
}

impl Criteria {
    fn everything(target: &Mesh) -> Self {
        Criteria {
            vertex_mask: vec![true; target.num_v()],
            face_mask: vec![true; target.num_f()],
        }
    }
}

/// A selection in progress. Consumed by [`Selection::end`].
///
/// ```
/// use meshcore::shapes;
/// use nalgebra::Point3;
///
/// let cube = shapes::cube(Point3::origin(), 3.0);
/// let centroid = Point3::new(1.5, 1.5, 1.5);
/// let upper_half_plus_right_half = cube
///     .select()
///     .vertices_above(&centroid, 1)?
///     .union()
///     .vertices_above(&centroid, 0)?
///     .end(true)?;
/// assert_eq!(upper_half_plus_right_half.num_v(), 6);
/// # Ok::<(), meshcore::MeshError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Selection<'a> {
    target: &'a Mesh,
    union_with: Vec<Criteria>,
    current: Criteria,
}

fn check_axis(dim: usize) -> MeshResult<usize> {
    if dim < 3 { Ok(dim) } else { Err(MeshError::InvalidAxis(dim)) }
}

impl<'a> Selection<'a> {
    pub fn new(target: &'a Mesh) -> Self {
        Selection {
            target,
            union_with: Vec::new(),
            current: Criteria::everything(target),
        }
    }

    fn keep_vertices(mut self, mask: &[bool]) -> Self {
        and_assign(&mut self.current.vertex_mask, mask);
        self
    }

    fn keep_faces(mut self, mask: &[bool]) -> Self {
        and_assign(&mut self.current.face_mask, mask);
        self
    }

    fn keep_vertices_where(self, predicate: impl Fn(&Point3<Real>) -> bool) -> Self {
        let mask: Vec<bool> = self.target.vertices().iter().map(predicate).collect();
        self.keep_vertices(&mask)
    }

    /// Keep vertices whose coordinate along `dim` is `>= point[dim]`.
    pub fn vertices_at_or_above(self, point: &Point3<Real>, dim: usize) -> MeshResult<Self> {
        let dim = check_axis(dim)?;
        Ok(self.keep_vertices_where(|v| v[dim] >= point[dim]))
    }

    /// Keep vertices whose coordinate along `dim` is `> point[dim]`.
    pub fn vertices_above(self, point: &Point3<Real>, dim: usize) -> MeshResult<Self> {
        let dim = check_axis(dim)?;
        Ok(self.keep_vertices_where(|v| v[dim] > point[dim]))
    }

    /// Keep vertices whose coordinate along `dim` is `<= point[dim]`.
    pub fn vertices_at_or_below(self, point: &Point3<Real>, dim: usize) -> MeshResult<Self> {
        let dim = check_axis(dim)?;
        Ok(self.keep_vertices_where(|v| v[dim] <= point[dim]))
    }

    /// Keep vertices whose coordinate along `dim` is `< point[dim]`.
    pub fn vertices_below(self, point: &Point3<Real>, dim: usize) -> MeshResult<Self> {
        let dim = check_axis(dim)?;
        Ok(self.keep_vertices_where(|v| v[dim] < point[dim]))
    }

    pub fn vertices_on_or_in_front_of_plane(self, plane: &Plane) -> Self {
        self.keep_vertices_where(|v| plane.side(v) != Side::Behind)
    }

    pub fn vertices_in_front_of_plane(self, plane: &Plane) -> Self {
        self.keep_vertices_where(|v| plane.side(v) == Side::InFront)
    }

    pub fn vertices_on_or_behind_plane(self, plane: &Plane) -> Self {
        self.keep_vertices_where(|v| plane.side(v) != Side::InFront)
    }

    pub fn vertices_behind_plane(self, plane: &Plane) -> Self {
        self.keep_vertices_where(|v| plane.side(v) == Side::Behind)
    }

    /// Keep only the given vertices (indices or a full-length mask).
    pub fn pick_vertices<'p>(self, pick: impl Into<Pick<'p>>) -> MeshResult<Self> {
        let mask = pick.into().to_mask(self.target.num_v(), "vertices")?;
        Ok(self.keep_vertices(&mask))
    }

    /// Keep only the given faces (indices or a full-length mask).
    pub fn pick_faces<'p>(self, pick: impl Into<Pick<'p>>) -> MeshResult<Self> {
        let mask = pick.into().to_mask(self.target.num_f(), "faces")?;
        Ok(self.keep_faces(&mask))
    }

    /// Keep only faces belonging to any of the named face groups.
    pub fn pick_face_groups<S: AsRef<str>>(self, names: &[S]) -> MeshResult<Self> {
        let mask = self.target.require_face_groups()?.union(names)?;
        Ok(self.keep_faces(&mask))
    }

    /// Keep only vertices used by faces of any of the named face groups.
    pub fn pick_vertices_of_face_groups<S: AsRef<str>>(self, names: &[S]) -> MeshResult<Self> {
        let face_mask = self.target.require_face_groups()?.union(names)?;
        let mut vertex_mask = vec![false; self.target.num_v()];
        for (face, _) in self.target.faces().iter().zip(&face_mask).filter(|(_, keep)| **keep) {
            for &v in face {
                vertex_mask[v] = true;
            }
        }
        Ok(self.keep_vertices(&vertex_mask))
    }

    /// Close the current criteria and start a new, unrestricted branch. The
    /// result of [`Selection::end`] is the union of all branches.
    pub fn union(mut self) -> Self {
        let next = Criteria::everything(self.target);
        self.union_with.push(std::mem::replace(&mut self.current, next));
        self
    }

    /// Build the submesh.
    pub fn end(self, prune_orphan_vertices: bool) -> MeshResult<Mesh> {
        self.end_with_provenance(prune_orphan_vertices)
            .map(|(mesh, _, _)| mesh)
    }

    /// Build the submesh and also return, for every original face and vertex,
    /// its index in the submesh (`None` if it was dropped).
    pub fn end_with_provenance(
        self,
        prune_orphan_vertices: bool,
    ) -> MeshResult<(Mesh, Vec<Option<usize>>, Vec<Option<usize>>)> {
        let target = self.target;
        let branches: Vec<Criteria> = self
            .union_with
            .into_iter()
            .chain(std::iter::once(self.current))
            .collect();
        let (face_mask, vertex_mask) =
            resolve_branches(target.faces(), &branches, prune_orphan_vertices)?;

        let vertex_map = compaction_map(&vertex_mask);
        let face_map = compaction_map(&face_mask);
        let num_v = vertex_mask.iter().filter(|&&keep| keep).count();
        let num_f = face_mask.iter().filter(|&&keep| keep).count();

        let vertices: Arc<[Point3<Real>]> = if num_v == target.num_v() {
            Arc::clone(target.shared_vertices())
        } else {
            target
                .vertices()
                .iter()
                .zip(&vertex_mask)
                .filter_map(|(v, &keep)| keep.then_some(*v))
                .collect()
        };
        let faces = if num_f == target.num_f() && num_v == target.num_v() {
            target.faces().clone()
        } else {
            target.faces().compacted(&face_mask, &vertex_map)
        };
        let face_groups = match target.shared_face_groups() {
            Some(groups) if num_f == target.num_f() => Some(Arc::clone(groups)),
            Some(groups) => Some(Arc::new(groups.aggregated(&face_map, num_f)?)),
            None => None,
        };

        debug!(
            branches = branches.len(),
            prune_orphan_vertices,
            kept_vertices = num_v,
            kept_faces = num_f,
            "selected submesh of {:?}",
            target
        );
        let submesh = Mesh::from_parts_unchecked(vertices, faces, face_groups);
        Ok((submesh, face_map, vertex_map))
    }
}

/// Combine the branches of a selection into one consistent pair of masks.
///
/// Each branch is reconciled on its own and the resulting vertex masks are
/// OR-ed; the raw face masks are OR-ed separately; the two unions are then
/// reconciled once more. A face selected in one branch can so be completed by
/// vertices validated in another, while face picks in one branch never pull
/// in the vertices of faces that only another branch's vertex criteria saw.
fn resolve_branches(
    faces: &Faces,
    branches: &[Criteria],
    prune_orphan_vertices: bool,
) -> MeshResult<(Vec<bool>, Vec<bool>)> {
    let Some((first, rest)) = branches.split_first() else {
        return Ok((Vec::new(), Vec::new()));
    };

    let mut vertex_union = vec![false; first.vertex_mask.len()];
    let mut face_union = vec![false; first.face_mask.len()];
    for branch in std::iter::once(first).chain(rest) {
        let (_, reconciled_vertices) = reconcile_selection(
            faces,
            &branch.face_mask,
            &branch.vertex_mask,
            prune_orphan_vertices,
        )?;
        or_assign(&mut vertex_union, &reconciled_vertices);
        or_assign(&mut face_union, &branch.face_mask);
    }

    reconcile_selection(faces, &face_union, &vertex_union, prune_orphan_vertices)
}

impl Mesh {
    /// Begin a chained selection. Apply criteria, then call
    /// [`Selection::end`] to create a submesh.
    pub fn select(&self) -> Selection<'_> {
        Selection::new(self)
    }

    pub fn keeping_vertices_at_or_above(&self, dim: usize, point: &Point3<Real>) -> MeshResult<Mesh> {
        self.select().vertices_at_or_above(point, dim)?.end(true)
    }

    pub fn keeping_vertices_above(&self, dim: usize, point: &Point3<Real>) -> MeshResult<Mesh> {
        self.select().vertices_above(point, dim)?.end(true)
    }

    pub fn keeping_vertices_at_or_below(&self, dim: usize, point: &Point3<Real>) -> MeshResult<Mesh> {
        self.select().vertices_at_or_below(point, dim)?.end(true)
    }

    pub fn keeping_vertices_below(&self, dim: usize, point: &Point3<Real>) -> MeshResult<Mesh> {
        self.select().vertices_below(point, dim)?.end(true)
    }

    pub fn keeping_vertices_on_or_in_front_of_plane(&self, plane: &Plane) -> MeshResult<Mesh> {
        self.select().vertices_on_or_in_front_of_plane(plane).end(true)
    }

    pub fn keeping_vertices_in_front_of_plane(&self, plane: &Plane) -> MeshResult<Mesh> {
        self.select().vertices_in_front_of_plane(plane).end(true)
    }

    pub fn keeping_vertices_on_or_behind_plane(&self, plane: &Plane) -> MeshResult<Mesh> {
        self.select().vertices_on_or_behind_plane(plane).end(true)
    }

    pub fn keeping_vertices_behind_plane(&self, plane: &Plane) -> MeshResult<Mesh> {
        self.select().vertices_behind_plane(plane).end(true)
    }

    pub fn picking_vertices<'p>(&self, pick: impl Into<Pick<'p>>) -> MeshResult<Mesh> {
        self.select().pick_vertices(pick)?.end(true)
    }

    pub fn picking_faces<'p>(&self, pick: impl Into<Pick<'p>>) -> MeshResult<Mesh> {
        self.select().pick_faces(pick)?.end(true)
    }
}
