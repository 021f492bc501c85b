//! `Mesh` struct: immutable vertices, faces and optional face groups.

use crate::errors::{MeshError, MeshResult};
use crate::faces::Faces;
use crate::float_types::Real;
use crate::group_map::GroupMap;
use crate::validation::check_indices;
use nalgebra::Point3;
use std::fmt;
use std::sync::Arc;

/// A polygonal mesh.
///
/// Construction validates that every face index refers to an existing vertex
/// and that the face groups (if any) cover exactly the faces. A `Mesh` is never
/// mutated afterwards; every derivation (selection, reindexing, transforms)
/// builds a new one. Vertex, face and group storage is reference counted so
/// derived meshes share whatever they did not change.
#[derive(Clone, PartialEq)]
pub struct Mesh {
    vertices: Arc<[Point3<Real>]>,
    faces: Faces,
    face_groups: Option<Arc<GroupMap>>,
}

impl Mesh {
    /// Build and validate a mesh.
    ///
    /// ```
    /// use meshcore::{Faces, Mesh};
    /// use nalgebra::Point3;
    ///
    /// let mesh = Mesh::new(
    ///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
    ///     Faces::triangles(&[[0, 1, 2]]),
    ///     None,
    /// )?;
    /// assert_eq!((mesh.num_v(), mesh.num_f()), (3, 1));
    /// # Ok::<(), meshcore::MeshError>(())
    /// ```
    pub fn new(
        vertices: Vec<Point3<Real>>,
        faces: Faces,
        face_groups: Option<GroupMap>,
    ) -> MeshResult<Self> {
        Self::from_shared(vertices.into(), faces, face_groups.map(Arc::new))
    }

    /// Build from `[x, y, z]` rows and face rows of uniform arity 3 or 4.
    pub fn from_slices<R: AsRef<[usize]>>(
        vertices: &[[Real; 3]],
        faces: &[R],
    ) -> MeshResult<Self> {
        let vertices = vertices.iter().map(|&p| Point3::from(p)).collect();
        Self::new(vertices, Faces::from_rows(faces)?, None)
    }

    /// Build from flat buffers: `3 * num_v` coordinates and
    /// `arity * num_f` indices.
    pub fn from_flat(vertices: &[Real], faces: Vec<usize>, arity: usize) -> MeshResult<Self> {
        if vertices.len() % 3 != 0 {
            return Err(MeshError::WrongShape {
                what: "vertices",
                expected: "(-1, 3)".to_string(),
                actual: format!("{} coordinates", vertices.len()),
            });
        }
        let vertices = vertices
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        Self::new(vertices, Faces::from_flat(arity, faces)?, None)
    }

    pub(crate) fn from_shared(
        vertices: Arc<[Point3<Real>]>,
        faces: Faces,
        face_groups: Option<Arc<GroupMap>>,
    ) -> MeshResult<Self> {
        check_indices(faces.as_flat(), vertices.len(), "f")?;
        if let Some(groups) = &face_groups {
            if groups.num_elements() != faces.len() {
                return Err(MeshError::WrongShape {
                    what: "face_groups",
                    expected: format!("{} elements", faces.len()),
                    actual: format!("{} elements", groups.num_elements()),
                });
            }
        }
        Ok(Mesh {
            vertices,
            faces,
            face_groups,
        })
    }

    /// For callers that already guarantee the invariants, e.g. shape
    /// factories with literal tables and derivations that only permute.
    pub(crate) fn from_parts_unchecked(
        vertices: Arc<[Point3<Real>]>,
        faces: Faces,
        face_groups: Option<Arc<GroupMap>>,
    ) -> Self {
        debug_assert!(faces.as_flat().iter().all(|&v| v < vertices.len()));
        Mesh {
            vertices,
            faces,
            face_groups,
        }
    }

    pub fn num_v(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_f(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    pub const fn faces(&self) -> &Faces {
        &self.faces
    }

    pub fn face_groups(&self) -> Option<&GroupMap> {
        self.face_groups.as_deref()
    }

    /// The face groups, or [`MeshError::MissingFaceGroups`].
    pub fn require_face_groups(&self) -> MeshResult<&GroupMap> {
        self.face_groups().ok_or(MeshError::MissingFaceGroups)
    }

    /// The positions of the vertices of face `index`.
    ///
    /// # Panics
    /// If `index >= self.num_f()`.
    pub fn face_vertices(&self, index: usize) -> impl Iterator<Item = &Point3<Real>> + '_ {
        self.faces.get(index).iter().map(|&v| &self.vertices[v])
    }

    /// A mesh sharing this one's vertices and faces, with `face_groups`
    /// attached (or removed).
    pub fn with_face_groups(&self, face_groups: Option<GroupMap>) -> MeshResult<Self> {
        Self::from_shared(
            Arc::clone(&self.vertices),
            self.faces.clone(),
            face_groups.map(Arc::new),
        )
    }

    /// A triangle mesh where each quad ABCD became ABC + ACD. Face groups
    /// follow their faces. Triangle meshes come back unchanged.
    pub fn triangulated(&self) -> Self {
        if self.faces.arity().get() == 3 {
            return self.clone();
        }
        let (faces, new_to_old) = self.faces.triangulated();
        let face_groups = self
            .face_groups
            .as_ref()
            .map(|groups| Arc::new(groups.reindexed_unchecked(&new_to_old)));
        Mesh::from_parts_unchecked(Arc::clone(&self.vertices), faces, face_groups)
    }

    pub(crate) const fn shared_vertices(&self) -> &Arc<[Point3<Real>]> {
        &self.vertices
    }

    pub(crate) const fn shared_face_groups(&self) -> Option<&Arc<GroupMap>> {
        self.face_groups.as_ref()
    }

    /// Whether `other` reuses this mesh's vertex storage.
    pub fn shares_vertices_with(&self, other: &Mesh) -> bool {
        Arc::ptr_eq(&self.vertices, &other.vertices)
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mesh(num_v={}, num_f={})", self.num_v(), self.num_f())
    }
}
