//! Uniform-arity face tables.

use crate::errors::{MeshError, MeshResult};
use crate::validation::check_arity;
use std::sync::Arc;

/// Number of vertices per face; uniform within one mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Arity {
    #[default]
    Triangle = 3,
    Quad = 4,
}

impl Arity {
    pub const fn get(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Arity {
    type Error = MeshError;

    fn try_from(value: usize) -> MeshResult<Self> {
        check_arity(value)?;
        Ok(if value == 3 { Arity::Triangle } else { Arity::Quad })
    }
}

/// An immutable `num_f x arity` table of vertex indices.
///
/// Storage is a single flat, reference-counted buffer, so cloning a `Faces`
/// (and every mesh built from it) shares the indices instead of copying them.
/// Faces carry no knowledge of the vertex count; [`crate::Mesh::new`] checks
/// referential integrity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faces {
    indices: Arc<[usize]>,
    arity: Arity,
}

impl Faces {
    /// Build from a flat index buffer, `arity` indices per face.
    pub fn from_flat(arity: usize, indices: Vec<usize>) -> MeshResult<Self> {
        let arity = Arity::try_from(arity)?;
        if indices.len() % arity.get() != 0 {
            return Err(MeshError::WrongShape {
                what: "faces",
                expected: format!("(-1, {})", arity.get()),
                actual: format!("{} indices", indices.len()),
            });
        }
        Ok(Faces {
            indices: indices.into(),
            arity,
        })
    }

    /// Build from rows of possibly differing length; fails unless every row
    /// has the same arity, 3 or 4. An empty table is a triangle table.
    pub fn from_rows<R: AsRef<[usize]>>(rows: &[R]) -> MeshResult<Self> {
        let Some(first) = rows.first() else {
            return Ok(Faces::empty(Arity::Triangle));
        };
        let arity = Arity::try_from(first.as_ref().len())?;
        let mut indices = Vec::with_capacity(rows.len() * arity.get());
        for (face, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != arity.get() {
                return Err(MeshError::MixedArity {
                    expected: arity.get(),
                    found: row.len(),
                    face,
                });
            }
            indices.extend_from_slice(row);
        }
        Ok(Faces {
            indices: indices.into(),
            arity,
        })
    }

    pub fn triangles(rows: &[[usize; 3]]) -> Self {
        Faces {
            indices: rows.iter().flatten().copied().collect(),
            arity: Arity::Triangle,
        }
    }

    pub fn quads(rows: &[[usize; 4]]) -> Self {
        Faces {
            indices: rows.iter().flatten().copied().collect(),
            arity: Arity::Quad,
        }
    }

    pub fn empty(arity: Arity) -> Self {
        Faces {
            indices: Arc::from([]),
            arity,
        }
    }

    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.indices.len() / self.arity.get()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex indices of face `index`.
    ///
    /// # Panics
    /// If `index >= self.len()`.
    pub fn get(&self, index: usize) -> &[usize] {
        let n = self.arity.get();
        &self.indices[index * n..(index + 1) * n]
    }

    pub fn iter(&self) -> std::slice::ChunksExact<'_, usize> {
        self.indices.chunks_exact(self.arity.get())
    }

    /// All indices, face after face.
    pub fn as_flat(&self) -> &[usize] {
        &self.indices
    }

    /// Whether `other` is backed by the same storage.
    pub fn shares_storage_with(&self, other: &Faces) -> bool {
        Arc::ptr_eq(&self.indices, &other.indices)
    }

    /// Faces kept by `mask`, in order, with each index rewritten through
    /// `vertex_map`. Every referenced vertex must map to `Some`.
    pub(crate) fn compacted(&self, mask: &[bool], vertex_map: &[Option<usize>]) -> Faces {
        let indices = self
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .flat_map(|(face, _)| face.iter().filter_map(|&v| vertex_map[v]))
            .collect();
        Faces {
            indices,
            arity: self.arity,
        }
    }

    /// Faces in the order given by `new_to_old`.
    pub(crate) fn reordered(&self, new_to_old: &[usize]) -> Faces {
        let indices = new_to_old
            .iter()
            .flat_map(|&old| self.get(old).iter().copied())
            .collect();
        Faces {
            indices,
            arity: self.arity,
        }
    }

    /// Faces with every index rewritten through `map`.
    pub(crate) fn remapped(&self, map: &[usize]) -> Faces {
        Faces {
            indices: self.indices.iter().map(|&v| map[v]).collect(),
            arity: self.arity,
        }
    }

    /// Faces with their winding reversed.
    pub(crate) fn flipped(&self) -> Faces {
        let indices = self
            .iter()
            .flat_map(|face| face.iter().rev().copied())
            .collect();
        Faces {
            indices,
            arity: self.arity,
        }
    }

    /// Split quads ABCD into ABC + ACD. Returns the triangles and, for each
    /// triangle, the index of the face it came from.
    pub(crate) fn triangulated(&self) -> (Faces, Vec<usize>) {
        let mut indices = Vec::with_capacity(self.len() * 3 * (self.arity.get() - 2));
        let mut new_to_old = Vec::with_capacity(self.len() * (self.arity.get() - 2));
        for (old, face) in self.iter().enumerate() {
            for i in 1..face.len() - 1 {
                indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                new_to_old.push(old);
            }
        }
        (
            Faces {
                indices: indices.into(),
                arity: Arity::Triangle,
            },
            new_to_old,
        )
    }
}

impl<'a> IntoIterator for &'a Faces {
    type Item = &'a [usize];
    type IntoIter = std::slice::ChunksExact<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
