//! An immutable **polygonal mesh** library built around topology-safe
//! *submesh selection*.
//!
//! A [`Mesh`] holds vertex positions, a table of triangles or quads, and
//! optional named [face groups](GroupMap). Meshes are never mutated: chained
//! [selections](Selection), [reindexing](reindex_faces) and
//! [transforms](transform::Transform) each derive a new mesh, sharing whatever
//! storage they did not change.
//!
//! ```
//! use meshcore::shapes;
//! use nalgebra::Point3;
//!
//! let cube = shapes::cube(Point3::origin(), 3.0);
//! let (upper, face_provenance, _) = cube
//!     .select()
//!     .vertices_at_or_above(&Point3::new(0.0, 1.0, 0.0), 1)?
//!     .end_with_provenance(true)?;
//! assert_eq!(upper.num_f(), 2);
//! assert_eq!(face_provenance[2], Some(0));
//! # Ok::<(), meshcore::MeshError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **obj-io**: [Wavefront OBJ](https://en.wikipedia.org/wiki/Wavefront_.obj_file) import/export
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **cli**: the `meshcore` command line tool

#![forbid(unsafe_code)]
#![warn(unused, clippy::missing_const_for_fn, clippy::all)]

pub mod analysis;
pub mod errors;
pub mod faces;
pub mod float_types;
pub mod group_map;
pub mod io;
pub mod mask;
pub mod mesh;
pub mod plane;
pub mod reconcile;
pub mod reindex;
pub mod selection;
pub mod shapes;
pub mod transform;
pub mod validation;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{MeshError, MeshResult};
pub use faces::{Arity, Faces};
pub use group_map::GroupMap;
pub use mask::{Pick, compaction_map};
pub use mesh::Mesh;
pub use plane::{Plane, Side};
pub use reconcile::reconcile_selection;
pub use reindex::{reindex_faces, reindex_vertices};
pub use selection::Selection;
