//! Wavefront OBJ reading and writing.
//!
//! Only vertex positions, faces and group names are read. Texture
//! coordinates, normals, materials and other statements are skipped.

use super::IoError;
use crate::faces::{Arity, Faces};
use crate::float_types::Real;
use crate::group_map::GroupMap;
use crate::mesh::Mesh;
use hashbrown::HashMap;
use nalgebra::Point3;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

const UNSUPPORTED_ARITY: &str = "OBJ Loader does not support arities greater than 4 or less than 3";
const MIXED_ARITY: &str =
    "OBJ Loader does not support mixed arities, or arities greater than 4 or less than 3";

/// Load a mesh from an OBJ file.
///
/// Faces must all be triangles or all be quads unless `triangulate` is set,
/// in which case every polygon ABCD... is split into the fan ABC, ACD, ...
/// Group (`g`) and object (`o`) statements become face groups; a face
/// belongs to every name on the statement preceding it.
pub fn load_obj(path: impl AsRef<Path>, triangulate: bool) -> Result<Mesh, IoError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mesh = read_obj(BufReader::new(file), triangulate)?;
    debug!("loaded {:?} from {}", mesh, path.display());
    Ok(mesh)
}

/// Load a mesh from OBJ text. See [`load_obj`].
pub fn load_obj_str(text: &str, triangulate: bool) -> Result<Mesh, IoError> {
    read_obj(text.as_bytes(), triangulate)
}

/// Write `mesh` as OBJ text: one `v` line per vertex, then the faces with
/// 1-based indices. A `g` line is written wherever group membership changes
/// from one face to the next.
pub fn write_obj<W: Write>(writer: &mut W, mesh: &Mesh) -> Result<(), IoError> {
    write!(writer, "{}", Obj(mesh))?;
    Ok(())
}

impl Mesh {
    /// Write this mesh to an OBJ file at `path`.
    pub fn write_obj(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        write_obj(&mut writer, self)?;
        writer.flush()?;
        debug!("wrote {:?} to {}", self, path.as_ref().display());
        Ok(())
    }

    /// This mesh as OBJ text.
    pub fn to_obj_string(&self) -> String {
        Obj(self).to_string()
    }
}

struct Obj<'a>(&'a Mesh);

impl fmt::Display for Obj<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mesh = self.0;
        for v in mesh.vertices() {
            writeln!(f, "v {:?} {:?} {:?}", v.x, v.y, v.z)?;
        }

        let mut previous: Vec<&str> = Vec::new();
        for (i, face) in mesh.faces().iter().enumerate() {
            if let Some(groups) = mesh.face_groups() {
                let current: Vec<&str> = groups
                    .iter()
                    .filter_map(|(name, mask)| mask[i].then_some(name))
                    .collect();
                if current != previous {
                    if current.is_empty() {
                        writeln!(f, "g")?;
                    } else {
                        writeln!(f, "g {}", current.join(" "))?;
                    }
                    previous = current;
                }
            }
            f.write_str("f")?;
            for &v in face {
                write!(f, " {}", v + 1)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Face groups in order of first use.
#[derive(Default)]
struct Groups {
    current: Vec<String>,
    members: Vec<(String, Vec<usize>)>,
    index: HashMap<String, usize>,
}

impl Groups {
    fn assign(&mut self, polygon: usize) {
        for name in &self.current {
            let slot = match self.index.get(name) {
                Some(&slot) => slot,
                None => {
                    self.members.push((name.clone(), Vec::new()));
                    self.index.insert(name.clone(), self.members.len() - 1);
                    self.members.len() - 1
                },
            };
            self.members[slot].1.push(polygon);
        }
    }
}

fn read_obj<R: BufRead>(reader: R, triangulate: bool) -> Result<Mesh, IoError> {
    let mut vertices: Vec<Point3<Real>> = Vec::new();
    let mut polygons: Vec<Vec<usize>> = Vec::new();
    let mut groups = Groups::default();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let data = line.split_once('#').map_or(line.as_str(), |(data, _)| data);
        let mut tokens = data.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        match keyword {
            "v" => {
                let vertex = parse_vertex(tokens).ok_or_else(|| malformed(keyword, number, &line))?;
                vertices.push(vertex);
            },
            "f" => {
                let polygon = parse_polygon(tokens, vertices.len())
                    .ok_or_else(|| malformed(keyword, number, &line))?;
                groups.assign(polygons.len());
                polygons.push(polygon);
            },
            "g" | "o" => groups.current = tokens.map(str::to_string).collect(),
            _ => {},
        }
    }

    if polygons.iter().any(|p| p.len() < 3) {
        return Err(IoError::Arity(UNSUPPORTED_ARITY.to_string()));
    }
    let face_groups = if groups.members.is_empty() {
        None
    } else {
        Some(GroupMap::from_mapping(groups.members, polygons.len())?)
    };

    let (faces, face_groups) = if triangulate {
        let (faces, new_to_old) = fan_triangulate(&polygons);
        let face_groups = face_groups
            .map(|groups| groups.reindexed(&new_to_old))
            .transpose()?;
        (faces, face_groups)
    } else {
        (uniform_faces(&polygons)?, face_groups)
    };

    Ok(Mesh::new(vertices, faces, face_groups)?)
}

fn malformed(keyword: &str, number: usize, line: &str) -> IoError {
    IoError::MalformedInput(format!(
        "Failed parse `{keyword}' line {}: {}",
        number + 1,
        line.trim()
    ))
}

fn parse_vertex<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Point3<Real>> {
    let mut coordinate = || tokens.next()?.parse::<Real>().ok();
    Some(Point3::new(coordinate()?, coordinate()?, coordinate()?))
}

/// Vertex references of an `f` line. Accepts `v`, `v/vt`, `v/vt/vn` and
/// `v//vn`; negative indices count back from the last vertex read.
fn parse_polygon<'a>(
    tokens: impl Iterator<Item = &'a str>,
    num_vertices: usize,
) -> Option<Vec<usize>> {
    tokens
        .map(|token| {
            let index: isize = token.split('/').next()?.parse().ok()?;
            match index {
                0 => None,
                i if i > 0 => Some(i.unsigned_abs() - 1),
                i => num_vertices.checked_sub(i.unsigned_abs()),
            }
        })
        .collect()
}

fn uniform_faces(polygons: &[Vec<usize>]) -> Result<Faces, IoError> {
    let Some(first) = polygons.first() else {
        return Ok(Faces::empty(Arity::Triangle));
    };
    if polygons.iter().any(|p| p.len() > 4) {
        return Err(IoError::Arity(UNSUPPORTED_ARITY.to_string()));
    }
    if polygons.iter().any(|p| p.len() != first.len()) {
        return Err(IoError::Arity(MIXED_ARITY.to_string()));
    }
    Ok(Faces::from_flat(first.len(), polygons.concat())?)
}

/// Fan-split each polygon. Returns the triangles and the polygon each one
/// came from.
fn fan_triangulate(polygons: &[Vec<usize>]) -> (Faces, Vec<usize>) {
    let mut triangles = Vec::new();
    let mut new_to_old = Vec::new();
    for (old, polygon) in polygons.iter().enumerate() {
        for pair in polygon[1..].windows(2) {
            triangles.push([polygon[0], pair[0], pair[1]]);
            new_to_old.push(old);
        }
    }
    (Faces::triangles(&triangles), new_to_old)
}
