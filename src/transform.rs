//! Affine vertex transforms.
//!
//! Transforms only move vertices; topology and face groups are shared with
//! the source mesh. A transform that mirrors space (negative determinant)
//! also reverses face winding so outward faces stay outward.

use crate::errors::{MeshError, MeshResult};
use crate::float_types::Real;
use crate::mesh::Mesh;
use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Translation3, Vector3};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Units of length understood by [`Transform::convert_units`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Millimeters,
    Centimeters,
    Meters,
    Kilometers,
    Inches,
    Feet,
    Yards,
    Miles,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 8] = [
        LengthUnit::Millimeters,
        LengthUnit::Centimeters,
        LengthUnit::Meters,
        LengthUnit::Kilometers,
        LengthUnit::Inches,
        LengthUnit::Feet,
        LengthUnit::Yards,
        LengthUnit::Miles,
    ];

    /// Length of one unit in meters.
    pub const fn in_meters(self) -> Real {
        match self {
            LengthUnit::Millimeters => 0.001,
            LengthUnit::Centimeters => 0.01,
            LengthUnit::Meters => 1.0,
            LengthUnit::Kilometers => 1000.0,
            LengthUnit::Inches => 0.0254,
            LengthUnit::Feet => 0.3048,
            LengthUnit::Yards => 0.9144,
            LengthUnit::Miles => 1609.344,
        }
    }

    /// The factor that converts lengths in `self` to lengths in `to`.
    pub fn factor_to(self, to: LengthUnit) -> Real {
        self.in_meters() / to.in_meters()
    }

    pub const fn abbreviation(self) -> &'static str {
        match self {
            LengthUnit::Millimeters => "mm",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Meters => "m",
            LengthUnit::Kilometers => "km",
            LengthUnit::Inches => "in",
            LengthUnit::Feet => "ft",
            LengthUnit::Yards => "yd",
            LengthUnit::Miles => "mi",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for LengthUnit {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(LengthUnit::Millimeters),
            "cm" | "centimeter" | "centimeters" => Ok(LengthUnit::Centimeters),
            "m" | "meter" | "meters" => Ok(LengthUnit::Meters),
            "km" | "kilometer" | "kilometers" => Ok(LengthUnit::Kilometers),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inches),
            "ft" | "foot" | "feet" => Ok(LengthUnit::Feet),
            "yd" | "yard" | "yards" => Ok(LengthUnit::Yards),
            "mi" | "mile" | "miles" => Ok(LengthUnit::Miles),
            _ => Err(MeshError::UnknownUnit(s.to_string())),
        }
    }
}

/// A composite transform in progress. Steps apply in call order.
///
/// ```
/// use meshcore::shapes;
/// use meshcore::transform::LengthUnit;
/// use nalgebra::{Point3, Vector3};
///
/// let cube = shapes::cube(Point3::origin(), 1.0);
/// let moved = cube
///     .transform()
///     .convert_units(LengthUnit::Meters, LengthUnit::Centimeters)
///     .translate(Vector3::new(0.0, 0.0, -50.0))
///     .end();
/// let bbox = moved.bounding_box().unwrap();
/// assert_eq!(bbox.maxs, Point3::new(100.0, 100.0, 50.0));
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Transform<'a> {
    target: &'a Mesh,
    matrix: Matrix4<Real>,
    flip_faces: bool,
}

impl<'a> Transform<'a> {
    pub fn new(target: &'a Mesh) -> Self {
        Transform {
            target,
            matrix: Matrix4::identity(),
            flip_faces: false,
        }
    }

    /// Append an arbitrary homogeneous transform.
    pub fn matrix(mut self, matrix: &Matrix4<Real>) -> Self {
        self.matrix = matrix * self.matrix;
        self
    }

    pub fn translate(self, translation: Vector3<Real>) -> Self {
        self.matrix(&Translation3::from(translation).to_homogeneous())
    }

    pub fn uniform_scale(self, factor: Real) -> Self {
        self.matrix(&Matrix4::new_scaling(factor))
    }

    pub fn non_uniform_scale(self, x_factor: Real, y_factor: Real, z_factor: Real) -> Self {
        self.matrix(&Matrix4::new_nonuniform_scaling(&Vector3::new(
            x_factor, y_factor, z_factor,
        )))
    }

    pub fn rotate(self, rotation: &Rotation3<Real>) -> Self {
        self.matrix(&rotation.to_homogeneous())
    }

    /// Rotate by a Rodrigues vector: the axis of rotation scaled by the
    /// angle in radians.
    pub fn rotate_rodrigues(self, axis_angle: Vector3<Real>) -> Self {
        self.rotate(&Rotation3::new(axis_angle))
    }

    /// Rotate so that `look` points along +z and `up` along +y. `up` is
    /// made perpendicular to `look` first.
    pub fn reorient(self, up: &Vector3<Real>, look: &Vector3<Real>) -> MeshResult<Self> {
        Ok(self.rotate(&rotation_from_up_and_look(up, look)?))
    }

    pub fn convert_units(self, from: LengthUnit, to: LengthUnit) -> Self {
        self.uniform_scale(from.factor_to(to))
    }

    /// Mirror across the plane through the origin perpendicular to axis
    /// `dim`. With `preserve_vertex_centroid`, translate afterwards so the
    /// vertex centroid ends where it started.
    pub fn flip(self, dim: usize, preserve_vertex_centroid: bool) -> MeshResult<Self> {
        if dim > 2 {
            return Err(MeshError::InvalidAxis(dim));
        }
        // Transforms are affine, so the centroid follows the matrix.
        let centroid = self
            .target
            .vertex_centroid()
            .map(|c| self.matrix.transform_point(&c));
        let mut factors = Vector3::repeat(1.0);
        factors[dim] = -1.0;
        let flipped = self.matrix(&Matrix4::new_nonuniform_scaling(&factors));
        match centroid {
            Some(centroid) if preserve_vertex_centroid => {
                let mut translation = Vector3::zeros();
                translation[dim] = 2.0 * centroid[dim];
                Ok(flipped.translate(translation))
            },
            _ => Ok(flipped),
        }
    }

    /// Reverse face winding without moving any vertex.
    pub fn flip_faces(mut self) -> Self {
        self.flip_faces = !self.flip_faces;
        self
    }

    /// The accumulated transform, as applied to vertices by [`Transform::end`].
    pub const fn to_matrix(&self) -> &Matrix4<Real> {
        &self.matrix
    }

    /// Apply the transform, producing a new mesh.
    pub fn end(self) -> Mesh {
        let target = self.target;
        let mirrors = self.matrix.fixed_view::<3, 3>(0, 0).clone_owned().determinant() < 0.0;
        let vertices: Arc<[Point3<Real>]> = target
            .vertices()
            .iter()
            .map(|p| self.matrix.transform_point(p))
            .collect();
        let faces = if mirrors != self.flip_faces {
            target.faces().flipped()
        } else {
            target.faces().clone()
        };
        debug!(mirrors, flip_faces = self.flip_faces, "transformed {:?}", target);
        Mesh::from_parts_unchecked(vertices, faces, target.shared_face_groups().cloned())
    }
}

fn rotation_from_up_and_look(up: &Vector3<Real>, look: &Vector3<Real>) -> MeshResult<Rotation3<Real>> {
    let look = look
        .try_normalize(Real::EPSILON)
        .ok_or(MeshError::DegenerateOrientation)?;
    let left = up
        .cross(&look)
        .try_normalize(Real::EPSILON)
        .ok_or(MeshError::DegenerateOrientation)?;
    let up = look.cross(&left);
    let rows = Matrix3::from_rows(&[left.transpose(), up.transpose(), look.transpose()]);
    Ok(Rotation3::from_matrix_unchecked(rows))
}

impl Mesh {
    /// Begin a composite transform. Apply steps, then call
    /// [`Transform::end`].
    pub fn transform(&self) -> Transform<'_> {
        Transform::new(self)
    }

    pub fn translated(&self, translation: Vector3<Real>) -> Mesh {
        self.transform().translate(translation).end()
    }

    pub fn uniformly_scaled(&self, factor: Real) -> Mesh {
        self.transform().uniform_scale(factor).end()
    }

    pub fn non_uniformly_scaled(&self, x_factor: Real, y_factor: Real, z_factor: Real) -> Mesh {
        self.transform()
            .non_uniform_scale(x_factor, y_factor, z_factor)
            .end()
    }

    pub fn rotated(&self, rotation: &Rotation3<Real>) -> Mesh {
        self.transform().rotate(rotation).end()
    }

    pub fn reoriented(&self, up: &Vector3<Real>, look: &Vector3<Real>) -> MeshResult<Mesh> {
        Ok(self.transform().reorient(up, look)?.end())
    }

    pub fn units_converted(&self, from: LengthUnit, to: LengthUnit) -> Mesh {
        self.transform().convert_units(from, to).end()
    }

    pub fn flipped(&self, dim: usize, preserve_vertex_centroid: bool) -> MeshResult<Mesh> {
        Ok(self.transform().flip(dim, preserve_vertex_centroid)?.end())
    }

    pub fn faces_flipped(&self) -> Mesh {
        self.transform().flip_faces().end()
    }
}
