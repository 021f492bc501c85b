//! Oriented planes for sidedness tests.

use crate::errors::{MeshError, MeshResult};
use crate::float_types::{Real, tolerance};
use nalgebra::{Point3, Unit, Vector3};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Behind = -1,
    On = 0,
    InFront = 1,
}

/// A plane `n·p = w` with unit normal `n`. Points on the normal's side are
/// in front of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Unit<Vector3<Real>>,
    w: Real,
}

impl Plane {
    /// The plane through `point` with normal direction `normal`.
    ///
    /// # Errors
    /// [`MeshError::DegeneratePlane`] if `normal` has (near) zero length.
    pub fn from_point_and_normal(point: Point3<Real>, normal: Vector3<Real>) -> MeshResult<Self> {
        let normal = Unit::try_new(normal, Real::EPSILON).ok_or(MeshError::DegeneratePlane)?;
        Ok(Plane {
            w: normal.dot(&point.coords),
            normal,
        })
    }

    /// The plane through three points, normal following the right-hand rule:
    /// (p2-p1) × (p3-p1)
    pub fn from_points(p1: Point3<Real>, p2: Point3<Real>, p3: Point3<Real>) -> MeshResult<Self> {
        Self::from_point_and_normal(p1, (p2 - p1).cross(&(p3 - p1)))
    }

    pub fn normal(&self) -> Vector3<Real> {
        self.normal.into_inner()
    }

    /// Distance from the origin along the normal.
    pub const fn offset(&self) -> Real {
        self.w
    }

    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify `point`; points within [`tolerance`] of the plane are on it.
    pub fn side(&self, point: &Point3<Real>) -> Side {
        let distance = self.signed_distance(point);
        if distance > tolerance() {
            Side::InFront
        } else if distance < -tolerance() {
            Side::Behind
        } else {
            Side::On
        }
    }

    /// The same plane facing the other way.
    pub fn flipped(&self) -> Self {
        Plane {
            normal: Unit::new_unchecked(-self.normal.into_inner()),
            w: -self.w,
        }
    }
}
