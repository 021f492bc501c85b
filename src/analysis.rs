//! Simple measurements over mesh vertices.

use crate::float_types::Real;
use crate::mesh::Mesh;
use nalgebra::{Point3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl BoundingBox {
    /// The smallest box containing every point, or `None` for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<Real>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(
            BoundingBox {
                mins: first,
                maxs: first,
            },
            |bbox, p| BoundingBox {
                mins: bbox.mins.inf(p),
                maxs: bbox.maxs.sup(p),
            },
        ))
    }

    pub fn size(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    pub fn center(&self) -> Point3<Real> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    /// Extent along x.
    pub fn width(&self) -> Real {
        self.maxs.x - self.mins.x
    }

    /// Extent along y.
    pub fn height(&self) -> Real {
        self.maxs.y - self.mins.y
    }

    /// Extent along z.
    pub fn depth(&self) -> Real {
        self.maxs.z - self.mins.z
    }

    pub fn contains(&self, point: &Point3<Real>) -> bool {
        (0..3).all(|i| self.mins[i] <= point[i] && point[i] <= self.maxs[i])
    }
}

impl Mesh {
    /// The average of all vertex positions. `None` when there are no
    /// vertices.
    pub fn vertex_centroid(&self) -> Option<Point3<Real>> {
        if self.num_v() == 0 {
            return None;
        }
        let sum: Vector3<Real> = self.vertices().iter().map(|p| p.coords).sum();
        Some(Point3::from(sum / self.num_v() as Real))
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices())
    }

    /// The vertex farthest along `direction`. Ties go to the lowest index.
    pub fn apex(&self, direction: &Vector3<Real>) -> Option<Point3<Real>> {
        let mut vertices = self.vertices().iter();
        let first = vertices.next()?;
        let (apex, _) = vertices.fold((first, first.coords.dot(direction)), |best, p| {
            let height = p.coords.dot(direction);
            if height > best.1 { (p, height) } else { best }
        });
        Some(*apex)
    }

    /// Unit normal of each face, from its first three vertices with
    /// counterclockwise winding. Degenerate faces get a zero vector.
    pub fn face_normals(&self) -> Vec<Vector3<Real>> {
        (0..self.num_f())
            .map(|face| {
                let corners = self.faces().get(face);
                let vertices = self.vertices();
                let (a, b, c) = (vertices[corners[0]], vertices[corners[1]], vertices[corners[2]]);
                (b - a)
                    .cross(&(c - a))
                    .try_normalize(0.0)
                    .unwrap_or_else(Vector3::zeros)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes;

    #[test]
    fn cube_measurements() {
        let cube = shapes::cube(Point3::new(-1.0, 0.0, 2.0), 4.0);
        assert_eq!(cube.vertex_centroid(), Some(Point3::new(1.0, 2.0, 4.0)));
        let bbox = cube.bounding_box().unwrap();
        assert_eq!(bbox.mins, Point3::new(-1.0, 0.0, 2.0));
        assert_eq!(bbox.maxs, Point3::new(3.0, 4.0, 6.0));
        assert_eq!(bbox.size(), Vector3::repeat(4.0));
        assert_eq!(bbox.center(), Point3::new(1.0, 2.0, 4.0));
        assert_eq!((bbox.width(), bbox.height(), bbox.depth()), (4.0, 4.0, 4.0));
        assert!(bbox.contains(&Point3::new(0.0, 0.0, 3.0)));
        assert!(!bbox.contains(&Point3::new(0.0, -0.5, 3.0)));
    }

    #[test]
    fn empty_mesh_has_no_measurements() {
        let empty = Mesh::from_slices::<[usize; 3]>(&[], &[]).unwrap();
        assert_eq!(empty.vertex_centroid(), None);
        assert_eq!(empty.bounding_box(), None);
    }

    #[test]
    fn apex_is_the_farthest_vertex() {
        let cube = shapes::cube(Point3::origin(), 3.0);
        assert_eq!(cube.apex(&Vector3::new(1.0, 1.0, -1.0)), Some(Point3::new(3.0, 3.0, 0.0)));
        assert_eq!(cube.apex(&-Vector3::x()), Some(Point3::origin()));
        let empty = Mesh::from_slices::<[usize; 3]>(&[], &[]).unwrap();
        assert_eq!(empty.apex(&Vector3::x()), None);
    }

    #[test]
    fn cube_face_normals_point_outward() {
        let cube = shapes::cube(Point3::origin(), 3.0);
        let sides = [
            -Vector3::y(),
            Vector3::y(),
            -Vector3::z(),
            Vector3::x(),
            Vector3::z(),
            -Vector3::x(),
        ];
        let expected: Vec<Vector3<Real>> = sides.iter().flat_map(|&n| [n, n]).collect();
        assert_eq!(cube.face_normals(), expected);
    }

    #[test]
    fn degenerate_faces_have_zero_normals() {
        let sliver = Mesh::from_slices(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]], &[[0usize, 1, 2]])
            .unwrap();
        assert_eq!(sliver.face_normals(), vec![Vector3::zeros()]);
    }
}
