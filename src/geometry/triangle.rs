use crate::error::GeometryError;
use crate::geometry::{affine_map, assert_local_points, check_vertex_coordinates, vertex_sub_geometry, Geometry};
use crate::nalgebra::{DMatrix, Point2};
use crate::{Real, ReferenceShape};

/// A triangle with straight edges, the affine image of the reference triangle.
///
/// Vertex `i` of the reference triangle is mapped to column `i` of the coordinate matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TriaO1<T: Real> {
    coords: DMatrix<T>,
}

impl<T: Real> TriaO1<T> {
    /// Construct a triangle from the columns of a `dim_global x 3` matrix of vertex coordinates.
    pub fn new(coords: DMatrix<T>) -> Result<Self, GeometryError> {
        check_vertex_coordinates(ReferenceShape::Triangle, &coords)?;
        Ok(Self { coords })
    }

    /// Construct a triangle in the plane.
    pub fn from_vertices(vertices: [Point2<T>; 3]) -> Self {
        Self {
            coords: DMatrix::from_fn(2, 3, |i, j| vertices[j][i]),
        }
    }

    /// The reference triangle itself, mapped by the identity.
    pub fn reference() -> Self {
        Self {
            coords: ReferenceShape::Triangle.vertex_coords(),
        }
    }

    pub fn coords(&self) -> &DMatrix<T> {
        &self.coords
    }

    fn constant_jacobian(&self) -> DMatrix<T> {
        let v0 = self.coords.column(0);
        DMatrix::from_columns(&[self.coords.column(1) - &v0, self.coords.column(2) - &v0])
    }
}

impl<T: Real> Geometry<T> for TriaO1<T> {
    fn dim_global(&self) -> usize {
        self.coords.nrows()
    }

    fn ref_el(&self) -> ReferenceShape {
        ReferenceShape::Triangle
    }

    fn global(&self, local: &DMatrix<T>) -> DMatrix<T> {
        assert_local_points(ReferenceShape::Triangle, local);
        affine_map(self.coords.column(0), &self.constant_jacobian(), local)
    }

    fn jacobian(&self, local: &DMatrix<T>) -> Vec<DMatrix<T>> {
        assert_local_points(ReferenceShape::Triangle, local);
        vec![self.constant_jacobian(); local.ncols()]
    }

    fn sub_geometry(&self, codim: usize, index: usize) -> Result<Box<dyn Geometry<T>>, GeometryError> {
        vertex_sub_geometry(ReferenceShape::Triangle, &self.coords, codim, index)
    }
}
