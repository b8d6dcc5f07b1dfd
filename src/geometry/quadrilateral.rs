use crate::error::GeometryError;
use crate::geometry::{assert_local_points, check_vertex_coordinates, vertex_sub_geometry, Geometry};
use crate::nalgebra::{DMatrix, Point2};
use crate::{Real, ReferenceShape};
use numeric_literals::replace_float_literals;

/// A quadrilateral with straight edges, the bilinear image of the unit square.
///
/// Vertex `i` of the unit square is mapped to column `i` of the coordinate matrix. Unless the
/// quadrilateral is a parallelogram, the Jacobian varies over the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadO1<T: Real> {
    coords: DMatrix<T>,
}

impl<T: Real> QuadO1<T> {
    /// Construct a quadrilateral from the columns of a `dim_global x 4` matrix of vertex
    /// coordinates, given in counter-clockwise order.
    pub fn new(coords: DMatrix<T>) -> Result<Self, GeometryError> {
        check_vertex_coordinates(ReferenceShape::Quadrilateral, &coords)?;
        Ok(Self { coords })
    }

    /// Construct a quadrilateral in the plane.
    pub fn from_vertices(vertices: [Point2<T>; 4]) -> Self {
        Self {
            coords: DMatrix::from_fn(2, 4, |i, j| vertices[j][i]),
        }
    }

    /// The unit square itself, mapped by the identity.
    pub fn reference() -> Self {
        Self {
            coords: ReferenceShape::Quadrilateral.vertex_coords(),
        }
    }

    pub fn coords(&self) -> &DMatrix<T> {
        &self.coords
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn jacobian_at(&self, x: T, y: T) -> DMatrix<T> {
        let v = |i: usize| self.coords.column(i);
        let d_dx = (v(1) - v(0)) * (1.0 - y) + (v(2) - v(3)) * y;
        let d_dy = (v(3) - v(0)) * (1.0 - x) + (v(2) - v(1)) * x;
        DMatrix::from_columns(&[d_dx, d_dy])
    }
}

impl<T: Real> Geometry<T> for QuadO1<T> {
    fn dim_global(&self) -> usize {
        self.coords.nrows()
    }

    fn ref_el(&self) -> ReferenceShape {
        ReferenceShape::Quadrilateral
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn global(&self, local: &DMatrix<T>) -> DMatrix<T> {
        assert_local_points(ReferenceShape::Quadrilateral, local);
        let mut global = DMatrix::zeros(self.coords.nrows(), local.ncols());
        for (xi, mut x) in local.column_iter().zip(global.column_iter_mut()) {
            let (s, t) = (xi[0], xi[1]);
            let weights = [(1.0 - s) * (1.0 - t), s * (1.0 - t), s * t, (1.0 - s) * t];
            for (vertex, weight) in self.coords.column_iter().zip(weights) {
                x.axpy(weight, &vertex, 1.0);
            }
        }
        global
    }

    fn jacobian(&self, local: &DMatrix<T>) -> Vec<DMatrix<T>> {
        assert_local_points(ReferenceShape::Quadrilateral, local);
        local
            .column_iter()
            .map(|xi| self.jacobian_at(xi[0], xi[1]))
            .collect()
    }

    fn sub_geometry(&self, codim: usize, index: usize) -> Result<Box<dyn Geometry<T>>, GeometryError> {
        vertex_sub_geometry(ReferenceShape::Quadrilateral, &self.coords, codim, index)
    }
}
