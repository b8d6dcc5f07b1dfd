use crate::error::GeometryError;
use crate::geometry::{affine_map, assert_local_points, check_vertex_coordinates, vertex_sub_geometry, Geometry};
use crate::{Real, ReferenceShape};
use nalgebra::DMatrix;

/// A straight line segment, the affine image of the reference segment [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentO1<T: Real> {
    coords: DMatrix<T>,
}

impl<T: Real> SegmentO1<T> {
    /// Construct a segment from its two endpoints, given as the columns of `coords`.
    pub fn new(coords: DMatrix<T>) -> Result<Self, GeometryError> {
        check_vertex_coordinates(ReferenceShape::Segment, &coords)?;
        Ok(Self { coords })
    }

    pub fn coords(&self) -> &DMatrix<T> {
        &self.coords
    }

    fn constant_jacobian(&self) -> DMatrix<T> {
        let tangent = self.coords.column(1) - self.coords.column(0);
        DMatrix::from_columns(&[tangent])
    }
}

impl<T: Real> Geometry<T> for SegmentO1<T> {
    fn dim_global(&self) -> usize {
        self.coords.nrows()
    }

    fn ref_el(&self) -> ReferenceShape {
        ReferenceShape::Segment
    }

    fn global(&self, local: &DMatrix<T>) -> DMatrix<T> {
        assert_local_points(ReferenceShape::Segment, local);
        affine_map(self.coords.column(0), &self.constant_jacobian(), local)
    }

    fn jacobian(&self, local: &DMatrix<T>) -> Vec<DMatrix<T>> {
        assert_local_points(ReferenceShape::Segment, local);
        vec![self.constant_jacobian(); local.ncols()]
    }

    fn sub_geometry(&self, codim: usize, index: usize) -> Result<Box<dyn Geometry<T>>, GeometryError> {
        vertex_sub_geometry(ReferenceShape::Segment, &self.coords, codim, index)
    }
}
