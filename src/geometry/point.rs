use crate::error::GeometryError;
use crate::geometry::{assert_local_points, Geometry};
use crate::{Real, ReferenceShape};
use nalgebra::{DMatrix, DVector};

/// A single point in global coordinates.
///
/// The reference point has no coordinates, so every query takes a `0 x n` matrix. The
/// integration element of a point is one.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGeometry<T: Real> {
    coords: DVector<T>,
}

impl<T: Real> PointGeometry<T> {
    pub fn new(coords: DVector<T>) -> Self {
        Self { coords }
    }

    pub fn coords(&self) -> &DVector<T> {
        &self.coords
    }
}

impl<T: Real> Geometry<T> for PointGeometry<T> {
    fn dim_global(&self) -> usize {
        self.coords.len()
    }

    fn ref_el(&self) -> ReferenceShape {
        ReferenceShape::Point
    }

    fn global(&self, local: &DMatrix<T>) -> DMatrix<T> {
        assert_local_points(ReferenceShape::Point, local);
        DMatrix::from_fn(self.coords.len(), local.ncols(), |i, _| self.coords[i])
    }

    fn jacobian(&self, local: &DMatrix<T>) -> Vec<DMatrix<T>> {
        assert_local_points(ReferenceShape::Point, local);
        vec![DMatrix::zeros(self.coords.len(), 0); local.ncols()]
    }

    fn integration_element(&self, local: &DMatrix<T>) -> DVector<T> {
        assert_local_points(ReferenceShape::Point, local);
        DVector::repeat(local.ncols(), T::one())
    }

    fn sub_geometry(&self, codim: usize, index: usize) -> Result<Box<dyn Geometry<T>>, GeometryError> {
        if codim == 0 && index == 0 {
            Ok(Box::new(self.clone()))
        } else {
            Err(GeometryError::NoSubEntity {
                shape: ReferenceShape::Point,
                codim,
                index,
            })
        }
    }
}
