//! Geometric mappings from reference cells to concrete mesh cells.
//!
//! A geometry maps reference coordinates of its [`ReferenceShape`] to global coordinates in
//! a space of dimension `dim_global >= dim_local`. All queries take the reference points as
//! the columns of a `dim_local x n` matrix.
use crate::error::GeometryError;
use crate::{Real, ReferenceShape};
use nalgebra::{DMatrix, DVector, DVectorView};
use std::fmt::Debug;

mod point;
mod quadrilateral;
mod segment;
mod triangle;

pub use point::PointGeometry;
pub use quadrilateral::QuadO1;
pub use segment::SegmentO1;
pub use triangle::TriaO1;

/// The geometry of a single mesh cell.
pub trait Geometry<T>: Debug + Send + Sync
where
    T: Real,
{
    /// The dimension of the reference cell.
    fn dim_local(&self) -> usize {
        self.ref_el().dimension()
    }

    /// The dimension of the space the cell is embedded in.
    fn dim_global(&self) -> usize;

    fn ref_el(&self) -> ReferenceShape;

    /// Maps reference points to global points, returned as the columns of a
    /// `dim_global x n` matrix.
    fn global(&self, local: &DMatrix<T>) -> DMatrix<T>;

    /// The `dim_global x dim_local` Jacobian of the mapping at each point.
    fn jacobian(&self, local: &DMatrix<T>) -> Vec<DMatrix<T>>;

    /// The matrix `J (J^T J)^{-1}` at each point.
    ///
    /// Multiplying a reference gradient with this matrix yields the corresponding gradient in
    /// global coordinates. For square Jacobians this is the inverse transpose `J^{-T}`.
    fn jacobian_inverse_gramian(&self, local: &DMatrix<T>) -> Vec<DMatrix<T>> {
        self.jacobian(local).iter().map(inverse_gramian).collect()
    }

    /// The integration element `sqrt(det(J^T J))` at each point.
    fn integration_element(&self, local: &DMatrix<T>) -> DVector<T> {
        let jacobians = self.jacobian(local);
        DVector::from_iterator(jacobians.len(), jacobians.iter().map(integration_element))
    }

    /// The geometry of the sub-entity `index` of codimension `codim`.
    fn sub_geometry(&self, codim: usize, index: usize) -> Result<Box<dyn Geometry<T>>, GeometryError>;
}

/// Computes `J (J^T J)^{-1}` for a single Jacobian.
///
/// Returns a zero matrix if `J^T J` is singular, i.e. if the cell is degenerate.
pub fn inverse_gramian<T: Real>(jacobian: &DMatrix<T>) -> DMatrix<T> {
    let (rows, cols) = jacobian.shape();
    if cols == 0 {
        return DMatrix::zeros(rows, 0);
    }
    jacobian
        .tr_mul(jacobian)
        .try_inverse()
        .map(|gram_inverse| jacobian * gram_inverse)
        .unwrap_or_else(|| DMatrix::zeros(rows, cols))
}

/// Computes `sqrt(det(J^T J))` for a single Jacobian.
///
/// This is `|det J|` for square Jacobians and one for the zero-dimensional Jacobian of a point.
pub fn integration_element<T: Real>(jacobian: &DMatrix<T>) -> T {
    if jacobian.ncols() == 0 {
        T::one()
    } else if jacobian.is_square() {
        jacobian.determinant().abs()
    } else {
        jacobian.tr_mul(jacobian).determinant().max(T::zero()).sqrt()
    }
}

fn check_vertex_coordinates<T: Real>(shape: ReferenceShape, coords: &DMatrix<T>) -> Result<(), GeometryError> {
    let (rows, cols) = coords.shape();
    if cols != shape.num_vertices() || rows < shape.dimension() {
        Err(GeometryError::VertexCoordinates {
            shape,
            expected_cols: shape.num_vertices(),
            min_rows: shape.dimension(),
            rows,
            cols,
        })
    } else {
        Ok(())
    }
}

fn assert_local_points<T: Real>(shape: ReferenceShape, local: &DMatrix<T>) {
    assert_eq!(
        local.nrows(),
        shape.dimension(),
        "Reference points for a {} geometry must have {} coordinates.",
        shape,
        shape.dimension()
    );
}

/// Evaluates `origin + J * xi` for every column `xi` of `local`.
fn affine_map<T: Real>(origin: DVectorView<T>, jacobian: &DMatrix<T>, local: &DMatrix<T>) -> DMatrix<T> {
    let mut global = jacobian * local;
    for mut x in global.column_iter_mut() {
        x += &origin;
    }
    global
}

/// Builds the geometry of a sub-entity of a cell given by its vertex coordinates.
fn vertex_sub_geometry<T: Real>(
    shape: ReferenceShape,
    coords: &DMatrix<T>,
    codim: usize,
    index: usize,
) -> Result<Box<dyn Geometry<T>>, GeometryError> {
    let no_sub_entity = || GeometryError::NoSubEntity { shape, codim, index };
    let vertices = shape
        .sub_entity_vertices(codim, index)
        .ok_or_else(no_sub_entity)?;
    let sub_shape = shape.sub_entity_shape(codim).ok_or_else(no_sub_entity)?;
    let sub_coords = coords.select_columns(vertices.iter());

    let geometry: Box<dyn Geometry<T>> = match sub_shape {
        ReferenceShape::Point => Box::new(PointGeometry::new(sub_coords.column(0).into_owned())),
        ReferenceShape::Segment => Box::new(SegmentO1::new(sub_coords)?),
        ReferenceShape::Triangle => Box::new(TriaO1::new(sub_coords)?),
        ReferenceShape::Quadrilateral => Box::new(QuadO1::new(sub_coords)?),
    };
    Ok(geometry)
}
