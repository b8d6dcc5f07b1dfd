//! Reference finite elements.
use crate::{Real, ReferenceShape};
use nalgebra::{DMatrix, Point2, RowDVector, SMatrix, Scalar};
use std::fmt::Debug;

mod quadrilateral;
mod triangle;

pub use quadrilateral::*;
pub use triangle::*;

/// A scalar-valued finite element on a reference cell.
///
/// Shape functions are associated with the topological entities of the reference cell.
/// The local numbering places shape functions on vertices first (in vertex order), then
/// those on edges (in edge order) and finally interior shape functions.
///
/// Reference points are passed as the columns of a `dim x n` matrix, where `dim` is the
/// dimension of the reference cell.
pub trait ScalarReferenceFiniteElement<T>: Debug + Send + Sync
where
    T: Scalar,
{
    /// The reference cell the element is defined on.
    fn ref_el(&self) -> ReferenceShape;

    /// The intrinsic dimension of the reference cell.
    fn dimension(&self) -> usize {
        self.ref_el().dimension()
    }

    /// The polynomial degree of the element.
    fn degree(&self) -> usize;

    /// The total number of shape functions.
    fn num_ref_shape_functions(&self) -> usize;

    /// The number of shape functions associated with the sub-entity `sub_index` of
    /// codimension `codim`.
    ///
    /// # Panics
    ///
    /// Panics if the reference cell has no such sub-entity.
    fn num_ref_shape_functions_on(&self, codim: usize, sub_index: usize) -> usize;

    /// Evaluates all shape functions at the given points.
    ///
    /// Returns one row vector per shape function, whose `j`-th entry is the value of
    /// the shape function at the `j`-th point.
    fn eval_reference_shape_functions(&self, points: &DMatrix<T>) -> Vec<RowDVector<T>>;

    /// Evaluates the gradients of all shape functions at the given points.
    ///
    /// Returns one `dim x n` matrix per shape function, whose `j`-th column is the gradient
    /// of the shape function at the `j`-th point.
    fn gradients_reference_shape_functions(&self, points: &DMatrix<T>) -> Vec<DMatrix<T>>;
}

/// A Lagrangian basis on a two-dimensional reference cell with `N` nodes, evaluated one
/// point at a time.
pub trait NodalBasis<T, const N: usize>
where
    T: Real,
{
    /// The nodes of the basis, one column per node.
    ///
    /// Shape function `i` is one at node `i` and zero at all other nodes.
    fn nodes(&self) -> SMatrix<T, 2, N>;

    /// Evaluates each basis function at the given reference coordinates. The result is given
    /// in a row vector where each entry is the value of the corresponding basis function.
    fn evaluate_basis(&self, xi: &Point2<T>) -> SMatrix<T, 1, N>;

    /// Returns a matrix whose columns are the gradients of each basis function at the given
    /// reference coordinates.
    fn gradients(&self, xi: &Point2<T>) -> SMatrix<T, 2, N>;
}

fn assert_reference_points<T: Scalar>(points: &DMatrix<T>) {
    assert_eq!(
        points.nrows(),
        2,
        "Reference points of a two-dimensional element must have two coordinates."
    );
}

fn assert_sub_entity(shape: ReferenceShape, codim: usize, sub_index: usize) {
    assert!(
        sub_index < shape.num_sub_entities(codim),
        "The reference {} has no sub-entity {} of codimension {}",
        shape,
        sub_index,
        codim
    );
}

pub(crate) fn basis_values_at_points<T, const N: usize>(
    points: &DMatrix<T>,
    basis: impl Fn(&Point2<T>) -> SMatrix<T, 1, N>,
) -> Vec<RowDVector<T>>
where
    T: Real,
{
    assert_reference_points(points);
    let mut values = vec![RowDVector::zeros(points.ncols()); N];
    for (j, xi) in points.column_iter().enumerate() {
        let phi = basis(&Point2::new(xi[0], xi[1]));
        for (i, row) in values.iter_mut().enumerate() {
            row[j] = phi[i];
        }
    }
    values
}

pub(crate) fn basis_gradients_at_points<T, const N: usize>(
    points: &DMatrix<T>,
    gradients: impl Fn(&Point2<T>) -> SMatrix<T, 2, N>,
) -> Vec<DMatrix<T>>
where
    T: Real,
{
    assert_reference_points(points);
    let mut result = vec![DMatrix::zeros(2, points.ncols()); N];
    for (j, xi) in points.column_iter().enumerate() {
        let g = gradients(&Point2::new(xi[0], xi[1]));
        for (i, gradient) in result.iter_mut().enumerate() {
            gradient.column_mut(j).copy_from(&g.column(i));
        }
    }
    result
}

/// Implements `ScalarReferenceFiniteElement` for a Lagrangian element that implements
/// `NodalBasis`.
///
/// The shape function counts are given per codimension, i.e. as
/// `[interior, per edge, per vertex]`.
macro_rules! impl_scalar_reference_element_for_nodal {
    ($element:ty, nodes = $n:literal, shape = $shape:expr, degree = $degree:expr, per_codim = $per_codim:expr) => {
        impl<T> crate::element::ScalarReferenceFiniteElement<T> for $element
        where
            T: crate::Real,
        {
            fn ref_el(&self) -> crate::ReferenceShape {
                $shape
            }

            fn degree(&self) -> usize {
                $degree
            }

            fn num_ref_shape_functions(&self) -> usize {
                $n
            }

            fn num_ref_shape_functions_on(&self, codim: usize, sub_index: usize) -> usize {
                crate::element::assert_sub_entity($shape, codim, sub_index);
                let per_codim: [usize; 3] = $per_codim;
                per_codim[codim]
            }

            fn eval_reference_shape_functions(
                &self,
                points: &nalgebra::DMatrix<T>,
            ) -> Vec<nalgebra::RowDVector<T>> {
                crate::element::basis_values_at_points(points, |xi| {
                    <Self as crate::element::NodalBasis<T, $n>>::evaluate_basis(self, xi)
                })
            }

            fn gradients_reference_shape_functions(
                &self,
                points: &nalgebra::DMatrix<T>,
            ) -> Vec<nalgebra::DMatrix<T>> {
                crate::element::basis_gradients_at_points(points, |xi| {
                    <Self as crate::element::NodalBasis<T, $n>>::gradients(self, xi)
                })
            }
        }
    };
}

pub(crate) use impl_scalar_reference_element_for_nodal;
