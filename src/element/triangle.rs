use crate::element::{impl_scalar_reference_element_for_nodal, NodalBasis};
use crate::nalgebra::{Matrix1x3, Matrix1x6, Matrix2x3, Matrix2x6, Point2, Vector2};
use crate::{Real, ReferenceShape};
use numeric_literals::replace_float_literals;

/// Linear Lagrangian shape functions on the reference triangle.
///
/// The reference triangle has corners (0, 0), (1, 0), (0, 1). There is one shape function
/// per vertex and none on edges or in the interior.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Tri3Lagrange;

impl Tri3Lagrange {
    /// Barycentric coordinates of the given reference point.
    fn barycentric<T: Real>(xi: &Point2<T>) -> [T; 3] {
        [T::one() - xi.x - xi.y, xi.x, xi.y]
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn barycentric_gradients<T: Real>() -> [Vector2<T>; 3] {
        [Vector2::new(-1.0, -1.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)]
    }
}

impl<T> NodalBasis<T, 3> for Tri3Lagrange
where
    T: Real,
{
    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn nodes(&self) -> Matrix2x3<T> {
        Matrix2x3::new(
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    fn evaluate_basis(&self, xi: &Point2<T>) -> Matrix1x3<T> {
        let [l0, l1, l2] = Self::barycentric(xi);
        Matrix1x3::new(l0, l1, l2)
    }

    fn gradients(&self, _: &Point2<T>) -> Matrix2x3<T> {
        Matrix2x3::from_columns(&Self::barycentric_gradients())
    }
}

impl_scalar_reference_element_for_nodal!(
    Tri3Lagrange,
    nodes = 3,
    shape = ReferenceShape::Triangle,
    degree = 1,
    per_codim = [0, 0, 1]
);

/// Quadratic Lagrangian shape functions on the reference triangle.
///
/// Shape functions 0-2 belong to the vertices and 3-5 to the midpoints of the edges
/// (0, 1), (1, 2) and (2, 0).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Tri6Lagrange;

impl<T> NodalBasis<T, 6> for Tri6Lagrange
where
    T: Real,
{
    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn nodes(&self) -> Matrix2x6<T> {
        Matrix2x6::new(
            0.0, 1.0, 0.0, 0.5, 0.5, 0.0,
            0.0, 0.0, 1.0, 0.0, 0.5, 0.5,
        )
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate_basis(&self, xi: &Point2<T>) -> Matrix1x6<T> {
        let [l0, l1, l2] = Tri3Lagrange::barycentric(xi);
        Matrix1x6::from_row_slice(&[
            l0 * (2.0 * l0 - 1.0),
            l1 * (2.0 * l1 - 1.0),
            l2 * (2.0 * l2 - 1.0),
            4.0 * l0 * l1,
            4.0 * l1 * l2,
            4.0 * l2 * l0,
        ])
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn gradients(&self, xi: &Point2<T>) -> Matrix2x6<T> {
        let l = Tri3Lagrange::barycentric(xi);
        let g = Tri3Lagrange::barycentric_gradients::<T>();
        let vertex = |i: usize| g[i] * (4.0 * l[i] - 1.0);
        let edge = |a: usize, b: usize| (g[b] * l[a] + g[a] * l[b]) * 4.0;
        Matrix2x6::from_columns(&[vertex(0), vertex(1), vertex(2), edge(0, 1), edge(1, 2), edge(2, 0)])
    }
}

impl_scalar_reference_element_for_nodal!(
    Tri6Lagrange,
    nodes = 6,
    shape = ReferenceShape::Triangle,
    degree = 2,
    per_codim = [0, 1, 1]
);
