use crate::element::{impl_scalar_reference_element_for_nodal, NodalBasis};
use crate::nalgebra::{Matrix1x4, Matrix2x4, Point2, SMatrix, Vector2};
use crate::{Real, ReferenceShape};
use numeric_literals::replace_float_literals;

/// Bilinear Lagrangian shape functions on the unit square.
///
/// The unit square has corners (0, 0), (1, 0), (1, 1), (0, 1), with one shape function per
/// vertex.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Quad4Lagrange;

impl<T> NodalBasis<T, 4> for Quad4Lagrange
where
    T: Real,
{
    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn nodes(&self) -> Matrix2x4<T> {
        Matrix2x4::new(
            0.0, 1.0, 1.0, 0.0,
            0.0, 0.0, 1.0, 1.0,
        )
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate_basis(&self, xi: &Point2<T>) -> Matrix1x4<T> {
        let (x, y) = (xi.x, xi.y);
        Matrix1x4::new(
            (1.0 - x) * (1.0 - y),
            x * (1.0 - y),
            x * y,
            (1.0 - x) * y,
        )
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn gradients(&self, xi: &Point2<T>) -> Matrix2x4<T> {
        let (x, y) = (xi.x, xi.y);
        Matrix2x4::new(
            y - 1.0, 1.0 - y, y, -y,
            x - 1.0, -x, x, 1.0 - x,
        )
    }
}

impl_scalar_reference_element_for_nodal!(
    Quad4Lagrange,
    nodes = 4,
    shape = ReferenceShape::Quadrilateral,
    degree = 1,
    per_codim = [0, 0, 1]
);

/// Biquadratic Lagrangian shape functions on the unit square.
///
/// Shape functions 0-3 belong to the vertices, 4-7 to the midpoints of the edges
/// (0, 1), (1, 2), (2, 3), (3, 0) and shape function 8 to the center of the square.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Quad9Lagrange;

/// Which of the three univariate quadratics each shape function uses in x and y.
///
/// Index 0 is the quadratic that is one at t = 0, index 1 the one that is one at t = 1 and
/// index 2 the one that is one at t = 1/2.
const QUAD9_FACTORS: [(usize, usize); 9] = [
    (0, 0),
    (1, 0),
    (1, 1),
    (0, 1),
    (2, 0),
    (1, 2),
    (2, 1),
    (0, 2),
    (2, 2),
];

/// Univariate quadratic Lagrange polynomials on [0, 1] and their derivatives.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
fn quadratic_lagrange<T: Real>(t: T) -> ([T; 3], [T; 3]) {
    let values = [(1.0 - t) * (1.0 - 2.0 * t), t * (2.0 * t - 1.0), 4.0 * t * (1.0 - t)];
    let derivatives = [4.0 * t - 3.0, 4.0 * t - 1.0, 4.0 - 8.0 * t];
    (values, derivatives)
}

impl<T> NodalBasis<T, 9> for Quad9Lagrange
where
    T: Real,
{
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn nodes(&self) -> SMatrix<T, 2, 9> {
        let coord = [0.0, 1.0, 0.5];
        SMatrix::from_fn(|i, j| {
            let (a, b) = QUAD9_FACTORS[j];
            if i == 0 {
                coord[a]
            } else {
                coord[b]
            }
        })
    }

    fn evaluate_basis(&self, xi: &Point2<T>) -> SMatrix<T, 1, 9> {
        let (lx, _) = quadratic_lagrange(xi.x);
        let (ly, _) = quadratic_lagrange(xi.y);
        SMatrix::from_fn(|_, j| {
            let (a, b) = QUAD9_FACTORS[j];
            lx[a] * ly[b]
        })
    }

    fn gradients(&self, xi: &Point2<T>) -> SMatrix<T, 2, 9> {
        let (lx, dx) = quadratic_lagrange(xi.x);
        let (ly, dy) = quadratic_lagrange(xi.y);
        let columns = QUAD9_FACTORS.map(|(a, b)| Vector2::new(dx[a] * ly[b], lx[a] * dy[b]));
        SMatrix::from_columns(&columns)
    }
}

impl_scalar_reference_element_for_nodal!(
    Quad9Lagrange,
    nodes = 9,
    shape = ReferenceShape::Quadrilateral,
    degree = 2,
    per_codim = [1, 1, 1]
);
