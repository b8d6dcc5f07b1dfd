//! Quadrature rules on the reference cells.
//!
//! The rules come from `fenris-quadrature` in double precision on the biunit domains
//! `[-1, 1]^d` and the triangle with vertices `(-1, -1)`, `(1, -1)`, `(-1, 1)`. They are mapped
//! onto the unit segment, unit square and unit triangle and then converted to the scalar type
//! of the caller, see [`make_quadrature_rule`].
use crate::{Real, ReferenceShape};
use itertools::Itertools;
use nalgebra::{convert, DMatrix, DVector, Scalar};
use std::fmt;
use std::fmt::{Display, Formatter};

pub mod tensor;
pub mod total_order;
pub mod univariate;

/// The largest polynomial order for which [`make_quadrature_rule`] provides a rule on every
/// reference shape. It is the highest strength of the polyquad triangle rules.
pub const MAX_QUADRATURE_ORDER: usize = 20;

/// A D-dimensional rule in double precision, given as weights and points.
pub type Rule<const D: usize> = fenris_quadrature::Rule<D>;

/// Errors returned by quadrature methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum QuadratureError {
    /// There is no rule of the requested order for the given shape.
    #[error("no quadrature rule of order {order} is available for the reference {shape}")]
    NoRuleAvailable { shape: ReferenceShape, order: usize },
}

/// A quadrature rule on a reference cell.
///
/// Points are stored as the columns of a `dim x n` matrix, where `dim` is the dimension of
/// the reference cell and `n` the number of points.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureRule<T: Scalar> {
    shape: ReferenceShape,
    order: usize,
    points: DMatrix<T>,
    weights: DVector<T>,
}

impl<T: Real> QuadratureRule<T> {
    /// Construct a rule from its points and weights.
    ///
    /// # Panics
    ///
    /// Panics if the number of rows in `points` differs from the dimension of `shape`, or
    /// if the number of points and weights differ.
    pub fn from_points_and_weights(
        shape: ReferenceShape,
        order: usize,
        points: DMatrix<T>,
        weights: DVector<T>,
    ) -> Self {
        assert_eq!(
            points.nrows(),
            shape.dimension(),
            "Point dimension must match the dimension of the reference shape."
        );
        assert_eq!(
            points.ncols(),
            weights.len(),
            "Number of points and weights must be the same."
        );
        Self {
            shape,
            order,
            points,
            weights,
        }
    }

    pub fn ref_el(&self) -> ReferenceShape {
        self.shape
    }

    /// The polynomial order the rule integrates exactly.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn points(&self) -> &DMatrix<T> {
        &self.points
    }

    pub fn weights(&self) -> &DVector<T> {
        &self.weights
    }

    pub fn num_points(&self) -> usize {
        self.weights.len()
    }

    /// Approximates the integral of the given function over the reference cell.
    pub fn integrate(&self, f: impl Fn(&DVector<T>) -> T) -> T {
        self.points
            .column_iter()
            .zip(self.weights.iter())
            .fold(T::zero(), |integral, (point, &weight)| {
                integral + weight * f(&point.into_owned())
            })
    }
}

impl<T: Real> Display for QuadratureRule<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} rule of order {} with {} points:",
            self.shape,
            self.order,
            self.num_points()
        )?;
        for (point, weight) in self.points.column_iter().zip(self.weights.iter()) {
            writeln!(f, "  ({}) -> {}", point.iter().join(", "), weight)?;
        }
        Ok(())
    }
}

/// Maps a rule on a biunit domain onto the corresponding unit domain.
///
/// Points are mapped by `x -> (x + 1) / 2` in every coordinate, which scales volumes by `2^-D`.
pub(crate) fn map_from_biunit<const D: usize>(rule: Rule<D>) -> Rule<D> {
    let (weights, points) = rule;
    let scale = 0.5f64.powi(D as i32);
    let weights = weights.into_iter().map(|w| scale * w).collect();
    let points = points
        .into_iter()
        .map(|p| p.map(|x| 0.5 * (x + 1.0)))
        .collect();
    (weights, points)
}

fn convert_rule<T: Real, const D: usize>(shape: ReferenceShape, order: usize, rule: Rule<D>) -> QuadratureRule<T> {
    let (weights, points) = rule;
    let n = weights.len();
    let points = DMatrix::from_fn(D, n, |i, j| convert(points[j][i]));
    let weights = DVector::from_iterator(n, weights.into_iter().map(convert));
    QuadratureRule::from_points_and_weights(shape, order, points, weights)
}

/// Returns a quadrature rule of the given polynomial order for the reference shape.
///
/// On the triangle the rule integrates polynomials of total degree up to `order` exactly. On
/// the segment and the square it integrates polynomials of degree up to `order` in each
/// variable. The rule for the point has a single (empty) point with unit weight.
///
/// Rules are deterministic: the same arguments always produce the same points and weights.
pub fn make_quadrature_rule<T: Real>(
    shape: ReferenceShape,
    order: usize,
) -> Result<QuadratureRule<T>, QuadratureError> {
    if order > MAX_QUADRATURE_ORDER {
        return Err(QuadratureError::NoRuleAvailable { shape, order });
    }

    let num_gauss_points = univariate::num_points_for_order(order);
    let rule = match shape {
        ReferenceShape::Point => convert_rule::<T, 0>(shape, order, (vec![1.0], vec![[]])),
        ReferenceShape::Segment => convert_rule(shape, order, univariate::gauss(num_gauss_points)),
        ReferenceShape::Triangle => {
            let rule = total_order::triangle(order).map_err(|_| QuadratureError::NoRuleAvailable { shape, order })?;
            convert_rule(shape, order, rule)
        }
        ReferenceShape::Quadrilateral => convert_rule(shape, order, tensor::quadrilateral_gauss(num_gauss_points)),
    };
    Ok(rule)
}
