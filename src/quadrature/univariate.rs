//! Gauss-Legendre rules on the reference segment `[0, 1]`.
use crate::quadrature::{map_from_biunit, Rule};
use fenris_quadrature::univariate;

/// The number of Gauss points needed to integrate univariate polynomials of the given
/// degree exactly.
///
/// An `n`-point Gauss rule is exact for polynomials of degree up to `2 n - 1`.
pub fn num_points_for_order(order: usize) -> usize {
    order / 2 + 1
}

/// Gauss-Legendre quadrature with the given number of points on `[0, 1]`.
///
/// Points are returned in ascending order.
///
/// # Panics
///
/// Panics if zero points are requested.
pub fn gauss(num_points: usize) -> Rule<1> {
    let (weights, points) = map_from_biunit(univariate::gauss(num_points));
    let mut pairs: Vec<_> = weights.into_iter().zip(points).collect();
    pairs.sort_by(|(_, a), (_, b)| a[0].total_cmp(&b[0]));
    pairs.into_iter().unzip()
}
