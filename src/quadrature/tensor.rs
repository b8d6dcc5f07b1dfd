//! Tensor product rules on the reference square.
use crate::quadrature::{map_from_biunit, Rule};
use fenris_quadrature::tensor;

/// A Gauss rule on the unit square, formed as the tensor product of two univariate
/// Gauss rules with the given number of points per dimension.
pub fn quadrilateral_gauss(num_points_per_dim: usize) -> Rule<2> {
    map_from_biunit(tensor::quadrilateral_gauss(num_points_per_dim))
}
