//! Rules on the reference triangle parametrized by polynomial total-order accuracy.
use crate::quadrature::{map_from_biunit, Rule};
use fenris_quadrature::polyquad;

/// A rule on the unit triangle integrating polynomials of total degree `strength` exactly.
///
/// The polyquad rules have positive weights and interior points. They are defined on the
/// triangle with vertices `(-1, -1)`, `(1, -1)` and `(-1, 1)`, which the affine map
/// `x -> (x + 1) / 2` takes onto the unit triangle.
pub fn triangle(strength: usize) -> Result<Rule<2>, fenris_quadrature::Error> {
    polyquad::triangle(strength).map(map_from_biunit::<2>)
}
