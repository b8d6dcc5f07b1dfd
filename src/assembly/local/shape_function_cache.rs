use crate::diagnostics::{Channel, Diagnostics};
use crate::element::ScalarReferenceFiniteElement;
use crate::error::PreprocessorError;
use crate::nalgebra::{DMatrix, DVectorView};
use crate::quadrature::{make_quadrature_rule, QuadratureRule};
use crate::{Real, ReferenceShape};
use itertools::Itertools;

/// Shape function values and reference gradients at the quadrature points of one reference
/// shape.
///
/// With `n` shape functions and `m` quadrature points, the values are stored in an `n x m`
/// matrix whose entry `(i, j)` is the value of shape function `i` at quadrature point `j`. The
/// gradients are stored as one `dim x n` matrix per quadrature point, whose column `i` is the
/// reference gradient of shape function `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeFunctionCache<T: Real> {
    rule: QuadratureRule<T>,
    values: DMatrix<T>,
    gradients: Vec<DMatrix<T>>,
}

fn check_count(
    shape: ReferenceShape,
    quantity: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), PreprocessorError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PreprocessorError::InconsistentEvaluation {
            shape,
            quantity,
            expected,
            actual,
        })
    }
}

impl<T: Real> ShapeFunctionCache<T> {
    /// Evaluates the finite element at the quadrature points of a rule of the given order on
    /// its reference shape.
    ///
    /// Fails if no rule is available, or if the evaluations returned by the finite element are
    /// inconsistent with its shape function count, the number of quadrature points or the
    /// reference dimension.
    pub fn build(
        element: &dyn ScalarReferenceFiniteElement<T>,
        quadrature_order: usize,
        diagnostics: &Diagnostics,
    ) -> Result<Self, PreprocessorError> {
        let shape = element.ref_el();
        let rule = make_quadrature_rule::<T>(shape, quadrature_order)?;
        diagnostics.emit(Channel::QuadratureRule, || rule.to_string());

        let num_shape_functions = element.num_ref_shape_functions();
        let num_points = rule.num_points();
        let dim = shape.dimension();

        let value_rows = element.eval_reference_shape_functions(rule.points());
        check_count(shape, "shape function value rows", num_shape_functions, value_rows.len())?;
        for row in &value_rows {
            check_count(shape, "values per shape function", num_points, row.len())?;
        }
        let values = DMatrix::from_fn(num_shape_functions, num_points, |i, j| value_rows[i][j]);
        diagnostics.emit(Channel::ShapeFunctionValues, || {
            format!("{} shape function values at quadrature points:{}", shape, values)
        });

        let reference_gradients = element.gradients_reference_shape_functions(rule.points());
        check_count(shape, "shape function gradients", num_shape_functions, reference_gradients.len())?;
        for gradient in &reference_gradients {
            check_count(shape, "gradient components", dim, gradient.nrows())?;
            check_count(shape, "gradients per shape function", num_points, gradient.ncols())?;
        }
        // Transpose the per-function layout into one matrix per quadrature point
        let gradients: Vec<_> = (0..num_points)
            .map(|q| DMatrix::from_fn(dim, num_shape_functions, |d, i| reference_gradients[i][(d, q)]))
            .collect();
        diagnostics.emit(Channel::ShapeFunctionGradients, || {
            gradients
                .iter()
                .enumerate()
                .map(|(q, g)| format!("{} shape function gradients at quadrature point {}:{}", shape, q, g))
                .join("\n")
        });

        Ok(Self {
            rule,
            values,
            gradients,
        })
    }

    pub fn ref_el(&self) -> ReferenceShape {
        self.rule.ref_el()
    }

    pub fn quadrature_rule(&self) -> &QuadratureRule<T> {
        &self.rule
    }

    pub fn num_shape_functions(&self) -> usize {
        self.values.nrows()
    }

    pub fn num_quadrature_points(&self) -> usize {
        self.values.ncols()
    }

    /// The `n x m` matrix of shape function values at the quadrature points.
    pub fn values(&self) -> &DMatrix<T> {
        &self.values
    }

    /// The values of all shape functions at quadrature point `q`.
    pub fn values_at(&self, q: usize) -> DVectorView<T> {
        self.values.column(q)
    }

    /// The reference gradients, one `dim x n` matrix per quadrature point.
    pub fn gradients(&self) -> &[DMatrix<T>] {
        &self.gradients
    }

    pub fn gradients_at(&self, q: usize) -> &DMatrix<T> {
        &self.gradients[q]
    }
}
