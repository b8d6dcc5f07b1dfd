use crate::assembly::local::{EllipticCoefficients, LocalComputationPreprocessor};
use crate::diagnostics::Channel;
use crate::error::ElementMatrixError;
use crate::geometry::Geometry;
use crate::nalgebra::{DMatrix, DVector};
use crate::Real;
use itertools::izip;

/// The local stiffness matrix, mass matrix and load vector of a single cell.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalElementMatrices<T: Real> {
    /// `S_ij = ∫ (grad φ_i)ᵀ α grad φ_j dx`.
    pub stiffness: DMatrix<T>,
    /// `M_ij = ∫ γ φ_i φ_j dx`.
    pub mass: DMatrix<T>,
    /// `b_i = ∫ f φ_i dx`.
    pub load: DVector<T>,
}

/// Computes local matrices of a second-order elliptic problem from the reference data cached in
/// a [`LocalComputationPreprocessor`].
///
/// The assembler holds no mutable state, so a single instance can compute the matrices of
/// different cells concurrently.
pub struct EllipticElementAssembler<'a, T: Real> {
    preprocessor: &'a LocalComputationPreprocessor<T>,
    coefficients: EllipticCoefficients<'a, T>,
}

impl<'a, T: Real> EllipticElementAssembler<'a, T> {
    pub fn new(preprocessor: &'a LocalComputationPreprocessor<T>, coefficients: EllipticCoefficients<'a, T>) -> Self {
        Self {
            preprocessor,
            coefficients,
        }
    }

    pub fn preprocessor(&self) -> &LocalComputationPreprocessor<T> {
        self.preprocessor
    }

    pub fn coefficients(&self) -> &EllipticCoefficients<'a, T> {
        &self.coefficients
    }

    /// Computes the local stiffness matrix, mass matrix and load vector of the cell with the
    /// given geometry.
    ///
    /// Contributions are accumulated in ascending order of quadrature points. The computation
    /// fails without producing any matrices if the cell shape has no cached reference data,
    /// if the integration element is not positive at some quadrature point, or if the
    /// diffusion tensor does not match the dimension of the cell's embedding space.
    ///
    /// Only the magnitude of the Jacobian determinant enters the integration element, so the
    /// orientation of the cell is irrelevant. A cell that folds over itself, such as a
    /// self-intersecting quadrilateral, is not detected unless the determinant vanishes at a
    /// quadrature point. Checking orientation and self-intersection is up to the caller.
    ///
    /// # Panics
    ///
    /// Panics if the geometry does not return one global point, one inverse Gramian and one
    /// integration element per quadrature point.
    #[allow(non_snake_case)]
    pub fn compute(&self, geometry: &dyn Geometry<T>) -> Result<LocalElementMatrices<T>, ElementMatrixError> {
        let shape = geometry.ref_el();
        let cache = self
            .preprocessor
            .cache(shape)
            .ok_or(ElementMatrixError::UnsupportedCell { shape })?;
        let rule = cache.quadrature_rule();
        let points = rule.points();

        let integration_elements = geometry.integration_element(points);
        assert_eq!(
            integration_elements.len(),
            rule.num_points(),
            "Geometry must return one integration element per point."
        );
        let degenerate = integration_elements
            .iter()
            .enumerate()
            // Also catches NaN
            .find(|&(_, &ie)| !(ie > T::zero()));
        if let Some((quadrature_point, &ie)) = degenerate {
            return Err(ElementMatrixError::DegenerateGeometry {
                shape,
                quadrature_point,
                integration_element: ie.to_subset().unwrap_or(f64::NAN),
            });
        }

        let global_points: Vec<DVector<T>> = geometry
            .global(points)
            .column_iter()
            .map(|x| x.into_owned())
            .collect();
        assert_eq!(
            global_points.len(),
            rule.num_points(),
            "Geometry must return one global point per point."
        );
        let inverse_gramians = geometry.jacobian_inverse_gramian(points);
        assert_eq!(
            inverse_gramians.len(),
            rule.num_points(),
            "Geometry must return one inverse Gramian per point."
        );

        let dim_global = geometry.dim_global();
        let diffusion_tensors = self
            .coefficients
            .diffusion()
            .map(|alpha| {
                global_points
                    .iter()
                    .map(|x| {
                        let tensor = alpha.evaluate(x);
                        if tensor.shape() == (dim_global, dim_global) {
                            Ok(tensor)
                        } else {
                            Err(ElementMatrixError::DiffusionTensorShape {
                                expected: dim_global,
                                rows: tensor.nrows(),
                                cols: tensor.ncols(),
                            })
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let n = cache.num_shape_functions();
        let mut stiffness = DMatrix::zeros(n, n);
        let mut mass = DMatrix::zeros(n, n);
        let mut load = DVector::zeros(n);

        let quadrature_data = izip!(
            rule.weights().iter(),
            integration_elements.iter(),
            &global_points,
            &inverse_gramians,
            cache.gradients()
        );
        for (q, (&w, &ie, x, jig, G_ref)) in quadrature_data.enumerate() {
            let scale = w * ie;
            let phi = cache.values_at(q);

            if let Some(tensors) = &diffusion_tensors {
                // Gradients in global coordinates, one column per shape function
                let G = jig * G_ref;
                let flux = &tensors[q] * &G;
                stiffness.gemm_tr(scale, &G, &flux, T::one());
            }
            if let Some(gamma) = self.coefficients.reaction() {
                mass.ger(scale * gamma.evaluate(x), &phi, &phi, T::one());
            }
            if let Some(f) = self.coefficients.source() {
                load.axpy(scale * f.evaluate(x), &phi, T::one());
            }
        }

        self.preprocessor
            .diagnostics()
            .emit(Channel::ElementMatrices, || {
                format!(
                    "{} cell element matrices:\nstiffness:{}mass:{}load:{}",
                    shape, stiffness, mass, load
                )
            });

        Ok(LocalElementMatrices { stiffness, mass, load })
    }

    /// The element matrix `S + M` of the bilinear form of `-div(α grad u) + γ u`.
    pub fn element_matrix(&self, geometry: &dyn Geometry<T>) -> Result<DMatrix<T>, ElementMatrixError> {
        let LocalElementMatrices { stiffness, mass, .. } = self.compute(geometry)?;
        Ok(stiffness + mass)
    }

    /// The element vector `b` of the right-hand side functional.
    pub fn element_vector(&self, geometry: &dyn Geometry<T>) -> Result<DVector<T>, ElementMatrixError> {
        Ok(self.compute(geometry)?.load)
    }
}
