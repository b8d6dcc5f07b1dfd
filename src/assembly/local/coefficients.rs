use crate::nalgebra::{DMatrix, DVector};
use crate::Real;

/// A scalar coefficient field, evaluated at global points.
///
/// Implemented for closures `Fn(&DVector<T>) -> T`.
pub trait ScalarCoefficient<T: Real>: Send + Sync {
    fn evaluate(&self, x: &DVector<T>) -> T;
}

/// A tensor-valued coefficient field, evaluated at global points.
///
/// At a point in a space of dimension `d`, the tensor must be a `d x d` matrix. Implemented for
/// closures `Fn(&DVector<T>) -> DMatrix<T>`.
pub trait TensorCoefficient<T: Real>: Send + Sync {
    fn evaluate(&self, x: &DVector<T>) -> DMatrix<T>;
}

impl<T, F> ScalarCoefficient<T> for F
where
    T: Real,
    F: Fn(&DVector<T>) -> T + Send + Sync,
{
    fn evaluate(&self, x: &DVector<T>) -> T {
        self(x)
    }
}

impl<T, F> TensorCoefficient<T> for F
where
    T: Real,
    F: Fn(&DVector<T>) -> DMatrix<T> + Send + Sync,
{
    fn evaluate(&self, x: &DVector<T>) -> DMatrix<T> {
        self(x)
    }
}

/// A coefficient that takes the same value everywhere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Constant<T>(pub T);

impl<T: Real> ScalarCoefficient<T> for Constant<T> {
    fn evaluate(&self, _: &DVector<T>) -> T {
        self.0
    }
}

impl<T: Real> TensorCoefficient<T> for Constant<DMatrix<T>> {
    fn evaluate(&self, _: &DVector<T>) -> DMatrix<T> {
        self.0.clone()
    }
}

/// An isotropic tensor field, the scalar field `C` times the identity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Isotropic<C>(pub C);

impl<T, C> TensorCoefficient<T> for Isotropic<C>
where
    T: Real,
    C: ScalarCoefficient<T>,
{
    fn evaluate(&self, x: &DVector<T>) -> DMatrix<T> {
        DMatrix::from_diagonal_element(x.len(), x.len(), self.0.evaluate(x))
    }
}

/// The coefficients of the second-order elliptic problem
///
/// ```text
/// -div(α grad u) + γ u = f.
/// ```
///
/// Each coefficient is optional. An absent coefficient contributes nothing: without α the
/// stiffness matrix is zero, without γ the mass matrix is zero and without f the load vector is
/// zero.
pub struct EllipticCoefficients<'a, T: Real> {
    diffusion: Option<Box<dyn TensorCoefficient<T> + 'a>>,
    reaction: Option<Box<dyn ScalarCoefficient<T> + 'a>>,
    source: Option<Box<dyn ScalarCoefficient<T> + 'a>>,
}

impl<'a, T: Real> Default for EllipticCoefficients<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Real> EllipticCoefficients<'a, T> {
    /// Coefficients with all terms absent.
    pub fn new() -> Self {
        Self {
            diffusion: None,
            reaction: None,
            source: None,
        }
    }

    /// The Laplace operator, i.e. `α = I` and no other terms.
    pub fn laplace() -> Self {
        Self::new().with_diffusion(Isotropic(Constant(T::one())))
    }

    pub fn with_diffusion(mut self, diffusion: impl TensorCoefficient<T> + 'a) -> Self {
        self.diffusion = Some(Box::new(diffusion));
        self
    }

    pub fn with_reaction(mut self, reaction: impl ScalarCoefficient<T> + 'a) -> Self {
        self.reaction = Some(Box::new(reaction));
        self
    }

    pub fn with_source(mut self, source: impl ScalarCoefficient<T> + 'a) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn diffusion(&self) -> Option<&(dyn TensorCoefficient<T> + 'a)> {
        self.diffusion.as_deref()
    }

    pub fn reaction(&self) -> Option<&(dyn ScalarCoefficient<T> + 'a)> {
        self.reaction.as_deref()
    }

    pub fn source(&self) -> Option<&(dyn ScalarCoefficient<T> + 'a)> {
        self.source.as_deref()
    }
}
