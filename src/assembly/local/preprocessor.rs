use crate::assembly::local::ShapeFunctionCache;
use crate::diagnostics::{DiagnosticChannels, DiagnosticSink, Diagnostics, LogSink};
use crate::element::ScalarReferenceFiniteElement;
use crate::error::{IncompatibleSpacesError, PreprocessorError};
use crate::{Real, ReferenceShape};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::cmp::max;
use std::sync::Arc;

/// Selects the order of the quadrature rules used for both cell shapes.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadratureOrderPolicy {
    /// Twice the largest polynomial degree of the two finite element spaces.
    ///
    /// This is more than strictly necessary for the stiffness matrix on affine cells, and is
    /// meant to leave some room for the non-constant Jacobians of bilinear quadrilaterals. It
    /// is a heuristic rather than an exactness guarantee.
    #[default]
    DoubledDegree,
    /// A fixed quadrature order.
    Fixed(usize),
}

impl QuadratureOrderPolicy {
    /// The quadrature order for finite element spaces of the given (maximal) degree.
    pub fn resolve(&self, degree: usize) -> usize {
        match self {
            Self::DoubledDegree => 2 * degree,
            Self::Fixed(order) => *order,
        }
    }
}

/// Zero selects [`QuadratureOrderPolicy::DoubledDegree`], any other value is used as a fixed
/// order.
impl From<usize> for QuadratureOrderPolicy {
    fn from(order: usize) -> Self {
        match order {
            0 => Self::DoubledDegree,
            order => Self::Fixed(order),
        }
    }
}

/// Settings for [`LocalComputationPreprocessor`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorSettings {
    pub quadrature_order: QuadratureOrderPolicy,
    pub diagnostics: DiagnosticChannels,
}

/// Checks that a triangle and a quadrilateral finite element can be combined on a hybrid mesh.
///
/// Both elements must be two-dimensional and defined on the expected reference shape. Every
/// vertex must carry exactly one shape function, and every edge of either shape must carry the
/// same number of shape functions, so that the degrees of freedom on an edge shared by a
/// triangle and a quadrilateral agree.
pub fn check_compatibility<T: Real>(
    fe_tria: &dyn ScalarReferenceFiniteElement<T>,
    fe_quad: &dyn ScalarReferenceFiniteElement<T>,
) -> Result<(), IncompatibleSpacesError> {
    let (tria, quad) = (fe_tria.dimension(), fe_quad.dimension());
    if tria != 2 || quad != 2 {
        return Err(IncompatibleSpacesError::Dimension { tria, quad });
    }

    let elements = [
        (fe_tria, ReferenceShape::Triangle),
        (fe_quad, ReferenceShape::Quadrilateral),
    ];
    for (element, expected) in elements {
        let actual = element.ref_el();
        if actual != expected {
            return Err(IncompatibleSpacesError::ReferenceShape { expected, actual });
        }
    }

    for (element, shape) in elements {
        for vertex in 0..shape.num_sub_entities(2) {
            let count = element.num_ref_shape_functions_on(2, vertex);
            if count != 1 {
                return Err(IncompatibleSpacesError::VertexShapeFunctions { shape, vertex, count });
            }
        }
    }

    let edge_counts = |element: &dyn ScalarReferenceFiniteElement<T>| -> Vec<usize> {
        (0..element.ref_el().num_sub_entities(1))
            .map(|edge| element.num_ref_shape_functions_on(1, edge))
            .collect()
    };
    let tria_edges = edge_counts(fe_tria);
    let quad_edges = edge_counts(fe_quad);
    let mismatch = iproduct!(tria_edges.iter().enumerate(), quad_edges.iter().enumerate())
        .find(|((_, tria), (_, quad))| tria != quad);
    if let Some(((tria_edge, &tria), (quad_edge, &quad))) = mismatch {
        return Err(IncompatibleSpacesError::EdgeShapeFunctions {
            tria_edge,
            quad_edge,
            tria,
            quad,
        });
    }

    Ok(())
}

/// Reference data shared by the local computations on all cells of a hybrid
/// triangle/quadrilateral mesh.
///
/// The preprocessor keeps no reference to the finite elements it was built from. Once
/// constructed it is immutable.
#[derive(Debug, Clone)]
pub struct LocalComputationPreprocessor<T: Real> {
    quadrature_order: usize,
    degree: usize,
    tria: ShapeFunctionCache<T>,
    quad: ShapeFunctionCache<T>,
    diagnostics: Diagnostics,
}

impl<T: Real> LocalComputationPreprocessor<T> {
    /// Preprocesses the given pair of finite elements.
    ///
    /// A quadrature order of zero selects twice the largest polynomial degree of the two
    /// elements, see [`QuadratureOrderPolicy`].
    pub fn new(
        fe_tria: &dyn ScalarReferenceFiniteElement<T>,
        fe_quad: &dyn ScalarReferenceFiniteElement<T>,
        quadrature_order: usize,
    ) -> Result<Self, PreprocessorError> {
        Self::builder(fe_tria, fe_quad)
            .with_quadrature_order(QuadratureOrderPolicy::from(quadrature_order))
            .build()
    }

    pub fn builder<'a>(
        fe_tria: &'a dyn ScalarReferenceFiniteElement<T>,
        fe_quad: &'a dyn ScalarReferenceFiniteElement<T>,
    ) -> LocalComputationPreprocessorBuilder<'a, T> {
        LocalComputationPreprocessorBuilder {
            fe_tria,
            fe_quad,
            settings: PreprocessorSettings::default(),
            sink: Arc::new(LogSink),
        }
    }

    /// The order of the quadrature rules used for both shapes.
    pub fn quadrature_order(&self) -> usize {
        self.quadrature_order
    }

    /// The largest polynomial degree of the two finite elements.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The cached reference data for the given shape, if any.
    pub fn cache(&self, shape: ReferenceShape) -> Option<&ShapeFunctionCache<T>> {
        match shape {
            ReferenceShape::Triangle => Some(&self.tria),
            ReferenceShape::Quadrilateral => Some(&self.quad),
            ReferenceShape::Point | ReferenceShape::Segment => None,
        }
    }

    pub fn num_shape_functions(&self, shape: ReferenceShape) -> Option<usize> {
        self.cache(shape).map(ShapeFunctionCache::num_shape_functions)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

/// Builder for [`LocalComputationPreprocessor`].
#[derive(Debug)]
pub struct LocalComputationPreprocessorBuilder<'a, T: Real> {
    fe_tria: &'a dyn ScalarReferenceFiniteElement<T>,
    fe_quad: &'a dyn ScalarReferenceFiniteElement<T>,
    settings: PreprocessorSettings,
    sink: Arc<dyn DiagnosticSink>,
}

impl<'a, T: Real> LocalComputationPreprocessorBuilder<'a, T> {
    pub fn with_quadrature_order(mut self, order: impl Into<QuadratureOrderPolicy>) -> Self {
        self.settings.quadrature_order = order.into();
        self
    }

    pub fn with_settings(mut self, settings: PreprocessorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Use the channels and the sink of the given diagnostics.
    pub fn with_diagnostics(mut self, diagnostics: &Diagnostics) -> Self {
        self.settings.diagnostics = *diagnostics.channels();
        self.sink = Arc::clone(diagnostics.sink());
        self
    }

    pub fn with_diagnostic_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> Result<LocalComputationPreprocessor<T>, PreprocessorError> {
        check_compatibility(self.fe_tria, self.fe_quad)?;

        let degree = max(self.fe_tria.degree(), self.fe_quad.degree());
        let quadrature_order = self.settings.quadrature_order.resolve(degree);
        let diagnostics = Diagnostics::new(self.settings.diagnostics, self.sink);

        let tria = ShapeFunctionCache::build(self.fe_tria, quadrature_order, &diagnostics)?;
        let quad = ShapeFunctionCache::build(self.fe_quad, quadrature_order, &diagnostics)?;

        log::debug!(
            "Preprocessed local computations with quadrature order {}: \
             {} triangle quadrature points ({} shape functions), \
             {} quadrilateral quadrature points ({} shape functions)",
            quadrature_order,
            tria.num_quadrature_points(),
            tria.num_shape_functions(),
            quad.num_quadrature_points(),
            quad.num_shape_functions()
        );

        Ok(LocalComputationPreprocessor {
            quadrature_order,
            degree,
            tria,
            quad,
            diagnostics,
        })
    }
}
