//! Error types for local element computations.
use crate::quadrature::QuadratureError;
use crate::ReferenceShape;

/// The triangle and quadrilateral finite element spaces cannot be combined on a hybrid mesh.
///
/// This is a construction-time error: the spaces disagree on the degrees of freedom attached
/// to entities the two cell shapes can share, so a global numbering built on top of them
/// would be inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum IncompatibleSpacesError {
    #[error("both finite elements must be two-dimensional, got dimension {tria} (triangle space) and {quad} (quadrilateral space)")]
    Dimension { tria: usize, quad: usize },
    #[error("expected a finite element on the reference {expected}, got one on the reference {actual}")]
    ReferenceShape {
        expected: ReferenceShape,
        actual: ReferenceShape,
    },
    #[error("exactly one shape function per vertex is required, the {shape} space has {count} on vertex {vertex}")]
    VertexShapeFunctions {
        shape: ReferenceShape,
        vertex: usize,
        count: usize,
    },
    #[error("#RSF mismatch on edges {tria} <-> {quad} (triangle edge {tria_edge}, quadrilateral edge {quad_edge})")]
    EdgeShapeFunctions {
        tria_edge: usize,
        quad_edge: usize,
        tria: usize,
        quad: usize,
    },
}

/// Errors raised while constructing a
/// [`LocalComputationPreprocessor`](crate::assembly::local::LocalComputationPreprocessor).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PreprocessorError {
    #[error("incompatible finite element spaces: {0}")]
    Incompatible(#[from] IncompatibleSpacesError),
    /// A finite element returned evaluations that disagree with its own shape function count
    /// or with the number of quadrature points.
    #[error("the {shape} finite element produced {actual} {quantity} where {expected} were expected")]
    InconsistentEvaluation {
        shape: ReferenceShape,
        quantity: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Quadrature(#[from] QuadratureError),
}

/// Errors raised while computing the local matrices of a single cell.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ElementMatrixError {
    /// The integration element is zero or negative, i.e. the cell is degenerate or inverted.
    #[error("degenerate {shape} cell: integration element {integration_element} at quadrature point {quadrature_point}")]
    DegenerateGeometry {
        shape: ReferenceShape,
        quadrature_point: usize,
        integration_element: f64,
    },
    #[error("diffusion tensor must be {expected}x{expected}, got {rows}x{cols}")]
    DiffusionTensorShape { expected: usize, rows: usize, cols: usize },
    #[error("no reference data is cached for cells of shape {shape}")]
    UnsupportedCell { shape: ReferenceShape },
}

/// Errors raised when constructing geometries or querying their sub-geometries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GeometryError {
    #[error("a {shape} geometry needs {expected_cols} vertex columns with at least {min_rows} coordinates each, got a {rows}x{cols} matrix")]
    VertexCoordinates {
        shape: ReferenceShape,
        expected_cols: usize,
        min_rows: usize,
        rows: usize,
        cols: usize,
    },
    #[error("the reference {shape} has no sub-entity {index} of codimension {codim}")]
    NoSubEntity {
        shape: ReferenceShape,
        codim: usize,
        index: usize,
    },
}
