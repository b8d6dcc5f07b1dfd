//! Cell-local computations.
//!
//! A [`LocalComputationPreprocessor`] is constructed once per discretization. It validates that
//! the triangle and quadrilateral finite element spaces are compatible and caches reference
//! data for each cell shape in a [`ShapeFunctionCache`]. The cache is read-only afterwards, so a
//! single preprocessor can be shared by any number of [`EllipticElementAssembler`]s, also across
//! threads.
mod coefficients;
mod elliptic;
mod preprocessor;
mod shape_function_cache;

pub use coefficients::*;
pub use elliptic::*;
pub use preprocessor::*;
pub use shape_function_cache::*;
