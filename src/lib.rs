//! Local element computations for Lagrangian finite elements on hybrid meshes.
//!
//! Given one reference finite element for triangles and one for quadrilaterals, a
//! [`LocalComputationPreprocessor`](assembly::local::LocalComputationPreprocessor) checks that
//! the two spaces agree on the degrees of freedom attached to shared vertices and edges, and
//! caches shape function values and gradients at the quadrature points of each reference cell.
//! An [`EllipticElementAssembler`](assembly::local::EllipticElementAssembler) then combines the
//! cached data with the [`Geometry`](geometry::Geometry) of a concrete cell to produce the local
//! stiffness matrix, mass matrix and load vector of a second-order elliptic problem.
use nalgebra::RealField;

pub mod assembly;
pub mod diagnostics;
pub mod element;
pub mod error;
pub mod geometry;
pub mod quadrature;
pub mod reference_shape;

#[cfg(feature = "proptest")]
pub mod proptest;

pub extern crate nalgebra;

pub use reference_shape::ReferenceShape;

/// Real scalar types supported by the library.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}
