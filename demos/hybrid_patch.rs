//! Computes the local matrices of a small hybrid triangle/quadrilateral patch.
//!
//! An optional path to a JSON file with `PreprocessorSettings` may be given as the first
//! argument. Diagnostics for enabled channels are printed to standard error.

use eyre::WrapErr;
use fenris_lagrange::assembly::local::{
    Constant, EllipticCoefficients, EllipticElementAssembler, LocalComputationPreprocessor, PreprocessorSettings,
};
use fenris_lagrange::diagnostics::{Channel, DiagnosticSink, Diagnostics};
use fenris_lagrange::element::{Quad9Lagrange, Tri6Lagrange};
use fenris_lagrange::geometry::{Geometry, QuadO1, TriaO1};
use nalgebra::{dvector, DMatrix, DVector, Point2};
use std::sync::Arc;

#[derive(Debug)]
struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn record(&self, channel: Channel, message: &str) {
        eprintln!("[{channel}] {message}");
    }
}

fn load_settings() -> eyre::Result<PreprocessorSettings> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).wrap_err_with(|| format!("failed to read settings from {path}"))?;
            serde_json::from_str(&json).wrap_err("failed to parse preprocessor settings")
        }
        None => Ok(PreprocessorSettings::default()),
    }
}

fn main() -> eyre::Result<()> {
    let settings = load_settings()?;
    let diagnostics = Diagnostics::new(settings.diagnostics, Arc::new(StderrSink));
    let preprocessor = LocalComputationPreprocessor::<f64>::builder(&Tri6Lagrange, &Quad9Lagrange)
        .with_quadrature_order(settings.quadrature_order)
        .with_diagnostics(&diagnostics)
        .build()?;

    let coefficients = EllipticCoefficients::new()
        .with_diffusion(|x: &DVector<f64>| DMatrix::from_diagonal(&dvector![1.0 + x[0], 1.0]))
        .with_reaction(Constant(0.5))
        .with_source(|x: &DVector<f64>| x[0] * x[1]);
    let assembler = EllipticElementAssembler::new(&preprocessor, coefficients);

    let cells: Vec<Box<dyn Geometry<f64>>> = vec![
        Box::new(QuadO1::from_vertices([
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.2, 0.9),
            Point2::new(0.0, 1.0),
        ])),
        Box::new(TriaO1::from_vertices([
            Point2::new(0.0, 1.0),
            Point2::new(1.2, 0.9),
            Point2::new(0.0, 2.0),
        ])),
    ];

    println!(
        "Quadrature order {} for polynomial degree {}",
        preprocessor.quadrature_order(),
        preprocessor.degree()
    );
    for (index, cell) in cells.iter().enumerate() {
        let matrices = assembler
            .compute(cell.as_ref())
            .wrap_err_with(|| format!("failed to compute matrices of cell {index}"))?;
        println!(
            "Cell {index} ({}): {} shape functions, trace(S) = {:.6}, sum(M) = {:.6}, sum(b) = {:.6}",
            cell.ref_el(),
            matrices.load.len(),
            matrices.stiffness.trace(),
            matrices.mass.sum(),
            matrices.load.sum()
        );
    }

    Ok(())
}
