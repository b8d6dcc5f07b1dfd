use super::{Cell, HybridPatch};
use fenris_lagrange::assembly::local::{
    Constant, EllipticCoefficients, EllipticElementAssembler, LocalComputationPreprocessor, LocalElementMatrices,
};
use fenris_lagrange::element::{NodalBasis, Quad4Lagrange, Quad9Lagrange, Tri3Lagrange, Tri6Lagrange};
use fenris_lagrange::error::ElementMatrixError;
use fenris_lagrange::geometry::Geometry;
use itertools::izip;
use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use std::collections::BTreeMap;

fn reference_nodes<E, const N: usize>(element: &E) -> DMatrix<f64>
where
    E: NodalBasis<f64, N>,
{
    let nodes = element.nodes();
    DMatrix::from_column_slice(2, N, nodes.as_slice())
}

/// A continuous Lagrangian space on the hybrid patch.
struct Space {
    preprocessor: LocalComputationPreprocessor<f64>,
    tria_nodes: DMatrix<f64>,
    quad_nodes: DMatrix<f64>,
    quadratic: bool,
}

impl Space {
    fn linear() -> Self {
        Self {
            preprocessor: LocalComputationPreprocessor::new(&Tri3Lagrange, &Quad4Lagrange, 0).unwrap(),
            tria_nodes: reference_nodes(&Tri3Lagrange),
            quad_nodes: reference_nodes(&Quad4Lagrange),
            quadratic: false,
        }
    }

    fn quadratic() -> Self {
        Self {
            preprocessor: LocalComputationPreprocessor::new(&Tri6Lagrange, &Quad9Lagrange, 0).unwrap(),
            tria_nodes: reference_nodes(&Tri6Lagrange),
            quad_nodes: reference_nodes(&Quad9Lagrange),
            quadratic: true,
        }
    }

    fn all() -> [Self; 2] {
        [Self::linear(), Self::quadratic()]
    }
}

/// Global numbering of the degrees of freedom.
///
/// Vertices keep their indices. Quadratic spaces add one degree of freedom per edge and one per
/// quadrilateral interior.
struct DofMap {
    cell_dofs: Vec<Vec<usize>>,
    num_dofs: usize,
    interior: Vec<bool>,
}

impl DofMap {
    fn new(patch: &HybridPatch, quadratic: bool) -> Self {
        let mut next = patch.vertices.len();
        // (id, number of cells sharing the edge)
        let mut edges = BTreeMap::new();
        let mut cell_dofs = Vec::new();
        for cell in &patch.cells {
            let vertices = cell.vertices();
            let mut dofs = vertices.to_vec();
            if quadratic {
                let n = vertices.len();
                for i in 0..n {
                    let (a, b) = (vertices[i], vertices[(i + 1) % n]);
                    let entry = edges.entry((a.min(b), a.max(b))).or_insert_with(|| {
                        next += 1;
                        (next - 1, 0)
                    });
                    entry.1 += 1;
                    dofs.push(entry.0);
                }
            }
            cell_dofs.push(dofs);
        }
        if quadratic {
            for (cell, dofs) in izip!(&patch.cells, &mut cell_dofs) {
                if let Cell::Quad(_) = cell {
                    dofs.push(next);
                    next += 1;
                }
            }
        }

        let mut interior = vec![true; next];
        for (index, flag) in interior.iter_mut().take(patch.vertices.len()).enumerate() {
            *flag = index == HybridPatch::INTERIOR_VERTEX;
        }
        for &(id, count) in edges.values() {
            interior[id] = count > 1;
        }

        Self {
            cell_dofs,
            num_dofs: next,
            interior,
        }
    }
}

fn compute_serial(
    assembler: &EllipticElementAssembler<f64>,
    geometries: &[Box<dyn Geometry<f64>>],
) -> Result<Vec<LocalElementMatrices<f64>>, ElementMatrixError> {
    geometries
        .iter()
        .map(|geometry| assembler.compute(geometry.as_ref()))
        .collect()
}

fn compute_parallel(
    assembler: &EllipticElementAssembler<f64>,
    geometries: &[Box<dyn Geometry<f64>>],
) -> Result<Vec<LocalElementMatrices<f64>>, ElementMatrixError> {
    geometries
        .par_iter()
        .map(|geometry| assembler.compute(geometry.as_ref()))
        .collect()
}

fn assemble_global(dof_map: &DofMap, locals: &[LocalElementMatrices<f64>]) -> LocalElementMatrices<f64> {
    let n = dof_map.num_dofs;
    let mut global = LocalElementMatrices {
        stiffness: DMatrix::zeros(n, n),
        mass: DMatrix::zeros(n, n),
        load: DVector::zeros(n),
    };
    for (dofs, local) in izip!(&dof_map.cell_dofs, locals) {
        for (a, &i) in dofs.iter().enumerate() {
            global.load[i] += local.load[a];
            for (b, &j) in dofs.iter().enumerate() {
                global.stiffness[(i, j)] += local.stiffness[(a, b)];
                global.mass[(i, j)] += local.mass[(a, b)];
            }
        }
    }
    global
}

/// Global coordinates of every degree of freedom, checking that cells sharing a degree of
/// freedom place it at the same point.
fn node_positions(space: &Space, patch: &HybridPatch, dof_map: &DofMap) -> DMatrix<f64> {
    let mut positions: Vec<Option<DVector<f64>>> = vec![None; dof_map.num_dofs];
    for (cell, geometry, dofs) in izip!(&patch.cells, patch.geometries(), &dof_map.cell_dofs) {
        let nodes = match cell {
            Cell::Tri(_) => &space.tria_nodes,
            Cell::Quad(_) => &space.quad_nodes,
        };
        let global = geometry.global(nodes);
        assert_eq!(global.ncols(), dofs.len());
        for (column, &dof) in izip!(global.column_iter(), dofs) {
            match &positions[dof] {
                Some(existing) => assert_matrix_eq!(existing.column(0), column, comp = abs, tol = 1e-14),
                None => positions[dof] = Some(column.into_owned()),
            }
        }
    }
    let columns: Vec<_> = positions
        .into_iter()
        .map(|p| p.expect("Every degree of freedom belongs to a cell"))
        .collect();
    DMatrix::from_columns(&columns)
}

fn unit_coefficients<'a>() -> EllipticCoefficients<'a, f64> {
    EllipticCoefficients::laplace()
        .with_reaction(Constant(1.0))
        .with_source(Constant(1.0))
}

#[test]
fn parallel_and_serial_cell_computations_agree() {
    let patch = HybridPatch::new();
    let geometries = patch.geometries();
    for space in Space::all() {
        let coefficients = unit_coefficients().with_reaction(|x: &DVector<f64>| 1.0 + x[0] * x[1]);
        let assembler = EllipticElementAssembler::new(&space.preprocessor, coefficients);
        let serial = compute_serial(&assembler, &geometries).unwrap();
        let parallel = compute_parallel(&assembler, &geometries).unwrap();
        assert_eq!(serial, parallel);
    }
}

#[test]
fn global_matrices_have_expected_structure() {
    let patch = HybridPatch::new();
    let geometries = patch.geometries();
    for space in Space::all() {
        let dof_map = DofMap::new(&patch, space.quadratic);
        let assembler = EllipticElementAssembler::new(&space.preprocessor, unit_coefficients());
        let locals = compute_serial(&assembler, &geometries).unwrap();
        let global = assemble_global(&dof_map, &locals);

        let n = dof_map.num_dofs;
        let ones = DVector::repeat(n, 1.0);
        assert_matrix_eq!(&global.stiffness * &ones, DVector::zeros(n), comp = abs, tol = 1e-12);
        assert_matrix_eq!(global.stiffness, global.stiffness.transpose(), comp = abs, tol = 1e-12);
        assert_matrix_eq!(global.mass, global.mass.transpose(), comp = abs, tol = 1e-12);
        assert_scalar_eq!(ones.dot(&(&global.mass * &ones)), HybridPatch::AREA, comp = abs, tol = 1e-12);
        assert_scalar_eq!(global.load.sum(), HybridPatch::AREA, comp = abs, tol = 1e-12);
    }
}

#[test]
fn degree_of_freedom_counts() {
    let patch = HybridPatch::new();
    let linear = DofMap::new(&patch, false);
    assert_eq!(linear.num_dofs, 9);
    assert_eq!(linear.interior.iter().filter(|&&flag| flag).count(), 1);

    // 9 vertices, 13 edges and 3 quadrilateral interiors
    let quadratic = DofMap::new(&patch, true);
    assert_eq!(quadratic.num_dofs, 25);
    // The interior vertex, 5 interior edges and 3 quadrilateral interiors
    assert_eq!(quadratic.interior.iter().filter(|&&flag| flag).count(), 9);
}

#[test]
fn linear_functions_pass_patch_test() {
    let patch = HybridPatch::new();
    let geometries = patch.geometries();
    for space in Space::all() {
        let dof_map = DofMap::new(&patch, space.quadratic);
        let positions = node_positions(&space, &patch, &dof_map);
        let u = DVector::from_iterator(
            dof_map.num_dofs,
            positions
                .column_iter()
                .map(|x| 1.0 + 2.0 * x[0] - 3.0 * x[1]),
        );

        let assembler = EllipticElementAssembler::new(&space.preprocessor, EllipticCoefficients::laplace());
        let locals = compute_serial(&assembler, &geometries).unwrap();
        let residual = &assemble_global(&dof_map, &locals).stiffness * &u;
        for (r, &interior) in izip!(residual.iter(), &dof_map.interior) {
            if interior {
                assert_scalar_eq!(*r, 0.0, comp = abs, tol = 1e-12);
            }
        }

        // The Dirichlet energy of u is |(2, -3)|^2 times the area
        let energy: f64 = izip!(&locals, &dof_map.cell_dofs)
            .map(|(local, dofs)| {
                let u_local = DVector::from_iterator(dofs.len(), dofs.iter().map(|&i| u[i]));
                u_local.dot(&(&local.stiffness * &u_local))
            })
            .sum();
        assert_scalar_eq!(energy, 13.0 * HybridPatch::AREA, comp = abs, tol = 1e-11);
    }
}

#[test]
fn mass_matrix_integrates_products_exactly() {
    let patch = HybridPatch::new();
    let geometries = patch.geometries();
    for space in Space::all() {
        let dof_map = DofMap::new(&patch, space.quadratic);
        let positions = node_positions(&space, &patch, &dof_map);
        let x = DVector::from_iterator(dof_map.num_dofs, positions.row(0).iter().copied());
        let ones = DVector::repeat(dof_map.num_dofs, 1.0);

        let coefficients = EllipticCoefficients::new().with_reaction(Constant(1.0));
        let assembler = EllipticElementAssembler::new(&space.preprocessor, coefficients);
        let locals = compute_serial(&assembler, &geometries).unwrap();
        let mass = assemble_global(&dof_map, &locals).mass;

        // ∫ x dx over [0, 2]^2
        assert_scalar_eq!(ones.dot(&(&mass * &x)), 4.0, comp = abs, tol = 1e-12);
    }
}
