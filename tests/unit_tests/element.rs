use fenris_lagrange::element::{
    NodalBasis, Quad4Lagrange, Quad9Lagrange, ScalarReferenceFiniteElement, Tri3Lagrange, Tri6Lagrange,
};
use fenris_lagrange::ReferenceShape;
use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use nalgebra::{DMatrix, Point2};
use proptest::prelude::*;

fn point_in_tri_ref_domain() -> impl Strategy<Value = Point2<f64>> {
    // Generate points x, y in [0, 1]^2 such that x + y <= 1
    (0.0..=1.0)
        .prop_flat_map(|x: f64| (Just(x), 0.0..=1.0 - x))
        .prop_map(|(x, y)| Point2::new(x, y))
}

fn point_in_quad_ref_domain() -> impl Strategy<Value = Point2<f64>> {
    let r = 0.0..=1.0;
    [r.clone(), r].prop_map(|[x, y]| Point2::new(x, y))
}

fn as_points(xi: &Point2<f64>) -> DMatrix<f64> {
    DMatrix::from_column_slice(2, 1, &[xi.x, xi.y])
}

/// Checks that shape function `i` is one at node `i` and zero at all other nodes.
fn assert_lagrange_property<E, const N: usize>(element: &E)
where
    E: NodalBasis<f64, N> + ScalarReferenceFiniteElement<f64>,
{
    let nodes = element.nodes();
    let points = DMatrix::from_column_slice(2, N, nodes.as_slice());
    let values = element.eval_reference_shape_functions(&points);
    assert_eq!(values.len(), N);
    let values = DMatrix::from_fn(N, N, |i, j| values[i][j]);
    assert_matrix_eq!(values, DMatrix::identity(N, N), comp = abs, tol = 1e-14);
}

fn assert_partition_of_unity(element: &dyn ScalarReferenceFiniteElement<f64>, xi: &Point2<f64>) {
    let points = as_points(xi);
    let values = element.eval_reference_shape_functions(&points);
    let sum: f64 = values.iter().map(|row| row[0]).sum();
    assert_scalar_eq!(sum, 1.0, comp = abs, tol = 1e-12);

    let gradients = element.gradients_reference_shape_functions(&points);
    let gradient_sum = gradients.iter().fold(DMatrix::zeros(2, 1), |acc, g| acc + g);
    assert_matrix_eq!(gradient_sum, DMatrix::zeros(2, 1), comp = abs, tol = 1e-12);
}

/// Compares gradients with central finite differences of the values.
fn assert_gradients_match_finite_differences(element: &dyn ScalarReferenceFiniteElement<f64>, xi: &Point2<f64>) {
    let h = 1e-6;
    let gradients = element.gradients_reference_shape_functions(&as_points(xi));
    for d in 0..2 {
        let mut forward = *xi;
        let mut backward = *xi;
        forward[d] += h;
        backward[d] -= h;
        let values_forward = element.eval_reference_shape_functions(&as_points(&forward));
        let values_backward = element.eval_reference_shape_functions(&as_points(&backward));
        for (i, gradient) in gradients.iter().enumerate() {
            let fd = (values_forward[i][0] - values_backward[i][0]) / (2.0 * h);
            assert_scalar_eq!(gradient[(d, 0)], fd, comp = abs, tol = 1e-7);
        }
    }
}

#[test]
fn lagrange_property_holds_at_nodes() {
    assert_lagrange_property::<_, 3>(&Tri3Lagrange);
    assert_lagrange_property::<_, 6>(&Tri6Lagrange);
    assert_lagrange_property::<_, 4>(&Quad4Lagrange);
    assert_lagrange_property::<_, 9>(&Quad9Lagrange);
}

#[test]
fn shape_function_counts_per_entity() {
    let expected: [(&dyn ScalarReferenceFiniteElement<f64>, ReferenceShape, usize, [usize; 3]); 4] = [
        (&Tri3Lagrange, ReferenceShape::Triangle, 3, [0, 0, 1]),
        (&Tri6Lagrange, ReferenceShape::Triangle, 6, [0, 1, 1]),
        (&Quad4Lagrange, ReferenceShape::Quadrilateral, 4, [0, 0, 1]),
        (&Quad9Lagrange, ReferenceShape::Quadrilateral, 9, [1, 1, 1]),
    ];
    for (element, shape, total, per_codim) in expected {
        assert_eq!(element.ref_el(), shape);
        assert_eq!(element.dimension(), 2);
        assert_eq!(element.num_ref_shape_functions(), total);
        for codim in 0..=2 {
            for index in 0..shape.num_sub_entities(codim) {
                assert_eq!(element.num_ref_shape_functions_on(codim, index), per_codim[codim]);
            }
        }
        // Entity counts add up to the total
        let from_entities: usize = (0..=2)
            .map(|codim| shape.num_sub_entities(codim) * per_codim[codim])
            .sum();
        assert_eq!(from_entities, total);
    }
}

#[test]
fn element_degrees() {
    assert_eq!(ScalarReferenceFiniteElement::<f64>::degree(&Tri3Lagrange), 1);
    assert_eq!(ScalarReferenceFiniteElement::<f64>::degree(&Tri6Lagrange), 2);
    assert_eq!(ScalarReferenceFiniteElement::<f64>::degree(&Quad4Lagrange), 1);
    assert_eq!(ScalarReferenceFiniteElement::<f64>::degree(&Quad9Lagrange), 2);
}

#[test]
#[should_panic]
fn shape_function_count_on_missing_edge_panics() {
    ScalarReferenceFiniteElement::<f64>::num_ref_shape_functions_on(&Tri6Lagrange, 1, 3);
}

#[test]
fn evaluation_layout_for_multiple_points() {
    #[rustfmt::skip]
    let points = DMatrix::from_row_slice(2, 3, &[
        0.2, 0.5, 0.0,
        0.3, 0.5, 1.0,
    ]);
    let values = Tri6Lagrange.eval_reference_shape_functions(&points);
    let gradients = Tri6Lagrange.gradients_reference_shape_functions(&points);
    assert_eq!(values.len(), 6);
    assert_eq!(gradients.len(), 6);
    assert!(values.iter().all(|row| row.len() == 3));
    assert!(gradients.iter().all(|g| g.shape() == (2, 3)));

    // (0.5, 0.5) is the midpoint of edge 1 and (0, 1) is vertex 2
    assert_scalar_eq!(values[4][1], 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values[2][2], 1.0, comp = abs, tol = 1e-14);
    // Gradient of the P1 function of vertex 1 is (1, 0) everywhere
    let p1_gradients = Tri3Lagrange.gradients_reference_shape_functions(&points);
    assert_matrix_eq!(
        p1_gradients[1],
        DMatrix::from_row_slice(2, 3, &[1.0, 1.0, 1.0, 0.0, 0.0, 0.0])
    );
}

#[test]
fn evaluation_is_reproducible() {
    let points = DMatrix::from_fn(2, 5, |i, j| 0.1 * (i + j) as f64);
    for element in [&Quad4Lagrange as &dyn ScalarReferenceFiniteElement<f64>, &Quad9Lagrange] {
        assert_eq!(
            element.eval_reference_shape_functions(&points),
            element.eval_reference_shape_functions(&points)
        );
        assert_eq!(
            element.gradients_reference_shape_functions(&points),
            element.gradients_reference_shape_functions(&points)
        );
    }
}

#[test]
#[should_panic]
fn evaluation_with_wrong_point_dimension_panics() {
    let points = DMatrix::<f64>::zeros(3, 2);
    Quad4Lagrange.eval_reference_shape_functions(&points);
}

proptest! {
    #[test]
    fn triangle_elements_partition_unity(xi in point_in_tri_ref_domain()) {
        assert_partition_of_unity(&Tri3Lagrange, &xi);
        assert_partition_of_unity(&Tri6Lagrange, &xi);
    }

    #[test]
    fn quadrilateral_elements_partition_unity(xi in point_in_quad_ref_domain()) {
        assert_partition_of_unity(&Quad4Lagrange, &xi);
        assert_partition_of_unity(&Quad9Lagrange, &xi);
    }

    #[test]
    fn triangle_gradients_match_finite_differences(xi in point_in_tri_ref_domain()) {
        assert_gradients_match_finite_differences(&Tri3Lagrange, &xi);
        assert_gradients_match_finite_differences(&Tri6Lagrange, &xi);
    }

    #[test]
    fn quadrilateral_gradients_match_finite_differences(xi in point_in_quad_ref_domain()) {
        assert_gradients_match_finite_differences(&Quad4Lagrange, &xi);
        assert_gradients_match_finite_differences(&Quad9Lagrange, &xi);
    }
}
