//! `proptest` strategies for non-degenerate cell geometries.
use crate::geometry::{QuadO1, TriaO1};
use ::proptest::prelude::*;
use nalgebra::{Point2, Vector2};
use std::f64::consts::PI;

pub fn point2() -> impl Strategy<Value = Point2<f64>> {
    // Pick a reasonably small range to pick coordinates from,
    // otherwise we can easily get floating point numbers that are
    // so ridiculously large as to break anything we might want to do with them
    let range = -10.0..10.0;
    [range.clone(), range].prop_map(|[x, y]| Point2::new(x, y))
}

/// Counter-clockwise triangles whose smallest angle is bounded away from zero.
///
/// Vertices are placed on a circle around a random center, with angular gaps of at least
/// a quarter turn between consecutive vertices.
pub fn nondegenerate_triangle() -> impl Strategy<Value = TriaO1<f64>> {
    let center = point2();
    let radius = 0.1..5.0;
    let start = 0.0..2.0 * PI;
    // The first two gaps lie in [PI / 2, 3 PI / 4), which leaves more than PI / 2 for the third
    let gaps = [0.0..0.25 * PI, 0.0..0.25 * PI];
    (center, radius, start, gaps).prop_map(|(center, radius, start, [a, b])| {
        let angles = [start, start + 0.5 * PI + a, start + PI + a + b];
        let vertices = angles.map(|theta| center + radius * Vector2::new(theta.cos(), theta.sin()));
        TriaO1::from_vertices(vertices)
    })
}

/// Strictly convex, counter-clockwise quadrilaterals.
///
/// One vertex is drawn from each quadrant of a circle, after which the quadrilateral is
/// stretched along the axes. Both operations preserve convexity.
pub fn convex_quadrilateral() -> impl Strategy<Value = QuadO1<f64>> {
    let center = point2();
    let radius = 0.1..5.0;
    // Keep angles away from the quadrant boundaries so that no three vertices are collinear
    let quadrant_offset = 0.1..0.5 * PI - 0.1;
    let offsets = [
        quadrant_offset.clone(),
        quadrant_offset.clone(),
        quadrant_offset.clone(),
        quadrant_offset,
    ];
    let stretch = [0.2..5.0, 0.2..5.0];
    (center, radius, offsets, stretch).prop_map(|(center, radius, offsets, [sx, sy])| {
        let mut quadrant = 0.0;
        let vertices = offsets.map(|offset| {
            let theta = quadrant * 0.5 * PI + offset;
            quadrant += 1.0;
            center + radius * Vector2::new(sx * theta.cos(), sy * theta.sin())
        });
        QuadO1::from_vertices(vertices)
    })
}
