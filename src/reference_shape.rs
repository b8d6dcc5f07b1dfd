//! Reference cell shapes and their topology.
use crate::Real;
use nalgebra::DMatrix;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// The shape of a reference cell.
///
/// The reference cells are
///
/// - the point, of dimension 0,
/// - the segment $[0, 1]$,
/// - the triangle with vertices $(0, 0)$, $(1, 0)$, $(0, 1)$,
/// - the unit square with vertices $(0, 0)$, $(1, 0)$, $(1, 1)$, $(0, 1)$.
///
/// Edges of the two-dimensional shapes connect consecutive vertices, i.e. edge `i` runs from
/// vertex `i` to vertex `(i + 1) % n`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceShape {
    Point,
    Segment,
    Triangle,
    Quadrilateral,
}

impl ReferenceShape {
    /// The intrinsic dimension of the shape.
    pub fn dimension(&self) -> usize {
        match self {
            Self::Point => 0,
            Self::Segment => 1,
            Self::Triangle | Self::Quadrilateral => 2,
        }
    }

    pub fn num_vertices(&self) -> usize {
        match self {
            Self::Point => 1,
            Self::Segment => 2,
            Self::Triangle => 3,
            Self::Quadrilateral => 4,
        }
    }

    /// Number of sub-entities of the given codimension.
    ///
    /// Codimension 0 is the shape itself. Returns zero for codimensions exceeding the
    /// dimension of the shape.
    pub fn num_sub_entities(&self, codim: usize) -> usize {
        let dim = self.dimension();
        if codim > dim {
            0
        } else if codim == 0 {
            1
        } else {
            // Vertices, or the edges of a polygon, of which there are as many as vertices
            self.num_vertices()
        }
    }

    /// The shape of the sub-entities of the given codimension.
    ///
    /// Returns `None` if the codimension exceeds the dimension of the shape.
    pub fn sub_entity_shape(&self, codim: usize) -> Option<ReferenceShape> {
        match self.dimension().checked_sub(codim)? {
            0 => Some(Self::Point),
            1 => Some(Self::Segment),
            _ => Some(*self),
        }
    }

    /// Local indices of the vertices of the given sub-entity.
    ///
    /// Returns `None` if there is no such sub-entity.
    pub fn sub_entity_vertices(&self, codim: usize, index: usize) -> Option<Vec<usize>> {
        if index >= self.num_sub_entities(codim) {
            return None;
        }
        let n = self.num_vertices();
        match self.dimension() - codim {
            0 => Some(vec![index]),
            1 if self.dimension() == 1 => Some(vec![0, 1]),
            1 => Some(vec![index, (index + 1) % n]),
            _ => Some((0..n).collect()),
        }
    }

    /// Coordinates of the vertices of the reference cell, one column per vertex.
    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn vertex_coords<T: Real>(&self) -> DMatrix<T> {
        match self {
            Self::Point => DMatrix::zeros(0, 1),
            Self::Segment => DMatrix::from_row_slice(1, 2, &[0.0, 1.0]),
            Self::Triangle => DMatrix::from_row_slice(2, 3, &[
                0.0, 1.0, 0.0,
                0.0, 0.0, 1.0,
            ]),
            Self::Quadrilateral => DMatrix::from_row_slice(2, 4, &[
                0.0, 1.0, 1.0, 0.0,
                0.0, 0.0, 1.0, 1.0,
            ]),
        }
    }

    /// The (Lebesgue) measure of the reference cell.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn volume<T: Real>(&self) -> T {
        match self {
            Self::Triangle => 0.5,
            _ => 1.0,
        }
    }
}

impl Display for ReferenceShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Segment => "segment",
            Self::Triangle => "triangle",
            Self::Quadrilateral => "quadrilateral",
        };
        write!(f, "{}", name)
    }
}
