use fenris_lagrange::element::ScalarReferenceFiniteElement;
use fenris_lagrange::{Real, ReferenceShape};
use nalgebra::{DMatrix, RowDVector};


/// Ways in which [`Modified`] corrupts the reference gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDefect {
    /// Append a zero row to every gradient matrix.
    ExtraComponent,
    /// Drop the column of the last point from every gradient matrix.
    MissingPoint,
}

/// Wraps a finite element and misreports some of its properties.
#[derive(Debug, Clone)]
pub struct Modified<E> {
    pub element: E,
    pub degree: Option<usize>,
    pub shape: Option<ReferenceShape>,
    pub per_vertex: Option<usize>,
    /// Drop the values of the last shape function.
    pub truncate_values: bool,
    pub gradient_defect: Option<GradientDefect>,
}

impl<E> Modified<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            degree: None,
            shape: None,
            per_vertex: None,
            truncate_values: false,
            gradient_defect: None,
        }
    }

    pub fn with_degree(self, degree: usize) -> Self {
        Self {
            degree: Some(degree),
            ..self
        }
    }

    pub fn with_shape(self, shape: ReferenceShape) -> Self {
        Self {
            shape: Some(shape),
            ..self
        }
    }

    pub fn with_per_vertex(self, count: usize) -> Self {
        Self {
            per_vertex: Some(count),
            ..self
        }
    }

    pub fn with_truncated_values(self) -> Self {
        Self {
            truncate_values: true,
            ..self
        }
    }

    pub fn with_gradient_defect(self, defect: GradientDefect) -> Self {
        Self {
            gradient_defect: Some(defect),
            ..self
        }
    }
}

impl<T, E> ScalarReferenceFiniteElement<T> for Modified<E>
where
    T: Real,
    E: ScalarReferenceFiniteElement<T>,
{
    fn ref_el(&self) -> ReferenceShape {
        self.shape.unwrap_or_else(|| self.element.ref_el())
    }

    fn degree(&self) -> usize {
        self.degree.unwrap_or_else(|| self.element.degree())
    }

    fn num_ref_shape_functions(&self) -> usize {
        self.element.num_ref_shape_functions()
    }

    fn num_ref_shape_functions_on(&self, codim: usize, sub_index: usize) -> usize {
        match (codim, self.per_vertex) {
            (2, Some(count)) => count,
            _ => self.element.num_ref_shape_functions_on(codim, sub_index),
        }
    }

    fn eval_reference_shape_functions(&self, points: &DMatrix<T>) -> Vec<RowDVector<T>> {
        let mut values = self.element.eval_reference_shape_functions(points);
        if self.truncate_values {
            values.pop();
        }
        values
    }

    fn gradients_reference_shape_functions(&self, points: &DMatrix<T>) -> Vec<DMatrix<T>> {
        let gradients = self.element.gradients_reference_shape_functions(points);
        match self.gradient_defect {
            None => gradients,
            Some(GradientDefect::ExtraComponent) => gradients
                .into_iter()
                .map(|g| {
                    let nrows = g.nrows();
                    g.insert_row(nrows, T::zero())
                })
                .collect(),
            Some(GradientDefect::MissingPoint) => gradients
                .into_iter()
                .map(|g| {
                    let ncols = g.ncols();
                    g.remove_column(ncols - 1)
                })
                .collect(),
        }
    }
}
