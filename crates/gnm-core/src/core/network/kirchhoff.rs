use nalgebra::DMatrix;

/// Symmetric N x N connectivity matrix in the graph Laplacian convention.
///
/// Off-diagonal entries are non-positive spring constants; each diagonal entry
/// is the absolute sum of the off-diagonal entries in its column.
#[derive(Debug, Clone, PartialEq)]
pub struct KirchhoffMatrix {
    matrix: DMatrix<f64>,
}

impl KirchhoffMatrix {
    pub fn zeros(dimension: usize) -> Self {
        Self {
            matrix: DMatrix::zeros(dimension, dimension),
        }
    }

    /// Wraps an arbitrary square matrix without checking the Laplacian invariant.
    pub fn from_matrix(matrix: DMatrix<f64>) -> Self {
        Self { matrix }
    }

    pub fn dimension(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn into_inner(self) -> DMatrix<f64> {
        self.matrix
    }

    /// Adds a unit-strength contact between `i` and `j`.
    pub(crate) fn connect(&mut self, i: usize, j: usize) {
        self.matrix[(i, j)] = -1.0;
        self.matrix[(j, i)] = -1.0;
        self.matrix[(i, i)] += 1.0;
        self.matrix[(j, j)] += 1.0;
    }

    /// Writes `value` into both `(i, j)` and `(j, i)`. Diagonals are left untouched.
    pub(crate) fn set_pair(&mut self, i: usize, j: usize, value: f64) {
        self.matrix[(i, j)] = value;
        self.matrix[(j, i)] = value;
    }

    /// Sum of absolute off-diagonal values in column `j`.
    pub fn column_abs_sum(&self, j: usize) -> f64 {
        self.matrix
            .column(j)
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != j)
            .map(|(_, value)| value.abs())
            .sum()
    }

    /// Recomputes diagonal entry `i` from the off-diagonals of its column.
    pub(crate) fn resum_diagonal(&mut self, i: usize) {
        self.matrix[(i, i)] = self.column_abs_sum(i);
    }

    pub fn diagonal(&self) -> Vec<f64> {
        self.matrix.diagonal().iter().copied().collect()
    }

    pub fn row_sums(&self) -> Vec<f64> {
        self.matrix.row_iter().map(|row| row.sum()).collect()
    }

    /// Contacts as `(i, j)` pairs with `i < j`, in row-major order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let n = self.dimension();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.matrix[(i, j)] != 0.0)
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// First pair `(i, j)`, `i < j`, whose mirrored entries differ by more than
    /// `tolerance`.
    pub fn find_asymmetry(&self, tolerance: f64) -> Option<(usize, usize)> {
        let n = self.dimension();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .find(|&(i, j)| {
                let difference = (self.matrix[(i, j)] - self.matrix[(j, i)]).abs();
                // NaN counts as asymmetric.
                difference.is_nan() || difference > tolerance
            })
    }

}
