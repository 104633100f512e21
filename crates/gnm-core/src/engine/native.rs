use super::solver::{EigenRoutine, Eigenpairs, SolverError};
use nalgebra::{DMatrix, DVector};

/// A compiled single-precision eigensolver (e.g. LAPACK `ssyevr`) reached
/// through a flat-buffer interface.
///
/// On entry `matrix` holds the `n x n` matrix in row-major order and may be
/// overwritten. On success the `count` lowest eigenvalues are written to
/// `eigenvalues` in ascending order, and component `a` of eigenvector `k` to
/// `eigenvectors[a * count + k]`.
pub trait NativeRoutine {
    fn diagonalize(
        &self,
        matrix: &mut [f32],
        n: usize,
        count: usize,
        eigenvalues: &mut [f32],
        eigenvectors: &mut [f32],
    ) -> Result<(), SolverError>;
}

/// Adapts a [`NativeRoutine`] to [`EigenRoutine`], owning the marshalling.
#[derive(Debug, Clone, Default)]
pub struct NativeEigen<R> {
    routine: R,
}

impl<R: NativeRoutine> NativeEigen<R> {
    pub fn new(routine: R) -> Self {
        Self { routine }
    }
}

impl<R: NativeRoutine> EigenRoutine for NativeEigen<R> {
    fn lowest(&self, matrix: &DMatrix<f64>, count: usize) -> Result<Eigenpairs, SolverError> {
        let n = matrix.nrows();
        let count = count.min(n);

        let mut flat = row_major_f32(matrix);
        let mut eigenvalues = vec![0.0f32; count];
        let mut eigenvectors = vec![0.0f32; n * count];
        self.routine
            .diagonalize(&mut flat, n, count, &mut eigenvalues, &mut eigenvectors)?;

        if eigenvalues.iter().chain(&eigenvectors).any(|v| !v.is_finite()) {
            return Err(SolverError::NonFiniteResult);
        }

        let vectors = (0..count)
            .map(|k| DVector::from_fn(n, |a, _| f64::from(eigenvectors[a * count + k])))
            .collect();
        Ok(Eigenpairs {
            values: eigenvalues.into_iter().map(f64::from).collect(),
            vectors,
        })
    }
}

/// Flattened row-major copy in single precision.
fn row_major_f32(matrix: &DMatrix<f64>) -> Vec<f32> {
    // Column-major storage of the transpose is row-major storage of the matrix.
    matrix.transpose().iter().map(|&v| v as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::network::kirchhoff::KirchhoffMatrix;
    use crate::engine::solver::{DenseEigen, NormalModeSolver};
    use nalgebra::SymmetricEigen;

    /// Single-precision reference routine writing the native layout.
    struct ReferenceRoutine;

    impl NativeRoutine for ReferenceRoutine {
        fn diagonalize(
            &self,
            matrix: &mut [f32],
            n: usize,
            count: usize,
            eigenvalues: &mut [f32],
            eigenvectors: &mut [f32],
        ) -> Result<(), SolverError> {
            let m = DMatrix::from_row_slice(n, n, matrix);
            let eigen = SymmetricEigen::new(m);
            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
            for (k, &i) in order.iter().take(count).enumerate() {
                eigenvalues[k] = eigen.eigenvalues[i];
                for a in 0..n {
                    eigenvectors[a * count + k] = eigen.eigenvectors[(a, i)];
                }
            }
            Ok(())
        }
    }

    struct Failing;

    impl NativeRoutine for Failing {
        fn diagonalize(
            &self,
            _matrix: &mut [f32],
            _n: usize,
            _count: usize,
            _eigenvalues: &mut [f32],
            _eigenvectors: &mut [f32],
        ) -> Result<(), SolverError> {
            Err(SolverError::Routine { info: -4 })
        }
    }

    struct Poisoned;

    impl NativeRoutine for Poisoned {
        fn diagonalize(
            &self,
            _matrix: &mut [f32],
            _n: usize,
            _count: usize,
            eigenvalues: &mut [f32],
            _eigenvectors: &mut [f32],
        ) -> Result<(), SolverError> {
            eigenvalues[0] = f32::NAN;
            Ok(())
        }
    }

    fn path(n: usize) -> KirchhoffMatrix {
        let mut k = KirchhoffMatrix::zeros(n);
        for i in 1..n {
            k.connect(i - 1, i);
        }
        k
    }

    #[test]
    fn routine_input_is_row_major() {
        let mut matrix = DMatrix::zeros(2, 3);
        matrix[(0, 1)] = 3.0;
        matrix[(1, 0)] = 5.0;
        matrix[(1, 2)] = -1.5;
        assert_eq!(row_major_f32(&matrix), vec![0.0, 3.0, 0.0, 5.0, 0.0, -1.5]);
    }

    #[test]
    fn native_layout_is_reinterpreted_per_mode() {
        let k = path(8);
        let native = NativeEigen::new(ReferenceRoutine).lowest(k.as_matrix(), 4).unwrap();
        let dense = DenseEigen.lowest(k.as_matrix(), 4).unwrap();

        assert_eq!(native.values.len(), 4);
        for (value, expected) in native.values.iter().zip(&dense.values) {
            assert!((value - expected).abs() < 1e-4);
        }
        for mode in 0..4 {
            let overlap = native.vectors[mode].dot(&dense.vectors[mode]).abs();
            assert!((overlap - 1.0).abs() < 1e-3, "mode {mode} overlap {overlap}");
        }
    }

    #[test]
    fn solver_with_native_routine_matches_dense_solver() {
        let k = path(10);
        let native = NormalModeSolver::with_routine(NativeEigen::new(ReferenceRoutine), 3, 1e-4)
            .solve(&k)
            .unwrap();
        let dense = NormalModeSolver::new(3, 1e-4).solve(&k).unwrap();

        assert_eq!(native.len(), 3);
        assert_eq!(native.zero_modes(), 1);
        for (a, b) in native.eigenvalues().iter().zip(dense.eigenvalues()) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn routine_failures_propagate() {
        let k = path(4);
        let result = NativeEigen::new(Failing).lowest(k.as_matrix(), 2);
        assert_eq!(result, Err(SolverError::Routine { info: -4 }));
    }

    #[test]
    fn non_finite_output_is_rejected() {
        let k = path(4);
        let result = NativeEigen::new(Poisoned).lowest(k.as_matrix(), 2);
        assert_eq!(result, Err(SolverError::NonFiniteResult));
    }
}
