use crate::core::network::kirchhoff::KirchhoffMatrix;
use nalgebra::{DMatrix, DVector, SymmetricEigen};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("Cannot diagonalize an empty matrix")]
    EmptyMatrix,

    #[error("Matrix is not symmetric: K({row},{col}) = {upper} but K({col},{row}) = {lower}")]
    AsymmetricMatrix {
        row: usize,
        col: usize,
        upper: f64,
        lower: f64,
    },

    #[error(
        "No non-zero modes in a {dimension}x{dimension} matrix: {zero_modes} eigenvalues at or below {tolerance:e}"
    )]
    SingularOrDegenerateInput {
        dimension: usize,
        zero_modes: usize,
        tolerance: f64,
    },

    #[error("Mode {mode} has eigenvalue {eigenvalue:e}, at or below the zero tolerance {tolerance:e}")]
    UnexpectedZeroEigenvalue {
        mode: usize,
        eigenvalue: f64,
        tolerance: f64,
    },

    #[error("Lowest eigenvalue {eigenvalue:e} is above the zero tolerance {tolerance:e}")]
    MissingZeroMode { eigenvalue: f64, tolerance: f64 },

    #[error("Eigen-routine returned {actual} values where {expected} were expected")]
    MalformedResult { expected: usize, actual: usize },

    #[error("Eigen-routine produced non-finite values")]
    NonFiniteResult,

    #[error("Eigen-routine failed with status {info}")]
    Routine { info: i32 },
}

/// Eigenpairs in ascending eigenvalue order.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigenpairs {
    pub values: Vec<f64>,
    pub vectors: Vec<DVector<f64>>,
}

/// A symmetric eigendecomposition backend.
///
/// `lowest` must return at least `count` eigenpairs (more is allowed, up to
/// the full spectrum), sorted by ascending eigenvalue, without modifying the
/// input.
pub trait EigenRoutine {
    fn lowest(&self, matrix: &DMatrix<f64>, count: usize) -> Result<Eigenpairs, SolverError>;
}

impl<R: EigenRoutine + ?Sized> EigenRoutine for &R {
    fn lowest(&self, matrix: &DMatrix<f64>, count: usize) -> Result<Eigenpairs, SolverError> {
        (**self).lowest(matrix, count)
    }
}

/// In-process dense decomposition. Always returns the full spectrum.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseEigen;

impl EigenRoutine for DenseEigen {
    fn lowest(&self, matrix: &DMatrix<f64>, _count: usize) -> Result<Eigenpairs, SolverError> {
        let eigen = SymmetricEigen::new(matrix.clone());

        let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        Ok(Eigenpairs {
            values: order.iter().map(|&i| eigen.eigenvalues[i]).collect(),
            vectors: order
                .iter()
                .map(|&i| eigen.eigenvectors.column(i).into_owned())
                .collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    pub eigenvalue: f64,
    pub eigenvector: DVector<f64>,
}

/// Non-zero modes of a Kirchhoff matrix, ascending by eigenvalue.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSpectrum {
    modes: Vec<Mode>,
    zero_modes: usize,
    dimension: usize,
}

impl ModeSpectrum {
    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn mode(&self, index: usize) -> Option<&Mode> {
        self.modes.get(index)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Number of lowest eigenvalues discarded as zero modes.
    pub fn zero_modes(&self) -> usize {
        self.zero_modes
    }

    /// Length of every eigenvector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn eigenvalues(&self) -> Vec<f64> {
        self.modes.iter().map(|m| m.eigenvalue).collect()
    }

    /// Relative variance `1 / eigenvalue` of each mode.
    pub fn mode_variances(&self) -> Vec<f64> {
        self.modes.iter().map(|m| m.eigenvalue.recip()).collect()
    }
}

/// Diagonalizes Kirchhoff matrices and applies the zero-mode policy.
#[derive(Debug, Clone)]
pub struct NormalModeSolver<R = DenseEigen> {
    routine: R,
    num_modes: usize,
    zero_tolerance: f64,
    symmetry_tolerance: f64,
}

pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 1e-9;

impl NormalModeSolver<DenseEigen> {
    pub fn new(num_modes: usize, zero_tolerance: f64) -> Self {
        Self::with_routine(DenseEigen, num_modes, zero_tolerance)
    }
}

impl<R: EigenRoutine> NormalModeSolver<R> {
    pub fn with_routine(routine: R, num_modes: usize, zero_tolerance: f64) -> Self {
        Self {
            routine,
            num_modes,
            zero_tolerance,
            symmetry_tolerance: DEFAULT_SYMMETRY_TOLERANCE,
        }
    }

    pub fn with_symmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.symmetry_tolerance = tolerance;
        self
    }

    pub fn num_modes(&self) -> usize {
        self.num_modes
    }

    pub fn zero_tolerance(&self) -> f64 {
        self.zero_tolerance
    }

    #[instrument(skip_all, name = "normal_modes", fields(dimension = kirchhoff.dimension()))]
    pub fn solve(&self, kirchhoff: &KirchhoffMatrix) -> Result<ModeSpectrum, SolverError> {
        let n = kirchhoff.dimension();
        if n == 0 {
            return Err(SolverError::EmptyMatrix);
        }
        if let Some((row, col)) = kirchhoff.find_asymmetry(self.symmetry_tolerance) {
            return Err(SolverError::AsymmetricMatrix {
                row,
                col,
                upper: kirchhoff.get(row, col),
                lower: kirchhoff.get(col, row),
            });
        }

        let requested = (self.num_modes + 1).min(n);
        let start = Instant::now();
        let pairs = self.routine.lowest(kirchhoff.as_matrix(), requested)?;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        check_shape(&pairs, requested, n)?;

        let tolerance = self.zero_tolerance;
        let zero_modes = if pairs.values.len() == n {
            pairs.values.iter().filter(|&&v| v <= tolerance).count().max(1)
        } else {
            self.check_partial_spectrum(&pairs.values)?;
            1
        };
        if zero_modes >= pairs.values.len() {
            return Err(SolverError::SingularOrDegenerateInput {
                dimension: n,
                zero_modes,
                tolerance,
            });
        }

        let modes: Vec<Mode> = pairs
            .values
            .into_iter()
            .zip(pairs.vectors)
            .skip(zero_modes)
            .take(self.num_modes)
            .map(|(eigenvalue, eigenvector)| Mode {
                eigenvalue,
                eigenvector,
            })
            .collect();

        if modes.len() < self.num_modes {
            warn!(
                requested = self.num_modes,
                available = modes.len(),
                "Fewer non-zero modes than requested."
            );
        }
        info!(
            zero_modes,
            modes = modes.len(),
            elapsed_ms,
            "Diagonalization complete."
        );

        Ok(ModeSpectrum {
            modes,
            zero_modes,
            dimension: n,
        })
    }

    /// A partial spectrum holds exactly one expected zero mode followed by
    /// non-zero modes.
    fn check_partial_spectrum(&self, values: &[f64]) -> Result<(), SolverError> {
        let tolerance = self.zero_tolerance;
        let lowest = values.first().copied().ok_or(SolverError::MalformedResult {
            expected: 1,
            actual: 0,
        })?;
        if lowest > tolerance {
            return Err(SolverError::MissingZeroMode {
                eigenvalue: lowest,
                tolerance,
            });
        }
        if let Some((mode, &eigenvalue)) = values
            .iter()
            .skip(1)
            .enumerate()
            .find(|&(_, &v)| v <= tolerance)
        {
            return Err(SolverError::UnexpectedZeroEigenvalue {
                mode,
                eigenvalue,
                tolerance,
            });
        }
        Ok(())
    }
}

fn check_shape(pairs: &Eigenpairs, requested: usize, n: usize) -> Result<(), SolverError> {
    let count = pairs.values.len();
    if count < requested || count > n {
        return Err(SolverError::MalformedResult {
            expected: requested,
            actual: count,
        });
    }
    if pairs.vectors.len() != count {
        return Err(SolverError::MalformedResult {
            expected: count,
            actual: pairs.vectors.len(),
        });
    }
    if let Some(vector) = pairs.vectors.iter().find(|v| v.len() != n) {
        return Err(SolverError::MalformedResult {
            expected: n,
            actual: vector.len(),
        });
    }
    let finite = pairs.values.iter().all(|v| v.is_finite())
        && pairs.vectors.iter().all(|v| v.iter().all(|c| c.is_finite()));
    if !finite {
        return Err(SolverError::NonFiniteResult);
    }
    Ok(())
}
