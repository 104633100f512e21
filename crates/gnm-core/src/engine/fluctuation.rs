use super::solver::ModeSpectrum;
use nalgebra::DVector;
use thiserror::Error;
use tracing::debug;

/// Fluctuation reported for atoms that no bead represents.
pub const UNMAPPED_ATOM_FLUCTUATION: f64 = 0.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FluctuationError {
    #[error("No modes selected")]
    EmptySelection,
    #[error("Mode {mode} is out of range: only {available} modes are available")]
    ModeOutOfRange { mode: usize, available: usize },
    #[error("Bead index {actual} is out of range for a profile of {expected} beads")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Per-bead and per-atom mean-square fluctuations.
#[derive(Debug, Clone, PartialEq)]
pub struct FluctuationProfile {
    pub per_bead: Vec<f64>,
    pub per_atom: Vec<f64>,
}

impl FluctuationProfile {
    /// Largest per-bead value, used to fix a color scale across edits.
    pub fn max_bead(&self) -> Option<f64> {
        self.per_bead.iter().copied().reduce(f64::max)
    }
}

/// Combines a fixed set of modes into fluctuation profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluctuationEngine {
    selection: Vec<usize>,
}

impl FluctuationEngine {
    /// Duplicate mode indices are counted once.
    pub fn new<I: IntoIterator<Item = usize>>(selection: I) -> Self {
        let mut selection: Vec<usize> = selection.into_iter().collect();
        selection.sort_unstable();
        selection.dedup();
        Self { selection }
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn compute(
        &self,
        spectrum: &ModeSpectrum,
        atom_beads: &[Option<usize>],
    ) -> Result<FluctuationProfile, FluctuationError> {
        let per_bead = bead_fluctuations(spectrum, &self.selection)?;
        let per_atom = propagate_to_atoms(&per_bead, atom_beads)?;
        debug!(
            modes = self.selection.len(),
            beads = per_bead.len(),
            atoms = per_atom.len(),
            "Fluctuation profile computed."
        );
        Ok(FluctuationProfile { per_bead, per_atom })
    }
}

/// Contribution `v[a]^2 / lambda` of a single mode to every bead.
pub fn mode_fluctuation(spectrum: &ModeSpectrum, mode: usize) -> Result<Vec<f64>, FluctuationError> {
    bead_fluctuations(spectrum, &[mode])
}

/// Sum of single-mode contributions over `selection`, one value per bead.
pub fn bead_fluctuations(
    spectrum: &ModeSpectrum,
    selection: &[usize],
) -> Result<Vec<f64>, FluctuationError> {
    if selection.is_empty() {
        return Err(FluctuationError::EmptySelection);
    }
    let mut total = DVector::zeros(spectrum.dimension());
    for &index in selection {
        let mode = spectrum
            .mode(index)
            .ok_or(FluctuationError::ModeOutOfRange {
                mode: index,
                available: spectrum.len(),
            })?;
        total += mode.eigenvector.map(|v| v * v) / mode.eigenvalue;
    }
    Ok(total.iter().copied().collect())
}

/// Expands bead values onto atoms through the mapping's atom membership.
pub fn propagate_to_atoms(
    bead_values: &[f64],
    atom_beads: &[Option<usize>],
) -> Result<Vec<f64>, FluctuationError> {
    atom_beads
        .iter()
        .map(|bead| match bead {
            None => Ok(UNMAPPED_ATOM_FLUCTUATION),
            Some(index) => {
                bead_values
                    .get(*index)
                    .copied()
                    .ok_or(FluctuationError::DimensionMismatch {
                        expected: bead_values.len(),
                        actual: *index,
                    })
            }
        })
        .collect()
}
