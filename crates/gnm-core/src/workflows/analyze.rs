use crate::core::mapping::mapper::CoarseGrainedModel;
use crate::core::models::atom::AtomRecord;
use crate::core::network::builder::NetworkError;
use crate::core::network::kirchhoff::KirchhoffMatrix;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::fluctuation::FluctuationProfile;
use crate::engine::solver::{DenseEigen, EigenRoutine, ModeSpectrum};
use tracing::{info, instrument};

/// Everything produced by one analysis of one structure.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub model: CoarseGrainedModel,
    pub kirchhoff: KirchhoffMatrix,
    pub spectrum: ModeSpectrum,
    pub profile: FluctuationProfile,
}

#[instrument(skip_all, name = "gnm_analysis")]
pub fn run(atoms: &[AtomRecord], config: &AnalysisConfig) -> Result<Analysis, EngineError> {
    run_with(atoms, config, DenseEigen)
}

/// Runs the analysis with a caller-supplied eigen-routine.
pub fn run_with<R: EigenRoutine>(
    atoms: &[AtomRecord],
    config: &AnalysisConfig,
    routine: R,
) -> Result<Analysis, EngineError> {
    config.validate()?;
    info!(atoms = atoms.len(), cutoff = config.cutoff, "Starting analysis.");

    let model = config.mapper().map(atoms);
    ensure_network(&model)?;

    let kirchhoff = config.network_builder()?.build(&model.positions())?;
    let spectrum = config.solver(routine).solve(&kirchhoff)?;
    let profile = config
        .fluctuation_engine()
        .compute(&spectrum, model.atom_beads())?;

    info!(
        beads = model.len(),
        skipped_residues = model.skipped().len(),
        modes = spectrum.len(),
        "Analysis complete."
    );

    Ok(Analysis {
        model,
        kirchhoff,
        spectrum,
        profile,
    })
}

pub(crate) fn ensure_network(model: &CoarseGrainedModel) -> Result<(), NetworkError> {
    if model.is_empty() {
        return Err(NetworkError::EmptyNetwork);
    }
    if model.central_count() == 0 {
        return Err(NetworkError::NoCentralBeads);
    }
    Ok(())
}
