use super::analyze::ensure_network;
use crate::core::mapping::mapper::CoarseGrainedModel;
use crate::core::models::atom::AtomRecord;
use crate::core::models::residue::ResidueKey;
use crate::engine::config::AnalysisConfig;
use crate::engine::edits::{DEFAULT_SPRING_STRENGTH, EditableNetwork, EditorError};
use crate::engine::error::EngineError;
use crate::engine::fluctuation::FluctuationProfile;
use crate::engine::solver::{DenseEigen, EigenRoutine, ModeSpectrum};
use tracing::{info, instrument};

/// One loaded structure with an editable contact network.
///
/// Construction maps the atoms, builds the reference matrix and computes the
/// first spectrum. Each edit is applied to a copy of the network and followed
/// by a full diagonalization; the session only changes when every step
/// succeeds, so the published spectrum and profile always describe the
/// current live matrix.
#[derive(Debug, Clone)]
pub struct InteractiveEditor<R = DenseEigen> {
    config: AnalysisConfig,
    routine: R,
    model: CoarseGrainedModel,
    network: EditableNetwork,
    spectrum: ModeSpectrum,
    profile: FluctuationProfile,
    initial_max_fluctuation: Option<f64>,
}

impl InteractiveEditor<DenseEigen> {
    pub fn load(atoms: &[AtomRecord], config: AnalysisConfig) -> Result<Self, EngineError> {
        Self::load_with(atoms, config, DenseEigen)
    }
}

impl<R: EigenRoutine> InteractiveEditor<R> {
    #[instrument(skip_all, name = "editor_load")]
    pub fn load_with(
        atoms: &[AtomRecord],
        config: AnalysisConfig,
        routine: R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let model = config.mapper().map(atoms);
        ensure_network(&model)?;
        let reference = config.network_builder()?.build(&model.positions())?;
        let network = EditableNetwork::new(reference);
        let (spectrum, profile) = compute(&config, &routine, &network, &model)?;
        let initial_max_fluctuation = profile.max_bead();

        info!(
            beads = model.len(),
            contacts = network.reference().edge_count(),
            "Editor session loaded."
        );

        Ok(Self {
            config,
            routine,
            model,
            network,
            spectrum,
            profile,
            initial_max_fluctuation,
        })
    }

    /// Replaces the session with a freshly loaded structure. Edits are dropped.
    pub fn reload(self, atoms: &[AtomRecord]) -> Result<Self, EngineError> {
        Self::load_with(atoms, self.config, self.routine)
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn model(&self) -> &CoarseGrainedModel {
        &self.model
    }

    pub fn network(&self) -> &EditableNetwork {
        &self.network
    }

    pub fn spectrum(&self) -> &ModeSpectrum {
        &self.spectrum
    }

    pub fn profile(&self) -> &FluctuationProfile {
        &self.profile
    }

    /// Largest per-bead fluctuation of the unedited network.
    pub fn initial_max_fluctuation(&self) -> Option<f64> {
        self.initial_max_fluctuation
    }

    /// Sets (`strength >= 0`) or restores (`strength < 0`) the spring between
    /// beads `i` and `j`, then recomputes.
    pub fn edit_edge(&mut self, i: usize, j: usize, strength: f64) -> Result<(), EngineError> {
        self.transition(|network| network.edit_edge(i, j, strength))
    }

    /// Adds a spring of the default strength between `i` and `j`.
    pub fn add_contact(&mut self, i: usize, j: usize) -> Result<(), EngineError> {
        self.edit_edge(i, j, DEFAULT_SPRING_STRENGTH)
    }

    pub fn restore_edge(&mut self, i: usize, j: usize) -> Result<(), EngineError> {
        self.transition(|network| network.restore_edge(i, j))
    }

    /// Edits the spring between the central beads of two residues.
    pub fn edit_residues(
        &mut self,
        a: &ResidueKey,
        b: &ResidueKey,
        strength: f64,
    ) -> Result<(), EngineError> {
        let i = self.central_bead(a)?;
        let j = self.central_bead(b)?;
        self.edit_edge(i, j, strength)
    }

    pub fn reset_edits(&mut self) -> Result<(), EngineError> {
        self.transition(|network| {
            network.reset();
            Ok(())
        })
    }

    /// Changes the modes combined into the fluctuation profile. The spectrum is reused.
    pub fn select_modes<I: IntoIterator<Item = usize>>(&mut self, modes: I) -> Result<(), EngineError> {
        let mut config = self.config.clone();
        config.selected_modes = modes.into_iter().collect();
        config.validate()?;
        let profile = config
            .fluctuation_engine()
            .compute(&self.spectrum, self.model.atom_beads())?;
        self.config = config;
        self.profile = profile;
        Ok(())
    }

    fn central_bead(&self, residue: &ResidueKey) -> Result<usize, EditorError> {
        self.model
            .central_bead(residue)
            .ok_or(EditorError::UnknownResidue(*residue))
    }

    fn transition<F>(&mut self, edit: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut EditableNetwork) -> Result<(), EditorError>,
    {
        let mut network = self.network.clone();
        edit(&mut network)?;
        let (spectrum, profile) = compute(&self.config, &self.routine, &network, &self.model)?;
        self.network = network;
        self.spectrum = spectrum;
        self.profile = profile;
        Ok(())
    }
}

fn compute<R: EigenRoutine>(
    config: &AnalysisConfig,
    routine: &R,
    network: &EditableNetwork,
    model: &CoarseGrainedModel,
) -> Result<(ModeSpectrum, FluctuationProfile), EngineError> {
    let spectrum = config.solver(routine).solve(network.live())?;
    let profile = config
        .fluctuation_engine()
        .compute(&spectrum, model.atom_beads())?;
    Ok((spectrum, profile))
}
