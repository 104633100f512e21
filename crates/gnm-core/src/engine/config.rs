use crate::core::mapping::mapper::{BeadModel, CoarseGrainMapper};
use crate::core::network::builder::{ContactStrategy, NetworkBuilder, NetworkError};
use crate::core::spatial::kdtree::SearchMode;
use crate::engine::fluctuation::FluctuationEngine;
use crate::engine::solver::{DEFAULT_SYMMETRY_TOLERANCE, EigenRoutine, NormalModeSolver};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_NUM_MODES: usize = 20;
pub const DEFAULT_SELECTED_MODES: [usize; 6] = [0, 1, 2, 3, 4, 5];
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Parameters of one normal-mode analysis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    pub cutoff: f64, // Contact cutoff in Angstroms
    #[serde(default)]
    pub bead_model: BeadModel,
    #[serde(default)]
    pub strategy: ContactStrategy,
    #[serde(default)]
    pub search_mode: SearchMode,
    #[serde(default = "default_num_modes")]
    pub num_modes: usize, // Modes kept after zero-mode removal
    #[serde(default = "default_selected_modes")]
    pub selected_modes: Vec<usize>, // Indices into the kept modes
    #[serde(default = "default_zero_tolerance")]
    pub zero_tolerance: f64,
    #[serde(default = "default_symmetry_tolerance")]
    pub symmetry_tolerance: f64,
    #[serde(default)]
    pub chains: Option<Vec<char>>, // None maps every chain
}

fn default_num_modes() -> usize {
    DEFAULT_NUM_MODES
}

fn default_selected_modes() -> Vec<usize> {
    DEFAULT_SELECTED_MODES.to_vec()
}

fn default_zero_tolerance() -> f64 {
    DEFAULT_ZERO_TOLERANCE
}

fn default_symmetry_tolerance() -> f64 {
    DEFAULT_SYMMETRY_TOLERANCE
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_finite("cutoff", self.cutoff)?;
        positive_finite("zero_tolerance", self.zero_tolerance)?;
        positive_finite("symmetry_tolerance", self.symmetry_tolerance)?;
        if self.num_modes == 0 {
            return Err(invalid("num_modes", "at least one mode is required"));
        }
        if self.selected_modes.is_empty() {
            return Err(invalid("selected_modes", "selection is empty"));
        }
        if let Some(&mode) = self.selected_modes.iter().find(|&&m| m >= self.num_modes) {
            return Err(invalid(
                "selected_modes",
                format!("mode {mode} is not below num_modes ({})", self.num_modes),
            ));
        }
        if self.chains.as_ref().is_some_and(|chains| chains.is_empty()) {
            return Err(invalid("chains", "chain filter is empty"));
        }
        Ok(())
    }

    pub(crate) fn mapper(&self) -> CoarseGrainMapper {
        let mapper = CoarseGrainMapper::new(self.bead_model);
        match &self.chains {
            Some(chains) => mapper.with_chains(chains.iter().copied()),
            None => mapper,
        }
    }

    pub(crate) fn network_builder(&self) -> Result<NetworkBuilder, NetworkError> {
        Ok(NetworkBuilder::new(self.cutoff)?
            .with_strategy(self.strategy)
            .with_search_mode(self.search_mode))
    }

    pub(crate) fn solver<R: EigenRoutine>(&self, routine: R) -> NormalModeSolver<R> {
        NormalModeSolver::with_routine(routine, self.num_modes, self.zero_tolerance)
            .with_symmetry_tolerance(self.symmetry_tolerance)
    }

    pub(crate) fn fluctuation_engine(&self) -> FluctuationEngine {
        FluctuationEngine::new(self.selected_modes.iter().copied())
    }
}

fn positive_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("{value} is not a positive finite number")))
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    cutoff: Option<f64>,
    bead_model: Option<BeadModel>,
    strategy: Option<ContactStrategy>,
    search_mode: Option<SearchMode>,
    num_modes: Option<usize>,
    selected_modes: Option<Vec<usize>>,
    zero_tolerance: Option<f64>,
    symmetry_tolerance: Option<f64>,
    chains: Option<Vec<char>>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn bead_model(mut self, model: BeadModel) -> Self {
        self.bead_model = Some(model);
        self
    }
    pub fn strategy(mut self, strategy: ContactStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = Some(mode);
        self
    }
    pub fn num_modes(mut self, n: usize) -> Self {
        self.num_modes = Some(n);
        self
    }
    pub fn selected_modes<I: IntoIterator<Item = usize>>(mut self, modes: I) -> Self {
        self.selected_modes = Some(modes.into_iter().collect());
        self
    }
    pub fn zero_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_tolerance = Some(tolerance);
        self
    }
    pub fn symmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.symmetry_tolerance = Some(tolerance);
        self
    }
    pub fn chains<I: IntoIterator<Item = char>>(mut self, chains: I) -> Self {
        self.chains = Some(chains.into_iter().collect());
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let config = AnalysisConfig {
            cutoff: self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?,
            bead_model: self.bead_model.unwrap_or_default(),
            strategy: self.strategy.unwrap_or_default(),
            search_mode: self.search_mode.unwrap_or_default(),
            num_modes: self.num_modes.unwrap_or(DEFAULT_NUM_MODES),
            selected_modes: self.selected_modes.unwrap_or_else(default_selected_modes),
            zero_tolerance: self.zero_tolerance.unwrap_or(DEFAULT_ZERO_TOLERANCE),
            symmetry_tolerance: self
                .symmetry_tolerance
                .unwrap_or(DEFAULT_SYMMETRY_TOLERANCE),
            chains: self.chains,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    mod builder {
        use super::*;

        #[test]
        fn build_applies_defaults() {
            let config = AnalysisConfigBuilder::new().cutoff(10.0).build().unwrap();
            assert_eq!(config.cutoff, 10.0);
            assert_eq!(config.bead_model, BeadModel::Backbone);
            assert_eq!(config.strategy, ContactStrategy::SpatialIndex);
            assert_eq!(config.search_mode, SearchMode::Exhaustive);
            assert_eq!(config.num_modes, 20);
            assert_eq!(config.selected_modes, vec![0, 1, 2, 3, 4, 5]);
            assert_eq!(config.zero_tolerance, 1e-5);
            assert_eq!(config.symmetry_tolerance, 1e-9);
            assert_eq!(config.chains, None);
        }

        #[test]
        fn build_fails_without_cutoff() {
            let result = AnalysisConfigBuilder::new().num_modes(5).build();
            assert!(matches!(result, Err(ConfigError::MissingParameter("cutoff"))));
        }

        #[test]
        fn build_validates_values() {
            let negative = AnalysisConfigBuilder::new().cutoff(-1.0).build();
            assert!(matches!(
                negative,
                Err(ConfigError::InvalidParameter { name: "cutoff", .. })
            ));

            let out_of_range = AnalysisConfigBuilder::new()
                .cutoff(7.0)
                .num_modes(3)
                .selected_modes([0, 3])
                .build();
            assert!(matches!(
                out_of_range,
                Err(ConfigError::InvalidParameter {
                    name: "selected_modes",
                    ..
                })
            ));

            let empty = AnalysisConfigBuilder::new()
                .cutoff(7.0)
                .selected_modes([])
                .build();
            assert!(empty.is_err());

            let zero_tolerance = AnalysisConfigBuilder::new()
                .cutoff(7.0)
                .zero_tolerance(0.0)
                .build();
            assert!(zero_tolerance.is_err());
        }

        #[test]
        fn mapper_honours_chain_filter() {
            let config = AnalysisConfigBuilder::new()
                .cutoff(7.0)
                .bead_model(BeadModel::ThreePoint)
                .chains(['B'])
                .build()
                .unwrap();
            assert_eq!(config.mapper().model(), BeadModel::ThreePoint);
            assert_eq!(config.network_builder().unwrap().cutoff(), 7.0);
        }
    }

    mod loading {
        use super::*;

        #[test]
        fn load_reads_toml_with_defaults() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("gnm.toml");
            let mut file = File::create(&path).unwrap();
            writeln!(
                file,
                r#"
                cutoff = 7.3
                bead_model = "three_point"
                strategy = "brute_force"
                selected_modes = [0, 2]
                zero_tolerance = 1e-100
                chains = ["A", "C"]
                "#
            )
            .unwrap();

            let config = AnalysisConfig::load(&path).unwrap();
            assert_eq!(config.cutoff, 7.3);
            assert_eq!(config.bead_model, BeadModel::ThreePoint);
            assert_eq!(config.strategy, ContactStrategy::BruteForce);
            assert_eq!(config.search_mode, SearchMode::Exhaustive);
            assert_eq!(config.num_modes, DEFAULT_NUM_MODES);
            assert_eq!(config.selected_modes, vec![0, 2]);
            assert_eq!(config.zero_tolerance, 1e-100);
            assert_eq!(config.chains, Some(vec!['A', 'C']));
        }

        #[test]
        fn load_rejects_unknown_fields_and_missing_cutoff() {
            let dir = tempdir().unwrap();

            let unknown = dir.path().join("unknown.toml");
            std::fs::write(&unknown, "cutoff = 10.0\nmodes = 3\n").unwrap();
            assert!(matches!(
                AnalysisConfig::load(&unknown),
                Err(ConfigError::Toml { .. })
            ));

            let missing = dir.path().join("missing.toml");
            std::fs::write(&missing, "num_modes = 3\n").unwrap();
            assert!(matches!(
                AnalysisConfig::load(&missing),
                Err(ConfigError::Toml { .. })
            ));
        }

        #[test]
        fn load_validates_after_parsing() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("bad.toml");
            std::fs::write(&path, "cutoff = 0.0\n").unwrap();
            assert!(matches!(
                AnalysisConfig::load(&path),
                Err(ConfigError::InvalidParameter { name: "cutoff", .. })
            ));
        }

        #[test]
        fn load_reports_missing_file_with_path() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("absent.toml");
            let err = AnalysisConfig::load(&path).unwrap_err();
            assert!(matches!(err, ConfigError::Io { .. }));
            assert!(err.to_string().contains("absent.toml"));
        }
    }
}
