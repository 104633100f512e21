use thiserror::Error;

use super::config::ConfigError;
use super::edits::EditorError;
use super::fluctuation::FluctuationError;
use super::solver::SolverError;
use crate::core::network::builder::NetworkError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Network construction failed: {source}")]
    Network {
        #[from]
        source: NetworkError,
    },

    #[error("Normal-mode analysis failed: {source}")]
    Solver {
        #[from]
        source: SolverError,
    },

    #[error("Fluctuation computation failed: {source}")]
    Fluctuation {
        #[from]
        source: FluctuationError,
    },

    #[error("Network edit rejected: {source}")]
    Editor {
        #[from]
        source: EditorError,
    },
}
