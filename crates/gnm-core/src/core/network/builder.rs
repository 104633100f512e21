use super::kirchhoff::KirchhoffMatrix;
use crate::core::spatial::kdtree::{KdTree, SearchMode};
use crate::core::utils::geometry::squared_distance;
use itertools::Itertools;
use nalgebra::Point3;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Network has no beads")]
    EmptyNetwork,
    #[error("Network has no central beads")]
    NoCentralBeads,
    #[error("Invalid contact cutoff {0}: must be positive and finite")]
    InvalidCutoff(f64),
}

/// How contacts within the cutoff are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStrategy {
    /// Tests every unordered pair, O(N^2).
    BruteForce,
    /// Radius queries against a k-d tree over the positions.
    #[default]
    SpatialIndex,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkBuilder {
    cutoff: f64,
    strategy: ContactStrategy,
    search_mode: SearchMode,
}

impl NetworkBuilder {
    pub fn new(cutoff: f64) -> Result<Self, NetworkError> {
        if !(cutoff.is_finite() && cutoff > 0.0) {
            return Err(NetworkError::InvalidCutoff(cutoff));
        }
        Ok(Self {
            cutoff,
            strategy: ContactStrategy::default(),
            search_mode: SearchMode::default(),
        })
    }

    pub fn with_strategy(mut self, strategy: ContactStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_search_mode(mut self, search_mode: SearchMode) -> Self {
        self.search_mode = search_mode;
        self
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn strategy(&self) -> ContactStrategy {
        self.strategy
    }

    #[instrument(skip_all, name = "network_build", fields(strategy = ?self.strategy))]
    pub fn build(&self, positions: &[Point3<f64>]) -> Result<KirchhoffMatrix, NetworkError> {
        if positions.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }
        let start = Instant::now();
        let matrix = match self.strategy {
            ContactStrategy::BruteForce => build_brute_force(positions, self.cutoff),
            ContactStrategy::SpatialIndex => {
                build_indexed(positions, self.cutoff, self.search_mode)
            }
        };
        info!(
            beads = positions.len(),
            contacts = matrix.edge_count(),
            cutoff = self.cutoff,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Kirchhoff matrix built."
        );
        Ok(matrix)
    }
}

pub fn build_brute_force(positions: &[Point3<f64>], cutoff: f64) -> KirchhoffMatrix {
    let cutoff_sq = cutoff * cutoff;
    let mut matrix = KirchhoffMatrix::zeros(positions.len());
    for (i, j) in (0..positions.len()).tuple_combinations() {
        if squared_distance(&positions[i], &positions[j]) <= cutoff_sq {
            matrix.connect(i, j);
        }
    }
    matrix
}

pub fn build_indexed(
    positions: &[Point3<f64>],
    cutoff: f64,
    search_mode: SearchMode,
) -> KirchhoffMatrix {
    let cutoff_sq = cutoff * cutoff;
    let tree = KdTree::build(positions);
    let mut matrix = KirchhoffMatrix::zeros(positions.len());
    let mut processed: HashSet<(usize, usize)> = HashSet::new();

    for (i, position) in positions.iter().enumerate() {
        for neighbor in tree.nearest_with(position, cutoff_sq, search_mode) {
            let j = neighbor.index;
            if j == i {
                continue;
            }
            let pair = (i.min(j), i.max(j));
            if processed.insert(pair) {
                matrix.connect(pair.0, pair.1);
            }
        }
    }
    matrix
}
