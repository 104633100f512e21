//! # Network Module
//!
//! Builds the Kirchhoff (graph Laplacian) matrix of the bead contact network.
//!
//! ## Overview
//!
//! Two beads are in contact when their squared distance is at most the squared
//! cutoff. Each contact contributes `-1` to both off-diagonal entries and `+1`
//! to both diagonal entries, so every row of the result sums to zero.
//!
//! ## Key Components
//!
//! - [`kirchhoff::KirchhoffMatrix`] - The symmetric connectivity matrix
//! - [`builder::NetworkBuilder`] - Cutoff plus contact strategy; produces the matrix
//! - [`builder::ContactStrategy`] - All-pairs test or k-d tree radius queries
//!
//! Both strategies yield identical matrices for the same positions and cutoff.

pub mod builder;
pub mod kirchhoff;
