//! # Core Models Module
//!
//! Data structures shared by every stage of the network-model pipeline.
//!
//! ## Key Components
//!
//! - [`atom`] - Normalized input atom records as produced by an external structure parser
//! - [`residue`] - Residue identity keys and the supported residue types
//! - [`bead`] - Coarse-grained beads, the nodes of the elastic network
//!
//! Atom records are consumed once by the coarse-grain mapper; beads are immutable
//! after mapping and their serials index the connectivity matrix.

pub mod atom;
pub mod bead;
pub mod residue;
