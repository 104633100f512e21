//! # Core Module
//!
//! Stateless data models and algorithms for coarse-grained network analysis.
//!
//! ## Overview
//!
//! The core layer takes normalized atom records, reduces them to beads, indexes
//! the bead positions and builds the Kirchhoff matrix of the contact network.
//! Nothing here holds session state or performs diagonalization; that is the
//! job of [`crate::engine`].
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Atom records, residue identity and types, beads
//! - **Residue Rules** ([`topology`]) - Static per-residue bead tables
//! - **Coarse-Graining** ([`mapping`]) - Atoms to bonded beads
//! - **Spatial Indexing** ([`spatial`]) - k-d tree radius queries
//! - **Contact Networks** ([`network`]) - Kirchhoff matrix construction
//! - **Output** ([`io`]) - Tabular export of fluctuation profiles
//! - **Utilities** ([`utils`]) - Geometry helpers

pub mod io;
pub mod mapping;
pub mod models;
pub mod network;
pub mod spatial;
pub mod topology;
pub mod utils;
