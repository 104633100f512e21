//! # GNM Core Library
//!
//! Normal-mode dynamics of biomolecules with the Gaussian Network Model: atoms
//! are reduced to beads, beads within a cutoff form a contact network, and the
//! low-frequency modes of the network's Kirchhoff matrix give each residue a
//! mean-square fluctuation. The contact network can be edited interactively,
//! with a full recomputation after every edit.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless models (`AtomRecord`, `Bead`), the
//!   per-residue bead rules, the coarse-grain mapper, the k-d tree and the
//!   Kirchhoff matrix builders.
//!
//! - **[`engine`]: The Numerical Layer.** Configuration, the eigen-routine seam
//!   and zero-mode policy (`NormalModeSolver`), fluctuation aggregation and the
//!   reference/live matrix pair behind network editing.
//!
//! - **[`workflows`]: The Public API.** One-shot analysis (`analyze::run`) and
//!   the `InteractiveEditor` session that owns one loaded structure.
//!
//! Structure parsing, rendering and user interaction stay outside the crate:
//! callers hand in atom records and receive beads plus per-bead and per-atom
//! fluctuation arrays.

pub mod core;
pub mod engine;
pub mod workflows;
