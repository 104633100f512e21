//! # Workflows Module
//!
//! Public entry points tying the mapping, network and engine layers together.
//!
//! ## Overview
//!
//! - **One-shot analysis** ([`analyze`]) - Atoms in, beads, Kirchhoff matrix,
//!   modes and fluctuation profile out.
//! - **Interactive session** ([`interactive`]) - One loaded structure whose
//!   contact network can be edited, with a full recomputation after every edit.
//!
//! Both report failures through [`crate::engine::error::EngineError`]. Residues
//! that cannot be coarse-grained are not failures; they are listed on the
//! mapping result.

pub mod analyze;
pub mod interactive;
