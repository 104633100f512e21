//! # Mapping Module
//!
//! Reduces all-atom records to the coarse-grained bead graph consumed by the
//! network builder.
//!
//! ## Overview
//!
//! Atom records arrive in file order. Consecutive standard records sharing a
//! residue key and residue name form one residue; each residue is reduced with
//! the fixed rules in [`crate::core::topology::rules`]. Residues that cannot be
//! reduced are skipped and reported, never fatal.
//!
//! ## Key Components
//!
//! - [`mapper::CoarseGrainMapper`] - The per-residue reduction and bonding pass
//! - [`mapper::CoarseGrainedModel`] - Beads, per-atom membership and skip report
//! - [`mapper::BeadModel`] - One bead per residue, or the three-point model

pub mod mapper;
