//! # Topology Module
//!
//! Static knowledge about how each supported residue type is reduced to beads.
//!
//! ## Overview
//!
//! Every residue type maps to a fixed, small set of atom names whose mean position
//! defines the side-chain (or base) bead, and every residue family designates one
//! central atom that anchors backbone connectivity:
//!
//! - **Amino acids** - `CA` is central; side-chain bead atoms are one to two
//!   representative heavy atoms per residue type (none for glycine)
//! - **Nucleotides** - `C4'` (legacy `C4*`) is central; the base bead is the mean of
//!   the `C2`, `C4` and `C6` ring atoms
//!
//! The tables are compile-time perfect-hash maps and never change at runtime.
//!
//! ```
//! use gnm::core::topology::rules;
//!
//! let residue_type = rules::residue_type_for_name("SER").unwrap();
//! assert_eq!(rules::sidechain_bead_atoms(residue_type), &["CB", "OG"]);
//! ```

pub mod rules;
