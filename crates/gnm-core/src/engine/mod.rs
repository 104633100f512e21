//! # Engine Module
//!
//! Numerical machinery and session state for Gaussian network model analysis.
//!
//! ## Overview
//!
//! The engine turns a Kirchhoff matrix into normal modes and fluctuation
//! profiles, and owns the reference/live matrix pair used for interactive
//! editing. Every computation is synchronous and recomputed in full; nothing
//! here updates a spectrum incrementally.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Analysis parameters, builder and TOML loading
//! - **Diagonalization** ([`solver`]) - The eigen-routine seam and zero-mode policy
//! - **Native Boundary** ([`native`]) - Adapter for flat-buffer single-precision solvers
//! - **Fluctuations** ([`fluctuation`]) - Mode combination and per-atom propagation
//! - **Editing** ([`edits`]) - Reference/live matrices and the edit ledger
//! - **Error Handling** ([`error`]) - The aggregate error of the public workflows

pub mod config;
pub mod edits;
pub mod error;
pub mod fluctuation;
pub mod native;
pub mod solver;
