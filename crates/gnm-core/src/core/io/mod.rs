//! Output for viewers and downstream tooling.
//!
//! Structure parsing is left to external readers that produce
//! [`crate::core::models::atom::AtomRecord`]s; this module only writes results.

pub mod profile;
