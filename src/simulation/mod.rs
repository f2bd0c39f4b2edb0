//! Forward model of the build process
//!
//! The placement rule is what a reconstructed order is checked against,
//! and the generators produce maps that are solvable by construction.

/// Seeded map generators
pub mod generate;
/// Placement rule, replay and verification
pub mod placement;
