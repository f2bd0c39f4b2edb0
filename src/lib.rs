//! Reconstruction of building orders from final height maps
//!
//! Buildings are placed one at a time on empty lots. A new building starts
//! at height 1 and raises each occupied 4-neighbour by one level, wrapping
//! from 4 back to 1. Given only the final heights, the solver peels the
//! build process backwards with constraint propagation, splits stalled
//! regions into independent areas, guesses with rollback where propagation
//! alone cannot decide, and emits a placement order that reproduces the map.

#![forbid(unsafe_code)]

/// Propagation, partitioning, backtracking and order extraction
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Forward placement rule and map generators
pub mod simulation;
/// Height maps and the cell arena
pub mod spatial;

pub use algorithm::commands::Command;
pub use algorithm::executor::{
    BuildOrderSolver, Solution, SolverConfig, Strategy, compute_build_order,
};
pub use io::error::{Result, SolveError};
pub use spatial::HeightMap;
