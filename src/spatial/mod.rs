//! Grid model: raw height maps and the cell arena the solver mutates
//!
//! This module contains spatial-related functionality including:
//! - Validation of raw height matrices
//! - Cell adjacency as 4-bit masks over a flat arena

/// Validated raw height matrix
pub mod heightmap;
/// Cell arena with neighbour masks
pub mod parcel;

pub use heightmap::HeightMap;
pub use parcel::{Cell, Direction, Parcel};
