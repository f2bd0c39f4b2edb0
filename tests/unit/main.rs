//! Unit tests mirrored on the source tree, one file per source file

mod algorithm;
mod simulation;
