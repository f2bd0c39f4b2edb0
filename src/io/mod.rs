/// Command-line parsing and batch file processing
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Tracing subscriber setup
pub mod logging;
/// Text format for maps and command lists
pub mod mapfile;
/// Progress bars for batch solving
pub mod progress;
