//! Solver constants and runtime configuration defaults

/// Maximum age class; raw height 1 is rewritten to this value
pub const MAX_AGE: u8 = 5;

/// Largest raw height accepted in an input map (6 is a debug alias for a fresh cell)
pub const MAX_RAW_HEIGHT: u8 = 6;

// Flat indices are stored in history entries, keep them addressable
/// Maximum number of cells in a grid
pub const MAX_GRID_CELLS: usize = 1 << 24;

// Default values for configurable parameters
/// Pool size used by the parallel strategy
pub const DEFAULT_THREADS: usize = 4;

/// Pending areas held by the dispatcher before producers block
pub const AREA_QUEUE_CAPACITY: usize = 64;

/// Fixed seed for reproducible map generation
pub const DEFAULT_SEED: u64 = 42;

/// Fraction of cells kept by the random generator
pub const DEFAULT_FILL_RATIO: f64 = 1.0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Extension of map files picked up from a directory
pub const MAP_EXTENSION: &str = "map";
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_order";
/// Extension of written command lists
pub const OUTPUT_EXTENSION: &str = "txt";
