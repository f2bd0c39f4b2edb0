//! Error types and context management for solver operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Why a single elimination hypothesis (or a stalled branch) was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InconsistencyKind {
    /// A cell claimed as newest does not carry a fresh-placement age
    NewestMismatch,
    /// A cell claimed as oldest has a larger age than its live neighbours explain
    OldestOverflow,
    /// Removing the cell would leave a live neighbour in an impossible state
    NeighborConflict,
    /// A connected area has no cell at the maximum age class
    EyelessArea,
}

impl fmt::Display for InconsistencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NewestMismatch => "newest cell does not carry a fresh age",
            Self::OldestOverflow => "oldest cell age exceeds its live neighbours",
            Self::NeighborConflict => "removal breaks a neighbouring cell",
            Self::EyelessArea => "connected area has no maximum-age cell",
        };
        f.write_str(text)
    }
}

/// A rejected hypothesis, recovered by rolling back to the last checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalInconsistency {
    /// Flat index of the cell that triggered the rejection
    pub index: usize,
    /// What went wrong
    pub kind: InconsistencyKind,
}

impl LocalInconsistency {
    /// Create a rejection for the given cell
    pub const fn new(index: usize, kind: InconsistencyKind) -> Self {
        Self { index, kind }
    }
}

impl fmt::Display for LocalInconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at cell {}", self.kind, self.index)
    }
}

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolveError {
    /// Input matrix is not a proper rectangle
    MalformedGrid {
        /// Description of what's wrong with the grid shape
        reason: String,
    },

    /// Raw height outside the accepted `0..=6` range
    InvalidHeight {
        /// Row of the offending value
        row: usize,
        /// Column of the offending value
        col: usize,
        /// The rejected value
        value: i64,
    },

    /// Grid exceeds the addressable cell count
    GridTooLarge {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
        /// Maximum supported number of cells
        max_cells: usize,
    },

    /// The input has no valid reconstruction
    ///
    /// Raised when rollback exhausts every checkpoint, which includes
    /// contradictions found before any guess was made.
    GlobalInconsistency {
        /// The last local rejection before the history ran out
        cause: LocalInconsistency,
        /// Guesses made before giving up
        guesses: usize,
    },

    /// Final history does not cover every occupied cell exactly once
    IncompleteHistory {
        /// Number of originally occupied cells
        expected: usize,
        /// Number of removals recorded in the history
        found: usize,
    },

    /// The same cell appears twice in the reconstructed order
    DuplicateCommand {
        /// Row of the repeated cell
        row: usize,
        /// Column of the repeated cell
        col: usize,
    },

    /// Replaying the commands does not reproduce the input
    ReplayMismatch {
        /// Row of the first differing cell
        row: usize,
        /// Column of the first differing cell
        col: usize,
        /// Normalized input height
        expected: u8,
        /// Height produced by the replay
        found: u8,
    },

    /// A placement command cannot be applied to the grid
    InvalidCommand {
        /// Target row
        row: usize,
        /// Target column
        col: usize,
        /// Why the placement was refused
        reason: &'static str,
    },

    /// A pool thread panicked while solving an area
    WorkerPanicked {
        /// Pool slot of the failed thread
        worker: usize,
    },

    /// Map text could not be parsed
    MapParse {
        /// 1-based line number
        line: usize,
        /// Description of the failure
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Solver parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedGrid { reason } => write!(f, "Malformed grid: {reason}"),
            Self::InvalidHeight { row, col, value } => {
                write!(f, "Invalid height {value} at ({row}, {col}), expected 0..=6")
            }
            Self::GridTooLarge {
                rows,
                cols,
                max_cells,
            } => {
                write!(
                    f,
                    "Grid {rows}x{cols} exceeds the supported {max_cells} cells"
                )
            }
            Self::GlobalInconsistency { cause, guesses } => {
                write!(
                    f,
                    "Input has no valid reconstruction ({cause}, after {guesses} guesses)"
                )
            }
            Self::IncompleteHistory { expected, found } => {
                write!(
                    f,
                    "History covers {found} cells but {expected} are occupied"
                )
            }
            Self::DuplicateCommand { row, col } => {
                write!(f, "Cell ({row}, {col}) is placed more than once")
            }
            Self::ReplayMismatch {
                row,
                col,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Replay mismatch at ({row}, {col}): expected {expected}, found {found}"
                )
            }
            Self::InvalidCommand { row, col, reason } => {
                write!(f, "Cannot place at ({row}, {col}): {reason}")
            }
            Self::WorkerPanicked { worker } => {
                write!(f, "Solver thread {worker} panicked")
            }
            Self::MapParse { line, reason } => {
                write!(f, "Map parse error on line {line}: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolveError>;

/// Attaches a path and operation to file system failures
pub trait WithPath<T> {
    /// Wrap an I/O error with the path it concerns
    ///
    /// # Errors
    ///
    /// Propagates the original error as [`SolveError::FileSystem`]
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| SolveError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for SolveError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolveError {
    SolveError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a map parse error
pub fn parse_error(line: usize, reason: &impl ToString) -> SolveError {
    SolveError::MapParse {
        line,
        reason: reason.to_string(),
    }
}
