use std::fmt;

use crate::algorithm::bitset::IndexBitset;
use crate::algorithm::eligibility::Hypothesis;
use crate::algorithm::history::History;
use crate::io::error::{Result, SolveError};
use crate::spatial::HeightMap;

/// A single placement at a 0-based grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Command {
    /// Target row
    pub row: usize,
    /// Target column
    pub col: usize,
}

impl Command {
    /// Create a placement command
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// Build the placement order from a complete removal log
///
/// Oldest removals were peeled off the front of the order and play in log
/// order; newest removals were peeled off the back and follow reversed.
///
/// # Errors
///
/// Returns an error if:
/// - A cell is removed twice, or a removed cell is empty in `map`
/// - The removals do not cover every occupied cell of `map`
pub fn extract_commands(history: &History, map: &HeightMap) -> Result<Vec<Command>> {
    let cols = map.cols();
    let expected = map.occupied();
    let mut seen = IndexBitset::new(map.rows() * cols);
    let mut oldest = Vec::with_capacity(expected);
    let mut newest = Vec::new();

    for entry in history.removals() {
        let command = Command::new(entry.index / cols, entry.index % cols);
        if !seen.insert(entry.index) {
            return Err(SolveError::DuplicateCommand {
                row: command.row,
                col: command.col,
            });
        }
        if map.get(command.row, command.col).unwrap_or(0) == 0 {
            return Err(SolveError::InvalidCommand {
                row: command.row,
                col: command.col,
                reason: "cell is empty in the input map",
            });
        }

        match entry.hypothesis {
            Hypothesis::Oldest => oldest.push(command),
            Hypothesis::Newest => newest.push(command),
        }
    }

    if seen.count() != expected {
        return Err(SolveError::IncompleteHistory {
            expected,
            found: seen.count(),
        });
    }

    oldest.extend(newest.into_iter().rev());
    Ok(oldest)
}
