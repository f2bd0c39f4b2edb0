//! Validated raw height matrix as read from a map or produced by a replay
//!
//! Heights use the wire encoding: 0 is an empty lot, 1..=4 are the wrapped
//! building heights, and 5 and 6 are accepted aliases of 1. Shape and range
//! are checked once here so the solver never sees malformed input.

use ndarray::Array2;

use crate::io::configuration::{MAX_GRID_CELLS, MAX_RAW_HEIGHT};
use crate::io::error::{Result, SolveError};

/// Rectangular matrix of raw building heights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    heights: Array2<u8>,
}

impl HeightMap {
    /// Build a map from row vectors
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid has no rows or no columns
    /// - Rows have differing lengths
    /// - A value is outside `0..=6`
    /// - The grid exceeds the supported cell count
    pub fn from_rows<T>(rows: &[Vec<T>]) -> Result<Self>
    where
        T: Copy + Into<i64>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(SolveError::MalformedGrid {
                reason: format!("grid must be non-empty, got {height}x{width}"),
            });
        }
        check_size(height, width)?;

        let mut heights = Array2::zeros((height, width));
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(SolveError::MalformedGrid {
                    reason: format!(
                        "row {row} has {} columns, expected {width}",
                        values.len()
                    ),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                let value: i64 = value.into();
                let raw = u8::try_from(value)
                    .ok()
                    .filter(|&raw| raw <= MAX_RAW_HEIGHT)
                    .ok_or(SolveError::InvalidHeight { row, col, value })?;
                if let Some(slot) = heights.get_mut([row, col]) {
                    *slot = raw;
                }
            }
        }

        Ok(Self { heights })
    }

    /// Wrap an existing matrix after validating its values
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is empty, too large, or holds a value above 6
    pub fn from_array(heights: Array2<u8>) -> Result<Self> {
        let (height, width) = heights.dim();
        if height == 0 || width == 0 {
            return Err(SolveError::MalformedGrid {
                reason: format!("grid must be non-empty, got {height}x{width}"),
            });
        }
        check_size(height, width)?;

        if let Some(((row, col), &value)) = heights
            .indexed_iter()
            .find(|(_, value)| **value > MAX_RAW_HEIGHT)
        {
            return Err(SolveError::InvalidHeight {
                row,
                col,
                value: i64::from(value),
            });
        }

        Ok(Self { heights })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.heights.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.heights.ncols()
    }

    /// Raw height at a position
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.heights.get([row, col]).copied()
    }

    /// Borrow the underlying matrix
    pub const fn heights(&self) -> &Array2<u8> {
        &self.heights
    }

    /// Count of cells holding a building
    pub fn occupied(&self) -> usize {
        self.heights.iter().filter(|&&height| height > 0).count()
    }

    /// Copy with 5 and 6 folded back to the canonical 1
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            heights: self.heights.mapv(normalize_height),
        }
    }

    /// Copy the heights out as row vectors
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.heights
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Fold the aliases 5 and 6 onto the canonical encoding 1
pub const fn normalize_height(height: u8) -> u8 {
    if height == 5 || height == 6 { 1 } else { height }
}

/// Check a grid shape against the supported cell count
///
/// # Errors
///
/// Returns [`SolveError::GridTooLarge`] if `rows * cols` overflows or exceeds
/// the limit
pub fn check_size(rows: usize, cols: usize) -> Result<()> {
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok(()),
        _ => Err(SolveError::GridTooLarge {
            rows,
            cols,
            max_cells: MAX_GRID_CELLS,
        }),
    }
}
