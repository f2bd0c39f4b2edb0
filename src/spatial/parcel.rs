//! Flat cell arena built from a height map
//!
//! Cells are addressed by row-major index. Adjacency is a 4-bit mask per cell
//! plus a fixed neighbour-index function, so no cell ever holds a reference
//! to another.

use crate::io::configuration::MAX_AGE;
use crate::spatial::heightmap::HeightMap;

/// One of the four axis-aligned neighbour directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Previous column
    Left = 0,
    /// Next column
    Right = 1,
    /// Previous row
    Top = 2,
    /// Next row
    Bottom = 3,
}

impl Direction {
    /// All directions in mask bit order
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Mask bit for this direction
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Directions whose bit is set in `mask`
    pub fn in_mask(mask: u8) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |dir| mask & dir.bit() != 0)
    }

    /// The direction pointing back
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }
}

/// Transient flood-fill marker used by the partitioner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Color {
    /// Not yet reached by the current colouring pass
    #[default]
    Clear,
    /// Reached by the flood fill in progress
    Visiting,
    /// Assigned to an already collected area
    Done,
}

/// A single lot in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Wrapped age class, 0 when absent or removed
    pub age: u8,
    /// Live neighbours, one bit per [`Direction`]
    pub neighbor_mask: u8,
    /// Cached popcount of `neighbor_mask`
    pub neighbor_count: u8,
    /// Whether the cell is pending in a work stack
    pub queued: bool,
    /// Partitioner marker
    pub color: Color,
    /// Age before the last removal, restored on rollback
    pub last_age: u8,
    /// Adjacency before the last removal, restored on rollback
    pub last_mask: u8,
}

impl Cell {
    /// Whether the cell is still unresolved
    pub const fn is_live(&self) -> bool {
        self.age > 0
    }

    /// Whether the neighbour in `dir` is live
    pub const fn has_neighbor(&self, dir: Direction) -> bool {
        self.neighbor_mask & dir.bit() != 0
    }

    /// Live neighbour directions
    pub fn neighbors(&self) -> impl Iterator<Item = Direction> + use<> {
        Direction::in_mask(self.neighbor_mask)
    }

    /// Record a live neighbour in `dir`
    pub const fn link(&mut self, dir: Direction) {
        if !self.has_neighbor(dir) {
            self.neighbor_mask |= dir.bit();
            self.neighbor_count += 1;
        }
    }

    /// Forget the neighbour in `dir`
    pub const fn unlink(&mut self, dir: Direction) {
        if self.has_neighbor(dir) {
            self.neighbor_mask &= !dir.bit();
            self.neighbor_count -= 1;
        }
    }
}

/// Rewrite a raw input height into the internal age class
///
/// Raw 1 is the wrapped maximum class, and raw 6 marks a cell known to be
/// freshly placed.
pub const fn rewrite_height(raw: u8) -> u8 {
    match raw {
        1 => MAX_AGE,
        6 => 1,
        height => height,
    }
}

/// Cell arena for one solve
#[derive(Debug, Clone)]
pub struct Parcel {
    rows: usize,
    cols: usize,
    occupied: usize,
    cells: Vec<Cell>,
}

impl Parcel {
    /// Build the arena, linking each cell to its live left and top neighbours
    ///
    /// Right and bottom links are filled when the neighbour itself is built.
    pub fn new(map: &HeightMap) -> Self {
        let rows = map.rows();
        let cols = map.cols();
        let mut parcel = Self {
            rows,
            cols,
            occupied: 0,
            cells: vec![Cell::default(); rows * cols],
        };

        for ((row, col), &raw) in map.heights().indexed_iter() {
            parcel.init_cell(row * cols + col, raw);
        }

        parcel
    }

    fn init_cell(&mut self, index: usize, raw: u8) {
        if raw == 0 {
            return;
        }
        self.occupied += 1;
        if let Some(cell) = self.cells.get_mut(index) {
            cell.age = rewrite_height(raw);
        }

        for dir in [Direction::Left, Direction::Top] {
            let Some(other) = self.neighbor_index(index, dir) else {
                continue;
            };
            let linked = match self.cells.get_mut(other) {
                Some(neighbor) if neighbor.is_live() => {
                    neighbor.link(dir.opposite());
                    true
                }
                _ => false,
            };
            if linked {
                if let Some(cell) = self.cells.get_mut(index) {
                    cell.link(dir);
                }
            }
        }
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells that held a building in the input
    pub const fn occupied(&self) -> usize {
        self.occupied
    }

    /// Total number of cells, occupied or not
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the arena has no cells at all
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Borrow a cell
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Mutably borrow a cell
    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells still unresolved
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_live()).count()
    }

    /// Index of the neighbour in `dir`, or `None` at the grid edge
    pub const fn neighbor_index(&self, index: usize, dir: Direction) -> Option<usize> {
        let col = index % self.cols;
        match dir {
            Direction::Left if col > 0 => Some(index - 1),
            Direction::Right if col + 1 < self.cols => Some(index + 1),
            Direction::Top if index >= self.cols => Some(index - self.cols),
            Direction::Bottom if index + self.cols < self.cells.len() => Some(index + self.cols),
            _ => None,
        }
    }

    /// Row and column of a flat index
    pub const fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}
