use crate::io::configuration::MAX_AGE;
use crate::spatial::Cell;

/// Which end of the unresolved order a removal is claimed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hypothesis {
    /// First placement among the live neighbourhood
    Oldest,
    /// Most recent placement among the live neighbourhood
    Newest,
}

impl Hypothesis {
    /// The other hypothesis
    #[must_use]
    pub const fn complement(self) -> Self {
        match self {
            Self::Oldest => Self::Newest,
            Self::Newest => Self::Oldest,
        }
    }

    /// Whether this is the newest hypothesis
    pub const fn is_newest(self) -> bool {
        matches!(self, Self::Newest)
    }
}

/// Age fully explained by live neighbours, so no later neighbour is missing
pub const fn is_oldest(cell: &Cell) -> bool {
    cell.age > 1 && cell.age < MAX_AGE && cell.age >= cell.neighbor_count + 1
}

/// Fresh cell, or a wrapped cell that still has room to be the latest placement
pub const fn is_newest(cell: &Cell) -> bool {
    cell.age == 1 || (cell.age == MAX_AGE && cell.neighbor_count < 4)
}

/// Hypothesis a cell is immediately eligible for, preferring oldest
pub const fn classify(cell: &Cell) -> Option<Hypothesis> {
    if is_oldest(cell) {
        Some(Hypothesis::Oldest)
    } else if is_newest(cell) {
        Some(Hypothesis::Newest)
    } else {
        None
    }
}
