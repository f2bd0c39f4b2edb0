use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over flat cell indices
///
/// Provides O(1) membership testing for coverage checks on the removal log.
#[derive(Clone, Debug)]
pub struct IndexBitset {
    bits: BitVec,
}

impl IndexBitset {
    /// Create a bitset with no index present
    pub fn new(len: usize) -> Self {
        Self {
            bits: bitvec![0; len],
        }
    }

    /// Insert an index, returning whether it was newly added
    ///
    /// Out-of-range indices are never added.
    pub fn insert(&mut self, index: usize) -> bool {
        match self.bits.get_mut(index) {
            Some(mut bit) if !*bit => {
                bit.set(true);
                true
            }
            _ => false,
        }
    }

    /// Test index membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Test if no index is present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count indices in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Capacity in indices
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Extract all present indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for IndexBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexBitset({} cells: {:?})", self.count(), self.to_vec())
    }
}
