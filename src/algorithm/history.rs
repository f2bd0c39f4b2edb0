use crate::algorithm::eligibility::Hypothesis;

/// One record in the removal log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Flat index of the cell
    pub index: usize,
    /// End of the order the cell was removed from
    ///
    /// For checkpoints this is the hypothesis to retry on rollback.
    pub hypothesis: Hypothesis,
    /// Whether this entry is a backtrack boundary rather than a removal
    pub checkpoint: bool,
}

impl HistoryEntry {
    /// A committed removal
    pub const fn removal(index: usize, hypothesis: Hypothesis) -> Self {
        Self {
            index,
            hypothesis,
            checkpoint: false,
        }
    }

    /// A guess boundary carrying the fallback hypothesis
    pub const fn checkpoint(index: usize, fallback: Hypothesis) -> Self {
        Self {
            index,
            hypothesis: fallback,
            checkpoint: true,
        }
    }
}

/// Removal log of one worker
///
/// Entries are only appended or truncated from the end. The mark counter
/// tracks how many checkpoints are still in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    marks: usize,
}

impl History {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            marks: 0,
        }
    }

    /// Create an empty log with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            marks: 0,
        }
    }

    /// Append an entry
    pub fn push(&mut self, entry: HistoryEntry) {
        if entry.checkpoint {
            self.marks += 1;
        }
        self.entries.push(entry);
    }

    /// Remove and return the last entry
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        let entry = self.entries.pop()?;
        if entry.checkpoint {
            self.marks = self.marks.saturating_sub(1);
        }
        Some(entry)
    }

    /// Append another log after this one
    pub fn append(&mut self, other: &Self) {
        self.entries.extend_from_slice(&other.entries);
        self.marks += other.marks;
    }

    /// Checkpoints currently in the log
    pub const fn marks(&self) -> usize {
        self.marks
    }

    /// All entries in log order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Committed removals in log order, checkpoints skipped
    pub fn removals(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter().filter(|entry| !entry.checkpoint)
    }

    /// Number of entries, checkpoints included
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
