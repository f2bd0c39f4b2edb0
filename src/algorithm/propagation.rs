use crate::algorithm::eligibility::{Hypothesis, classify};
use crate::algorithm::history::{History, HistoryEntry};
use crate::algorithm::partition::{Area, Partitioner};
use crate::io::configuration::MAX_AGE;
use crate::io::error::{InconsistencyKind, LocalInconsistency};
use crate::spatial::{Direction, Parcel};

/// A pending removal claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Flat index of the cell
    pub index: usize,
    /// End of the order the cell is claimed to leave from
    pub hypothesis: Hypothesis,
}

/// Counters describing the work a solve performed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Candidates popped from the stack
    pub steps: usize,
    /// Speculative newest placements tried
    pub guesses: usize,
    /// Rollbacks to a checkpoint
    pub rollbacks: usize,
    /// Partition passes run on a stall
    pub checks: usize,
}

impl WorkerStats {
    /// Add another worker's counters
    pub const fn absorb(&mut self, other: Self) {
        self.steps += other.steps;
        self.guesses += other.guesses;
        self.rollbacks += other.rollbacks;
        self.checks += other.checks;
    }
}

/// Elimination engine over one area of the arena
///
/// Pops a candidate, checks the claimed hypothesis against the cell and its
/// live neighbours, removes it and queues neighbours that became eligible.
/// Every committed removal is logged so it can be undone exactly.
pub struct Worker<'a> {
    pub(crate) parcel: &'a mut Parcel,
    pub(crate) area: Area,
    pub(crate) stack: Vec<Candidate>,
    pub(crate) history: History,
    pub(crate) partitioner: Partitioner,
    pub(crate) stats: WorkerStats,
}

impl<'a> Worker<'a> {
    /// Create a worker for `area` and queue every cell already eligible
    pub fn new(parcel: &'a mut Parcel, area: Area) -> Self {
        let capacity = area.size();
        let mut worker = Self {
            parcel,
            area,
            stack: Vec::with_capacity(capacity),
            history: History::with_capacity(capacity),
            partitioner: Partitioner::new(),
            stats: WorkerStats::default(),
        };

        let seeds: Vec<Candidate> = worker
            .area
            .iter()
            .filter_map(|index| {
                let cell = worker.parcel.cell(index)?;
                classify(cell).map(|hypothesis| Candidate { index, hypothesis })
            })
            .collect();
        for seed in seeds {
            worker.push(seed.index, seed.hypothesis);
        }

        worker
    }

    /// Queue a cell unless it is already pending
    pub fn push(&mut self, index: usize, hypothesis: Hypothesis) {
        if let Some(cell) = self.parcel.cell_mut(index) {
            if !cell.queued {
                cell.queued = true;
                self.stack.push(Candidate { index, hypothesis });
            }
        }
    }

    /// Take the most recently queued candidate
    pub fn pop(&mut self) -> Option<Candidate> {
        let candidate = self.stack.pop()?;
        if let Some(cell) = self.parcel.cell_mut(candidate.index) {
            cell.queued = false;
        }
        Some(candidate)
    }

    /// Drop every pending candidate
    pub fn clear_stack(&mut self) {
        for candidate in self.stack.drain(..) {
            if let Some(cell) = self.parcel.cell_mut(candidate.index) {
                cell.queued = false;
            }
        }
    }

    /// Number of pending candidates
    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    /// Validate and commit the removal of one cell
    ///
    /// Already removed cells are ignored. On success every live neighbour
    /// loses its link to the cell (and one age step for a newest removal),
    /// newly eligible neighbours are queued, and the removal is logged.
    ///
    /// # Errors
    ///
    /// Returns the reason the hypothesis is rejected; nothing is modified
    /// in that case
    pub fn eliminate(
        &mut self,
        index: usize,
        hypothesis: Hypothesis,
    ) -> Result<(), LocalInconsistency> {
        let Some(cell) = self.parcel.cell(index).copied() else {
            return Ok(());
        };
        if !cell.is_live() {
            return Ok(());
        }

        let newest = hypothesis.is_newest();
        if newest && cell.age & 3 != 1 {
            return Err(LocalInconsistency::new(
                index,
                InconsistencyKind::NewestMismatch,
            ));
        }
        if !newest && cell.age > cell.neighbor_count + 1 {
            return Err(LocalInconsistency::new(
                index,
                InconsistencyKind::OldestOverflow,
            ));
        }

        for dir in cell.neighbors() {
            let Some(neighbor) = self
                .parcel
                .neighbor_index(index, dir)
                .and_then(|next| self.parcel.cell(next))
            else {
                continue;
            };
            // Aged neighbours must still be explained by what stays live
            if (newest && neighbor.age == 1)
                || (neighbor.age < MAX_AGE
                    && neighbor.age > neighbor.neighbor_count + u8::from(newest))
            {
                return Err(LocalInconsistency::new(
                    index,
                    InconsistencyKind::NeighborConflict,
                ));
            }
        }

        for dir in cell.neighbors() {
            let Some(next) = self.parcel.neighbor_index(index, dir) else {
                continue;
            };
            let eligible = self.parcel.cell_mut(next).and_then(|neighbor| {
                if newest {
                    neighbor.age = neighbor.age.saturating_sub(1);
                }
                neighbor.unlink(dir.opposite());
                classify(neighbor)
            });
            if let Some(next_hypothesis) = eligible {
                self.push(next, next_hypothesis);
            }
        }

        if let Some(cell) = self.parcel.cell_mut(index) {
            cell.last_age = cell.age;
            cell.last_mask = cell.neighbor_mask;
            cell.age = 0;
            cell.neighbor_mask = 0;
            cell.neighbor_count = 0;
        }
        self.history.push(HistoryEntry::removal(index, hypothesis));
        Ok(())
    }

    /// Undo a logged removal, the exact inverse of [`Worker::eliminate`]
    pub fn restore(&mut self, entry: &HistoryEntry) {
        let Some(cell) = self.parcel.cell(entry.index).copied() else {
            return;
        };
        if cell.is_live() || entry.checkpoint {
            return;
        }

        let newest = entry.hypothesis.is_newest();
        for dir in Direction::in_mask(cell.last_mask) {
            let Some(next) = self.parcel.neighbor_index(entry.index, dir) else {
                continue;
            };
            if let Some(neighbor) = self.parcel.cell_mut(next) {
                if newest {
                    neighbor.age += 1;
                }
                neighbor.link(dir.opposite());
            }
        }

        if let Some(cell) = self.parcel.cell_mut(entry.index) {
            cell.age = cell.last_age;
            cell.neighbor_mask = cell.last_mask;
            cell.neighbor_count = cell.last_mask.count_ones() as u8;
        }
    }

    /// Removal log so far
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Consume the worker, keeping its removal log
    pub fn into_history(self) -> History {
        self.history
    }

    /// Work counters so far
    pub const fn stats(&self) -> WorkerStats {
        let mut stats = self.stats;
        stats.checks = self.partitioner.checks();
        stats
    }
}
