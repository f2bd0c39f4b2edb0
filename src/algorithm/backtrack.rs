use tracing::{debug, trace};

use crate::algorithm::eligibility::Hypothesis;
use crate::algorithm::history::HistoryEntry;
use crate::algorithm::partition::Area;
use crate::algorithm::propagation::Worker;
use crate::io::error::{LocalInconsistency, Result, SolveError};

/// How a worker reacts to a stall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Stop and hand every component back to the caller
    Exact,
    /// Keep going by guessing inside the smallest component
    Guess,
}

/// Current step of the search loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Pop and eliminate queued candidates
    Propagate,
    /// The stack is empty; split what is left
    Partition,
    /// A hypothesis failed; rewind to the last checkpoint
    Rollback(LocalInconsistency),
}

/// Result of running a worker to quiescence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every cell of the worker's area has been removed
    Solved,
    /// Exact propagation stalled on these independent components
    Stalled(Vec<Area>),
}

impl Worker<'_> {
    /// Checkpoint and try the eye of `area` as the newest placement
    ///
    /// Returns `false` if the area has no eye.
    pub fn guess(&mut self, area: &Area) -> bool {
        let Some(eye) = area.eye() else {
            return false;
        };
        self.stats.guesses += 1;
        let hypothesis = Hypothesis::Newest;
        self.history
            .push(HistoryEntry::checkpoint(eye, hypothesis.complement()));
        trace!(
            eye,
            area_size = area.size(),
            marks = self.history.marks(),
            "guess"
        );
        self.push(eye, hypothesis);
        true
    }

    /// Rewind to the most recent checkpoint and queue its fallback
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::GlobalInconsistency`] if the log holds no
    /// checkpoint, meaning no alternative is left to try
    pub fn rollback(&mut self, failure: LocalInconsistency) -> Result<()> {
        self.stats.rollbacks += 1;
        self.clear_stack();

        while let Some(entry) = self.history.pop() {
            if entry.checkpoint {
                trace!(
                    index = entry.index,
                    cause = %failure,
                    marks = self.history.marks(),
                    "retry"
                );
                self.push(entry.index, entry.hypothesis);
                return Ok(());
            }
            self.restore(&entry);
        }

        debug!(cause = %failure, guesses = self.stats.guesses, "no checkpoint left");
        Err(SolveError::GlobalInconsistency {
            cause: failure,
            guesses: self.stats.guesses,
        })
    }

    /// Run the search loop until the area is solved or exactly stalled
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::GlobalInconsistency`] if the area admits no
    /// build order
    pub fn run(&mut self, mode: SearchMode) -> Result<Outcome> {
        let mut phase = Phase::Propagate;
        loop {
            phase = match phase {
                Phase::Propagate => match self.pop() {
                    Some(candidate) => {
                        self.stats.steps += 1;
                        match self.eliminate(candidate.index, candidate.hypothesis) {
                            Ok(()) => Phase::Propagate,
                            Err(failure) => Phase::Rollback(failure),
                        }
                    }
                    None => Phase::Partition,
                },
                Phase::Partition => {
                    let collect_all = mode == SearchMode::Exact;
                    match self
                        .partitioner
                        .color_check(self.parcel, &self.area, collect_all)
                    {
                        Err(failure) => Phase::Rollback(failure),
                        Ok(areas) if areas.is_empty() => return Ok(Outcome::Solved),
                        Ok(areas) if collect_all => {
                            debug!(areas = areas.len(), "exact propagation stalled");
                            return Ok(Outcome::Stalled(areas));
                        }
                        Ok(areas) => {
                            if areas.last().is_some_and(|area| self.guess(area)) {
                                Phase::Propagate
                            } else {
                                return Ok(Outcome::Solved);
                            }
                        }
                    }
                }
                Phase::Rollback(failure) => {
                    self.rollback(failure)?;
                    Phase::Propagate
                }
            };
        }
    }
}
