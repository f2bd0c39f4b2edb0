use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;

use tracing::debug;

use crate::algorithm::backtrack::SearchMode;
use crate::algorithm::history::History;
use crate::algorithm::partition::Area;
use crate::algorithm::propagation::{Worker, WorkerStats};
use crate::io::error::{Result, SolveError};
use crate::spatial::Parcel;

/// Merged output of solving a batch of areas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaSolution {
    /// Concatenated removal logs
    pub history: History,
    /// Summed work counters
    pub stats: WorkerStats,
}

impl AreaSolution {
    fn absorb(&mut self, history: &History, stats: WorkerStats) {
        self.history.append(history);
        self.stats.absorb(stats);
    }
}

#[derive(Debug, Default)]
struct QueueState {
    pending: Vec<Area>,
    closed: bool,
}

/// Bounded producer/consumer queue of areas awaiting a thread
#[derive(Debug)]
pub struct AreaQueue {
    state: Mutex<QueueState>,
    changed: Condvar,
    capacity: usize,
}

impl AreaQueue {
    /// Create a queue holding at most `capacity` pending areas (at least one)
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            changed: Condvar::new(),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an area, blocking while the queue is full
    ///
    /// Returns `false` if the queue was closed and the area dropped.
    pub fn submit(&self, area: Area) -> bool {
        let guard = self.lock();
        let mut state = self
            .changed
            .wait_while(guard, |state| {
                !state.closed && state.pending.len() >= self.capacity
            })
            .unwrap_or_else(PoisonError::into_inner);
        if state.closed {
            return false;
        }
        state.pending.push(area);
        drop(state);
        self.changed.notify_all();
        true
    }

    /// Take an area, blocking until one is available or the queue closes
    pub fn take(&self) -> Option<Area> {
        let guard = self.lock();
        let mut state = self
            .changed
            .wait_while(guard, |state| !state.closed && state.pending.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        let area = state.pending.pop();
        drop(state);
        if area.is_some() {
            self.changed.notify_all();
        }
        area
    }

    /// Wait until every pending area has been taken, then close
    pub fn drain_and_close(&self) {
        let guard = self.lock();
        let mut state = self
            .changed
            .wait_while(guard, |state| !state.closed && !state.pending.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        state.closed = true;
        drop(state);
        self.changed.notify_all();
    }

    /// Close immediately, discarding pending areas
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        state.pending.clear();
        drop(state);
        self.changed.notify_all();
    }

    /// Number of areas waiting for a thread
    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Whether no area is waiting
    pub fn is_empty(&self) -> bool {
        self.lock().pending.is_empty()
    }

    /// Whether the queue accepts no more areas
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

/// Closes the queue if the owning thread unwinds, so nobody waits forever
struct CloseOnPanic<'q>(&'q AreaQueue);

impl Drop for CloseOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.close();
        }
    }
}

/// Solve areas one after another on the shared arena
///
/// # Errors
///
/// Returns [`SolveError::GlobalInconsistency`] if any area has no build order
pub fn solve_sequential(parcel: &mut Parcel, areas: Vec<Area>) -> Result<AreaSolution> {
    let mut solution = AreaSolution::default();
    for area in areas {
        let mut worker = Worker::new(parcel, area);
        worker.run(SearchMode::Guess)?;
        let stats = worker.stats();
        solution.absorb(worker.history(), stats);
    }
    Ok(solution)
}

/// Solve areas on a pool of `threads` scoped threads
///
/// Each thread clones the arena once and only writes cells of the areas it
/// takes; areas share no live edge, so the clones never need reconciling.
/// Local logs are appended to the shared result under a separate lock.
///
/// # Errors
///
/// Returns [`SolveError::GlobalInconsistency`] if any area has no build
/// order, or [`SolveError::WorkerPanicked`] if a pool thread panics
pub fn solve_parallel(
    parcel: &Parcel,
    areas: Vec<Area>,
    threads: usize,
    capacity: usize,
) -> Result<AreaSolution> {
    let threads = threads.min(areas.len()).max(1);
    let queue = AreaQueue::new(capacity);
    let merged = Mutex::new(AreaSolution::default());

    thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|id| {
                let queue = &queue;
                let merged = &merged;
                scope.spawn(move || consume(id, parcel, queue, merged))
            })
            .collect();

        for area in areas {
            if !queue.submit(area) {
                break;
            }
        }
        queue.drain_and_close();

        let mut failure = None;
        for (id, handle) in handles.into_iter().enumerate() {
            let result = handle
                .join()
                .unwrap_or_else(|_| Err(SolveError::WorkerPanicked { worker: id }));
            if let Err(error) = result {
                failure.get_or_insert(error);
            }
        }
        failure.map_or(Ok(()), Err)
    })?;

    Ok(merged.into_inner().unwrap_or_else(PoisonError::into_inner))
}

fn consume(
    id: usize,
    parcel: &Parcel,
    queue: &AreaQueue,
    merged: &Mutex<AreaSolution>,
) -> Result<()> {
    let _guard = CloseOnPanic(queue);
    let mut local = parcel.clone();

    while let Some(area) = queue.take() {
        debug!(worker = id, size = area.size(), "solving area");
        let mut worker = Worker::new(&mut local, area);
        if let Err(error) = worker.run(SearchMode::Guess) {
            queue.close();
            return Err(error);
        }
        let stats = worker.stats();
        let history = worker.into_history();

        merged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .absorb(&history, stats);
    }

    Ok(())
}
