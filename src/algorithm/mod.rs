/// Guess checkpoints, rollback and the search state machine
pub mod backtrack;
/// Compact index set for coverage checks
pub mod bitset;
/// Placement order extraction from the removal log
pub mod commands;
/// Thread pool hand-off of independent areas
pub mod dispatch;
/// Oldest/newest eligibility predicates
pub mod eligibility;
/// Top-level solver and configuration
pub mod executor;
/// Removal log with checkpoints
pub mod history;
/// Connected-component partitioning of stalled cells
pub mod partition;
/// Stack-driven constraint propagation worker
pub mod propagation;
