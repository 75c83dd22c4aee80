//! Seat allotment pipeline.
//!
//! The plan is a pure function of its inputs, built in three steps:
//! - `interleave`: mix the roster round-robin across branches
//! - `validate`: reject the run when benches × seats-per-bench cannot hold everyone
//! - `assign`: fill benches room by room, repairing same-branch bench partners locally
//!
//! Nothing is cached between runs; regenerating a plan means calling `generate_plan` again
//! with the original roster and rooms.

mod assign;
mod capacity;
mod interleave;

pub use assign::assign;
pub use capacity::{validate, CapacityCheck};
pub use interleave::interleave;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CapacityError;
use crate::models::{BenchAssignment, Room, SeatsPerBench, Student};

/// How a bench partner from seat 1's branch is repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwapPolicy {
    /// Swap with the very next queued student, without rechecking its branch.
    /// The bumped student may end up next to another student of its own branch.
    #[default]
    #[serde(rename = "lookahead")]
    SingleLookahead,
    /// Swap with the first later student of a different branch, if any.
    #[serde(rename = "scan")]
    ScanAhead,
}

impl SwapPolicy {
    /// Queue position to swap into seat 2, given seat 1 at `first` and the first
    /// unconsumed position `next`. `None` means the same-branch pair is accepted.
    pub(crate) fn swap_source(self, queue: &[Student], first: usize, next: usize) -> Option<usize> {
        match self {
            SwapPolicy::SingleLookahead => (next < queue.len()).then_some(next),
            SwapPolicy::ScanAhead => {
                let branch = queue[first].branch_key();
                (next..queue.len()).find(|&j| queue[j].branch_key() != branch)
            }
        }
    }
}

impl FromStr for SwapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lookahead" | "single" | "single-lookahead" => Ok(SwapPolicy::SingleLookahead),
            "scan" | "scan-ahead" => Ok(SwapPolicy::ScanAhead),
            other => Err(format!("unknown swap policy '{}'", other)),
        }
    }
}

/// Interleave, validate, then assign, using the default swap policy.
pub fn generate_plan(
    students: &[Student],
    rooms: &[Room],
    seats_per_bench: SeatsPerBench,
) -> Result<Vec<BenchAssignment>, CapacityError> {
    generate_plan_with_policy(students, rooms, seats_per_bench, SwapPolicy::default())
}

pub fn generate_plan_with_policy(
    students: &[Student],
    rooms: &[Room],
    seats_per_bench: SeatsPerBench,
    policy: SwapPolicy,
) -> Result<Vec<BenchAssignment>, CapacityError> {
    let mixed = interleave(students);
    let check = validate(mixed.len(), rooms, seats_per_bench)?;
    tracing::info!(
        students = check.total_students,
        benches = check.total_benches,
        capacity = check.total_capacity,
        ?policy,
        "generating seat plan"
    );
    Ok(assign(mixed, rooms, seats_per_bench, policy))
}
