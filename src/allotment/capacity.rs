use serde::Serialize;

use crate::error::CapacityError;
use crate::models::{Room, SeatsPerBench};

/// Totals computed while checking capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityCheck {
    pub total_students: usize,
    pub total_benches: usize,
    pub total_capacity: usize,
}

/// Fails when `benches * seats_per_bench` cannot seat `total_students`.
pub fn validate(
    total_students: usize,
    rooms: &[Room],
    seats_per_bench: SeatsPerBench,
) -> Result<CapacityCheck, CapacityError> {
    let total_benches: usize = rooms.iter().map(|r| r.benches as usize).sum();
    let total_capacity = total_benches * seats_per_bench.get();

    if total_capacity < total_students {
        return Err(CapacityError { total_students, total_benches, total_capacity });
    }
    Ok(CapacityCheck { total_students, total_benches, total_capacity })
}
