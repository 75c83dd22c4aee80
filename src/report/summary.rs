use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{BenchAssignment, Room, Student};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanStatus {
    Generated,
    NotGenerated,
}

/// Headline numbers for the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total_students: usize,
    pub total_rooms: usize,
    /// Sum of room capacities, in benches.
    pub total_benches: usize,
    pub status: PlanStatus,
}

pub fn dashboard(students: &[Student], rooms: &[Room], plan: &[BenchAssignment]) -> DashboardMetrics {
    DashboardMetrics {
        total_students: students.len(),
        total_rooms: rooms.len(),
        total_benches: rooms.iter().map(|r| r.benches as usize).sum(),
        status: if plan.is_empty() { PlanStatus::NotGenerated } else { PlanStatus::Generated },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub key: String,
    pub count: usize,
}

fn counts<'a, I>(keys: I) -> Vec<CountRow>
where
    I: Iterator<Item = &'a str>,
{
    let mut m: BTreeMap<&str, usize> = BTreeMap::new();
    for k in keys {
        *m.entry(k).or_default() += 1;
    }
    m.into_iter().map(|(k, c)| CountRow { key: k.to_string(), count: c }).collect()
}

/// Seated students per room, sorted by room name.
pub fn room_summary(plan: &[BenchAssignment]) -> Vec<CountRow> {
    counts(plan.iter().flat_map(|a| a.students().map(move |_| a.room.as_str())))
}

/// Seated students per branch, sorted by branch.
pub fn branch_summary(plan: &[BenchAssignment]) -> Vec<CountRow> {
    counts(plan.iter().flat_map(|a| a.students()).map(|s| s.branch_key()))
}
