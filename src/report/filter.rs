use std::collections::BTreeSet;

use crate::models::BenchAssignment;

/// Benches matching a USN search and/or an exact room.
///
/// The USN query is a case-insensitive substring test against both seats; blank queries and
/// a `None` room match everything.
pub fn filter_plan<'a>(
    plan: &'a [BenchAssignment],
    usn_query: Option<&str>,
    room: Option<&str>,
) -> Vec<&'a BenchAssignment> {
    let needle = usn_query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());
    let room = room.map(str::trim).filter(|r| !r.is_empty());

    plan.iter()
        .filter(|a| room.map_or(true, |r| a.room == r))
        .filter(|a| match &needle {
            Some(n) => a.students().any(|s| s.usn.to_lowercase().contains(n.as_str())),
            None => true,
        })
        .collect()
}

/// Distinct rooms that appear in the plan, sorted.
pub fn room_names(plan: &[BenchAssignment]) -> Vec<String> {
    plan.iter()
        .map(|a| a.room.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
